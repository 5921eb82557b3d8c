use chrono::{SubsecRound, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;

use crate::storage::{NewTodo, Todo, UpdateTodo};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub deadline_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        // microseconds, so sqlite and postgres hand back the same value
        let now = Utc::now().naive_utc().trunc_subsecs(6);
        if insert {
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}

impl From<NewTodo> for ActiveModel {
    fn from(value: NewTodo) -> Self {
        Self {
            title: Set(value.title),
            description: Set(value.description),
            completed: Set(value.completed),
            deadline_at: Set(value.deadline_at),
            ..Default::default()
        }
    }
}

impl ActiveModel {
    pub(crate) fn apply(&mut self, patch: UpdateTodo) {
        if let Some(title) = patch.title {
            self.title = Set(title);
        }
        if let Some(description) = patch.description {
            self.description = Set(description);
        }
        if let Some(completed) = patch.completed {
            self.completed = Set(completed);
        }
        if let Some(deadline_at) = patch.deadline_at {
            self.deadline_at = Set(deadline_at);
        }
    }
}

impl From<Model> for Todo {
    fn from(value: Model) -> Self {
        Self {
            id: value.id.into(),
            title: value.title,
            description: value.description,
            completed: value.completed,
            deadline_at: value.deadline_at,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
