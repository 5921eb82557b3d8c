use super::TodoId;
use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Todo {
    #[schema(value_type = i32)]
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub deadline_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Todo {
    /// Whole days from `now` until the deadline, rounded towards negative
    /// infinity: a deadline one hour ago is day `-1`, one in 23 hours is day `0`.
    pub(crate) fn days_until_deadline(&self, now: NaiveDateTime) -> Option<i64> {
        self.deadline_at.map(|deadline| {
            let delta = deadline - now;
            let days = delta.num_days();
            if delta < TimeDelta::days(days) {
                days - 1
            } else {
                days
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub deadline_at: Option<NaiveDateTime>,
}

impl NewTodo {
    pub(crate) fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
            deadline_at: None,
        }
    }
}

/// Replace-if-present patch. The outer `Option` of nullable fields tells
/// whether the key was sent, the inner one carries an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub deadline_at: Option<Option<NaiveDateTime>>,
}
