use chrono::NaiveDateTime;

use crate::handlers::ListParams;

use super::Todo;

/// Selection applied to the full todo list. Variants are exclusive: a
/// deadline window takes precedence over the completion flag.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TodoFilter {
    DeadlineWithin { days: i64 },
    Completed(bool),
    All,
}

impl From<ListParams> for TodoFilter {
    fn from(params: ListParams) -> Self {
        match params {
            ListParams::Window { days } => TodoFilter::DeadlineWithin { days },
            ListParams::Completed { value } => TodoFilter::Completed(value),
            ListParams::All => TodoFilter::All,
        }
    }
}

impl TodoFilter {
    pub fn matches(&self, todo: &Todo, now: NaiveDateTime) -> bool {
        match self {
            TodoFilter::DeadlineWithin { days } => todo
                .days_until_deadline(now)
                .is_some_and(|left| left <= *days),
            TodoFilter::Completed(value) => todo.completed == *value,
            TodoFilter::All => true,
        }
    }
}
