use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::StorageError;

/// Datastore-assigned todo identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct TodoId(i32);

impl TodoId {
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TodoId {
    type Err = StorageError;

    // Only unsigned decimal ids are addressable from a path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: u32 = s.parse()?;
        Ok(Self(i32::try_from(raw)?))
    }
}

impl From<i32> for TodoId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<TodoId> for i32 {
    fn from(value: TodoId) -> Self {
        value.0
    }
}
