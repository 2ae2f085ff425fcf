use serde::{Deserialize, Serialize};

use quill_kernel::validation::{RangeRule, Validate, ValidationError, Violations};

const PRIORITY: RangeRule = RangeRule::new("priority", 1, 5);

/// Request body for create and update; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPayload {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// 1 to 5 inclusive.
    pub priority: i64,
    pub complete: bool,
}

impl Validate for TodoPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::new();
        PRIORITY.check(self.priority, &mut violations);
        violations.finish()
    }
}

/// A row of the `todos` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub priority: i64,
    pub complete: bool,
}

impl Todo {
    pub fn from_payload(id: i64, payload: TodoPayload) -> Self {
        Self {
            id,
            title: payload.title,
            description: payload.description,
            priority: payload.priority,
            complete: payload.complete,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTodos {
    pub todos_to_return: Option<i64>,
}
