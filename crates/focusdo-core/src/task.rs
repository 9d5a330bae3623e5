//! Task list entities.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(ValidationError::InvalidValue {
                field: "priority".into(),
                message: format!("expected high|medium|low, got '{other}'"),
            }),
        }
    }
}

/// One entry in the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    pub id: Uuid,
    pub title: String,
    pub is_completed: bool,
    #[serde(default)]
    pub priority: Priority,
}

impl TaskItem {
    /// Create a task with a fresh id. Blank titles are rejected.
    pub fn new(title: impl Into<String>, priority: Priority) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            is_completed: false,
            priority,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_defaults() {
        let task = TaskItem::new("Write report", Priority::Medium).unwrap();
        assert!(!task.is_completed);
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn blank_title_rejected() {
        assert!(matches!(
            TaskItem::new("   ", Priority::Low),
            Err(ValidationError::EmptyTitle)
        ));
        assert!(TaskItem::new("", Priority::Low).is_err());
    }

    #[test]
    fn priority_parses_from_str() {
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
    }
}
