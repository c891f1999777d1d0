// ABOUTME: Todo type definitions
// ABOUTME: Stored record, enumerations, and the external response shape

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validation::{normalize_due_date, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum TodoStatus {
    #[serde(rename = "TO DO")]
    #[sqlx(rename = "TO DO")]
    ToDo,
    #[serde(rename = "IN PROGRESS")]
    #[sqlx(rename = "IN PROGRESS")]
    InProgress,
    #[serde(rename = "DONE")]
    #[sqlx(rename = "DONE")]
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TodoPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TodoCategory {
    Work,
    Home,
    Learning,
}

impl TodoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToDo => "TO DO",
            Self::InProgress => "IN PROGRESS",
            Self::Done => "DONE",
        }
    }
}

impl TodoPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl TodoCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "WORK",
            Self::Home => "HOME",
            Self::Learning => "LEARNING",
        }
    }
}

// Membership is exact: no trimming, no case folding.
impl FromStr for TodoStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TO DO" => Ok(Self::ToDo),
            "IN PROGRESS" => Ok(Self::InProgress),
            "DONE" => Ok(Self::Done),
            _ => Err(ValidationError::InvalidStatus),
        }
    }
}

impl FromStr for TodoPriority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HIGH" => Ok(Self::High),
            "MEDIUM" => Ok(Self::Medium),
            "LOW" => Ok(Self::Low),
            _ => Err(ValidationError::InvalidPriority),
        }
    }
}

impl FromStr for TodoCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WORK" => Ok(Self::Work),
            "HOME" => Ok(Self::Home),
            "LEARNING" => Ok(Self::Learning),
            _ => Err(ValidationError::InvalidCategory),
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TodoPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TodoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of the `todo` table. `due_date` is the stored text, served
/// verbatim so responses show exactly what agenda lookups compare against.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Todo {
    pub id: i64,
    pub todo: String,
    pub priority: TodoPriority,
    pub status: TodoStatus,
    pub category: TodoCategory,
    pub due_date: String,
}

/// Fully validated input for inserting a todo
#[derive(Debug, Clone, PartialEq)]
pub struct NewTodo {
    pub id: i64,
    pub todo: String,
    pub priority: TodoPriority,
    pub status: TodoStatus,
    pub category: TodoCategory,
    pub due_date: NaiveDate,
}

/// External representation of a todo; `due_date` is exposed as `dueDate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: i64,
    pub todo: String,
    pub priority: TodoPriority,
    pub status: TodoStatus,
    pub category: TodoCategory,
    #[serde(rename = "dueDate")]
    pub due_date: String,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            todo: todo.todo,
            priority: todo.priority,
            status: todo.status,
            category: todo.category,
            due_date: todo.due_date,
        }
    }
}

impl From<NewTodo> for Todo {
    fn from(input: NewTodo) -> Self {
        Self {
            id: input.id,
            todo: input.todo,
            priority: input.priority,
            status: input.status,
            category: input.category,
            due_date: normalize_due_date(input.due_date),
        }
    }
}
