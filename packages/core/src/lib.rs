// ABOUTME: Core types, validation, and filter selection for the todo service
// ABOUTME: Foundational package shared by the storage and API layers

pub mod filter;
pub mod types;
pub mod validation;

// Re-export main types
pub use types::{NewTodo, Todo, TodoCategory, TodoPriority, TodoResponse, TodoStatus};

// Re-export filter selection
pub use filter::{FilterCombination, TodoFilter};

// Re-export validation
pub use validation::{
    normalize_due_date, parse_due_date, parse_todo_id, AgendaQuery, CreateTodoRequest, TodoQuery,
    TodoUpdate, UpdateTodoRequest, ValidationError, DATE_FORMAT,
};
