// ABOUTME: Request validation for todo queries and bodies
// ABOUTME: Enum membership, due date parsing, and first-match field selection

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::filter::TodoFilter;
use crate::types::{NewTodo, TodoCategory, TodoPriority, TodoStatus};

/// Normalized storage format for due dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_ONLY_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%b %d %Y", "%b %d, %Y"];

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Rejections produced before any statement reaches storage.
/// The display strings are the exact response bodies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid Todo Status")]
    InvalidStatus,

    #[error("Invalid Todo Priority")]
    InvalidPriority,

    #[error("Invalid Todo Category")]
    InvalidCategory,

    #[error("Invalid Due Date")]
    InvalidDueDate,

    #[error("Invalid Todo Text")]
    InvalidText,

    #[error("Invalid Todo Id")]
    InvalidId,

    #[error("No Updatable Field Provided")]
    NoUpdatableField,
}

/// Parse a calendar date from any of the accepted input spellings
pub fn parse_due_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();

    for format in DATE_ONLY_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Ok(date);
        }
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.date_naive());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(timestamp.date());
        }
    }

    Err(ValidationError::InvalidDueDate)
}

/// Format a date the way it is stored and returned
pub fn normalize_due_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Path identifiers must be integers; matching is exact, no padding allowed
pub fn parse_todo_id(raw: &str) -> Result<i64, ValidationError> {
    raw.parse::<i64>().map_err(|_| ValidationError::InvalidId)
}

/// Appends a repeated query value the way a list is rendered as text,
/// so `status=DONE&status=HOME` becomes `"DONE,HOME"` and fails membership
fn push_query_value(slot: &mut Option<String>, value: String) {
    match slot {
        Some(existing) => {
            existing.push(',');
            existing.push_str(&value);
        }
        None => *slot = Some(value),
    }
}

/// Query string of `GET /todos/`
#[derive(Debug, Clone, Default)]
pub struct TodoQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub search_q: Option<String>,
}

/// Built from raw key/value pairs so repeated keys reach validation
/// instead of failing extraction. Unknown keys are ignored.
impl FromIterator<(String, String)> for TodoQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "status" => &mut query.status,
                "priority" => &mut query.priority,
                "category" => &mut query.category,
                "search_q" => &mut query.search_q,
                _ => continue,
            };
            push_query_value(slot, value);
        }
        query
    }
}

impl TodoQuery {
    /// Only the first present of status, priority, category is checked.
    /// The remaining filters pass through unvalidated and simply fail to
    /// match any row when they are not members of their enumeration.
    pub fn validate(self) -> Result<TodoFilter, ValidationError> {
        if let Some(status) = &self.status {
            status.parse::<TodoStatus>()?;
        } else if let Some(priority) = &self.priority {
            priority.parse::<TodoPriority>()?;
        } else if let Some(category) = &self.category {
            category.parse::<TodoCategory>()?;
        }

        Ok(TodoFilter {
            status: self.status,
            priority: self.priority,
            category: self.category,
            search_q: self.search_q.unwrap_or_default(),
        })
    }
}

/// Query string of `GET /agenda/`
#[derive(Debug, Clone, Default)]
pub struct AgendaQuery {
    pub date: Option<String>,
}

impl FromIterator<(String, String)> for AgendaQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            if key == "date" {
                push_query_value(&mut query.date, value);
            }
        }
        query
    }
}

impl AgendaQuery {
    pub fn validate(&self) -> Result<NaiveDate, ValidationError> {
        let raw = self.date.as_deref().ok_or(ValidationError::InvalidDueDate)?;
        parse_due_date(raw)
    }
}

/// Body of `POST /todos/`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodoRequest {
    pub id: i64,
    pub todo: String,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<String>,
}

impl CreateTodoRequest {
    /// Every field is checked, in the order status, priority, category, due date
    pub fn validate(self) -> Result<NewTodo, ValidationError> {
        let status = self
            .status
            .as_deref()
            .ok_or(ValidationError::InvalidStatus)?
            .parse::<TodoStatus>()?;
        let priority = self
            .priority
            .as_deref()
            .ok_or(ValidationError::InvalidPriority)?
            .parse::<TodoPriority>()?;
        let category = self
            .category
            .as_deref()
            .ok_or(ValidationError::InvalidCategory)?
            .parse::<TodoCategory>()?;
        let due_date =
            parse_due_date(self.due_date.as_deref().ok_or(ValidationError::InvalidDueDate)?)?;

        Ok(NewTodo {
            id: self.id,
            todo: self.todo,
            priority,
            status,
            category,
            due_date,
        })
    }
}

/// Distinguishes a key sent as `null` (`Some(None)`) from an absent key (`None`)
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Body of `PUT /todos/:id`. A key present with a `null` value still counts
/// as present for first-match selection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default, deserialize_with = "present")]
    pub status: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub priority: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub category: Option<Option<String>>,
    #[serde(default, rename = "dueDate", deserialize_with = "present")]
    pub due_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub todo: Option<Option<String>>,
}

/// The single column an update request resolves to
#[derive(Debug, Clone, PartialEq)]
pub enum TodoUpdate {
    Status(TodoStatus),
    Priority(TodoPriority),
    Category(TodoCategory),
    DueDate(NaiveDate),
    Text(String),
}

impl TodoUpdate {
    /// Response body sent once the column has been written
    pub fn success_message(&self) -> &'static str {
        match self {
            Self::Status(_) => "Status Updated",
            Self::Priority(_) => "Priority Updated",
            Self::Category(_) => "Category Updated",
            Self::DueDate(_) => "Due Date Updated",
            Self::Text(_) => "Todo Updated",
        }
    }
}

impl TryFrom<UpdateTodoRequest> for TodoUpdate {
    type Error = ValidationError;

    /// First present field wins: status, priority, category, dueDate, todo.
    /// Later fields are neither validated nor applied; a `null` first field
    /// is rejected with that field's error.
    fn try_from(request: UpdateTodoRequest) -> Result<Self, Self::Error> {
        if let Some(status) = request.status {
            let status = status.ok_or(ValidationError::InvalidStatus)?;
            return Ok(Self::Status(status.parse()?));
        }
        if let Some(priority) = request.priority {
            let priority = priority.ok_or(ValidationError::InvalidPriority)?;
            return Ok(Self::Priority(priority.parse()?));
        }
        if let Some(category) = request.category {
            let category = category.ok_or(ValidationError::InvalidCategory)?;
            return Ok(Self::Category(category.parse()?));
        }
        if let Some(due_date) = request.due_date {
            let due_date = due_date.ok_or(ValidationError::InvalidDueDate)?;
            return Ok(Self::DueDate(parse_due_date(&due_date)?));
        }
        if let Some(text) = request.todo {
            return Ok(Self::Text(text.ok_or(ValidationError::InvalidText)?));
        }
        Err(ValidationError::NoUpdatableField)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case("2021-01-01", ymd(2021, 1, 1))]
    #[case("2021-1-5", ymd(2021, 1, 5))]
    #[case("2021/12/31", ymd(2021, 12, 31))]
    #[case("04/02/2021", ymd(2021, 4, 2))]
    #[case("2021-04-02T10:30:00Z", ymd(2021, 4, 2))]
    #[case("2021-04-02T10:30:00", ymd(2021, 4, 2))]
    #[case("Apr 2 2021", ymd(2021, 4, 2))]
    #[case("April 2, 2021", ymd(2021, 4, 2))]
    #[case(" 2021-01-01 ", ymd(2021, 1, 1))]
    fn test_parse_due_date_accepts(#[case] raw: &str, #[case] expected: NaiveDate) {
        assert_eq!(parse_due_date(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("not a date")]
    #[case("2021-02-30")]
    #[case("2021-13-01")]
    #[case("2021-01-01garbage")]
    fn test_parse_due_date_rejects(#[case] raw: &str) {
        assert_eq!(parse_due_date(raw), Err(ValidationError::InvalidDueDate));
    }

    #[test]
    fn test_normalize_due_date_pads() {
        let date = parse_due_date("2021-1-5").unwrap();
        assert_eq!(normalize_due_date(date), "2021-01-05");
    }

    #[test]
    fn test_error_messages_are_response_bodies() {
        assert_eq!(ValidationError::InvalidStatus.to_string(), "Invalid Todo Status");
        assert_eq!(ValidationError::InvalidPriority.to_string(), "Invalid Todo Priority");
        assert_eq!(ValidationError::InvalidCategory.to_string(), "Invalid Todo Category");
        assert_eq!(ValidationError::InvalidDueDate.to_string(), "Invalid Due Date");
    }

    #[rstest]
    #[case(Some("PENDING"), None, None, ValidationError::InvalidStatus)]
    #[case(None, Some("URGENT"), None, ValidationError::InvalidPriority)]
    #[case(None, None, Some("GARDEN"), ValidationError::InvalidCategory)]
    fn test_query_rejects_invalid_enum(
        #[case] status: Option<&str>,
        #[case] priority: Option<&str>,
        #[case] category: Option<&str>,
        #[case] expected: ValidationError,
    ) {
        let query = TodoQuery {
            status: status.map(String::from),
            priority: priority.map(String::from),
            category: category.map(String::from),
            search_q: None,
        };
        assert_eq!(query.validate().unwrap_err(), expected);
    }

    #[test]
    fn test_query_only_checks_first_present_field() {
        let query = TodoQuery {
            status: Some("DONE".to_string()),
            priority: Some("URGENT".to_string()),
            category: Some("GARDEN".to_string()),
            search_q: None,
        };

        let filter = query.validate().unwrap();
        assert_eq!(filter.priority.as_deref(), Some("URGENT"));
        assert_eq!(filter.search_q, "");
    }

    #[test]
    fn test_query_first_field_failure_wins() {
        let query = TodoQuery {
            status: None,
            priority: Some("URGENT".to_string()),
            category: Some("WORK".to_string()),
            search_q: Some("milk".to_string()),
        };
        assert_eq!(query.validate().unwrap_err(), ValidationError::InvalidPriority);
    }

    #[test]
    fn test_agenda_requires_date() {
        assert_eq!(
            AgendaQuery::default().validate(),
            Err(ValidationError::InvalidDueDate)
        );
        let query = AgendaQuery {
            date: Some("2021-12-12".to_string()),
        };
        assert_eq!(query.validate().unwrap(), ymd(2021, 12, 12));
    }

    fn create_request() -> CreateTodoRequest {
        CreateTodoRequest {
            id: 1,
            todo: "Buy milk".to_string(),
            priority: Some("HIGH".to_string()),
            status: Some("TO DO".to_string()),
            category: Some("HOME".to_string()),
            due_date: Some("2021-1-1".to_string()),
        }
    }

    #[test]
    fn test_create_validates_and_normalizes() {
        let todo = create_request().validate().unwrap();
        assert_eq!(todo.status, TodoStatus::ToDo);
        assert_eq!(todo.priority, TodoPriority::High);
        assert_eq!(todo.category, TodoCategory::Home);
        assert_eq!(normalize_due_date(todo.due_date), "2021-01-01");
    }

    #[test]
    fn test_create_reports_status_before_priority() {
        let mut request = create_request();
        request.status = Some("LATER".to_string());
        request.priority = Some("URGENT".to_string());
        assert_eq!(request.validate().unwrap_err(), ValidationError::InvalidStatus);
    }

    #[test]
    fn test_create_missing_fields_are_invalid() {
        let mut request = create_request();
        request.category = None;
        assert_eq!(request.validate().unwrap_err(), ValidationError::InvalidCategory);

        let mut request = create_request();
        request.due_date = None;
        assert_eq!(request.validate().unwrap_err(), ValidationError::InvalidDueDate);
    }

    #[test]
    fn test_update_first_match_status_over_priority() {
        let request = UpdateTodoRequest {
            status: Some(Some("DONE".to_string())),
            priority: Some(Some("not validated".to_string())),
            ..Default::default()
        };
        let update = TodoUpdate::try_from(request).unwrap();
        assert_eq!(update, TodoUpdate::Status(TodoStatus::Done));
        assert_eq!(update.success_message(), "Status Updated");
    }

    #[test]
    fn test_update_due_date_is_normalized() {
        let request = UpdateTodoRequest {
            due_date: Some(Some("2021/1/21".to_string())),
            todo: Some(Some("ignored".to_string())),
            ..Default::default()
        };
        let update = TodoUpdate::try_from(request).unwrap();
        assert_eq!(update, TodoUpdate::DueDate(ymd(2021, 1, 21)));
        assert_eq!(update.success_message(), "Due Date Updated");
    }

    #[test]
    fn test_update_text_only() {
        let request = UpdateTodoRequest {
            todo: Some(Some("Walk the dog".to_string())),
            ..Default::default()
        };
        let update = TodoUpdate::try_from(request).unwrap();
        assert_eq!(update.success_message(), "Todo Updated");
    }

    #[test]
    fn test_update_rejects_invalid_first_field() {
        let request = UpdateTodoRequest {
            category: Some(Some("GARDEN".to_string())),
            ..Default::default()
        };
        assert_eq!(
            TodoUpdate::try_from(request).unwrap_err(),
            ValidationError::InvalidCategory
        );
    }

    #[test]
    fn test_update_null_field_is_present() {
        let request: UpdateTodoRequest =
            serde_json::from_str(r#"{"status": null, "priority": "LOW"}"#).unwrap();
        assert_eq!(request.status, Some(None));
        assert_eq!(
            TodoUpdate::try_from(request).unwrap_err(),
            ValidationError::InvalidStatus
        );

        let request: UpdateTodoRequest =
            serde_json::from_str(r#"{"priority": "LOW"}"#).unwrap();
        assert_eq!(request.status, None);
        assert_eq!(
            TodoUpdate::try_from(request).unwrap(),
            TodoUpdate::Priority(TodoPriority::Low)
        );
    }

    #[rstest]
    #[case(r#"{"priority": null, "category": "WORK"}"#, ValidationError::InvalidPriority)]
    #[case(r#"{"category": null}"#, ValidationError::InvalidCategory)]
    #[case(r#"{"dueDate": null, "todo": "x"}"#, ValidationError::InvalidDueDate)]
    #[case(r#"{"todo": null}"#, ValidationError::InvalidText)]
    fn test_update_null_first_field_rejected(#[case] body: &str, #[case] expected: ValidationError) {
        let request: UpdateTodoRequest = serde_json::from_str(body).unwrap();
        assert_eq!(TodoUpdate::try_from(request).unwrap_err(), expected);
    }

    #[test]
    fn test_query_from_pairs_joins_repeated_keys() {
        let query: TodoQuery = vec![
            ("status".to_string(), "DONE".to_string()),
            ("status".to_string(), "HOME".to_string()),
            ("unknown".to_string(), "x".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(query.status.as_deref(), Some("DONE,HOME"));
        assert_eq!(query.validate().unwrap_err(), ValidationError::InvalidStatus);

        let query: AgendaQuery = vec![("date".to_string(), "2021-01-12".to_string())]
            .into_iter()
            .collect();
        assert_eq!(query.validate().unwrap(), ymd(2021, 1, 12));
    }

    #[test]
    fn test_update_without_fields() {
        assert_eq!(
            TodoUpdate::try_from(UpdateTodoRequest::default()).unwrap_err(),
            ValidationError::NoUpdatableField
        );
    }

    #[rstest]
    #[case("1", Ok(1))]
    #[case("42", Ok(42))]
    #[case("abc", Err(ValidationError::InvalidId))]
    #[case("1 OR 1=1", Err(ValidationError::InvalidId))]
    #[case(" 1", Err(ValidationError::InvalidId))]
    #[case("1 ", Err(ValidationError::InvalidId))]
    fn test_parse_todo_id(#[case] raw: &str, #[case] expected: Result<i64, ValidationError>) {
        assert_eq!(parse_todo_id(raw), expected);
    }
}
