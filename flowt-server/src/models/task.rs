//! Task records and the request shapes that create or change them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{TaskTitle, ValidationError};

/// Task record from database, also the response body for every task route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub reminder: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub assigned_to: Option<i64>,
}

/// Create task request
#[derive(Debug, Clone, Deserialize)]
pub struct TaskCreate {
    pub title: String,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<i32>,
    #[serde(default, deserialize_with = "super::timestamp::deserialize_option")]
    pub due_date: Option<DateTime<Utc>>,
}

/// Validated insert payload
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: TaskTitle,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Option<i32>,
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskCreate {
    pub fn validate(self) -> Result<NewTask, ValidationError> {
        Ok(NewTask {
            title: TaskTitle::new(&self.title)?,
            description: self.description,
            completed: self.completed.unwrap_or(false),
            priority: self.priority,
            due_date: self.due_date,
        })
    }
}

impl From<Task> for NewTask {
    /// Copy the user-editable fields of an existing row. Stored titles were
    /// validated on the way in.
    fn from(task: Task) -> Self {
        Self {
            title: TaskTitle(task.title),
            description: task.description,
            completed: task.completed,
            priority: task.priority,
            due_date: None,
        }
    }
}

/// Partial update request. Absent (or `null`) fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<i32>,
    #[serde(default, deserialize_with = "super::timestamp::deserialize_option")]
    pub due_date: Option<DateTime<Utc>>,
}

/// One entry of a bulk update: the target id plus its own partial update.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkTaskUpdate {
    pub id: i64,
    #[serde(flatten)]
    pub changes: TaskUpdate,
}

/// Writable columns of `tasks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Title,
    Description,
    Completed,
    Priority,
    DueDate,
    Reminder,
    AssignedTo,
}

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Completed => "completed",
            Self::Priority => "priority",
            Self::DueDate => "due_date",
            Self::Reminder => "reminder",
            Self::AssignedTo => "assigned_to",
        }
    }
}

/// A value destined for a bind parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Int(i32),
    BigInt(i64),
    Timestamp(DateTime<Utc>),
}

/// `column = value` in an UPDATE's SET clause.
pub type Assignment = (Column, FieldValue);

impl TaskUpdate {
    /// Assignments for the fields present in this update, in column order.
    ///
    /// An empty result means nothing was supplied.
    pub fn assignments(self) -> Result<Vec<Assignment>, ValidationError> {
        let mut assignments = Vec::new();

        if let Some(title) = self.title {
            let title = TaskTitle::new(&title)?;
            assignments.push((Column::Title, FieldValue::Text(title.into_string())));
        }
        if let Some(description) = self.description {
            assignments.push((Column::Description, FieldValue::Text(description)));
        }
        if let Some(completed) = self.completed {
            assignments.push((Column::Completed, FieldValue::Bool(completed)));
        }
        if let Some(priority) = self.priority {
            assignments.push((Column::Priority, FieldValue::Int(priority)));
        }
        if let Some(due_date) = self.due_date {
            assignments.push((Column::DueDate, FieldValue::Timestamp(due_date)));
        }

        Ok(assignments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_defaults_completed_to_false() {
        let req: TaskCreate = serde_json::from_str(r#"{"title": "T"}"#).unwrap();
        let new = req.validate().unwrap();
        assert!(!new.completed);
        assert_eq!(new.title.as_str(), "T");
        assert_eq!(new.priority, None);
    }

    #[test]
    fn create_rejects_blank_title() {
        let req: TaskCreate = serde_json::from_str(r#"{"title": "  "}"#).unwrap();
        assert!(matches!(
            req.validate().unwrap_err(),
            ValidationError::Empty { field: "title" }
        ));
    }

    #[test]
    fn due_date_accepts_timestamp_without_offset() {
        let req: TaskCreate =
            serde_json::from_str(r#"{"title": "T", "due_date": "2024-05-01T09:00:00"}"#).unwrap();
        assert_eq!(
            req.due_date,
            Some("2024-05-01T09:00:00Z".parse::<DateTime<Utc>>().unwrap())
        );

        let update: TaskUpdate =
            serde_json::from_str(r#"{"due_date": "2024-05-01 09:00:00"}"#).unwrap();
        assert_eq!(update.due_date, req.due_date);

        let entry: BulkTaskUpdate =
            serde_json::from_str(r#"{"id": 1, "due_date": "2024-05-01T09:00:00"}"#).unwrap();
        assert_eq!(entry.changes.due_date, req.due_date);

        let req: TaskCreate = serde_json::from_str(r#"{"title": "T"}"#).unwrap();
        assert_eq!(req.due_date, None);
    }

    #[test]
    fn empty_update_has_no_assignments() {
        let update: TaskUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.assignments().unwrap().is_empty());
    }

    #[test]
    fn null_fields_count_as_absent() {
        let update: TaskUpdate =
            serde_json::from_str(r#"{"title": null, "completed": true}"#).unwrap();
        assert_eq!(
            update.assignments().unwrap(),
            vec![(Column::Completed, FieldValue::Bool(true))]
        );
    }

    #[test]
    fn assignments_follow_column_order() {
        let update: TaskUpdate =
            serde_json::from_str(r#"{"priority": 2, "title": "New", "description": "D"}"#)
                .unwrap();
        let columns: Vec<_> = update
            .assignments()
            .unwrap()
            .into_iter()
            .map(|(c, _)| c.as_str())
            .collect();
        assert_eq!(columns, vec!["title", "description", "priority"]);
    }

    #[test]
    fn bulk_entry_carries_id_and_changes() {
        let entry: BulkTaskUpdate =
            serde_json::from_str(r#"{"id": 7, "completed": false, "priority": 1}"#).unwrap();
        assert_eq!(entry.id, 7);
        assert_eq!(entry.changes.completed, Some(false));
        assert_eq!(entry.changes.priority, Some(1));
    }

    #[test]
    fn copy_keeps_editable_fields() {
        let task = Task {
            id: 3,
            title: "Original".into(),
            description: Some("D".into()),
            completed: true,
            priority: Some(4),
            created_at: Utc::now(),
            reminder: None,
            due_date: None,
            assigned_to: Some(9),
        };
        let copy = NewTask::from(task);
        assert_eq!(copy.title.as_str(), "Original");
        assert_eq!(copy.description.as_deref(), Some("D"));
        assert!(copy.completed);
        assert_eq!(copy.priority, Some(4));
    }
}
