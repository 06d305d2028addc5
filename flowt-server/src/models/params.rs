//! Query-string shapes for the read-only task routes

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Columns a full listing can be sorted by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    CreatedAt,
    Title,
}

/// `GET /tasks/sort/?sort_by=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SortParams {
    #[serde(default)]
    pub sort_by: SortField,
}

/// `GET /tasks/search/?query=`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub query: String,
}

/// `GET /tasks/priority/?priority=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriorityParams {
    pub priority: Option<i32>,
}

/// `GET /tasks/overdue/?current_time=`
#[derive(Debug, Clone, Deserialize)]
pub struct OverdueParams {
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub current_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_field_names() {
        let params: SortParams = serde_json::from_str(r#"{"sort_by": "title"}"#).unwrap();
        assert_eq!(params.sort_by, SortField::Title);

        let params: SortParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.sort_by, SortField::CreatedAt);
    }

    #[test]
    fn overdue_accepts_timestamp_without_offset() {
        let naive: OverdueParams =
            serde_json::from_str(r#"{"current_time": "2024-05-01T09:00:00"}"#).unwrap();
        let zoned: OverdueParams =
            serde_json::from_str(r#"{"current_time": "2024-05-01T09:00:00Z"}"#).unwrap();
        assert_eq!(naive.current_time, zoned.current_time);
    }

    #[test]
    fn sort_field_rejects_other_columns() {
        assert!(serde_json::from_str::<SortParams>(r#"{"sort_by": "priority"}"#).is_err());
    }
}
