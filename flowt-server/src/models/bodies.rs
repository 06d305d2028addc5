//! Single-value request bodies
//!
//! Each accepts either the bare JSON value or an object naming the field,
//! so `"2024-05-01T09:00:00Z"` and `{"reminder": "2024-05-01T09:00:00Z"}`
//! are equivalent.

use serde::Deserialize;

use super::UtcTimestamp;

macro_rules! scalar_body {
    ($(#[$meta:meta])* $name:ident, $field:ident: $ty:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Deserialize)]
        #[serde(untagged)]
        pub enum $name {
            Bare($ty),
            Named { $field: $ty },
        }

        impl $name {
            pub fn into_inner(self) -> $ty {
                match self {
                    Self::Bare(value) | Self::Named { $field: value } => value,
                }
            }
        }
    };
}

scalar_body!(
    /// `POST /tasks/{id}/reminder/`
    ReminderBody,
    reminder: UtcTimestamp
);

scalar_body!(
    /// `POST /tasks/{id}/comment/`
    CommentBody,
    comment: String
);

scalar_body!(
    /// `POST /tasks/{id}/assign/`
    AssignBody,
    user_id: i64
);

scalar_body!(
    /// `PUT /tasks/{id}/priority/`
    PriorityBody,
    priority: i32
);
