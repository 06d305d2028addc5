//! Task title validation

use super::ValidationError;

/// Matches the `VARCHAR(255)` column.
const MAX_TITLE_LEN: usize = 255;

/// Validated task title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTitle(pub(super) String);

impl TaskTitle {
    /// Create a new task title.
    ///
    /// # Rules
    /// - Not empty or whitespace-only
    /// - Max 255 characters
    ///
    /// The title is kept exactly as given.
    ///
    /// # Example
    /// ```
    /// use flowt_server::models::TaskTitle;
    ///
    /// assert!(TaskTitle::new("Buy milk").is_ok());
    /// assert!(TaskTitle::new("").is_err());
    /// assert!(TaskTitle::new("   ").is_err());  // whitespace only
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }

        if s.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the title as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}
