//! Offset pagination for task listings

use serde::Deserialize;

use super::ValidationError;

/// Maximum items per page
const MAX_LIMIT: u32 = 100;

/// Default items per page
const DEFAULT_LIMIT: u32 = 10;

/// Validated `LIMIT`/`OFFSET` pair
///
/// Deserializes through [`PageParams`], so an oversized limit is rejected
/// while the query string is still being extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "PageParams")]
pub struct Page {
    /// Rows to skip
    pub skip: u32,
    /// Rows to return (max 100)
    pub limit: u32,
}

impl Page {
    /// Create a page, rejecting limits above 100.
    ///
    /// Unlike clamping, an oversized limit is reported back to the caller.
    pub fn new(skip: u32, limit: u32) -> Result<Self, ValidationError> {
        if limit > MAX_LIMIT {
            return Err(ValidationError::OutOfRange {
                field: "limit",
                min: 0,
                max: MAX_LIMIT as i64,
            });
        }

        Ok(Self { skip, limit })
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        self.skip as i64
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        self.limit as i64
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Query parameters for pagination
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl TryFrom<PageParams> for Page {
    type Error = ValidationError;

    fn try_from(params: PageParams) -> Result<Self, Self::Error> {
        Self::new(
            params.skip.unwrap_or(0),
            params.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let page = Page::try_from(PageParams::default()).unwrap();
        assert_eq!(page, Page::default());
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 10);
    }

    #[test]
    fn accepts_bounds() {
        assert!(Page::new(0, 0).is_ok());
        assert!(Page::new(10_000, 100).is_ok());
    }

    #[test]
    fn rejects_limit_over_100() {
        let err = Page::new(0, 101).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange { field: "limit", max: 100, .. }
        ));
    }

    #[test]
    fn deserializes_through_params() {
        let page: Page = serde_json::from_str(r#"{"skip": 10}"#).unwrap();
        assert_eq!(page, Page { skip: 10, limit: 10 });

        let err = serde_json::from_str::<Page>(r#"{"limit": 500}"#).unwrap_err();
        assert!(err.to_string().contains("limit must be between 0 and 100"));
    }

    #[test]
    fn offset_is_skip() {
        let page = Page::try_from(PageParams {
            skip: Some(10),
            limit: Some(10),
        })
        .unwrap();
        assert_eq!(page.offset(), 10);
        assert_eq!(page.limit(), 10);
    }
}
