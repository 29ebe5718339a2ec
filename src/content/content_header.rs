use chrono::{DateTime, FixedOffset};

use crate::content::parsing_utils::{strip_optional_quotes, unquote, HeaderFields};
use crate::content::PostStatus;
use crate::error::PostError;
use crate::text_utils::parse_post_date;

#[derive(Debug, Clone, PartialEq)]
pub struct ContentHeader {
    pub title: String,
    pub date: DateTime<FixedOffset>,
    pub status: PostStatus,
}

impl ContentHeader {
    /// Validates the raw header fields. Fields are checked in order: title, draft, date.
    pub fn from_fields(fields: &HeaderFields) -> Result<ContentHeader, PostError> {
        let title = fields.get("title")
            .and_then(unquote)
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty())
            .ok_or(PostError::MissingTitle)?;

        let status = match fields.get("draft") {
            Some("true") => PostStatus::Draft,
            _ => PostStatus::Published,
        };

        let date = fields.get("date")
            .map(strip_optional_quotes)
            .filter(|date| !date.is_empty())
            .ok_or(PostError::MissingDate)?;
        let date = parse_post_date(date)?;

        Ok(ContentHeader {
            title,
            date,
            status,
        })
    }
}
