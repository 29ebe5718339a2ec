use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::Path;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::content::content_file::ContentFile;
use crate::content::content_header::ContentHeader;
use crate::content::parsing_utils::{parse_header_fields, split_front_matter};
use crate::error::PostError;
use crate::slug::{generate_url, SlugOptions};

pub mod content_file;
pub mod content_header;
pub mod parsing_utils;

#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Published,
    Draft,
}

impl Display for PostStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PostStatus::Published => write!(f, "published"),
            PostStatus::Draft => write!(f, "draft"),
        }
    }
}

/// A validated post, ready to be published. Title and content are kept
/// unescaped, escaping only happens when the payload is serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    pub file_name: String,
    pub title: String,
    pub date: DateTime<FixedOffset>,
    pub status: PostStatus,
    pub url: String,
    pub content: String,
}

impl Display for PostRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "file={}, url={}, date={}, status={}, title={}",
               self.file_name,
               self.url,
               self.date.to_rfc3339(),
               self.status,
               self.title
        )
    }
}

/// Example of post
/// +++
/// title = "Hello World"
/// date = "2023-05-01T12:00:00Z"
/// draft = false
/// +++
///
/// Some content
impl PostRecord {
    pub fn from_file(file_path: &Path, slug_options: &SlugOptions) -> Result<PostRecord, PostError> {
        let content_file = ContentFile::from_file(file_path)?;
        Self::from_content_file(&content_file, slug_options)
    }

    pub fn from_content_file(content_file: &ContentFile, slug_options: &SlugOptions) -> Result<PostRecord, PostError> {
        Self::parse(&content_file.file_name, &content_file.raw_content, slug_options)
    }

    pub fn parse(file_name: &str, raw_content: &str, slug_options: &SlugOptions) -> Result<PostRecord, PostError> {
        let (header, body) = split_front_matter(raw_content);
        let header = ContentHeader::from_fields(&parse_header_fields(header))?;

        let url = generate_url(&header.date, &header.title, file_name, slug_options);

        Ok(PostRecord {
            file_name: file_name.to_string(),
            title: header.title,
            date: header.date,
            status: header.status,
            url,
            content: body.trim().to_string(),
        })
    }

    pub fn date_millis(&self) -> i64 {
        self.date.timestamp_millis()
    }
}
