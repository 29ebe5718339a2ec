use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use spdlog::{debug, error, info, warn};

use crate::config::Publisher;
use crate::content::{PostRecord, PostStatus};
use crate::error::PostError;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Body sent to the endpoint for each post.
#[derive(Serialize, Debug, PartialEq)]
pub struct PostPayload<'a> {
    pub title: &'a str,
    pub status: PostStatus,
    pub date: i64,
    pub url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<&'a str>,
}

impl<'a> PostPayload<'a> {
    pub fn from_record(record: &'a PostRecord, include_content: bool) -> Self {
        Self {
            title: &record.title,
            status: record.status,
            date: record.date_millis(),
            url: &record.url,
            content: include_content.then_some(record.content.as_str()),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Delivery {
    Accepted,
    Rejected { status: u16 },
}

pub trait PostSink {
    fn submit(&self, record: &PostRecord) -> Result<Delivery, PostError>;
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct PublishSummary {
    pub sent: usize,
    pub rejected: usize,
    pub failed: usize,
}

/// Submits every record in order. A failed record is logged and does not stop the others.
pub fn publish_all(sink: &dyn PostSink, records: &[PostRecord]) -> PublishSummary {
    let mut summary = PublishSummary::default();

    for record in records {
        match sink.submit(record) {
            Ok(Delivery::Accepted) => summary.sent += 1,
            Ok(Delivery::Rejected { status }) => {
                warn!("Post {} was rejected with status {}", record.file_name, status);
                summary.rejected += 1;
            }
            Err(e) => {
                error!("Error publishing {}: {}", record.file_name, e);
                summary.failed += 1;
            }
        }
    }

    info!("Published {} post(s), {} rejected, {} failed", summary.sent, summary.rejected, summary.failed);
    summary
}

pub struct HttpPublisher {
    client: Client,
    endpoint: String,
    include_content: bool,
}

impl HttpPublisher {
    pub fn new(cfg: &Publisher) -> Result<Self, PostError> {
        let client = Client::builder()
            .timeout(cfg.timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(PostError::Transport)?;

        Ok(Self {
            client,
            endpoint: cfg.endpoint.clone(),
            include_content: cfg.include_content,
        })
    }
}

impl PostSink for HttpPublisher {
    fn submit(&self, record: &PostRecord) -> Result<Delivery, PostError> {
        let body = serde_json::to_vec(&PostPayload::from_record(record, self.include_content))?;

        debug!("POST {} for {}", self.endpoint, record.file_name);
        let response = self.client.post(&self.endpoint)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .map_err(PostError::Transport)?;

        let status = response.status();
        let response_body = response.text().map_err(PostError::ResponseRead)?;
        log_response(&record.file_name, status, &response_body);

        if status.is_success() {
            Ok(Delivery::Accepted)
        } else {
            Ok(Delivery::Rejected { status: status.as_u16() })
        }
    }
}

/// Logs the payloads instead of sending them.
pub struct DryRunPublisher {
    include_content: bool,
}

impl DryRunPublisher {
    pub fn new(cfg: &Publisher) -> Self {
        Self { include_content: cfg.include_content }
    }
}

impl PostSink for DryRunPublisher {
    fn submit(&self, record: &PostRecord) -> Result<Delivery, PostError> {
        let payload = serde_json::to_string(&PostPayload::from_record(record, self.include_content))?;
        info!("Dry run, not sending {}: {}", record.file_name, format_json(&payload)?);
        Ok(Delivery::Accepted)
    }
}

/// Re-indents a JSON document with one space per level.
pub fn format_json(data: &str) -> Result<String, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(data)?;

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b" ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;

    Ok(String::from_utf8_lossy(&buf).to_string())
}

fn log_response(file_name: &str, status: StatusCode, body: &str) {
    if body.trim().is_empty() {
        debug!("Response for {}: status={}", file_name, status);
        return;
    }

    let body = match format_json(body) {
        Ok(pretty) => pretty,
        Err(e) => {
            warn!("Could not parse response body for {}: {}", file_name, e);
            body.to_string()
        }
    };

    if status.is_success() {
        debug!("Response for {}: status={} {}", file_name, status, body);
    } else {
        warn!("Response for {}: status={} {}", file_name, status, body);
    }
}
