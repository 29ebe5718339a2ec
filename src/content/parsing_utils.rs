use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

pub const FRONT_MATTER_DELIMITER: &str = "+++";

/// Raw `key = value` pairs found in a front-matter header.
/// When a key is repeated, the first occurrence wins.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HeaderFields {
    fields: HashMap<String, String>,
}

impl HeaderFields {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|v| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Splits a `+++` fenced file into its header and body.
///
/// The outer fence is removed by trimming `+` from both ends of the file,
/// so a body ending with `+` characters loses them as well.
pub fn split_front_matter(raw_content: &str) -> (&str, String) {
    let content = raw_content.trim().trim_matches('+').trim();

    let mut parts = content.split(FRONT_MATTER_DELIMITER);
    let header = parts.next().unwrap_or_default();
    let body = parts.collect::<Vec<&str>>().join(FRONT_MATTER_DELIMITER);

    (header, body)
}

pub fn parse_header_fields(header: &str) -> HeaderFields {
    let mut fields = HashMap::new();

    for line in header.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, val)) = extract_front_matter_header(line) {
            fields.entry(key.to_string()).or_insert_with(|| val.to_string());
        }
    }

    HeaderFields { fields }
}

/// Reads a double quoted value, honoring the escapes of a TOML basic string.
/// Returns `None` when the value is not quoted.
pub fn unquote(value: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct Quoted {
        value: String,
    }

    if !value.starts_with('"') {
        return None;
    }

    if let Ok(quoted) = toml::from_str::<Quoted>(&format!("value = {}", value)) {
        return Some(quoted.value);
    }

    // Not valid TOML, take everything up to the next quote
    let rest = &value[1..];
    rest.find('"').map(|end| rest[..end].to_string())
}

/// Strips optional surrounding quotes from a value, e.g. `"2023-05-01T12:00:00Z"`.
pub fn strip_optional_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    match value.find('"') {
        Some(end) => &value[..end],
        None => value,
    }
}

fn extract_front_matter_header(line: &str) -> Option<(&str, &str)> {
    lazy_static! {
        static ref HEADER_REGEX: Regex = Regex::new(r"^(?P<key>[A-Za-z0-9_-]+)\s*=\s*(?P<value>.*?)\s*$").unwrap();
    }
    extract_header_key_val(line, &HEADER_REGEX)
}

fn extract_header_key_val<'a>(line: &'a str, header_regex: &Regex) -> Option<(&'a str, &'a str)> {
    header_regex.captures(line).and_then(|cap| {
        let key = cap.name("key").map(|key| key.as_str());
        let val = cap.name("value").map(|val| val.as_str());
        match (key, val) {
            (Some(key), Some(val)) => Some((key, val)),
            _ => None
        }
    })
}
