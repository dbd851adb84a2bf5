//! Frontmatter extraction.
//!
//! A post starts with a YAML block fenced by `---` or a TOML block fenced
//! by `+++`. Both are read into a JSON object so the rest of the pipeline
//! deals with a single value type.

use super::ContentError;
use serde_json::{Map, Value};
use std::path::Path;

/// Frontmatter syntax, chosen by the opening fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Toml,
}

impl Format {
    fn from_fence(line: &str) -> Option<Self> {
        match line.trim_end() {
            "---" => Some(Self::Yaml),
            "+++" => Some(Self::Toml),
            _ => None,
        }
    }

    const fn fence(self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Why a file has no usable frontmatter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitError {
    Missing,
    Unterminated,
}

/// Split off the frontmatter block, returning its syntax and raw text.
pub fn split(text: &str) -> Result<(Format, &str), SplitError> {
    let text = text.trim_start_matches('\u{feff}');
    let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
    let format = Format::from_fence(first).ok_or(SplitError::Missing)?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == format.fence() {
            return Ok((format, &rest[..offset]));
        }
        offset += line.len();
    }
    Err(SplitError::Unterminated)
}

/// Parse the frontmatter of `text` (read from `path`) into a JSON object.
pub fn parse(path: &Path, text: &str) -> Result<Map<String, Value>, ContentError> {
    let (format, raw) = split(text).map_err(|err| match err {
        SplitError::Missing => ContentError::MissingFrontmatter(path.to_path_buf()),
        SplitError::Unterminated => ContentError::UnterminatedFrontmatter(path.to_path_buf()),
    })?;

    if raw.trim().is_empty() {
        return Ok(Map::new());
    }

    let value = match format {
        Format::Yaml => serde_yaml::from_str::<Value>(raw)
            .map_err(|e| ContentError::Yaml(path.to_path_buf(), e))?,
        Format::Toml => {
            let table = toml::from_str::<toml::Table>(raw)
                .map_err(|e| ContentError::Toml(path.to_path_buf(), e))?;
            toml_to_json(toml::Value::Table(table))
        }
    };

    match value {
        Value::Object(map) => Ok(map),
        // comment-only YAML block
        Value::Null => Ok(Map::new()),
        _ => Err(ContentError::NotATable(path.to_path_buf())),
    }
}

/// Convert a TOML value to JSON, rendering datetimes as their TOML text.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}
