use std::path::Path;

use serde_json::Value;

use crate::error::{ReadError, Result};
use crate::message::RawMessage;

/// Splits `input` into top-level record values without checking their shape.
///
/// Accepts a single object, an array of objects, or objects separated by
/// whitespace (one per line). Arrays are flattened in place, so mixed input
/// still comes back in file order.
fn parse_values(input: &str) -> Result<Vec<Value>> {
    let mut values = Vec::new();

    for value in serde_json::Deserializer::from_str(input).into_iter::<Value>() {
        match value? {
            Value::Array(items) => values.extend(items),
            other => values.push(other),
        }
    }

    Ok(values)
}

/// Parses every record in `input`, in file order.
pub fn parse_records(input: &str) -> Result<Vec<RawMessage>> {
    parse_values(input)?
        .into_iter()
        .enumerate()
        .map(|(index, value)| into_record(value, index))
        .collect()
}

fn into_record(value: Value, index: usize) -> Result<RawMessage> {
    if !value.is_object() {
        return Err(ReadError::NotAnObject { index });
    }
    Ok(serde_json::from_value(value)?)
}

/// Reads the whole message log at `path`.
pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<RawMessage>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let records = parse_records(&contents)?;
    tracing::debug!(path = %path.display(), count = records.len(), "Read message log");
    Ok(records)
}

/// Returns the most recent message at `path`, or `None` when the file holds
/// no records (empty file or empty array). Only the last record is checked,
/// so bad records earlier in the file do not matter.
pub fn read_latest(path: impl AsRef<Path>) -> Result<Option<RawMessage>> {
    let path = path.as_ref();
    tracing::info!("Reading messages from {}", path.display());

    let contents = std::fs::read_to_string(path)?;
    let mut values = parse_values(&contents)?;
    let index = values.len().saturating_sub(1);
    let latest = values.pop().map(|value| into_record(value, index)).transpose()?;

    tracing::debug!(?latest, "Latest message");
    Ok(latest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_single_object_is_returned() {
        let file = write_file(r#"{"message":"hi","author":"Bob","sentiment":0.5}"#);

        let latest = read_latest(file.path()).unwrap().unwrap();

        assert_eq!(latest.message.as_deref(), Some("hi"));
        assert_eq!(latest.author.as_deref(), Some("Bob"));
        assert_eq!(latest.sentiment, Some(0.5));
        assert_eq!(latest.category, None);
    }

    #[test]
    fn test_array_returns_last_element() {
        let file = write_file(r#"[{"author":"A"},{"author":"B"},{"author":"C"}]"#);

        let latest = read_latest(file.path()).unwrap().unwrap();

        assert_eq!(latest.author.as_deref(), Some("C"));
    }

    #[test]
    fn test_empty_array_returns_none() {
        let file = write_file("[]");

        assert!(read_latest(file.path()).unwrap().is_none());
    }

    #[test]
    fn test_empty_file_returns_none() {
        let file = write_file("  \n");

        assert!(read_latest(file.path()).unwrap().is_none());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = read_latest(dir.path().join("missing.json")).unwrap_err();

        assert!(matches!(err, ReadError::Io(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let file = write_file(r#"{"author": "A""#);

        let err = read_latest(file.path()).unwrap_err();

        assert!(matches!(err, ReadError::Parse(_)));
    }

    #[test]
    fn test_mistyped_earlier_record_is_skipped() {
        let file = write_file(r#"[{"sentiment":"high"},{"author":"B","sentiment":0.5}]"#);

        let latest = read_latest(file.path()).unwrap().unwrap();

        assert_eq!(latest.author.as_deref(), Some("B"));
        assert_eq!(latest.sentiment, Some(0.5));
    }

    #[test]
    fn test_non_object_earlier_record_is_skipped() {
        let file = write_file(r#"[42,{"author":"B"}]"#);

        let latest = read_latest(file.path()).unwrap().unwrap();

        assert_eq!(latest.author.as_deref(), Some("B"));
    }

    #[test]
    fn test_newline_delimited_latest_is_last_line() {
        let file = write_file("{\"author\":\"A\"}\n{\"author\":\"C\"}\n");

        let latest = read_latest(file.path()).unwrap().unwrap();

        assert_eq!(latest.author.as_deref(), Some("C"));
    }

    #[test]
    fn test_bad_last_record_is_rejected() {
        let file = write_file(r#"[{"author":"A"},{"sentiment":"high"}]"#);

        let err = read_latest(file.path()).unwrap_err();

        assert!(matches!(err, ReadError::Parse(_)));
    }

    #[test]
    fn test_newline_delimited_records() {
        let records = parse_records(
            "{\"author\":\"A\",\"sentiment\":1.0}\n{\"author\":\"A\",\"sentiment\":0.0}\n",
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].sentiment, Some(0.0));
    }

    #[test]
    fn test_non_object_record_is_rejected() {
        let err = parse_records(r#"[{"author":"A"}, 42]"#).unwrap_err();

        assert!(matches!(err, ReadError::NotAnObject { index: 1 }));
    }
}
