//! Session transcript written as JSON lines.
//!
//! One line per [`ConversationEvent`], e.g.
//!
//! ```json
//! {"type":"answer_received","timestamp":"2026-01-01T12:00:00.000Z","bytes":512,"elapsed_ms":840}
//! ```
//!
//! Events carry metadata only; question and answer text never reach the file.

use askline_application::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Appends session events to a `--transcript` file.
///
/// Several runs can point at the same file; each run appends. Lines are
/// flushed as they are written.
pub struct JsonlConversationLogger {
    out: Mutex<LineWriter<File>>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open `path` for appending, creating it and its directory if needed.
    ///
    /// Returns `None` (after a warning) when the file cannot be opened; the
    /// session then runs without a transcript.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match Self::open(path) {
            Ok(file) => Some(Self {
                out: Mutex::new(LineWriter::new(file)),
                path: path.to_path_buf(),
            }),
            Err(e) => {
                warn!("Cannot write transcript to {}: {}", path.display(), e);
                None
            }
        }
    }

    fn open(path: &Path) -> std::io::Result<File> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        OpenOptions::new().create(true).append(true).open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Flatten an event into one JSON object with `type` and `timestamp` keys.
///
/// Object payloads are merged at the top level; anything else goes under `data`.
fn event_record(event: ConversationEvent, timestamp: String) -> Value {
    let mut record = match event.payload {
        Value::Object(fields) => fields,
        other => {
            let mut fields = Map::new();
            fields.insert("data".to_string(), other);
            fields
        }
    };
    record.insert("type".to_string(), Value::from(event.event_type));
    record.insert("timestamp".to_string(), Value::from(timestamp));
    Value::Object(record)
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let line = event_record(event, timestamp).to_string();

        let Ok(mut out) = self.out.lock() else {
            return;
        };
        if let Err(e) = writeln!(out, "{}", line) {
            debug!("Transcript write to {} failed: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_event_record_merges_object_payload() {
        let record = event_record(
            ConversationEvent::new("query_submitted", serde_json::json!({"bytes": 4})),
            "2026-01-01T00:00:00.000Z".to_string(),
        );
        assert_eq!(
            record,
            serde_json::json!({
                "type": "query_submitted",
                "timestamp": "2026-01-01T00:00:00.000Z",
                "bytes": 4,
            })
        );
    }

    #[test]
    fn test_event_record_wraps_scalar_payload() {
        let record = event_record(
            ConversationEvent::new("note", serde_json::json!("just a string")),
            "t".to_string(),
        );
        assert_eq!(record["data"], "just a string");
        assert_eq!(record["type"], "note");
    }

    #[test]
    fn test_lines_are_visible_without_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcripts").join("session.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::new(
            "query_submitted",
            serde_json::json!({"source": "typed", "bytes": 4}),
        ));
        logger.log(ConversationEvent::new(
            "answer_received",
            serde_json::json!({"bytes": 1, "elapsed_ms": 250}),
        ));

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "query_submitted");
        assert_eq!(lines[0]["source"], "typed");
        assert_eq!(lines[1]["elapsed_ms"], 250);
        assert!(lines.iter().all(|l| l["timestamp"].is_string()));
    }

    #[test]
    fn test_runs_append_to_the_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");

        for _ in 0..2 {
            let logger = JsonlConversationLogger::new(&path).unwrap();
            logger.log(ConversationEvent::new("history_cleared", serde_json::json!({})));
        }

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_directory_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonlConversationLogger::new(dir.path()).is_none());
    }
}
