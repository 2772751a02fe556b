//! JSONL file writer for completed consults.
//!
//! Each [`ConsultRecord`] is serialized as a single JSON line and appended
//! to the file via a buffered writer.

use consult_application::{ConsultHistory, ConsultRecord, HistoryError};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Append-only consult history, one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record and on `Drop`.
pub struct JsonlConsultHistory {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlConsultHistory {
    /// Open (or create) the history file at the given path.
    ///
    /// Creates parent directories if they don't exist. Existing records are kept.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create history directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open history file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }
}

impl ConsultHistory for JsonlConsultHistory {
    fn record(&self, record: &ConsultRecord) -> Result<(), HistoryError> {
        let line = serde_json::to_string(record)?;

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| HistoryError::Write("history writer lock poisoned".to_string()))?;
        writeln!(writer, "{}", line).map_err(|e| HistoryError::Write(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| HistoryError::Write(e.to_string()))?;

        debug!("Recorded consult in {}", self.path.display());
        Ok(())
    }
}

impl Drop for JsonlConsultHistory {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consult_domain::{Answer, AnswerSet, ConsultResult, ProviderId, Question};

    fn record(user: Option<&str>, question: &str) -> ConsultRecord {
        let question = Question::parse(question).unwrap();
        let result = ConsultResult::new(
            AnswerSet::new(vec![
                Answer::success(ProviderId::new("GPT-4 Turbo").unwrap(), "Rest.", 2, 120),
                Answer::failure(
                    ProviderId::new("Claude 3").unwrap(),
                    "An error occurred while processing the Claude 3 answer.",
                    80,
                ),
            ]),
            "Rest and fluids.",
        );
        ConsultRecord::new(user.map(str::to_string), &question, &result)
    }

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.jsonl");
        let history = JsonlConsultHistory::new(&path).unwrap();

        history.record(&record(Some("user-1"), "sore throat?")).unwrap();
        history.record(&record(None, "fever?")).unwrap();

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["user"], "user-1");
        assert_eq!(lines[0]["question"], "sore throat?");
        assert_eq!(lines[0]["summary"], "Rest and fluids.");
        assert_eq!(lines[0]["answers"][0]["provider"], "GPT-4 Turbo");
        assert_eq!(lines[0]["answers"][1]["ok"], false);
        assert!(lines[1].get("user").is_none());
    }

    #[test]
    fn test_reopening_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.jsonl");

        {
            let history = JsonlConsultHistory::new(&path).unwrap();
            history.record(&record(None, "first")).unwrap();
        }
        {
            let history = JsonlConsultHistory::new(&path).unwrap();
            history.record(&record(None, "second")).unwrap();
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["question"], "second");
    }

    #[test]
    fn test_records_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.jsonl");
        let history = JsonlConsultHistory::new(&path).unwrap();
        let original = record(Some("u"), "why?");
        history.record(&original).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: ConsultRecord = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(parsed.answers, original.answers);
        assert_eq!(parsed.timestamp, original.timestamp);
    }

    #[test]
    fn test_unopenable_path_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a file
        assert!(JsonlConsultHistory::new(dir.path()).is_none());
    }
}
