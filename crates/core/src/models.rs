use serde::{Deserialize, Serialize};

/// Per-file print metadata as reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub filename: String,
    pub modified: Option<f64>,
    pub print_start_time: Option<f64>,
}

impl FileRecord {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            modified: None,
            print_start_time: None,
        }
    }

    pub fn with_modified(mut self, modified: f64) -> Self {
        self.modified = Some(modified);
        self
    }

    pub fn with_print_start_time(mut self, started: f64) -> Self {
        self.print_start_time = Some(started);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredFile {
    pub filename: String,
    pub recency: f64,
}

impl ScoredFile {
    pub fn is_unknown(&self) -> bool {
        self.recency < 0.0
    }
}
