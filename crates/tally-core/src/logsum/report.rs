use crate::logsum::operations::LogSummary;
use crate::logsum::types::{LevelCount, LogsumSettings, MessageCount};
use serde::Serialize;
use std::fmt::Write;

/// Result of one log summary, shaped for JSON delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogsumReport {
    /// Input path, or `-` for stdin.
    pub path: String,
    /// Level filter, empty when every level was counted.
    pub level: String,
    pub top_n: usize,
    pub total_lines: u64,
    pub distinct_messages: usize,
    pub levels: Vec<LevelCount>,
    pub top_messages: Vec<MessageCount>,
}

impl LogsumReport {
    pub fn new(settings: &LogsumSettings, summary: LogSummary) -> Self {
        Self {
            path: settings.input.to_string(),
            level: settings.level.clone().unwrap_or_default(),
            top_n: settings.top,
            total_lines: summary.total_lines,
            distinct_messages: summary.distinct_messages,
            levels: summary.levels,
            top_messages: summary.top_messages,
        }
    }

    pub fn render_text(&self) -> String {
        let level = if self.level.is_empty() {
            "(all)"
        } else {
            self.level.as_str()
        };

        let mut out = String::new();
        let _ = writeln!(out, "path:       {}", self.path);
        let _ = writeln!(out, "level:      {level}");
        let _ = writeln!(out, "total:      {}", self.total_lines);
        let _ = writeln!(out, "levels:");
        for entry in &self.levels {
            let _ = writeln!(out, "  {:<8} {}", entry.level, entry.count);
        }

        if self.top_n > 0 {
            let _ = writeln!(out, "top:        {}", self.top_n);
            for entry in &self.top_messages {
                let _ = writeln!(out, "{}\t{}", entry.count, entry.message);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logsum::types::LogInput;
    use std::path::PathBuf;
    use std::time::Duration;

    fn settings(level: Option<&str>, top: usize) -> LogsumSettings {
        LogsumSettings {
            input: LogInput::File(PathBuf::from("app.log")),
            level: level.map(str::to_string),
            top,
            json: false,
            verbose: false,
            out: None,
            post: None,
            timeout: Duration::from_secs(10),
        }
    }

    fn summary() -> LogSummary {
        LogSummary {
            total_lines: 3,
            distinct_messages: 2,
            levels: vec![
                LevelCount {
                    level: "INFO".into(),
                    count: 2,
                },
                LevelCount {
                    level: "ERROR".into(),
                    count: 1,
                },
            ],
            top_messages: vec![MessageCount {
                count: 2,
                message: "tick".into(),
            }],
            skipped: 0,
        }
    }

    #[test]
    fn test_payload_shape() {
        let report = LogsumReport::new(&settings(None, 1), summary());
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({
                "path": "app.log",
                "level": "",
                "top_n": 1,
                "total_lines": 3,
                "distinct_messages": 2,
                "levels": [
                    {"level": "INFO", "count": 2},
                    {"level": "ERROR", "count": 1}
                ],
                "top_messages": [{"count": 2, "message": "tick"}]
            })
        );
    }

    #[test]
    fn test_render_text() {
        let text = LogsumReport::new(&settings(None, 1), summary()).render_text();
        assert_eq!(
            text,
            "path:       app.log\n\
             level:      (all)\n\
             total:      3\n\
             levels:\n  \
             INFO     2\n  \
             ERROR    1\n\
             top:        1\n\
             2\ttick\n"
        );
    }

    #[test]
    fn test_render_text_with_filter_and_no_top() {
        let text = LogsumReport::new(&settings(Some("ERROR"), 0), summary()).render_text();
        assert!(text.contains("level:      ERROR\n"));
        assert!(!text.contains("top:"));
    }
}
