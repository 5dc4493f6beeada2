use crate::aggregate::{ScoredItem, aggregate};
use crate::logsum::errors::LogReadError;
use crate::logsum::types::{LevelCount, LogInput, MessageCount, Record};
use regex::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::LazyLock;
use tracing::warn;

pub const UNKNOWN_LEVEL: &str = "UNKNOWN";

// Literal patterns; compiling them cannot fail.
static BRACKET_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(?P<level>[A-Za-z]+)\]\s*(?P<msg>.*)$").expect("bracket level pattern")
});
static COLON_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<level>[A-Za-z]+)\s*:\s*(?P<msg>.*)$").expect("colon level pattern")
});

/// Split one line into level and message.
///
/// Recognizes `[LEVEL] message` and `LEVEL: message`; the level is
/// upper-cased and the message trimmed. Any other non-blank line is counted
/// as `UNKNOWN` with the whole trimmed line as its message. Blank lines
/// yield `None`.
pub fn parse_line(line: &str) -> Option<Record> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let captures = BRACKET_LINE
        .captures(line)
        .or_else(|| COLON_LINE.captures(line));
    Some(match captures {
        Some(caps) => Record {
            level: caps["level"].to_ascii_uppercase(),
            message: caps["msg"].trim().to_string(),
        },
        None => Record {
            level: UNKNOWN_LEVEL.to_string(),
            message: line.to_string(),
        },
    })
}

/// Lazily parsed records over a line reader.
///
/// Invalid UTF-8 is replaced rather than rejected. A read error is yielded
/// once and ends the stream.
pub struct Records<R> {
    source_name: String,
    lines: io::Split<R>,
    done: bool,
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<Record, LogReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.lines.next()? {
                Ok(bytes) => {
                    if let Some(record) = parse_line(&String::from_utf8_lossy(&bytes)) {
                        return Some(Ok(record));
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(LogReadError::ReadFailed {
                        source_name: self.source_name.clone(),
                        message: e.to_string(),
                    }));
                }
            }
        }
    }
}

pub fn read_records<R: BufRead>(source_name: impl Into<String>, reader: R) -> Records<R> {
    Records {
        source_name: source_name.into(),
        lines: reader.split(b'\n'),
        done: false,
    }
}

pub fn open_input(input: &LogInput) -> Result<Box<dyn BufRead>, LogReadError> {
    match input {
        LogInput::Stdin => Ok(Box::new(io::stdin().lock())),
        LogInput::File(path) => {
            let file = File::open(path).map_err(|e| LogReadError::OpenFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Counts for one pass over a log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSummary {
    pub total_lines: u64,
    pub distinct_messages: usize,
    /// Count descending, then level name ascending.
    pub levels: Vec<LevelCount>,
    /// Most frequent messages, count descending, then message ascending.
    pub top_messages: Vec<MessageCount>,
    /// Records lost to a read error.
    pub skipped: u64,
}

/// Count levels and messages, keeping only `level` when given.
///
/// Per-message counts are exact; the top `top` messages are then chosen with
/// the bounded top-K selector.
pub fn summarize<I>(records: I, level: Option<&str>, top: usize) -> LogSummary
where
    I: IntoIterator<Item = Result<Record, LogReadError>>,
{
    let mut total_lines = 0u64;
    let mut skipped = 0u64;
    let mut level_counts: HashMap<String, u64> = HashMap::new();
    let mut message_counts: HashMap<String, u64> = HashMap::new();

    for record in records {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(event = "core.logsum.read_failed", error = %e);
                skipped += 1;
                continue;
            }
        };
        if level.is_some_and(|wanted| record.level != wanted) {
            continue;
        }
        total_lines += 1;
        *level_counts.entry(record.level).or_default() += 1;
        *message_counts.entry(record.message).or_default() += 1;
    }

    let mut levels: Vec<LevelCount> = level_counts
        .into_iter()
        .map(|(level, count)| LevelCount { level, count })
        .collect();
    levels.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.level.cmp(&b.level)));

    let distinct_messages = message_counts.len();
    let ranked = aggregate(
        message_counts
            .into_iter()
            .map(|(message, count)| ScoredItem::new(count, message, ())),
        top,
    );
    let top_messages = ranked
        .top
        .into_iter()
        .map(|item| MessageCount {
            count: item.score,
            message: item.key,
        })
        .collect();

    LogSummary {
        total_lines,
        distinct_messages,
        levels,
        top_messages,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn record(level: &str, message: &str) -> Record {
        Record {
            level: level.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_parse_line_formats() {
        assert_eq!(parse_line("[info] started  "), Some(record("INFO", "started")));
        assert_eq!(parse_line("[ERROR]disk full"), Some(record("ERROR", "disk full")));
        assert_eq!(parse_line("Warn : slow query"), Some(record("WARN", "slow query")));
        assert_eq!(parse_line("DEBUG:"), Some(record("DEBUG", "")));
    }

    #[test]
    fn test_parse_line_unknown_and_blank() {
        assert_eq!(
            parse_line("  just text here \n"),
            Some(record(UNKNOWN_LEVEL, "just text here"))
        );
        assert_eq!(
            parse_line("[E1] code"),
            Some(record(UNKNOWN_LEVEL, "[E1] code"))
        );
        assert_eq!(
            parse_line("2024-01-01 INFO: x"),
            Some(record(UNKNOWN_LEVEL, "2024-01-01 INFO: x"))
        );
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   \r\n"), None);
    }

    #[test]
    fn test_read_records_skips_blank_and_replaces_invalid_utf8() {
        let input: &[u8] = b"INFO: a\n\n[warn] b\r\nraw \xff bytes\n";
        let records: Vec<Record> = read_records("test", Cursor::new(input))
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], record("WARN", "b"));
        assert_eq!(records[2].level, UNKNOWN_LEVEL);
        assert!(records[2].message.contains('\u{FFFD}'));
    }

    struct FailingReader;

    impl io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device gone"))
        }
    }

    #[test]
    fn test_read_error_ends_stream() {
        let mut records = read_records("broken", BufReader::new(FailingReader));
        assert!(matches!(
            records.next(),
            Some(Err(LogReadError::ReadFailed { .. }))
        ));
        assert!(records.next().is_none());
    }

    #[test]
    fn test_summarize_counts_and_ranks() {
        let text = "INFO: start\nERROR: boom\nINFO: start\nWARN: slow\nERROR: boom\nINFO: tick\n";
        let summary = summarize(read_records("t", Cursor::new(text)), None, 2);

        assert_eq!(summary.total_lines, 6);
        assert_eq!(summary.distinct_messages, 4);
        assert_eq!(
            summary.levels,
            vec![
                LevelCount { level: "INFO".into(), count: 3 },
                LevelCount { level: "ERROR".into(), count: 2 },
                LevelCount { level: "WARN".into(), count: 1 },
            ]
        );
        assert_eq!(
            summary.top_messages,
            vec![
                MessageCount { count: 2, message: "boom".into() },
                MessageCount { count: 2, message: "start".into() },
            ]
        );
    }

    #[test]
    fn test_summarize_level_filter() {
        let text = "INFO: a\nERROR: b\n[error] b\nplain\n";
        let summary = summarize(read_records("t", Cursor::new(text)), Some("ERROR"), 5);
        assert_eq!(summary.total_lines, 2);
        assert_eq!(summary.levels, vec![LevelCount { level: "ERROR".into(), count: 2 }]);
        assert_eq!(
            summary.top_messages,
            vec![MessageCount { count: 2, message: "b".into() }]
        );
    }

    #[test]
    fn test_summarize_zero_top() {
        let summary = summarize(read_records("t", Cursor::new("INFO: a\n")), None, 0);
        assert_eq!(summary.total_lines, 1);
        assert!(summary.top_messages.is_empty());
    }

    #[test]
    fn test_summarize_counts_read_failures() {
        let records = vec![
            Ok(record("INFO", "a")),
            Err(LogReadError::ReadFailed {
                source_name: "t".into(),
                message: "gone".into(),
            }),
        ];
        let summary = summarize(records, None, 5);
        assert_eq!(summary.total_lines, 1);
        assert_eq!(summary.skipped, 1);
    }
}
