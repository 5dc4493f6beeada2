use crate::aggregate::AggregateResult;
use crate::dirscan::operations::format_path;
use crate::dirscan::types::{DirscanSettings, ScanMode};
use crate::format::human_size;
use serde::Serialize;
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirscanEntry {
    pub path: String,
    pub size_bytes: u64,
}

/// Result of one scan, shaped for JSON delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirscanReport {
    pub directory: String,
    pub mode: ScanMode,
    pub min_size: u64,
    pub count: u64,
    pub total_bytes: u64,
    pub top_n: usize,
    pub top: Vec<DirscanEntry>,
}

impl DirscanReport {
    pub fn new(settings: &DirscanSettings, result: &AggregateResult<PathBuf>) -> Self {
        Self {
            directory: settings.root.display().to_string(),
            mode: settings.mode,
            min_size: settings.min_size,
            count: result.count,
            total_bytes: result.sum,
            top_n: settings.top,
            top: result
                .top
                .iter()
                .map(|item| DirscanEntry {
                    path: format_path(&item.payload, &settings.root, settings.relative),
                    size_bytes: item.score,
                })
                .collect(),
        }
    }

    /// Plain-text report for a terminal.
    pub fn render_text(&self, human: bool, relative: bool) -> String {
        let size = |bytes: u64| {
            if human {
                human_size(bytes)
            } else {
                bytes.to_string()
            }
        };

        let mut out = String::new();
        let _ = writeln!(out, "directory: {}", self.directory);
        let _ = writeln!(out, "mode:      {}", self.mode);
        let _ = writeln!(out, "min-size:  {}", self.min_size);
        let _ = writeln!(out, "relative:  {relative}");
        let _ = writeln!(out, "count:     {}", self.count);
        let _ = writeln!(out, "total:     {}", size(self.total_bytes));

        if self.top_n > 0 {
            let _ = writeln!(out, "top:       {}", self.top_n);
            for entry in &self.top {
                let _ = writeln!(out, "{}\t{}", size(entry.size_bytes), entry.path);
            }
        }
        out
    }
}
