use crate::aggregate::aggregate_fallible;
use crate::dirscan::{operations, report::DirscanReport, types::DirscanSettings};
use tracing::info;

/// Walk the configured root once and build the report.
pub fn scan_directory(settings: &DirscanSettings) -> DirscanReport {
    info!(
        event = "core.dirscan.scan_started",
        root = %settings.root.display(),
        mode = settings.mode.as_str(),
        min_size = settings.min_size,
        top = settings.top
    );

    let entries = operations::scan_entries(&settings.root, settings.mode, settings.min_size);
    let result = aggregate_fallible(entries, settings.top);

    info!(
        event = "core.dirscan.scan_completed",
        count = result.count,
        total_bytes = result.sum,
        skipped = result.skipped
    );

    DirscanReport::new(settings, &result)
}
