const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Render a byte count with binary (1024) steps: `512B`, `1.5KB`, `2.0GB`.
///
/// Whole bytes print without a decimal; every larger unit gets one decimal
/// place. Values past the last unit stay in `PB`.
pub fn human_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for (i, unit) in UNITS.iter().enumerate() {
        let last = i == UNITS.len() - 1;
        if value < 1024.0 || last {
            return if i == 0 {
                format!("{bytes}B")
            } else {
                format!("{value:.1}{unit}")
            };
        }
        value /= 1024.0;
    }
    format!("{bytes}B")
}
