//! Human-readable byte sizes using decimal (1000-based) units.

/// Unit suffixes, indexed by the number of divisions by 1000.
pub const FILE_SIZE_UNITS: [&str; 5] = [" bytes", "kb", "mb", "gb", "tb"];

/// Formats a byte count for display.
///
/// Counts up to and including 1000 print as an integer with the base unit
/// ("512 bytes", "1000 bytes"). Larger counts are divided by 1000 until the
/// value is at most 1000 and printed with two decimals ("1.50mb"). Values past
/// the largest unit stay in that unit.
pub fn format_file_size(bytes: u64) -> String {
    if bytes <= 1000 {
        return format!("{}{}", bytes, FILE_SIZE_UNITS[0]);
    }

    let mut size = bytes as f64;
    let mut division = 0;
    while size > 1000.0 && division < FILE_SIZE_UNITS.len() - 1 {
        size /= 1000.0;
        division += 1;
    }

    format!("{:.2}{}", size, FILE_SIZE_UNITS[division])
}
