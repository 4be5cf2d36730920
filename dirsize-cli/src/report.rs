use dirsize_core::{UsageStats, bytes_to_kilobytes, format_count, format_size};

/// How a usage value is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Unit {
    #[default]
    Bytes,
    Kilobytes,
    Human,
}

pub fn render_usage(resource: &str, bytes: u64, unit: Unit) -> String {
    match unit {
        Unit::Bytes => format!("{} {}", resource, bytes),
        Unit::Kilobytes => format!("{} {} KB", resource, bytes_to_kilobytes(bytes)),
        Unit::Human => format!("{} {}", resource, format_size(bytes)),
    }
}

pub fn render_stats(stats: &UsageStats) -> String {
    format!(
        "{} files, {} directories, {} vanished, {} total",
        format_count(stats.files),
        format_count(stats.dirs),
        format_count(stats.vanished),
        format_size(stats.bytes)
    )
}
