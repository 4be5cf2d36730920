mod paths;
mod stats;
mod walker;

pub use paths::{PathEntry, PathSet};
pub use stats::UsageStats;
pub use walker::{UsageWalker, compute_usage, compute_usage_with};
