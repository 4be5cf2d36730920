/// Counters collected while walking the roots of one query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageStats {
    /// Non-directory entries counted (files, symlinks, ...)
    pub files: u64,
    /// Directories opened and listed
    pub dirs: u64,
    /// Entries or roots that disappeared before they could be read
    pub vanished: u64,
    /// Bytes counted so far
    pub bytes: u64,
}

