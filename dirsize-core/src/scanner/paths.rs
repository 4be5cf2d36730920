use std::path::PathBuf;

/// One root to be scanned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    pub path: PathBuf,
    /// Single-file mailbox (mbox) rather than a directory
    pub is_file: bool,
}

/// Ordered set of scan roots where no root covers another.
///
/// Two entries never share a path, and no entry lives below another one.
/// `Path::starts_with` compares whole components, so `/var/mail` does not
/// cover `/var/mail2`.
#[derive(Debug, Clone, Default)]
pub struct PathSet {
    entries: Vec<PathEntry>,
}

impl PathSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root, keeping the set free of overlaps.
    ///
    /// A path already covered by an existing entry (same path or a
    /// descendant) is dropped. Otherwise every existing entry below the new
    /// path is removed before the new path is appended.
    pub fn insert(&mut self, path: impl Into<PathBuf>, is_file: bool) {
        let path = path.into();

        let mut i = 0;
        while i < self.entries.len() {
            let existing = &self.entries[i].path;
            if path.starts_with(existing) {
                // already counted
                return;
            }
            if existing.starts_with(&path) {
                self.entries.remove(i);
            } else {
                i += 1;
            }
        }

        self.entries.push(PathEntry { path, is_file });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a PathSet {
    type Item = &'a PathEntry;
    type IntoIter = std::slice::Iter<'a, PathEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
