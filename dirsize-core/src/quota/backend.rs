use tracing::{debug, warn};

use super::namespace::{MailNamespace, collect_paths};
use super::resource::{QuotaGetResult, QuotaResource};
use super::settings::QuotaRootSettings;
use crate::Result;
use crate::scanner::{UsageStats, UsageWalker, compute_usage_with};

/// Pending usage changes from a mailbox write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuotaTransaction {
    pub bytes_delta: i64,
    pub count_delta: i64,
}

/// A quota backend as seen by the quota framework
pub trait QuotaBackend {
    fn name(&self) -> &'static str;

    /// Apply the backend argument string
    fn init(&mut self, args: &str) -> Result<()>;

    /// Resources this backend advertises
    fn resources(&self) -> &'static [QuotaResource];

    fn get_resource(&self, name: &str, namespaces: &[&dyn MailNamespace]) -> QuotaGetResult;

    fn update(&mut self, transaction: &QuotaTransaction) -> Result<()>;
}

/// Backend that derives storage usage by summing file sizes under every
/// visible namespace's mailbox paths.
///
/// Usage is always recomputed from the filesystem, so writes never need to be
/// tracked.
#[derive(Debug, Default)]
pub struct DirsizeBackend {
    settings: QuotaRootSettings,
    auto_updating: bool,
}

impl DirsizeBackend {
    pub const NAME: &'static str = "dirsize";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(&self) -> &QuotaRootSettings {
        &self.settings
    }

    pub fn is_auto_updating(&self) -> bool {
        self.auto_updating
    }

    /// Bytes used by all visible namespaces, with walk statistics
    pub fn storage_usage(&self, namespaces: &[&dyn MailNamespace]) -> Result<(u64, UsageStats)> {
        let paths = collect_paths(&self.settings, namespaces);
        debug!(roots = paths.len(), "computing storage usage");

        let mut walker = UsageWalker::new();
        let bytes = compute_usage_with(&mut walker, &paths)?;
        Ok((bytes, *walker.stats()))
    }
}

impl QuotaBackend for DirsizeBackend {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn init(&mut self, args: &str) -> Result<()> {
        self.settings = QuotaRootSettings::parse(args)?;
        self.auto_updating = true;
        Ok(())
    }

    fn resources(&self) -> &'static [QuotaResource] {
        &[QuotaResource::StorageKilobytes]
    }

    fn get_resource(&self, name: &str, namespaces: &[&dyn MailNamespace]) -> QuotaGetResult {
        if QuotaResource::from_name(name) != Some(QuotaResource::StorageBytes) {
            return QuotaGetResult::UnknownResource;
        }

        match self.storage_usage(namespaces) {
            Ok((bytes, _)) => QuotaGetResult::Limited(bytes),
            Err(e) => {
                warn!(error = %e, "failed to compute storage usage");
                QuotaGetResult::InternalError(e)
            }
        }
    }

    fn update(&mut self, _transaction: &QuotaTransaction) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuotaError;
    use crate::quota::namespace::test_support::TestNamespace;
    use std::fs;
    use tempfile::TempDir;

    fn maildir(temp: &TempDir) -> TestNamespace {
        let root = temp.path().join("Maildir");
        fs::create_dir_all(root.join("cur")).unwrap();
        fs::create_dir_all(root.join(".Sent/cur")).unwrap();
        fs::write(root.join("cur/1"), vec![0u8; 100]).unwrap();
        fs::write(root.join(".Sent/cur/2"), vec![0u8; 50]).unwrap();

        TestNamespace {
            prefix: "INBOX.".into(),
            root: Some(root.clone()),
            inbox: Some(root),
            ..Default::default()
        }
    }

    fn backend(args: &str) -> DirsizeBackend {
        let mut backend = DirsizeBackend::new();
        backend.init(args).unwrap();
        backend
    }

    #[test]
    fn test_init() {
        let backend = backend("noenforcing");
        assert_eq!(backend.name(), "dirsize");
        assert!(backend.is_auto_updating());
        assert!(backend.settings().no_enforcing);

        let mut bad = DirsizeBackend::new();
        assert!(matches!(bad.init("frobnicate"), Err(QuotaError::InvalidArgs(_))));
        assert!(!bad.is_auto_updating());
    }

    #[test]
    fn test_advertises_kilobytes() {
        assert_eq!(backend("").resources(), &[QuotaResource::StorageKilobytes]);
    }

    #[test]
    fn test_storage_bytes() {
        let temp = TempDir::new().unwrap();
        let ns = maildir(&temp);

        let result = backend("").get_resource("STORAGE_BYTES", &[&ns]);
        assert_eq!(result.value(), Some(150));

        let result = backend("").get_resource("storage_bytes", &[&ns]);
        assert_eq!(result.value(), Some(150));
    }

    #[test]
    fn test_unknown_resource() {
        let temp = TempDir::new().unwrap();
        let ns = maildir(&temp);
        let backend = backend("");

        for name in ["STORAGE", "MESSAGE", "whatever", ""] {
            assert!(backend.get_resource(name, &[&ns]).is_unknown_resource());
        }
    }

    #[test]
    fn test_missing_storage_is_zero() {
        let temp = TempDir::new().unwrap();
        let ns = TestNamespace {
            root: Some(temp.path().join("not-created-yet")),
            inbox: Some(temp.path().join("spool/bob")),
            mbox: true,
            ..Default::default()
        };

        assert_eq!(backend("").get_resource("STORAGE_BYTES", &[&ns]).value(), Some(0));
    }

    #[test]
    fn test_io_failure_is_internal_error() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain");
        fs::write(&file, b"abc").unwrap();
        let ns = TestNamespace {
            root: Some(file.join("below-a-file")),
            ..Default::default()
        };

        let result = backend("").get_resource("STORAGE_BYTES", &[&ns]);
        assert!(matches!(result, QuotaGetResult::InternalError(QuotaError::OpenDir { .. })));
    }

    #[test]
    fn test_ns_filter_limits_usage() {
        let temp = TempDir::new().unwrap();
        let ns = maildir(&temp);
        let other_root = temp.path().join("other");
        fs::create_dir_all(&other_root).unwrap();
        fs::write(other_root.join("m"), vec![0u8; 7]).unwrap();
        let other = TestNamespace {
            prefix: "Other/".into(),
            root: Some(other_root),
            ..Default::default()
        };

        assert_eq!(
            backend("").get_resource("STORAGE_BYTES", &[&ns, &other]).value(),
            Some(157)
        );
        assert_eq!(
            backend("ns=Other/").get_resource("STORAGE_BYTES", &[&ns, &other]).value(),
            Some(7)
        );
    }

    #[test]
    fn test_storage_usage_stats() {
        let temp = TempDir::new().unwrap();
        let ns = maildir(&temp);

        let (bytes, stats) = backend("").storage_usage(&[&ns]).unwrap();
        assert_eq!(bytes, 150);
        assert_eq!(stats.files, 2);
        // Maildir, cur, .Sent, .Sent/cur
        assert_eq!(stats.dirs, 4);
    }

    #[test]
    fn test_update_is_noop() {
        let mut backend = backend("");
        let tx = QuotaTransaction {
            bytes_delta: 4096,
            count_delta: 1,
        };
        assert!(backend.update(&tx).is_ok());
        assert_eq!(backend.settings(), &QuotaRootSettings::default());
    }
}
