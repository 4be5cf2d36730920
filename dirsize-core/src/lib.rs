pub mod error;
pub mod quota;
pub mod scanner;
pub mod size;

pub use error::{QuotaError, Result};
pub use quota::{
    DirsizeBackend, MailNamespace, NamespaceKind, QUOTA_NAME_MESSAGES, QUOTA_NAME_STORAGE_BYTES,
    QUOTA_NAME_STORAGE_KILOBYTES, QuotaBackend, QuotaGetResult, QuotaResource, QuotaRootSettings,
    QuotaTransaction, collect_paths, is_namespace_visible,
};
pub use scanner::{PathEntry, PathSet, UsageStats, UsageWalker, compute_usage};
pub use size::{bytes_to_kilobytes, format_count, format_size};
