mod backend;
mod namespace;
mod resource;
mod settings;

pub use backend::{DirsizeBackend, QuotaBackend, QuotaTransaction};
pub use namespace::{MailNamespace, NamespaceKind, collect_paths, is_namespace_visible};
pub use resource::{
    QUOTA_NAME_MESSAGES, QUOTA_NAME_STORAGE_BYTES, QUOTA_NAME_STORAGE_KILOBYTES, QuotaGetResult,
    QuotaResource,
};
pub use settings::QuotaRootSettings;
