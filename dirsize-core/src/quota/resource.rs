use std::fmt;

use crate::QuotaError;

/// Storage usage in kilobytes
pub const QUOTA_NAME_STORAGE_KILOBYTES: &str = "STORAGE";
/// Storage usage in bytes
pub const QUOTA_NAME_STORAGE_BYTES: &str = "STORAGE_BYTES";
/// Number of messages
pub const QUOTA_NAME_MESSAGES: &str = "MESSAGE";

/// Quantifiable dimension a quota root can report usage for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaResource {
    StorageKilobytes,
    StorageBytes,
    Messages,
}

impl QuotaResource {
    pub fn name(&self) -> &'static str {
        match self {
            QuotaResource::StorageKilobytes => QUOTA_NAME_STORAGE_KILOBYTES,
            QuotaResource::StorageBytes => QUOTA_NAME_STORAGE_BYTES,
            QuotaResource::Messages => QUOTA_NAME_MESSAGES,
        }
    }

    /// Look up a resource by name, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<Self> {
        [
            QuotaResource::StorageKilobytes,
            QuotaResource::StorageBytes,
            QuotaResource::Messages,
        ]
        .into_iter()
        .find(|r| r.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for QuotaResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of a resource query
#[derive(Debug)]
pub enum QuotaGetResult {
    /// Usage was computed completely
    Limited(u64),
    /// The backend does not serve the requested resource
    UnknownResource,
    /// Usage could not be computed
    InternalError(QuotaError),
}

impl QuotaGetResult {
    pub fn value(&self) -> Option<u64> {
        match self {
            QuotaGetResult::Limited(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_unknown_resource(&self) -> bool {
        matches!(self, QuotaGetResult::UnknownResource)
    }
}
