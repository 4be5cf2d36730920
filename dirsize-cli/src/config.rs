use std::fs;
use std::path::{Path, PathBuf};

use dirsize_core::{MailNamespace, NamespaceKind, QuotaError};
use serde::Deserialize;

/// Account file describing the namespaces whose storage is counted
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountConfig {
    /// Backend argument string, e.g. `"noenforcing ns=INBOX."`
    #[serde(default)]
    pub backend_args: Option<String>,
    #[serde(default, rename = "namespace")]
    pub namespaces: Vec<NamespaceConfig>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindSetting {
    #[default]
    Private,
    Shared,
    Public,
}

impl From<KindSetting> for NamespaceKind {
    fn from(kind: KindSetting) -> Self {
        match kind {
            KindSetting::Private => NamespaceKind::Private,
            KindSetting::Shared => NamespaceKind::Shared,
            KindSetting::Public => NamespaceKind::Public,
        }
    }
}

/// On-disk mailbox format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    /// One directory per mailbox
    #[default]
    Maildir,
    /// One file per mailbox
    Mbox,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamespaceConfig {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub kind: KindSetting,
    pub root: Option<PathBuf>,
    pub inbox: Option<PathBuf>,
    #[serde(default)]
    pub storage: StorageFormat,
}

impl NamespaceConfig {
    /// Namespace made of a single mailbox directory tree
    pub fn directory(path: PathBuf) -> Self {
        Self {
            root: Some(path),
            ..Default::default()
        }
    }

    /// Namespace made of a single mbox file
    pub fn mailbox_file(path: PathBuf) -> Self {
        Self {
            inbox: Some(path),
            storage: StorageFormat::Mbox,
            ..Default::default()
        }
    }
}

impl MailNamespace for NamespaceConfig {
    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn kind(&self) -> NamespaceKind {
        self.kind.into()
    }

    fn root_dir(&self) -> Option<PathBuf> {
        self.root.clone()
    }

    fn inbox_path(&self) -> Option<PathBuf> {
        self.inbox.clone()
    }

    fn is_mailbox_file(&self) -> bool {
        self.storage == StorageFormat::Mbox
    }
}

impl AccountConfig {
    pub fn parse(text: &str) -> Result<Self, QuotaError> {
        toml::from_str(text).map_err(|e| QuotaError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, QuotaError> {
        let text = fs::read_to_string(path)
            .map_err(|e| QuotaError::Config(format!("{}: {}", path.display(), e)))?;
        Self::parse(&text)
    }
}

/// `<config dir>/dirsize/account.toml`, if it exists
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("dirsize").join("account.toml"))
        .filter(|p| p.is_file())
}
