use crate::{QuotaError, Result};

/// Options parsed from the backend argument string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuotaRootSettings {
    /// Report usage but never enforce limits
    pub no_enforcing: bool,
    /// Hide the root from user-visible quota listings
    pub hidden: bool,
    /// Skip the root for users with unlimited quota
    pub ignore_unlimited: bool,
    /// Only the namespace with exactly this prefix counts toward the root
    pub ns_prefix: Option<String>,
}

impl QuotaRootSettings {
    /// Parse whitespace separated options, e.g. `"noenforcing ns=INBOX."`
    pub fn parse(args: &str) -> Result<Self> {
        let mut settings = Self::default();

        for arg in args.split_whitespace() {
            if let Some(prefix) = arg.strip_prefix("ns=") {
                settings.ns_prefix = Some(prefix.to_string());
                continue;
            }
            match arg {
                "noenforcing" => settings.no_enforcing = true,
                "hidden" => settings.hidden = true,
                "ignoreunlimited" => settings.ignore_unlimited = true,
                other => {
                    return Err(QuotaError::InvalidArgs(format!(
                        "Unknown quota root argument: {}",
                        other
                    )));
                }
            }
        }

        Ok(settings)
    }
}
