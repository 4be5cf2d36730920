use std::path::PathBuf;

use super::settings::QuotaRootSettings;
use crate::scanner::PathSet;

/// Ownership class of a mail namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamespaceKind {
    #[default]
    Private,
    Shared,
    /// Has no owner, only counted when selected with `ns=`
    Public,
}

/// Storage locations of one mail namespace, as resolved by the mail storage
pub trait MailNamespace {
    fn prefix(&self) -> &str;

    fn kind(&self) -> NamespaceKind;

    /// Directory holding the namespace's mailboxes
    fn root_dir(&self) -> Option<PathBuf>;

    /// INBOX location, which may live outside `root_dir`
    fn inbox_path(&self) -> Option<PathBuf>;

    /// Mailboxes are single files (mbox) rather than directories
    fn is_mailbox_file(&self) -> bool;
}

/// Whether a namespace's usage counts toward the quota root.
///
/// An `ns=` prefix selects exactly that namespace, public or not. Without
/// one, every namespace that has an owner counts.
pub fn is_namespace_visible(settings: &QuotaRootSettings, ns: &dyn MailNamespace) -> bool {
    match &settings.ns_prefix {
        Some(prefix) => prefix == ns.prefix(),
        None => ns.kind() != NamespaceKind::Public,
    }
}

/// Collect the overlap-free scan roots of every visible namespace
pub fn collect_paths(settings: &QuotaRootSettings, namespaces: &[&dyn MailNamespace]) -> PathSet {
    let mut paths = PathSet::new();

    for ns in namespaces {
        if !is_namespace_visible(settings, *ns) {
            continue;
        }

        if let Some(root) = ns.root_dir() {
            paths.insert(root, false);
        }
        if let Some(inbox) = ns.inbox_path() {
            paths.insert(inbox, ns.is_mailbox_file());
        }
    }

    paths
}


#[cfg(test)]
mod tests {
    use super::test_support::TestNamespace;
    use super::*;
    use std::path::Path;

    fn entries(set: &PathSet) -> Vec<(&Path, bool)> {
        set.iter().map(|e| (e.path.as_path(), e.is_file)).collect()
    }

    #[test]
    fn test_inbox_inside_root_is_counted_once() {
        let ns = TestNamespace {
            root: Some("/home/bob/Maildir".into()),
            inbox: Some("/home/bob/Maildir/INBOX".into()),
            ..Default::default()
        };

        let set = collect_paths(&QuotaRootSettings::default(), &[&ns]);
        assert_eq!(entries(&set), vec![(Path::new("/home/bob/Maildir"), false)]);
    }

    #[test]
    fn test_mbox_inbox_outside_root() {
        let ns = TestNamespace {
            root: Some("/home/bob/mail".into()),
            inbox: Some("/var/mail/bob".into()),
            mbox: true,
            ..Default::default()
        };

        let set = collect_paths(&QuotaRootSettings::default(), &[&ns]);
        assert_eq!(
            entries(&set),
            vec![
                (Path::new("/home/bob/mail"), false),
                (Path::new("/var/mail/bob"), true)
            ]
        );
    }

    #[test]
    fn test_public_namespaces_are_skipped() {
        let private = TestNamespace {
            root: Some("/home/bob/mail".into()),
            ..Default::default()
        };
        let public = TestNamespace {
            prefix: "Public/".into(),
            kind: NamespaceKind::Public,
            root: Some("/srv/public".into()),
            ..Default::default()
        };

        let set = collect_paths(&QuotaRootSettings::default(), &[&private, &public]);
        assert_eq!(entries(&set), vec![(Path::new("/home/bob/mail"), false)]);
    }

    #[test]
    fn test_ns_prefix_filter() {
        let inbox_ns = TestNamespace {
            prefix: "INBOX.".into(),
            root: Some("/home/bob/Maildir".into()),
            ..Default::default()
        };
        let shared = TestNamespace {
            prefix: "Shared/".into(),
            kind: NamespaceKind::Shared,
            root: Some("/srv/shared/bob".into()),
            ..Default::default()
        };
        let settings = QuotaRootSettings {
            ns_prefix: Some("Shared/".into()),
            ..Default::default()
        };

        assert!(!is_namespace_visible(&settings, &inbox_ns));
        assert!(is_namespace_visible(&settings, &shared));

        let set = collect_paths(&settings, &[&inbox_ns, &shared]);
        assert_eq!(entries(&set), vec![(Path::new("/srv/shared/bob"), false)]);
    }

    #[test]
    fn test_ns_prefix_selects_public_namespace() {
        let private = TestNamespace {
            root: Some("/home/bob/mail".into()),
            ..Default::default()
        };
        let public = TestNamespace {
            prefix: "Public/".into(),
            kind: NamespaceKind::Public,
            root: Some("/srv/public".into()),
            ..Default::default()
        };
        let settings = QuotaRootSettings {
            ns_prefix: Some("Public/".into()),
            ..Default::default()
        };

        assert!(is_namespace_visible(&settings, &public));
        assert!(!is_namespace_visible(&settings, &private));

        let set = collect_paths(&settings, &[&private, &public]);
        assert_eq!(entries(&set), vec![(Path::new("/srv/public"), false)]);
    }

    #[test]
    fn test_namespace_without_paths() {
        let ns = TestNamespace::default();
        assert!(collect_paths(&QuotaRootSettings::default(), &[&ns]).is_empty());
    }
}
