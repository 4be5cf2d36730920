mod config;
mod report;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, bail};
use dirsize_core::{
    DirsizeBackend, MailNamespace, QUOTA_NAME_STORAGE_BYTES, QuotaBackend, QuotaGetResult,
    QuotaResource,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::{AccountConfig, NamespaceConfig, default_config_path};
use report::{Unit, render_stats, render_usage};

const EXIT_UNKNOWN_RESOURCE: i32 = 2;

/// dirsize - report a mail account's storage usage from the filesystem
#[derive(Parser, Debug)]
#[command(name = "dirsize")]
#[command(about = "Sum the size of every file under a mail account's storage paths")]
#[command(version)]
struct Args {
    /// Account file listing namespaces (defaults to <config dir>/dirsize/account.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Mailbox directory to count (repeatable)
    #[arg(long = "dir", value_name = "PATH")]
    dirs: Vec<PathBuf>,

    /// Single-file mailbox to count (repeatable)
    #[arg(long = "file", value_name = "PATH")]
    files: Vec<PathBuf>,

    /// Backend arguments, e.g. "noenforcing ns=INBOX."
    #[arg(long = "args", value_name = "ARGS")]
    backend_args: Option<String>,

    /// Quota resource to query
    #[arg(short, long, default_value = QUOTA_NAME_STORAGE_BYTES)]
    resource: String,

    /// Print the value in kilobytes
    #[arg(short, long, conflicts_with = "human")]
    kilobytes: bool,

    /// Print a human readable size
    #[arg(short = 'H', long)]
    human: bool,

    /// Print walk statistics (storage resources only)
    #[arg(long)]
    stats: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn unit(&self) -> Unit {
        if self.kilobytes {
            Unit::Kilobytes
        } else if self.human {
            Unit::Human
        } else {
            Unit::Bytes
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(args.verbose);

    let config_path = args.config.clone().or_else(default_config_path);
    let account = match &config_path {
        Some(path) => {
            debug!(path = %path.display(), "loading account file");
            AccountConfig::load(path)
                .wrap_err_with(|| format!("Failed to load account file {}", path.display()))?
        }
        None => AccountConfig::default(),
    };

    let mut namespaces = account.namespaces;
    namespaces.extend(args.dirs.iter().cloned().map(NamespaceConfig::directory));
    namespaces.extend(args.files.iter().cloned().map(NamespaceConfig::mailbox_file));
    if namespaces.is_empty() {
        bail!("No storage paths given: pass --dir, --file or an account file");
    }

    let backend_args = args
        .backend_args
        .clone()
        .or(account.backend_args)
        .unwrap_or_default();
    let mut backend = DirsizeBackend::new();
    backend
        .init(&backend_args)
        .wrap_err("Failed to initialize quota backend")?;

    let refs: Vec<&dyn MailNamespace> = namespaces
        .iter()
        .map(|ns| ns as &dyn MailNamespace)
        .collect();

    if args.stats {
        if !serves_stats(&args.resource) {
            exit_unknown_resource(&backend, &args.resource);
        }
        let (bytes, stats) = backend
            .storage_usage(&refs)
            .wrap_err("Failed to compute quota usage")?;
        println!("{}", render_usage(QUOTA_NAME_STORAGE_BYTES, bytes, args.unit()));
        println!("{}", render_stats(&stats));
        return Ok(());
    }

    match backend.get_resource(&args.resource, &refs) {
        QuotaGetResult::Limited(bytes) => {
            info!(resource = %args.resource, bytes, "usage computed");
            println!("{}", render_usage(&args.resource, bytes, args.unit()));
            Ok(())
        }
        QuotaGetResult::UnknownResource => exit_unknown_resource(&backend, &args.resource),
        QuotaGetResult::InternalError(e) => {
            Err(color_eyre::Report::new(e).wrap_err("Failed to compute quota usage"))
        }
    }
}

/// `--stats` walks storage, so it only answers the byte storage resource
fn serves_stats(resource: &str) -> bool {
    QuotaResource::from_name(resource) == Some(QuotaResource::StorageBytes)
}

fn exit_unknown_resource(backend: &DirsizeBackend, resource: &str) -> ! {
    let advertised: Vec<String> = backend.resources().iter().map(|r| r.to_string()).collect();
    eprintln!(
        "Error: Unknown quota resource: {} (backend {} advertises {}, queries {})",
        resource,
        backend.name(),
        advertised.join(", "),
        QuotaResource::StorageBytes
    );
    std::process::exit(EXIT_UNKNOWN_RESOURCE);
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "dirsize=debug,dirsize_core=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
