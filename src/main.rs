//! lanchatter binary
//!
//! Binds the chat daemon to one network interface and runs the two loops
//! until both finish. Normally the process is simply killed; a clean exit
//! happens when the capture stream and the interactive input both end.

use std::path::Path;
use std::process;

use clap::{Arg, Command};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use lanchatter::daemon::{self, config::DEFAULT_CONFIG_PATH, DaemonBuilder, DaemonConfig};
use lanchatter::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = match cli().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            use clap::error::ErrorKind;
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(1),
            }
        }
    };

    init_logging();

    info!("starting lanchatter v{}", env!("CARGO_PKG_VERSION"));

    // Raw capture and injection require root on most systems
    if !daemon::is_privileged() {
        warn!("raw frame capture usually requires root privileges");
    }

    let config = match DaemonConfig::load(Path::new(DEFAULT_CONFIG_PATH)) {
        Ok(config) => config,
        Err(e) => {
            error!("failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let interface = matches.get_one::<String>("interface").unwrap();

    let chat_daemon = match DaemonBuilder::new()
        .with_config(config)
        .with_interface(interface.clone())
        .build()
    {
        Ok(chat_daemon) => chat_daemon,
        Err(e) => {
            // Without a live handle and a local address there is nothing
            // to run; no recovery is attempted.
            error!("failed to open {}: {}", interface, e);
            process::exit(1);
        }
    };

    chat_daemon.run().await
}

/// Command line definition: a single required interface option
fn cli() -> Command {
    Command::new("lanchatter")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Broadcast chat over raw Ethernet frames")
        .arg(
            Arg::new("interface")
                .short('i')
                .long("interface")
                .value_name("INTERFACE")
                .help("Interface to listen on")
                .required(true),
        )
}

/// Initialize logging.
///
/// Verbosity comes from `RUST_LOG`; the chat itself owns stdout, so all
/// diagnostics go to stderr.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
