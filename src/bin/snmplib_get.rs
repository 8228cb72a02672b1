//! snmplib-get: Retrieve SNMP OID values.

use clap::Parser;
use snmplib::{Session, Version};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Retrieve one or more SNMP OID values.
#[derive(Debug, Parser)]
#[command(name = "snmplib-get", version, about)]
struct Args {
    /// Agent host name or address.
    #[arg(short = 'H', long)]
    host: String,

    /// Agent UDP port.
    #[arg(short, long, default_value_t = snmplib::DEFAULT_PORT)]
    port: u16,

    /// Community string.
    #[arg(short, long, default_value = "public")]
    community: String,

    /// Use SNMPv1 instead of v2c.
    #[arg(long)]
    v1: bool,

    /// Per-attempt timeout in seconds.
    #[arg(short, long, default_value_t = 5)]
    timeout: u64,

    /// Retries after a timed-out attempt.
    #[arg(short, long, default_value_t = 3)]
    retries: u32,

    /// OID expressions to retrieve (numeric or symbolic notation).
    #[arg(required = true, value_name = "OID")]
    oids: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut session = Session::new();
    session.set_host_port(&args.host, args.port);
    session.set_community_string(&args.community);
    session.set_timeout(Duration::from_secs(args.timeout));
    session.set_retries(args.retries);
    if args.v1 {
        session.set_version(Version::V1);
    }

    let mut failed = false;
    for oid_expr in &args.oids {
        match session.get(oid_expr).await {
            Ok(value) => println!("{} = {}", oid_expr, value),
            Err(e) => {
                eprintln!("{}: {}", oid_expr, e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
