//! snmplib-set: Write an SNMP OID value.

use clap::{Parser, ValueEnum};
use snmplib::{Session, SnmpType, Version};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TypeArg {
    OctetString,
    Integer,
    Integer32,
    Counter32,
    Counter64,
    Gauge32,
    Unsigned32,
    Timeticks,
}

impl From<TypeArg> for SnmpType {
    fn from(value: TypeArg) -> Self {
        match value {
            TypeArg::OctetString => SnmpType::OctetString,
            TypeArg::Integer => SnmpType::Integer,
            TypeArg::Integer32 => SnmpType::Integer32,
            TypeArg::Counter32 => SnmpType::Counter32,
            TypeArg::Counter64 => SnmpType::Counter64,
            TypeArg::Gauge32 => SnmpType::Gauge32,
            TypeArg::Unsigned32 => SnmpType::Unsigned32,
            TypeArg::Timeticks => SnmpType::TimeTicks,
        }
    }
}

/// Write a typed value to an SNMP OID.
#[derive(Debug, Parser)]
#[command(name = "snmplib-set", version, about)]
struct Args {
    /// Agent host name or address.
    #[arg(short = 'H', long)]
    host: String,

    /// Agent UDP port.
    #[arg(short, long, default_value_t = snmplib::DEFAULT_PORT)]
    port: u16,

    /// Community string.
    #[arg(short, long, default_value = "private")]
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

    /// Value type to encode.
    #[arg(short = 'T', long, value_enum)]
    value_type: TypeArg,

    /// OID expression (numeric or symbolic notation).
    #[arg(value_name = "OID")]
    oid: String,

    /// Raw value, converted to the requested type.
    #[arg(value_name = "VALUE")]
    value: String,
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

    let value = match SnmpType::from(args.value_type).convert(&args.value) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match session.set(&args.oid, value).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", args.oid, e);
            ExitCode::FAILURE
        }
    }
}
