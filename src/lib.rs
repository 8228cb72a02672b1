// Allow large error types - the Error enum carries OIDs inline for debugging
// convenience. Boxing them would add allocations for a marginal size win.
#![allow(clippy::result_large_err)]

//! # snmplib
//!
//! Session-oriented SNMP v1/v2c client with symbolic OID resolution.
//!
//! ## Features
//!
//! - GET and SET against remote agents over UDP
//! - Symbolic OID resolution in all the usual notations
//!   (`SNMPv2-MIB::sysDescr.0`, `.1.3.6.1.2.1.1.1.0`,
//!   `.iso.org.6.internet.2.1.1.1.0`, `sysDescr.0`)
//! - Range-checked typed value conversion for the SMI types
//! - Typed errors for every failure class, from unresolvable symbols to
//!   agent-reported error status
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use snmplib::Session;
//!
//! #[tokio::main]
//! async fn main() -> snmplib::Result<()> {
//!     let mut session = Session::new();
//!     session.set_host("192.168.1.1");
//!     session.set_community_string("public");
//!
//!     let descr = session.get("SNMPv2-MIB::sysDescr.0").await?;
//!     println!("sysDescr: {}", descr);
//!
//!     session.set_octet_string("SNMPv2-MIB::sysLocation.0", "rack 4").await?;
//!     Ok(())
//! }
//! ```

pub mod ber;
pub mod convert;
pub mod error;
pub mod message;
pub mod mib;
pub mod oid;
pub mod pdu;
pub mod prelude;
pub mod session;
pub mod transport;
pub mod value;
pub mod varbind;
pub mod version;

pub(crate) mod util;

// Re-exports for convenience
pub use convert::{
    SnmpType, convert_to_counter32, convert_to_counter64, convert_to_gauge32, convert_to_integer,
    convert_to_integer32, convert_to_octet_string, convert_to_timeticks, convert_to_unsigned32,
};
pub use error::{
    ConvertErrorKind, DecodeErrorKind, Error, ErrorStatus, OidErrorKind, Result,
};
pub use mib::{MibLookup, MibRegistry, OidExpr, Segment};
pub use oid::Oid;
pub use pdu::{Pdu, PduType};
pub use session::{DEFAULT_PORT, Session};
pub use transport::{Transport, UdpTransport};
pub use value::Value;
pub use varbind::VarBind;
pub use version::Version;

/// Testing utilities exposed via the `testing` feature.
#[cfg(feature = "testing")]
pub mod testing {
    pub use crate::transport::{MockResponse, MockTransport, ResponseBuilder};
}
