//! BER (Basic Encoding Rules) codec for SNMP.
//!
//! Encoding and decoding of BER-encoded data as used by the community-based
//! SNMP message format. Follows X.690 with permissive parsing aligned with
//! net-snmp behavior.

mod decode;
mod encode;
mod length;
pub mod tag;

pub use decode::*;
pub use encode::*;
pub use length::*;
pub use tag::*;
