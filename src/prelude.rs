//! Prelude module for convenient imports.
//!
//! ```rust,no_run
//! use snmplib::prelude::*;
//! ```
//!
//! This imports the session, the core value/OID types, error handling,
//! and the [`oid!`] macro.

pub use crate::convert::SnmpType;
pub use crate::error::{Error, Result};
pub use crate::mib::{MibLookup, MibRegistry};
pub use crate::oid::Oid;
pub use crate::session::Session;
pub use crate::value::Value;
pub use crate::varbind::VarBind;
pub use crate::version::Version;

#[doc(no_inline)]
pub use crate::oid;
