//! Typed value conversion.
//!
//! [`SnmpType`] names the value types a caller can ask for when converting
//! raw textual input into a wire [`Value`]. Integer and Integer32 share the
//! INTEGER wire form, and Gauge32 and Unsigned32 share tag 0x42; the
//! distinction only matters at this layer, where each type enforces its
//! declared range. All conversions are pure and perform no I/O.

use crate::error::{ConvertErrorKind, Error, Result};
use crate::value::Value;
use bytes::Bytes;

/// The SNMP value types available for typed conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnmpType {
    OctetString,
    Integer,
    Integer32,
    Counter32,
    Counter64,
    Gauge32,
    Unsigned32,
    TimeTicks,
}

impl SnmpType {
    /// The type's conventional SMI name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::OctetString => "OctetString",
            Self::Integer => "Integer",
            Self::Integer32 => "Integer32",
            Self::Counter32 => "Counter32",
            Self::Counter64 => "Counter64",
            Self::Gauge32 => "Gauge32",
            Self::Unsigned32 => "Unsigned32",
            Self::TimeTicks => "TimeTicks",
        }
    }

    /// Convert raw textual input into a [`Value`] of this type.
    ///
    /// Fails with [`ConvertErrorKind::Malformed`] when the input cannot be
    /// read as a number at all, and [`ConvertErrorKind::OutOfRange`] when it
    /// parses but falls outside the type's declared width.
    pub fn convert(self, raw: &str) -> Result<Value> {
        match self {
            Self::OctetString => Ok(Value::OctetString(Bytes::copy_from_slice(raw.as_bytes()))),
            Self::Integer | Self::Integer32 => {
                let n = parse_number(self, raw)?;
                if n < i64::from(i32::MIN) || n > i64::from(i32::MAX) {
                    return Err(Error::convert(self.name(), raw, ConvertErrorKind::OutOfRange));
                }
                Ok(Value::Integer(n as i32))
            }
            Self::Counter32 => Ok(Value::Counter32(self.parse_u32(raw)?)),
            Self::Gauge32 | Self::Unsigned32 => Ok(Value::Gauge32(self.parse_u32(raw)?)),
            Self::TimeTicks => Ok(Value::TimeTicks(self.parse_u32(raw)?)),
            Self::Counter64 => {
                // i128 so that the malformed/out-of-range distinction survives
                // the full u64 domain
                let n = raw.trim().parse::<i128>().map_err(|e| {
                    Error::convert(self.name(), raw, kind_for_parse_error(&e))
                })?;
                if n < 0 || n > i128::from(u64::MAX) {
                    return Err(Error::convert(self.name(), raw, ConvertErrorKind::OutOfRange));
                }
                Ok(Value::Counter64(n as u64))
            }
        }
    }

    fn parse_u32(self, raw: &str) -> Result<u32> {
        let n = parse_number(self, raw)?;
        if n < 0 || n > i64::from(u32::MAX) {
            return Err(Error::convert(self.name(), raw, ConvertErrorKind::OutOfRange));
        }
        Ok(n as u32)
    }
}

impl std::fmt::Display for SnmpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a signed number wide enough to range-check every 32-bit type.
fn parse_number(ty: SnmpType, raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| Error::convert(ty.name(), raw, kind_for_parse_error(&e)))
}

/// A numeric string that merely overflows is out of range, not malformed.
fn kind_for_parse_error(e: &std::num::ParseIntError) -> ConvertErrorKind {
    match e.kind() {
        std::num::IntErrorKind::PosOverflow | std::num::IntErrorKind::NegOverflow => {
            ConvertErrorKind::OutOfRange
        }
        _ => ConvertErrorKind::Malformed,
    }
}

/// Convert a value to an SNMP OctetString. Never fails.
pub fn convert_to_octet_string(value: &str) -> Value {
    Value::OctetString(Bytes::copy_from_slice(value.as_bytes()))
}

/// Convert a value to an SNMP Integer.
pub fn convert_to_integer(value: &str) -> Result<Value> {
    SnmpType::Integer.convert(value)
}

/// Convert a value to an SNMP Integer32.
pub fn convert_to_integer32(value: &str) -> Result<Value> {
    SnmpType::Integer32.convert(value)
}

/// Convert a value to an SNMP Counter32.
pub fn convert_to_counter32(value: &str) -> Result<Value> {
    SnmpType::Counter32.convert(value)
}

/// Convert a value to an SNMP Counter64.
pub fn convert_to_counter64(value: &str) -> Result<Value> {
    SnmpType::Counter64.convert(value)
}

/// Convert a value to an SNMP Gauge32.
pub fn convert_to_gauge32(value: &str) -> Result<Value> {
    SnmpType::Gauge32.convert(value)
}

/// Convert a value to an SNMP Unsigned32.
pub fn convert_to_unsigned32(value: &str) -> Result<Value> {
    SnmpType::Unsigned32.convert(value)
}

/// Convert a value to an SNMP TimeTicks.
pub fn convert_to_timeticks(value: &str) -> Result<Value> {
    SnmpType::TimeTicks.convert(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertErrorKind;

    fn kind(err: Error) -> ConvertErrorKind {
        match err {
            Error::Convert { kind, .. } => kind,
            other => panic!("expected Convert error, got {:?}", other),
        }
    }

    #[test]
    fn octet_string_passthrough() {
        assert_eq!(convert_to_octet_string("Test"), Value::from("Test"));
        assert_eq!(convert_to_octet_string(""), Value::OctetString(Bytes::new()));
    }

    #[test]
    fn integer32_boundaries() {
        assert_eq!(
            SnmpType::Integer32.convert("2147483647").unwrap(),
            Value::Integer(i32::MAX)
        );
        assert_eq!(
            SnmpType::Integer32.convert("-2147483648").unwrap(),
            Value::Integer(i32::MIN)
        );
        assert_eq!(
            kind(SnmpType::Integer32.convert("2147483648").unwrap_err()),
            ConvertErrorKind::OutOfRange
        );
        assert_eq!(
            kind(SnmpType::Integer32.convert("-2147483649").unwrap_err()),
            ConvertErrorKind::OutOfRange
        );
    }

    #[test]
    fn unsigned_types_reject_negative() {
        for ty in [
            SnmpType::Counter32,
            SnmpType::Gauge32,
            SnmpType::Unsigned32,
            SnmpType::TimeTicks,
            SnmpType::Counter64,
        ] {
            assert_eq!(kind(ty.convert("-1").unwrap_err()), ConvertErrorKind::OutOfRange);
        }
    }

    #[test]
    fn unsigned32_boundaries() {
        assert_eq!(
            SnmpType::Counter32.convert("4294967295").unwrap(),
            Value::Counter32(u32::MAX)
        );
        assert_eq!(
            kind(SnmpType::Counter32.convert("4294967296").unwrap_err()),
            ConvertErrorKind::OutOfRange
        );
    }

    #[test]
    fn counter64_boundaries() {
        assert_eq!(
            SnmpType::Counter64.convert("18446744073709551615").unwrap(),
            Value::Counter64(u64::MAX)
        );
        assert_eq!(
            kind(SnmpType::Counter64.convert("18446744073709551616").unwrap_err()),
            ConvertErrorKind::OutOfRange
        );
    }

    #[test]
    fn malformed_input() {
        assert_eq!(
            kind(SnmpType::Counter64.convert("fast").unwrap_err()),
            ConvertErrorKind::Malformed
        );
        assert_eq!(
            kind(SnmpType::Integer.convert("1.5").unwrap_err()),
            ConvertErrorKind::Malformed
        );
        assert_eq!(
            kind(SnmpType::Gauge32.convert("").unwrap_err()),
            ConvertErrorKind::Malformed
        );
    }

    #[test]
    fn gauge_and_unsigned_share_wire_form() {
        assert_eq!(
            SnmpType::Gauge32.convert("200").unwrap(),
            SnmpType::Unsigned32.convert("200").unwrap()
        );
    }

    #[test]
    fn whitespace_tolerated() {
        assert_eq!(SnmpType::Integer.convert(" 42 ").unwrap(), Value::Integer(42));
    }
}
