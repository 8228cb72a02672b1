//! OID expression parsing.
//!
//! User-supplied OID strings come in four notations:
//!
//! ```text
//! SNMPv2-MIB::sysDescr.0          module-qualified symbolic
//! .1.3.6.1.2.1.1.1.0              fully numeric, leading dot
//! .iso.org.6.internet.2.1.1.1.0   mixed numeric/symbolic, leading dot
//! sysDescr.0                      bare symbol, searched in all modules
//! ```
//!
//! Dispatch order: `::` first, then leading dot, otherwise bare symbol.
//! Every non-numeric segment is tried as an integer first and kept as a name
//! on parse failure - a policy branch, not an error.

use super::MibLookup;
use crate::error::Result;
use crate::oid::Oid;

/// One dot-separated component of an OID expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Numeric arc.
    Arc(u32),
    /// Symbolic name, resolved against the lookup service.
    Name(String),
}

impl Segment {
    /// Explicit two-branch parse: integer if it parses, name otherwise.
    fn parse(s: &str) -> Self {
        match s.parse::<u32>() {
            Ok(arc) => Segment::Arc(arc),
            Err(_) => Segment::Name(s.to_string()),
        }
    }
}

/// A parsed, not yet resolved OID expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OidExpr {
    /// Leading-dot form: a path of arcs and well-known tree labels.
    Path(Vec<Segment>),
    /// Symbolic form: `(module, symbol)` plus trailing segments.
    ///
    /// An empty module means "search all registered modules".
    Symbolic {
        module: String,
        symbol: String,
        suffix: Vec<Segment>,
    },
}

impl OidExpr {
    /// Parse an expression into its notation class.
    ///
    /// Parsing never fails; unknown names surface at [`resolve`](Self::resolve).
    pub fn parse(expr: &str) -> Self {
        if let Some((module, rest)) = expr.split_once("::") {
            return Self::symbolic(module, rest);
        }

        if let Some(path) = expr.strip_prefix('.') {
            return OidExpr::Path(path.split('.').map(Segment::parse).collect());
        }

        Self::symbolic("", expr)
    }

    fn symbolic(module: &str, rest: &str) -> Self {
        let (symbol, suffix) = match rest.split_once('.') {
            Some((symbol, tail)) => (symbol, tail.split('.').map(Segment::parse).collect()),
            None => (rest, Vec::new()),
        };
        OidExpr::Symbolic {
            module: module.to_string(),
            symbol: symbol.to_string(),
            suffix,
        }
    }

    /// Resolve to the canonical numeric OID.
    ///
    /// Fails with [`Error::UnknownSymbol`](crate::error::Error::UnknownSymbol)
    /// when a module/symbol pair or a name segment is not known to the
    /// lookup service.
    pub fn resolve(&self, mib: &dyn MibLookup) -> Result<Oid> {
        match self {
            OidExpr::Path(segments) => {
                let mut oid = Oid::empty();
                for segment in segments {
                    match segment {
                        Segment::Arc(arc) => oid.push(*arc),
                        Segment::Name(name) => {
                            let arc = mib
                                .resolve_node(name)
                                .ok_or_else(|| super::unknown_symbol("", name))?;
                            oid.push(arc);
                        }
                    }
                }
                Ok(oid)
            }
            OidExpr::Symbolic {
                module,
                symbol,
                suffix,
            } => {
                let base = mib
                    .resolve(module, symbol)
                    .ok_or_else(|| super::unknown_symbol(module, symbol))?;
                let mut oid = Oid::new(base);
                for segment in suffix {
                    match segment {
                        Segment::Arc(arc) => oid.push(*arc),
                        Segment::Name(name) => {
                            let arc = mib
                                .resolve_node(name)
                                .ok_or_else(|| super::unknown_symbol(module, name))?;
                            oid.push(arc);
                        }
                    }
                }
                Ok(oid)
            }
        }
    }
}

impl std::fmt::Display for OidExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OidExpr::Path(segments) => {
                for segment in segments {
                    match segment {
                        Segment::Arc(arc) => write!(f, ".{}", arc)?,
                        Segment::Name(name) => write!(f, ".{}", name)?,
                    }
                }
                Ok(())
            }
            OidExpr::Symbolic {
                module,
                symbol,
                suffix,
            } => {
                if !module.is_empty() {
                    write!(f, "{}::", module)?;
                }
                write!(f, "{}", symbol)?;
                for segment in suffix {
                    match segment {
                        Segment::Arc(arc) => write!(f, ".{}", arc)?,
                        Segment::Name(name) => write!(f, ".{}", name)?,
                    }
                }
                Ok(())
            }
        }
    }
}
