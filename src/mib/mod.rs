//! MIB name lookup.
//!
//! Symbolic OID resolution is backed by a lookup service injected into the
//! [`Session`](crate::session::Session), so independent sessions can share
//! one cache or keep their own. The bundled [`MibRegistry`] is an in-memory
//! implementation seeded with the standard tree labels and the SNMPv2-MIB
//! system group; MIB compilation from source text is out of scope, so
//! callers with vendor MIBs register the name→OID mappings themselves.

mod expr;

pub use expr::{OidExpr, Segment};

use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Name→OID lookup service.
///
/// The registry is an append-only cache shared across requests: additions
/// must complete before any resolution that depends on them, which the
/// interior lock guarantees.
pub trait MibLookup: Send + Sync {
    /// Resolve `module::symbol` to its numeric OID.
    ///
    /// An empty module searches every registered module.
    fn resolve(&self, module: &str, symbol: &str) -> Option<Vec<u32>>;

    /// Resolve a single well-known tree label (e.g. "iso", "internet") to
    /// its arc value.
    fn resolve_node(&self, name: &str) -> Option<u32>;

    /// Eagerly load the named modules, or every registered module when
    /// `names` is empty.
    fn load_modules(&self, names: &[&str]) -> Result<()>;

    /// Append a directory to the ordered MIB search path.
    ///
    /// The caller validates existence; the registry only records the path.
    fn add_search_path(&self, path: &Path);

    /// The current search path, in consultation order.
    fn search_path(&self) -> Vec<PathBuf>;
}

struct RegistryInner {
    /// module name -> symbol -> numeric OID
    modules: HashMap<String, BTreeMap<String, Vec<u32>>>,
    /// modules already marked loaded by `load_modules`
    loaded: HashSet<String>,
    /// well-known tree labels, flat (label -> arc)
    nodes: HashMap<&'static str, u32>,
    search_path: Vec<PathBuf>,
}

/// In-memory [`MibLookup`] implementation.
pub struct MibRegistry {
    inner: RwLock<RegistryInner>,
}

impl MibRegistry {
    /// Create an empty registry (well-known tree labels only).
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(RegistryInner {
                modules: HashMap::new(),
                loaded: HashSet::new(),
                nodes: well_known_nodes(),
                search_path: Vec::new(),
            }),
        }
    }

    /// Create a registry pre-seeded with the SNMPv2-MIB system group and
    /// the core IF-MIB objects.
    pub fn with_core_modules() -> Self {
        let registry = Self::new();
        registry.register_module("SNMPv2-MIB", SNMPV2_MIB.iter().copied());
        registry.register_module("IF-MIB", IF_MIB.iter().copied());
        registry
    }

    /// Register (or extend) a module's symbol table.
    pub fn register_module<'a>(
        &self,
        name: &str,
        symbols: impl IntoIterator<Item = (&'a str, &'a [u32])>,
    ) {
        let mut inner = self.inner.write().unwrap();
        let table = inner.modules.entry(name.to_string()).or_default();
        for (symbol, oid) in symbols {
            table.insert(symbol.to_string(), oid.to_vec());
        }
        tracing::debug!(target: "snmplib::mib", module = name, "registered MIB module");
    }

    /// Names of all registered modules.
    pub fn module_names(&self) -> Vec<String> {
        let inner = self.inner.read().unwrap();
        let mut names: Vec<String> = inner.modules.keys().cloned().collect();
        names.sort();
        names
    }

    /// Whether a module has been marked loaded.
    pub fn is_loaded(&self, name: &str) -> bool {
        self.inner.read().unwrap().loaded.contains(name)
    }
}

impl Default for MibRegistry {
    fn default() -> Self {
        Self::with_core_modules()
    }
}

impl MibLookup for MibRegistry {
    fn resolve(&self, module: &str, symbol: &str) -> Option<Vec<u32>> {
        let inner = self.inner.read().unwrap();

        if module.is_empty() {
            // No module qualifier: search everything, deterministically
            let mut names: Vec<&String> = inner.modules.keys().collect();
            names.sort();
            for name in names {
                if let Some(oid) = inner.modules[name].get(symbol) {
                    return Some(oid.clone());
                }
            }
            return None;
        }

        inner.modules.get(module)?.get(symbol).cloned()
    }

    fn resolve_node(&self, name: &str) -> Option<u32> {
        self.inner.read().unwrap().nodes.get(name).copied()
    }

    fn load_modules(&self, names: &[&str]) -> Result<()> {
        let mut inner = self.inner.write().unwrap();

        if names.is_empty() {
            tracing::info!(target: "snmplib::mib", "preloading all registered MIB modules");
            let all: Vec<String> = inner.modules.keys().cloned().collect();
            inner.loaded.extend(all);
            return Ok(());
        }

        for &name in names {
            if inner.modules.contains_key(name) {
                tracing::info!(target: "snmplib::mib", module = name, "preloading MIB module");
                inner.loaded.insert(name.to_string());
            } else {
                // Preloading is a latency optimization; resolution of a
                // genuinely unknown module still fails at lookup time.
                tracing::warn!(target: "snmplib::mib", module = name, "MIB module not registered, skipping preload");
            }
        }
        Ok(())
    }

    fn add_search_path(&self, path: &Path) {
        let mut inner = self.inner.write().unwrap();
        inner.search_path.push(path.to_path_buf());
        tracing::debug!(target: "snmplib::mib", path = %path.display(), "MIB search path extended");
    }

    fn search_path(&self) -> Vec<PathBuf> {
        self.inner.read().unwrap().search_path.clone()
    }
}

/// SNMPv2-MIB (RFC 3418) system and snmp group objects.
const SNMPV2_MIB: &[(&str, &[u32])] = &[
    ("system", &[1, 3, 6, 1, 2, 1, 1]),
    ("sysDescr", &[1, 3, 6, 1, 2, 1, 1, 1]),
    ("sysObjectID", &[1, 3, 6, 1, 2, 1, 1, 2]),
    ("sysUpTime", &[1, 3, 6, 1, 2, 1, 1, 3]),
    ("sysContact", &[1, 3, 6, 1, 2, 1, 1, 4]),
    ("sysName", &[1, 3, 6, 1, 2, 1, 1, 5]),
    ("sysLocation", &[1, 3, 6, 1, 2, 1, 1, 6]),
    ("sysServices", &[1, 3, 6, 1, 2, 1, 1, 7]),
    ("snmp", &[1, 3, 6, 1, 2, 1, 11]),
    ("snmpInPkts", &[1, 3, 6, 1, 2, 1, 11, 1]),
    ("snmpEnableAuthenTraps", &[1, 3, 6, 1, 2, 1, 11, 30]),
];

/// IF-MIB (RFC 2863) interface objects.
const IF_MIB: &[(&str, &[u32])] = &[
    ("interfaces", &[1, 3, 6, 1, 2, 1, 2]),
    ("ifNumber", &[1, 3, 6, 1, 2, 1, 2, 1]),
    ("ifTable", &[1, 3, 6, 1, 2, 1, 2, 2]),
    ("ifIndex", &[1, 3, 6, 1, 2, 1, 2, 2, 1, 1]),
    ("ifDescr", &[1, 3, 6, 1, 2, 1, 2, 2, 1, 2]),
    ("ifInOctets", &[1, 3, 6, 1, 2, 1, 2, 2, 1, 10]),
    ("ifOutOctets", &[1, 3, 6, 1, 2, 1, 2, 2, 1, 16]),
    ("ifHCInOctets", &[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 6]),
];

/// Labels of the upper OID tree, as named in RFC 1155 / RFC 2578.
///
/// Kept flat: each label stands for a single arc, which is all the mixed
/// `.iso.org.6.internet...` notation needs.
fn well_known_nodes() -> HashMap<&'static str, u32> {
    HashMap::from([
        ("ccitt", 0),
        ("iso", 1),
        ("joint-iso-ccitt", 2),
        ("org", 3),
        ("dod", 6),
        ("internet", 1),
        ("directory", 1),
        ("mgmt", 2),
        ("mib-2", 1),
        ("experimental", 3),
        ("private", 4),
        ("enterprises", 1),
        ("security", 5),
        ("snmpV2", 6),
    ])
}

/// Resolve an OID expression against a lookup service.
///
/// Convenience wrapper over [`OidExpr::parse`] + [`OidExpr::resolve`].
pub fn resolve_oid(expr: &str, mib: &dyn MibLookup) -> Result<crate::oid::Oid> {
    OidExpr::parse(expr).resolve(mib)
}

/// Map a failed lookup to the library error.
pub(crate) fn unknown_symbol(module: &str, symbol: &str) -> Error {
    Error::unknown_symbol(module, symbol)
}
