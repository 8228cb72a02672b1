//! OID resolution and MIB registry behavior through the public API.

use snmplib::{Error, MibRegistry, MibLookup, OidExpr, Session, oid};
use std::sync::Arc;

#[test]
fn equivalent_notations_resolve_to_one_canonical_oid() {
    let session = Session::new();
    let expected = oid!(1, 3, 6, 1, 2, 1, 1, 1, 0);

    for expr in [
        "SNMPv2-MIB::sysDescr.0",
        ".1.3.6.1.2.1.1.1.0",
        ".iso.org.6.internet.2.1.1.1.0",
        ".iso.org.dod.internet.mgmt.mib-2.1.1.0",
        "sysDescr.0",
    ] {
        assert_eq!(
            session.resolve_oid(expr).unwrap(),
            expected,
            "notation {:?}",
            expr
        );
    }
}

#[test]
fn instance_suffixes_append_verbatim() {
    let session = Session::new();
    assert_eq!(
        session.resolve_oid("IF-MIB::ifDescr.3").unwrap(),
        oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 3)
    );
    assert_eq!(
        session.resolve_oid("ifDescr.1.2.3").unwrap(),
        oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 1, 2, 3)
    );
}

#[test]
fn unknown_symbol_reports_module_and_symbol() {
    let session = Session::new();

    let err = session.resolve_oid("VENDOR-MIB::vendorThing.0").unwrap_err();
    let Error::UnknownSymbol { module, symbol } = err else {
        panic!("expected UnknownSymbol, got {:?}", err);
    };
    assert_eq!(&*module, "VENDOR-MIB");
    assert_eq!(&*symbol, "vendorThing");
}

#[test]
fn registering_a_vendor_module_makes_it_resolvable() {
    let registry = Arc::new(MibRegistry::with_core_modules());
    registry.register_module(
        "VENDOR-MIB",
        [("vendorThing", &[1u32, 3, 6, 1, 4, 1, 9999, 1][..])],
    );
    let session = Session::with_mib(registry);

    assert_eq!(
        session.resolve_oid("VENDOR-MIB::vendorThing.0").unwrap(),
        oid!(1, 3, 6, 1, 4, 1, 9999, 1, 0)
    );
    // Bare-symbol form searches the new module too
    assert_eq!(
        session.resolve_oid("vendorThing.0").unwrap(),
        oid!(1, 3, 6, 1, 4, 1, 9999, 1, 0)
    );
}

#[test]
fn search_path_atomic_on_failure() {
    let mut session = Session::new();
    let good = std::env::temp_dir();

    session.add_mib_search_path(&good).unwrap();
    assert_eq!(session.mib().search_path(), vec![good.clone()]);

    let err = session
        .add_mib_search_path(good.join("snmplib-no-such-subdir"))
        .unwrap_err();
    assert!(matches!(err, Error::PathNotFound { .. }));

    // Failed addition left the list untouched
    assert_eq!(session.mib().search_path(), vec![good]);
}

#[test]
fn preload_is_optional_for_resolution() {
    let registry = Arc::new(MibRegistry::with_core_modules());
    assert!(!registry.is_loaded("SNMPv2-MIB"));

    // Resolution works without any preload
    assert_eq!(
        registry.resolve("SNMPv2-MIB", "sysUpTime"),
        Some(vec![1, 3, 6, 1, 2, 1, 1, 3])
    );

    let mut session = Session::with_mib(registry.clone());
    session.preload_mibs(&["SNMPv2-MIB"]).unwrap();
    assert!(registry.is_loaded("SNMPv2-MIB"));
}

#[test]
fn integer_else_name_fallback_in_suffix() {
    // A non-numeric suffix segment is kept as a name and resolved as a
    // tree label, not treated as a parse error.
    let expr = OidExpr::parse(".1.3.dod.1.2.1.1.1.0");
    let registry = MibRegistry::new();
    assert_eq!(
        expr.resolve(&registry).unwrap(),
        oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)
    );
}
