//! GET and SET session tests against the loopback test agent.

mod common;

use common::TestAgent;
use snmplib::{Error, Session, Value, Version, oid};
use std::time::Duration;

fn session_for(agent: &TestAgent) -> Session {
    let mut session = Session::new();
    session.set_host_port(agent.addr().ip().to_string(), agent.addr().port());
    session.set_community_string("private");
    session
}

/// The end-to-end scenario: configure, preload, GET, typed SETs, GET back.
#[tokio::test]
async fn get_set_roundtrip_scenario() {
    let agent = TestAgent::new().await;
    let mut session = session_for(&agent);
    session.preload_mibs(&["SNMPv2-MIB"]).unwrap();

    let descr = session.get(".1.3.6.1.2.1.1.1.0").await.unwrap();
    assert_eq!(descr.as_str(), Some("Test SNMP Agent"));

    session
        .set_octet_string(".1.3.6.1.2.1.1.6.0", "Test")
        .await
        .unwrap();
    let location = session.get("SNMPv2-MIB::sysLocation.0").await.unwrap();
    assert_eq!(location.as_str(), Some("Test"));

    session
        .set_gauge32(".1.3.6.1.4.1.15000.5.2.1.0", "200")
        .await
        .unwrap();
    let gauge = session.get(".1.3.6.1.4.1.15000.5.2.1.0").await.unwrap();
    assert_eq!(gauge, Value::Gauge32(200));
}

#[tokio::test]
async fn symbolic_and_numeric_get_agree() {
    let agent = TestAgent::new().await;
    let mut session = session_for(&agent);

    let by_symbol = session.get("SNMPv2-MIB::sysDescr.0").await.unwrap();
    let by_number = session.get(".1.3.6.1.2.1.1.1.0").await.unwrap();
    let by_mixed = session.get(".iso.org.6.internet.2.1.1.1.0").await.unwrap();
    let by_bare = session.get("sysDescr.0").await.unwrap();

    assert_eq!(by_symbol, by_number);
    assert_eq!(by_symbol, by_mixed);
    assert_eq!(by_symbol, by_bare);
}

#[tokio::test]
async fn get_missing_object_fails_with_object_not_found() {
    let agent = TestAgent::new().await;
    let mut session = session_for(&agent);

    let err = session.get(".1.3.6.1.99.99.0").await.unwrap_err();
    let Error::ObjectNotFound { oid } = err else {
        panic!("expected ObjectNotFound, got {:?}", err);
    };
    assert_eq!(oid, oid!(1, 3, 6, 1, 99, 99, 0));
}

#[tokio::test]
async fn v1_missing_object_also_maps_to_object_not_found() {
    let agent = TestAgent::new().await;
    let mut session = session_for(&agent);
    session.set_version(Version::V1);

    let err = session.get(".1.3.6.1.99.99.0").await.unwrap_err();
    assert!(matches!(err, Error::ObjectNotFound { .. }));
}

#[tokio::test]
async fn get_before_set_host_fails() {
    let mut session = Session::new();
    let err = session.get(".1.3.6.1.2.1.1.1.0").await.unwrap_err();
    assert!(matches!(err, Error::NotConfigured));
}

#[tokio::test]
async fn typed_setters_store_typed_values() {
    let agent = TestAgent::new().await;
    let mut session = session_for(&agent);
    let target = ".1.3.6.1.4.1.15000.5.2.1.0";
    let target_oid = oid!(1, 3, 6, 1, 4, 1, 15000, 5, 2, 1, 0);

    session.set_integer(target, "-42").await.unwrap();
    assert_eq!(agent.value(&target_oid), Some(Value::Integer(-42)));

    session.set_counter32(target, "4294967295").await.unwrap();
    assert_eq!(agent.value(&target_oid), Some(Value::Counter32(u32::MAX)));

    session
        .set_counter64(target, "18446744073709551615")
        .await
        .unwrap();
    assert_eq!(agent.value(&target_oid), Some(Value::Counter64(u64::MAX)));

    session.set_timeticks(target, "8640000").await.unwrap();
    assert_eq!(agent.value(&target_oid), Some(Value::TimeTicks(8_640_000)));

    // Unsigned32 shares the Gauge32 wire form
    session.set_unsigned32(target, "7").await.unwrap();
    assert_eq!(agent.value(&target_oid), Some(Value::Gauge32(7)));
}

#[tokio::test]
async fn out_of_range_set_never_reaches_the_agent() {
    let agent = TestAgent::new().await;
    let mut session = session_for(&agent);
    let target_oid = oid!(1, 3, 6, 1, 4, 1, 15000, 5, 2, 1, 0);
    let before = agent.value(&target_oid);

    let err = session
        .set_integer32(".1.3.6.1.4.1.15000.5.2.1.0", "2147483648")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Convert { .. }));
    assert_eq!(agent.value(&target_oid), before);
}

#[tokio::test]
async fn stopped_agent_times_out() {
    let agent = TestAgent::new().await;
    let mut session = session_for(&agent);
    session.set_timeout(Duration::from_millis(50));
    session.set_retries(1);

    agent.stop();
    tokio::time::sleep(Duration::from_millis(10)).await;

    let err = session.get(".1.3.6.1.2.1.1.1.0").await.unwrap_err();
    let Error::Timeout { retries, .. } = err else {
        panic!("expected Timeout, got {:?}", err);
    };
    assert_eq!(retries, 1);
}

#[tokio::test]
async fn reconfiguring_host_switches_agents() {
    let first = TestAgent::new().await;
    let mut second_data = common::system_group();
    second_data.insert(oid!(1, 3, 6, 1, 2, 1, 1, 1, 0), Value::from("Second Agent"));
    let second = TestAgent::with_data(second_data).await;

    let mut session = session_for(&first);
    assert_eq!(
        session.get(".1.3.6.1.2.1.1.1.0").await.unwrap().as_str(),
        Some("Test SNMP Agent")
    );

    session.set_host_port(second.addr().ip().to_string(), second.addr().port());
    assert_eq!(
        session.get(".1.3.6.1.2.1.1.1.0").await.unwrap().as_str(),
        Some("Second Agent")
    );
}

#[tokio::test]
async fn independent_sessions_share_one_registry() {
    use snmplib::MibRegistry;
    use std::sync::Arc;

    let registry: Arc<MibRegistry> = Arc::new(MibRegistry::with_core_modules());
    registry.register_module(
        "KEX-MCG-MIB",
        [("clkRefValid", &[1u32, 3, 6, 1, 4, 1, 15000, 5, 2, 1][..])],
    );

    let agent = TestAgent::new().await;

    let mut a = Session::with_mib(registry.clone());
    a.set_host_port(agent.addr().ip().to_string(), agent.addr().port());
    let mut b = Session::with_mib(registry);
    b.set_host_port(agent.addr().ip().to_string(), agent.addr().port());

    let from_a = a.get("KEX-MCG-MIB::clkRefValid.0").await.unwrap();
    let from_b = b.get(".1.3.6.1.4.1.15000.5.2.1.0").await.unwrap();
    assert_eq!(from_a, from_b);
}
