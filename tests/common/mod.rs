//! In-process SNMP agent for integration tests.
//!
//! A loopback UDP responder over a `BTreeMap<Oid, Value>`: GETs look up,
//! SETs store, anything absent answers per-version ("noSuchInstance" on
//! v2c, Null on v1). The agent binds an ephemeral localhost port and shuts
//! down when dropped.

#![allow(dead_code)] // not every test file exercises every helper

use bytes::Bytes;
use snmplib::pdu::{Pdu, PduType};
use snmplib::message::Message;
use snmplib::varbind::VarBind;
use snmplib::{Oid, Value, Version, oid};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

pub struct TestAgent {
    addr: SocketAddr,
    // Held here so the port stays bound after stop(): a stopped agent must
    // look silent (timeout), not unreachable (ICMP port unreachable).
    _socket: Arc<UdpSocket>,
    data: Arc<Mutex<BTreeMap<Oid, Value>>>,
    task: JoinHandle<()>,
}

impl TestAgent {
    /// Start an agent with the default system group data.
    pub async fn new() -> Self {
        Self::with_data(system_group()).await
    }

    /// Start an agent with custom initial data.
    pub async fn with_data(initial: BTreeMap<Oid, Value>) -> Self {
        let socket = Arc::new(
            UdpSocket::bind("127.0.0.1:0")
                .await
                .expect("bind agent socket"),
        );
        let addr = socket.local_addr().expect("agent local addr");
        let data = Arc::new(Mutex::new(initial));

        let task = tokio::spawn(serve(socket.clone(), data.clone()));

        Self {
            addr,
            _socket: socket,
            data,
            task,
        }
    }

    /// The agent's listening address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Insert or update a value.
    pub fn insert(&self, oid: Oid, value: Value) {
        self.data.lock().unwrap().insert(oid, value);
    }

    /// Read a stored value.
    pub fn value(&self, oid: &Oid) -> Option<Value> {
        self.data.lock().unwrap().get(oid).cloned()
    }

    /// Stop responding (keeps the port bound until drop).
    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for TestAgent {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(socket: Arc<UdpSocket>, data: Arc<Mutex<BTreeMap<Oid, Value>>>) {
    let mut buf = vec![0u8; 65535];

    loop {
        let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
            return;
        };

        let Ok(request) = Message::decode(Bytes::copy_from_slice(&buf[..len])) else {
            continue;
        };

        let response = handle(&request, &data);
        let reply = Message::new(request.version, request.community.clone(), response);
        let _ = socket.send_to(&reply.encode(), peer).await;
    }
}

fn handle(request: &Message, data: &Mutex<BTreeMap<Oid, Value>>) -> Pdu {
    let pdu = &request.pdu;
    let mut store = data.lock().unwrap();

    let varbinds = match pdu.pdu_type {
        PduType::GetRequest => pdu
            .varbinds
            .iter()
            .map(|vb| {
                let value = store.get(&vb.oid).cloned().unwrap_or(match request.version {
                    Version::V1 => Value::Null,
                    _ => Value::NoSuchInstance,
                });
                VarBind::new(vb.oid.clone(), value)
            })
            .collect(),
        PduType::SetRequest => {
            for vb in &pdu.varbinds {
                store.insert(vb.oid.clone(), vb.value.clone());
            }
            pdu.varbinds.clone()
        }
        PduType::Response => Vec::new(),
    };

    Pdu::response(pdu.request_id, varbinds)
}

/// Standard system group (1.3.6.1.2.1.1.*) plus one enterprise gauge.
pub fn system_group() -> BTreeMap<Oid, Value> {
    BTreeMap::from([
        (
            oid!(1, 3, 6, 1, 2, 1, 1, 1, 0),
            Value::from("Test SNMP Agent"),
        ),
        (
            oid!(1, 3, 6, 1, 2, 1, 1, 2, 0),
            Value::ObjectIdentifier(oid!(1, 3, 6, 1, 4, 1, 15000)),
        ),
        (oid!(1, 3, 6, 1, 2, 1, 1, 3, 0), Value::TimeTicks(123_456)),
        (oid!(1, 3, 6, 1, 2, 1, 1, 4, 0), Value::from("admin@example.net")),
        (oid!(1, 3, 6, 1, 2, 1, 1, 5, 0), Value::from("test-agent")),
        (oid!(1, 3, 6, 1, 2, 1, 1, 6, 0), Value::from("lab")),
        (oid!(1, 3, 6, 1, 2, 1, 1, 7, 0), Value::Integer(72)),
        (
            oid!(1, 3, 6, 1, 4, 1, 15000, 5, 2, 1, 0),
            Value::Gauge32(100),
        ),
    ])
}
