//! Mock transport for testing.
//!
//! A programmable transport that can simulate response, timeout, and I/O
//! error scenarios without a network.

use super::Transport;
use crate::error::{Error, Result};
use bytes::Bytes;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A scripted response for one exchange.
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Return this data (request_id is patched to match the sent request)
    Data(Bytes),
    /// Return this data as-is without patching
    RawData(Bytes),
    /// Simulate a timeout
    Timeout,
    /// Simulate an I/O error
    IoError(String),
}

struct MockTransportInner {
    target: SocketAddr,
    responses: VecDeque<MockResponse>,
    /// Raw datagrams sent through this transport
    sent: Vec<Bytes>,
    last_request_id: Option<i32>,
}

/// Mock transport for testing the request engine.
#[derive(Clone)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

impl MockTransport {
    /// Create a new mock transport for the given (never contacted) target.
    pub fn new(target: SocketAddr) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockTransportInner {
                target,
                responses: VecDeque::new(),
                sent: Vec::new(),
                last_request_id: None,
            })),
        }
    }

    /// Queue a data response. Its request_id is rewritten to match the
    /// request that precedes it.
    pub fn queue_response(&self, data: impl Into<Bytes>) {
        self.push(MockResponse::Data(data.into()));
    }

    /// Queue a data response without request_id patching.
    pub fn queue_raw_response(&self, data: impl Into<Bytes>) {
        self.push(MockResponse::RawData(data.into()));
    }

    /// Queue a timeout.
    pub fn queue_timeout(&self) {
        self.push(MockResponse::Timeout);
    }

    /// Queue an I/O error.
    pub fn queue_io_error(&self, msg: impl Into<String>) {
        self.push(MockResponse::IoError(msg.into()));
    }

    fn push(&self, response: MockResponse) {
        self.inner.lock().unwrap().responses.push_back(response);
    }

    /// Raw datagrams sent so far.
    pub fn sent(&self) -> Vec<Bytes> {
        self.inner.lock().unwrap().sent.clone()
    }

    /// Number of datagrams sent so far.
    pub fn sent_count(&self) -> usize {
        self.inner.lock().unwrap().sent.len()
    }

    fn extract_request_id(data: &[u8]) -> Option<i32> {
        crate::message::Message::decode(Bytes::copy_from_slice(data))
            .ok()
            .map(|msg| msg.pdu.request_id)
    }

    /// Rewrite the request_id in a queued response to match the live request.
    fn patch_request_id(data: Bytes, new_id: i32) -> Bytes {
        match crate::message::Message::decode(data.clone()) {
            Ok(mut msg) => {
                msg.pdu.request_id = new_id;
                msg.encode()
            }
            Err(_) => data,
        }
    }
}

impl Transport for MockTransport {
    async fn connect(target: SocketAddr) -> Result<Self> {
        Ok(Self::new(target))
    }

    async fn send(&self, data: &[u8]) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.last_request_id = Self::extract_request_id(data);
        inner.sent.push(Bytes::copy_from_slice(data));
        Ok(())
    }

    async fn recv(&self, request_id: i32, timeout: Duration) -> Result<(Bytes, SocketAddr)> {
        let (response, target, last_id) = {
            let mut inner = self.inner.lock().unwrap();
            (
                inner.responses.pop_front(),
                inner.target,
                inner.last_request_id,
            )
        };

        match response {
            Some(MockResponse::Data(data)) => {
                let patched = match last_id {
                    Some(id) => Self::patch_request_id(data, id),
                    None => data,
                };
                Ok((patched, target))
            }
            Some(MockResponse::RawData(data)) => Ok((data, target)),
            Some(MockResponse::IoError(msg)) => Err(Error::Transport {
                target: Some(target),
                source: std::io::Error::other(msg),
            }),
            Some(MockResponse::Timeout) | None => Err(Error::Timeout {
                target: Some(target),
                elapsed: timeout,
                retries: 0,
            }),
        }
        .map_err(|e| {
            tracing::trace!(target: "snmplib::transport", { snmp.request_id = request_id }, "mock recv error");
            e
        })
    }

    fn peer_addr(&self) -> SocketAddr {
        self.inner.lock().unwrap().target
    }

    fn local_addr(&self) -> SocketAddr {
        "127.0.0.1:0".parse().unwrap()
    }
}

/// Builder for SNMP response messages used in tests.
pub struct ResponseBuilder {
    request_id: i32,
    varbinds: Vec<(crate::oid::Oid, crate::value::Value)>,
    error_status: i32,
    error_index: i32,
}

impl ResponseBuilder {
    /// Create a new response builder with the given request ID.
    pub fn new(request_id: i32) -> Self {
        Self {
            request_id,
            varbinds: Vec::new(),
            error_status: 0,
            error_index: 0,
        }
    }

    /// Add a varbind to the response.
    pub fn varbind(mut self, oid: crate::oid::Oid, value: crate::value::Value) -> Self {
        self.varbinds.push((oid, value));
        self
    }

    /// Set the error status.
    pub fn error_status(mut self, status: i32) -> Self {
        self.error_status = status;
        self
    }

    /// Set the error index.
    pub fn error_index(mut self, index: i32) -> Self {
        self.error_index = index;
        self
    }

    /// Build an SNMP response message for the given version.
    pub fn build(self, version: crate::version::Version, community: &[u8]) -> Bytes {
        use crate::message::Message;
        use crate::pdu::Pdu;
        use crate::varbind::VarBind;

        let varbinds = self
            .varbinds
            .into_iter()
            .map(|(oid, value)| VarBind::new(oid, value))
            .collect();

        let mut pdu = Pdu::response(self.request_id, varbinds);
        pdu.error_status = self.error_status;
        pdu.error_index = self.error_index;

        Message::new(version, Bytes::copy_from_slice(community), pdu).encode()
    }

    /// Build a v2c response message.
    pub fn build_v2c(self, community: &[u8]) -> Bytes {
        self.build(crate::version::Version::V2c, community)
    }
}
