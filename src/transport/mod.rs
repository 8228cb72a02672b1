//! Transport layer abstraction.
//!
//! Provides the `Transport` trait and the UDP implementation. A mock
//! transport for tests is available under `cfg(test)` or the `testing`
//! feature.

mod udp;

#[cfg(any(test, feature = "testing"))]
mod mock;

pub use udp::*;

#[cfg(any(test, feature = "testing"))]
pub use mock::*;

use crate::error::Result;
use bytes::Bytes;
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

/// Client-side transport abstraction.
///
/// # Clone Requirement
///
/// The `Clone` bound lets the session hand out a cheap handle for the
/// duration of one exchange without holding a borrow of itself.
/// Implementations use `Arc` internally, making clone a reference count
/// increment.
pub trait Transport: Send + Sync + Clone + Sized {
    /// Open a transport to the target.
    fn connect(target: SocketAddr) -> impl Future<Output = Result<Self>> + Send;

    /// Send request data to the target.
    fn send(&self, data: &[u8]) -> impl Future<Output = Result<()>> + Send;

    /// Receive a response datagram, waiting at most `timeout`.
    ///
    /// `request_id` is carried for error context; correlation against the
    /// response PDU happens in the session.
    ///
    /// Returns (response_data, actual_source_address).
    fn recv(
        &self,
        request_id: i32,
        timeout: Duration,
    ) -> impl Future<Output = Result<(Bytes, SocketAddr)>> + Send;

    /// The peer address for this transport.
    fn peer_addr(&self) -> SocketAddr;

    /// Local bind address.
    fn local_addr(&self) -> SocketAddr;
}
