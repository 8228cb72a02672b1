//! UDP transport implementation.

use super::Transport;
use crate::error::{Error, Result};
use crate::util::bind_ephemeral_udp_socket;
use bytes::Bytes;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::timeout;

/// UDP transport for a single target.
///
/// Owns a connected UDP socket, so stray datagrams from other peers are
/// filtered by the kernel.
#[derive(Clone)]
pub struct UdpTransport {
    inner: Arc<UdpTransportInner>,
}

struct UdpTransportInner {
    socket: UdpSocket,
    target: SocketAddr,
    local_addr: SocketAddr,
}

impl Transport for UdpTransport {
    async fn connect(target: SocketAddr) -> Result<Self> {
        tracing::debug!(target: "snmplib::transport", { snmp.target = %target }, "connecting UDP transport");

        let socket = bind_ephemeral_udp_socket(target)
            .await
            .map_err(|e| Error::Transport {
                target: Some(target),
                source: e,
            })?;

        socket.connect(target).await.map_err(|e| Error::Transport {
            target: Some(target),
            source: e,
        })?;

        let local_addr = socket.local_addr().map_err(|e| Error::Transport {
            target: Some(target),
            source: e,
        })?;

        tracing::debug!(
            target: "snmplib::transport",
            {
                snmp.target = %target,
                snmp.local_addr = %local_addr,
            },
            "UDP transport connected"
        );

        Ok(Self {
            inner: Arc::new(UdpTransportInner {
                socket,
                target,
                local_addr,
            }),
        })
    }

    async fn send(&self, data: &[u8]) -> Result<()> {
        tracing::trace!(
            target: "snmplib::transport",
            {
                snmp.target = %self.inner.target,
                snmp.bytes = data.len(),
            },
            "UDP send"
        );
        self.inner
            .socket
            .send(data)
            .await
            .map_err(|e| Error::Transport {
                target: Some(self.inner.target),
                source: e,
            })?;
        Ok(())
    }

    async fn recv(&self, request_id: i32, recv_timeout: Duration) -> Result<(Bytes, SocketAddr)> {
        tracing::trace!(
            target: "snmplib::transport",
            {
                snmp.target = %self.inner.target,
                snmp.request_id = request_id,
                snmp.timeout_ms = recv_timeout.as_millis() as u64,
            },
            "UDP recv waiting"
        );

        let mut buf = vec![0u8; 65535];

        match timeout(recv_timeout, self.inner.socket.recv(&mut buf)).await {
            Ok(Ok(len)) => {
                buf.truncate(len);
                tracing::trace!(
                    target: "snmplib::transport",
                    {
                        snmp.target = %self.inner.target,
                        snmp.bytes = len,
                    },
                    "UDP recv complete"
                );
                Ok((Bytes::from(buf), self.inner.target))
            }
            Ok(Err(e)) => Err(Error::Transport {
                target: Some(self.inner.target),
                source: e,
            }),
            Err(_) => Err(Error::Timeout {
                target: Some(self.inner.target),
                elapsed: recv_timeout,
                retries: 0,
            }),
        }
    }

    fn peer_addr(&self) -> SocketAddr {
        self.inner.target
    }

    fn local_addr(&self) -> SocketAddr {
        self.inner.local_addr
    }
}
