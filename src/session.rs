//! SNMP session: connection parameters plus the GET/SET request engine.
//!
//! A [`Session`] owns the target configuration (host, port, community
//! string), the timeout/retry policy, and a handle to the MIB lookup
//! service used for symbolic OID resolution. Requests take `&mut self`:
//! one session runs one exchange at a time, and callers wanting
//! concurrency use independent sessions.

use crate::convert::SnmpType;
use crate::error::{DecodeErrorKind, Error, Result};
use crate::message::Message;
use crate::mib::{MibLookup, MibRegistry, OidExpr};
use crate::oid::Oid;
use crate::pdu::Pdu;
use crate::transport::{Transport, UdpTransport};
use crate::value::Value;
use crate::varbind::VarBind;
use crate::version::Version;
use bytes::Bytes;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use std::time::{Duration, Instant};
use tracing::instrument;

/// Default SNMP agent port.
pub const DEFAULT_PORT: u16 = 161;

/// Process-wide request ID counter, so independent sessions never reuse
/// an in-flight ID.
static REQUEST_ID: AtomicI32 = AtomicI32::new(1);

fn next_request_id() -> i32 {
    REQUEST_ID.fetch_add(1, Ordering::Relaxed)
}

/// SNMP client session.
///
/// Generic over transport type, with [`UdpTransport`] as default.
///
/// # Example
///
/// ```rust,no_run
/// use snmplib::Session;
///
/// # async fn example() -> snmplib::Result<()> {
/// let mut session = Session::new();
/// session.set_host("10.0.111.112");
/// session.set_community_string("private");
/// session.preload_mibs(&["SNMPv2-MIB"])?;
///
/// let descr = session.get("SNMPv2-MIB::sysDescr.0").await?;
/// println!("sysDescr: {}", descr);
///
/// session.set_octet_string(".1.3.6.1.2.1.1.6.0", "Test").await?;
/// # Ok(())
/// # }
/// ```
pub struct Session<T: Transport = UdpTransport> {
    host: Option<String>,
    port: u16,
    version: Version,
    community: Bytes,
    timeout: Duration,
    retries: u32,
    mib: Arc<dyn MibLookup>,
    transport: Option<T>,
}

impl Session<UdpTransport> {
    /// Create a session over UDP with the bundled core MIB registry.
    pub fn new() -> Self {
        Self::with_mib(Arc::new(MibRegistry::with_core_modules()))
    }

    /// Create a session over UDP with an injected MIB lookup service.
    ///
    /// Sharing one `Arc` between sessions shares the lookup cache;
    /// separate `Arc`s keep the caches independent.
    pub fn with_mib(mib: Arc<dyn MibLookup>) -> Self {
        Self {
            host: None,
            port: DEFAULT_PORT,
            version: Version::default(),
            community: Bytes::from_static(b"public"),
            timeout: Duration::from_secs(5),
            retries: 3,
            mib,
            transport: None,
        }
    }
}

impl Default for Session<UdpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> Session<T> {
    /// Create a session over a pre-connected transport.
    ///
    /// The transport's peer address stands in for `set_host`.
    pub fn with_transport(transport: T, mib: Arc<dyn MibLookup>) -> Self {
        Self {
            host: Some(transport.peer_addr().ip().to_string()),
            port: transport.peer_addr().port(),
            version: Version::default(),
            community: Bytes::from_static(b"public"),
            timeout: Duration::from_secs(5),
            retries: 3,
            mib,
            transport: Some(transport),
        }
    }

    /// Set the target host, resetting the port to the default (161).
    ///
    /// Drops any cached transport; the next request reconnects.
    pub fn set_host(&mut self, host: impl Into<String>) {
        self.set_host_port(host, DEFAULT_PORT);
    }

    /// Set the target host and port.
    pub fn set_host_port(&mut self, host: impl Into<String>, port: u16) {
        self.host = Some(host.into());
        self.port = port;
        self.transport = None;
    }

    /// Set the community string.
    pub fn set_community_string(&mut self, community: impl AsRef<[u8]>) {
        self.community = Bytes::copy_from_slice(community.as_ref());
    }

    /// Set the SNMP protocol version (default: v2c).
    pub fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    /// Set the per-attempt response timeout (default: 5 seconds).
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Set the number of retries after a timed-out attempt (default: 3).
    ///
    /// Retries apply only to timeouts; I/O, decode, and agent errors are
    /// never retried.
    pub fn set_retries(&mut self, retries: u32) {
        self.retries = retries;
    }

    /// The MIB lookup service this session resolves against.
    pub fn mib(&self) -> &Arc<dyn MibLookup> {
        &self.mib
    }

    /// Add a directory to the MIB search path.
    ///
    /// Fails with [`Error::PathNotFound`] when the directory does not
    /// exist, in which case the search path is left unchanged.
    pub fn add_mib_search_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        tracing::info!(target: "snmplib::session", path = %path.display(), "adding MIB search path");

        if !path.is_dir() {
            return Err(Error::PathNotFound {
                path: path.to_path_buf(),
            });
        }

        self.mib.add_search_path(path);
        Ok(())
    }

    /// Eagerly load the named MIB modules, or all of them when `names` is
    /// empty.
    ///
    /// Preloading trades setup time for per-request resolution latency;
    /// it is never required for correctness.
    pub fn preload_mibs(&mut self, names: &[&str]) -> Result<()> {
        self.mib.load_modules(names)
    }

    /// Resolve an OID expression to its canonical numeric form without
    /// touching the network.
    pub fn resolve_oid(&self, oid_expr: &str) -> Result<Oid> {
        OidExpr::parse(oid_expr).resolve(self.mib.as_ref())
    }

    /// Perform an SNMP GET.
    ///
    /// Accepts any of the four OID notations (see [`OidExpr`]). Fails with
    /// [`Error::ObjectNotFound`] when the agent answers with Null or an
    /// exception value for the OID.
    #[instrument(level = "debug", skip(self), err, fields(snmp.oid = tracing::field::Empty))]
    pub async fn get(&mut self, oid_expr: &str) -> Result<Value> {
        let oid = self.resolve_oid(oid_expr)?;
        tracing::Span::current().record("snmp.oid", tracing::field::display(&oid));

        let pdu = Pdu::get_request(next_request_id(), oid);
        let response = self.request(pdu).await?;

        let varbind = response
            .varbinds
            .into_iter()
            .next()
            .ok_or_else(|| Error::decode(0, DecodeErrorKind::EmptyResponse))?;

        if varbind.value.is_absent() {
            return Err(Error::ObjectNotFound { oid: varbind.oid });
        }

        tracing::debug!(target: "snmplib::session", { snmp.value = %varbind.value }, "GET complete");
        Ok(varbind.value)
    }

    /// Perform an SNMP SET with an already-typed value.
    ///
    /// No type inference is attempted: when no MIB describes the target
    /// OID, the caller must pick the matching typed setter (or convert
    /// explicitly) rather than pass raw text.
    #[instrument(level = "debug", skip(self, value), err, fields(snmp.oid = tracing::field::Empty))]
    pub async fn set(&mut self, oid_expr: &str, value: Value) -> Result<()> {
        let oid = self.resolve_oid(oid_expr)?;
        tracing::Span::current().record("snmp.oid", tracing::field::display(&oid));

        let pdu = Pdu::set_request(next_request_id(), vec![VarBind::new(oid, value)]);
        self.request(pdu).await?;

        tracing::debug!(target: "snmplib::session", "SET complete");
        Ok(())
    }

    /// SET after converting the value to an OctetString.
    pub async fn set_octet_string(&mut self, oid_expr: &str, value: &str) -> Result<()> {
        let value = SnmpType::OctetString.convert(value)?;
        self.set(oid_expr, value).await
    }

    /// SET after converting the value to an Integer.
    pub async fn set_integer(&mut self, oid_expr: &str, value: &str) -> Result<()> {
        let value = SnmpType::Integer.convert(value)?;
        self.set(oid_expr, value).await
    }

    /// SET after converting the value to an Integer32.
    pub async fn set_integer32(&mut self, oid_expr: &str, value: &str) -> Result<()> {
        let value = SnmpType::Integer32.convert(value)?;
        self.set(oid_expr, value).await
    }

    /// SET after converting the value to a Counter32.
    pub async fn set_counter32(&mut self, oid_expr: &str, value: &str) -> Result<()> {
        let value = SnmpType::Counter32.convert(value)?;
        self.set(oid_expr, value).await
    }

    /// SET after converting the value to a Counter64.
    pub async fn set_counter64(&mut self, oid_expr: &str, value: &str) -> Result<()> {
        let value = SnmpType::Counter64.convert(value)?;
        self.set(oid_expr, value).await
    }

    /// SET after converting the value to a Gauge32.
    pub async fn set_gauge32(&mut self, oid_expr: &str, value: &str) -> Result<()> {
        let value = SnmpType::Gauge32.convert(value)?;
        self.set(oid_expr, value).await
    }

    /// SET after converting the value to an Unsigned32.
    pub async fn set_unsigned32(&mut self, oid_expr: &str, value: &str) -> Result<()> {
        let value = SnmpType::Unsigned32.convert(value)?;
        self.set(oid_expr, value).await
    }

    /// SET after converting the value to TimeTicks.
    pub async fn set_timeticks(&mut self, oid_expr: &str, value: &str) -> Result<()> {
        let value = SnmpType::TimeTicks.convert(value)?;
        self.set(oid_expr, value).await
    }

    /// Get (connecting if needed) a transport handle for one exchange.
    async fn transport(&mut self) -> Result<T> {
        if let Some(transport) = &self.transport {
            return Ok(transport.clone());
        }

        // NotConfigured must fire before any transport activity
        let host = self.host.as_deref().ok_or(Error::NotConfigured)?;
        let addr = resolve_addr(host, self.port)?;

        let transport = T::connect(addr).await?;
        self.transport = Some(transport.clone());
        Ok(transport)
    }

    /// Drive one request/response exchange, including timeout retries and
    /// error-status interpretation.
    async fn request(&mut self, pdu: Pdu) -> Result<Pdu> {
        let transport = self.transport().await?;
        let target = transport.peer_addr();

        let request_id = pdu.request_id;
        let data = Message::new(self.version, self.community.clone(), pdu).encode();

        let start = Instant::now();

        for attempt in 0..=self.retries {
            if attempt > 0 {
                tracing::debug!(target: "snmplib::session", { snmp.request_id = request_id, attempt }, "retrying request");
            }

            tracing::trace!(target: "snmplib::session", { snmp.bytes = data.len() }, "sending request");
            transport.send(&data).await?;

            match transport.recv(request_id, self.timeout).await {
                Ok((response_data, _source)) => {
                    return self.interpret_response(response_data, request_id, target);
                }
                Err(Error::Timeout { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        let elapsed = start.elapsed();
        tracing::debug!(target: "snmplib::session", { snmp.request_id = request_id, ?elapsed, retries = self.retries }, "request timed out");
        Err(Error::Timeout {
            target: Some(target),
            elapsed,
            retries: self.retries,
        })
    }

    /// Decode and validate a response, mapping agent errors to [`Error::Agent`].
    fn interpret_response(
        &self,
        data: Bytes,
        request_id: i32,
        target: SocketAddr,
    ) -> Result<Pdu> {
        tracing::trace!(target: "snmplib::session", { snmp.bytes = data.len() }, "received response");

        let response = Message::decode(data)?;

        if response.version != self.version {
            return Err(Error::VersionMismatch {
                expected: self.version,
                actual: response.version,
            });
        }

        let pdu = response.into_pdu();

        if pdu.request_id != request_id {
            return Err(Error::RequestIdMismatch {
                expected: request_id,
                actual: pdu.request_id,
            });
        }

        if pdu.is_error() {
            let status = pdu.error_status_enum();
            // error_index is 1-based; 0 means the error applies to the PDU
            let oid = (pdu.error_index as usize)
                .checked_sub(1)
                .and_then(|idx| pdu.varbinds.get(idx))
                .map(|vb| vb.oid.clone());

            tracing::debug!(target: "snmplib::session", %status, index = pdu.error_index, "agent reported error");
            return Err(Error::Agent {
                target: Some(target),
                status,
                index: pdu.error_index.max(0) as u32,
                oid,
            });
        }

        Ok(pdu)
    }
}

/// Resolve `host:port` to a socket address (synchronous DNS lookup).
fn resolve_addr(host: &str, port: u16) -> Result<SocketAddr> {
    (host, port)
        .to_socket_addrs()
        .map_err(|e| Error::Transport {
            target: None,
            source: e,
        })?
        .next()
        .ok_or_else(|| Error::Transport {
            target: None,
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "could not resolve address"),
        })
}
