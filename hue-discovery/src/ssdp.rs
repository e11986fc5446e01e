//! SSDP (Simple Service Discovery Protocol) client and advertisement parser
//!
//! This module owns the wire side of discovery: building the M-SEARCH query,
//! running one search round on a fresh UDP socket, and decoding the
//! HTTP-response-shaped replies. It is not part of the public API.

use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use std::time::{Duration, Instant};

use socket2::{Domain, Protocol, Socket, Type};
use tracing::trace;

use crate::device::DiscoveredDevice;
use crate::error::{DiscoveryError, Result};

/// SSDP multicast group address
pub(crate) const SSDP_MULTICAST_ADDR: Ipv4Addr = Ipv4Addr::new(239, 255, 255, 250);
/// SSDP multicast port
pub(crate) const SSDP_PORT: u16 = 1900;
/// Multicast TTL for outgoing queries
const MULTICAST_TTL: u32 = 2;
const RECV_BUFFER_SIZE: usize = 2048;

/// Parameters of a single M-SEARCH query
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SearchRequest<'a> {
    pub search_target: &'a str,
    pub mx: u32,
}

impl SearchRequest<'_> {
    /// Render the query datagram
    pub fn to_message(&self) -> String {
        format!(
            "M-SEARCH * HTTP/1.1\r\n\
             HOST: {}:{}\r\n\
             MAN: \"ssdp:discover\"\r\n\
             ST: {}\r\n\
             MX: {}\r\n\
             \r\n",
            SSDP_MULTICAST_ADDR, SSDP_PORT, self.search_target, self.mx
        )
    }
}

/// One send-then-collect search round.
///
/// Implementations send exactly one query and return every raw reply received
/// before `timeout` elapses. The timeout covers the whole round.
pub(crate) trait SearchRound {
    fn run(&mut self, request: &SearchRequest<'_>, timeout: Duration) -> Result<Vec<Vec<u8>>>;
}

/// SSDP client that opens a fresh socket for every round
#[derive(Debug, Default)]
pub(crate) struct SsdpClient;

impl SsdpClient {
    fn open_socket() -> Result<UdpSocket> {
        let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))
            .map_err(|e| DiscoveryError::Network(format!("Failed to create UDP socket: {}", e)))?;

        socket
            .set_reuse_address(true)
            .map_err(|e| DiscoveryError::Network(format!("Failed to set SO_REUSEADDR: {}", e)))?;

        socket
            .set_multicast_ttl_v4(MULTICAST_TTL)
            .map_err(|e| DiscoveryError::Network(format!("Failed to set multicast TTL: {}", e)))?;

        let any = SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0));
        socket
            .bind(&any.into())
            .map_err(|e| DiscoveryError::Network(format!("Failed to bind UDP socket: {}", e)))?;

        Ok(socket.into())
    }
}

impl SearchRound for SsdpClient {
    fn run(&mut self, request: &SearchRequest<'_>, timeout: Duration) -> Result<Vec<Vec<u8>>> {
        let socket = Self::open_socket()?;
        let group = SocketAddr::from((SSDP_MULTICAST_ADDR, SSDP_PORT));

        socket
            .send_to(request.to_message().as_bytes(), group)
            .map_err(|e| DiscoveryError::Network(format!("Failed to send M-SEARCH: {}", e)))?;

        let deadline = Instant::now() + timeout;
        let mut buffer = [0u8; RECV_BUFFER_SIZE];
        let mut replies = Vec::new();

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }

            socket
                .set_read_timeout(Some(remaining))
                .map_err(|e| DiscoveryError::Network(format!("Failed to set read timeout: {}", e)))?;

            match socket.recv_from(&mut buffer) {
                Ok((size, from)) => {
                    trace!(%from, size, "received SSDP reply");
                    replies.push(buffer[..size].to_vec());
                }
                Err(e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut =>
                {
                    break;
                }
                Err(e) => {
                    return Err(DiscoveryError::Network(format!("Socket error: {}", e)));
                }
            }
        }

        Ok(replies)
    }
}

/// Decode one SSDP reply datagram into a discovered device.
///
/// The datagram must start with an HTTP/1.x status line and carry `location`
/// and `cache-control` (with a `max-age` directive) headers. `usn` and `st`
/// are optional.
pub(crate) fn parse_advertisement(raw: &[u8]) -> Result<DiscoveredDevice> {
    let text = std::str::from_utf8(raw)
        .map_err(|_| DiscoveryError::MalformedAdvertisement("reply is not valid UTF-8".to_string()))?;

    let mut lines = text.lines();
    let status_line = lines.next().unwrap_or_default().trim();
    if !status_line.starts_with("HTTP/1.") {
        return Err(DiscoveryError::MalformedAdvertisement(format!(
            "expected an HTTP/1.x status line, got {:?}",
            status_line
        )));
    }

    let mut location = None;
    let mut usn = None;
    let mut st = None;
    let mut cache_control = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }

        if let Some(value) = extract_header_value(line, "LOCATION:") {
            location = Some(value);
        } else if let Some(value) = extract_header_value(line, "USN:") {
            usn = Some(value);
        } else if let Some(value) = extract_header_value(line, "ST:") {
            st = Some(value);
        } else if let Some(value) = extract_header_value(line, "CACHE-CONTROL:") {
            cache_control = Some(value);
        }
    }

    let location = location
        .filter(|l| !l.is_empty())
        .ok_or_else(|| DiscoveryError::MalformedAdvertisement("missing location header".to_string()))?;

    let cache_control = cache_control.ok_or_else(|| {
        DiscoveryError::MalformedAdvertisement("missing cache-control header".to_string())
    })?;
    let cache_seconds = parse_max_age(&cache_control).ok_or_else(|| {
        DiscoveryError::MalformedAdvertisement(format!(
            "no max-age in cache-control {:?}",
            cache_control
        ))
    })?;

    let ip = extract_host(&location)?;

    Ok(DiscoveredDevice {
        description: location,
        usn,
        service_type: st,
        ip,
        cache_seconds,
    })
}

/// Extract header value from a line like "HEADER: value"
fn extract_header_value(line: &str, header: &str) -> Option<String> {
    if line.len() > header.len()
        && line.is_char_boundary(header.len())
        && line[..header.len()].eq_ignore_ascii_case(header)
    {
        Some(line[header.len()..].trim().to_string())
    } else {
        None
    }
}

/// Pull the `max-age` directive out of a cache-control value
fn parse_max_age(value: &str) -> Option<u32> {
    value.split(',').find_map(|directive| {
        let (name, seconds) = directive.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("max-age") {
            seconds.trim().trim_matches('"').parse().ok()
        } else {
            None
        }
    })
}

fn extract_host(location: &str) -> Result<String> {
    let url = url::Url::parse(location).map_err(|e| {
        DiscoveryError::MalformedAdvertisement(format!("invalid location {:?}: {}", location, e))
    })?;

    url.host_str()
        .map(str::to_string)
        .ok_or_else(|| {
            DiscoveryError::MalformedAdvertisement(format!("location {:?} has no host", location))
        })
}
