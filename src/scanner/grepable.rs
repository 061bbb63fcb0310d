//! Parser for nmap's grepable (`-oG`) output.
//!
//! A host can appear on several `Host:` lines (one carrying `Status:`, one
//! carrying `Ports:`); entries are merged by address in first-seen order.
//!
//! ```text
//! Host: 45.33.32.156 (scanme.nmap.org)	Ports: 22/open/tcp//ssh///, 80/open/tcp//http///	Ignored State: closed (998)
//! # Nmap done at Mon Jan  1 00:00:00 2024 -- 1 IP address (1 host up) scanned in 2.51 seconds
//! ```

use super::traits::{RawHost, RawScan};
use crate::services::get_service_description;
use crate::types::{Port, PortEntry, Protocol};
use tracing::trace;

/// Parse the full stdout of an `nmap -oG -` run.
pub fn parse(output: &str) -> RawScan {
    let mut scan = RawScan::default();

    for line in output.lines() {
        let line = line.trim_end();
        if let Some(rest) = line.strip_prefix("# Nmap done") {
            scan.elapsed_secs = parse_elapsed(rest);
            continue;
        }
        if line.starts_with('#') || line.is_empty() {
            continue;
        }
        if let Some(host_line) = line.strip_prefix("Host: ") {
            merge_host_line(&mut scan.hosts, host_line);
        }
    }

    scan
}

fn merge_host_line(hosts: &mut Vec<RawHost>, line: &str) {
    let mut fields = line.split('\t');
    let Some(head) = fields.next() else {
        return;
    };
    let (address, ptr_name) = parse_host_head(head);
    if address.is_empty() {
        return;
    }

    let idx = match hosts
        .iter()
        .position(|h| h.addresses.first().map(String::as_str) == Some(address))
    {
        Some(idx) => idx,
        None => {
            hosts.push(RawHost {
                addresses: vec![address.to_string()],
                ..RawHost::default()
            });
            hosts.len() - 1
        }
    };
    let host = &mut hosts[idx];

    if let Some(name) = ptr_name {
        if !host.hostnames.iter().any(|h| h == name) {
            host.hostnames.push(name.to_string());
        }
    }

    for field in fields {
        if let Some(ports) = field.strip_prefix("Ports: ") {
            host.ports.extend(ports.split(", ").filter_map(parse_port_entry));
        }
    }
}

/// Split `45.33.32.156 (scanme.nmap.org)` into address and optional name.
fn parse_host_head(head: &str) -> (&str, Option<&str>) {
    let head = head.trim();
    match head.split_once(' ') {
        Some((addr, rest)) => {
            let name = rest
                .trim()
                .trim_start_matches('(')
                .trim_end_matches(')')
                .trim();
            (addr, (!name.is_empty()).then_some(name))
        }
        None => (head, None),
    }
}

/// Parse `80/open/tcp//http///` (port/state/protocol/owner/service/rpc/version).
fn parse_port_entry(raw: &str) -> Option<PortEntry> {
    let parts: Vec<&str> = raw.trim().split('/').collect();
    if parts.len() < 5 {
        trace!(entry = raw, "skipping malformed port entry");
        return None;
    }

    let port: Port = parts[0].parse().ok()?;
    let state = parts[1];
    let protocol: Protocol = parts[2].parse().ok()?;
    let service = match parts[4] {
        "" => get_service_description(port.as_u16()),
        name => name,
    };

    Some(PortEntry::new(port, protocol, state, service))
}

/// Pull `2.51` out of `... scanned in 2.51 seconds`.
fn parse_elapsed(trailer: &str) -> Option<f64> {
    let (_, tail) = trailer.rsplit_once("scanned in ")?;
    tail.split_whitespace().next()?.parse().ok()
}
