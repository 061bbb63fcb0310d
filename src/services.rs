//! Well-known service names for the scanned port range.
//!
//! nmap normally names the service itself; this table only fills in when
//! its grepable output leaves the service column blank.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Ports 1-1000 that have a conventional service name.
static PORT_SERVICES: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    [
        (20, "ftp-data"),
        (21, "ftp"),
        (22, "ssh"),
        (23, "telnet"),
        (25, "smtp"),
        (53, "domain"),
        (67, "dhcps"),
        (68, "dhcpc"),
        (69, "tftp"),
        (80, "http"),
        (88, "kerberos-sec"),
        (110, "pop3"),
        (111, "rpcbind"),
        (119, "nntp"),
        (123, "ntp"),
        (135, "msrpc"),
        (137, "netbios-ns"),
        (138, "netbios-dgm"),
        (139, "netbios-ssn"),
        (143, "imap"),
        (161, "snmp"),
        (162, "snmptrap"),
        (179, "bgp"),
        (389, "ldap"),
        (443, "https"),
        (445, "microsoft-ds"),
        (465, "smtps"),
        (500, "isakmp"),
        (513, "login"),
        (514, "shell"),
        (515, "printer"),
        (548, "afp"),
        (554, "rtsp"),
        (587, "submission"),
        (631, "ipp"),
        (636, "ldapssl"),
        (873, "rsync"),
        (902, "iss-realsecure"),
        (993, "imaps"),
        (995, "pop3s"),
    ]
    .into_iter()
    .collect()
});

/// Look up the conventional service name for a port.
pub fn get_service_name(port: u16) -> Option<&'static str> {
    PORT_SERVICES.get(&port).copied()
}

/// Like [`get_service_name`], but "unknown" for unlisted ports.
pub fn get_service_description(port: u16) -> &'static str {
    get_service_name(port).unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_ports() {
        assert_eq!(get_service_name(22), Some("ssh"));
        assert_eq!(get_service_name(80), Some("http"));
        assert_eq!(get_service_name(443), Some("https"));
    }

    #[test]
    fn test_unknown_port() {
        assert_eq!(get_service_name(999), None);
        assert_eq!(get_service_description(999), "unknown");
    }
}
