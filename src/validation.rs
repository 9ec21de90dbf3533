//! Per-type record content grammar checks run before anything is sent upstream.
use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// DNS record type as carried in an RRSet's `type` field.
///
/// Codes outside the well-known set are kept verbatim in `Other`, so a
/// batch round-trips through this type without being rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Ns,
    Txt,
    Srv,
    Ptr,
    Soa,
    Caa,
    Tlsa,
    Ds,
    Dnskey,
    Other(String),
}

impl RecordType {
    /// Types offered by the record editor, in display order.
    pub const KNOWN: [RecordType; 13] = [
        RecordType::A,
        RecordType::Aaaa,
        RecordType::Cname,
        RecordType::Mx,
        RecordType::Ns,
        RecordType::Txt,
        RecordType::Srv,
        RecordType::Ptr,
        RecordType::Soa,
        RecordType::Caa,
        RecordType::Tlsa,
        RecordType::Ds,
        RecordType::Dnskey,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Cname => "CNAME",
            RecordType::Mx => "MX",
            RecordType::Ns => "NS",
            RecordType::Txt => "TXT",
            RecordType::Srv => "SRV",
            RecordType::Ptr => "PTR",
            RecordType::Soa => "SOA",
            RecordType::Caa => "CAA",
            RecordType::Tlsa => "TLSA",
            RecordType::Ds => "DS",
            RecordType::Dnskey => "DNSKEY",
            RecordType::Other(code) => code,
        }
    }

    /// Human-readable name; unknown codes are echoed unchanged.
    pub fn describe(&self) -> &str {
        match self {
            RecordType::A => "IPv4 Address",
            RecordType::Aaaa => "IPv6 Address",
            RecordType::Cname => "Canonical Name",
            RecordType::Mx => "Mail Exchange",
            RecordType::Ns => "Name Server",
            RecordType::Txt => "Text Record",
            RecordType::Srv => "Service Record",
            RecordType::Ptr => "Pointer Record",
            RecordType::Soa => "Start of Authority",
            RecordType::Caa => "Certification Authority Authorization",
            RecordType::Tlsa => "TLS Authentication",
            RecordType::Ds => "Delegation Signer",
            RecordType::Dnskey => "DNS Key",
            RecordType::Other(code) => code,
        }
    }
}

impl From<String> for RecordType {
    fn from(code: String) -> Self {
        match code.as_str() {
            "A" => RecordType::A,
            "AAAA" => RecordType::Aaaa,
            "CNAME" => RecordType::Cname,
            "MX" => RecordType::Mx,
            "NS" => RecordType::Ns,
            "TXT" => RecordType::Txt,
            "SRV" => RecordType::Srv,
            "PTR" => RecordType::Ptr,
            "SOA" => RecordType::Soa,
            "CAA" => RecordType::Caa,
            "TLSA" => RecordType::Tlsa,
            "DS" => RecordType::Ds,
            "DNSKEY" => RecordType::Dnskey,
            _ => RecordType::Other(code),
        }
    }
}

impl From<RecordType> for String {
    fn from(rrtype: RecordType) -> Self {
        match rrtype {
            RecordType::Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for RecordType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RecordType::from(s.to_string()))
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("not a valid IPv4 address (expected four dot-separated octets 0-255)")]
    InvalidIpv4,
    #[error("not a valid IPv6 address (expected eight colon-separated groups of hex digits)")]
    InvalidIpv6,
    #[error("not a valid domain name")]
    InvalidDomainName,
    #[error("expected '<preference> <target>'")]
    InvalidMx,
    #[error("content must not be empty")]
    Empty,
}

lazy_static::lazy_static! {
    static ref IPV4_RE: Regex = Regex::new(
        r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$"
    ).unwrap();
    /// `::` compression is not understood; all eight groups must be present.
    static ref IPV6_RE: Regex = Regex::new(r"(?i-u)^(?:[0-9a-f]{0,4}:){7}[0-9a-f]{0,4}$").unwrap();
    static ref DOMAIN_RE: Regex = Regex::new(
        r"(?i-u)^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z0-9][a-z0-9-]{0,61}[a-z0-9]$"
    ).unwrap();
    static ref MX_RE: Regex = Regex::new(r"^[0-9]+\s+.+").unwrap();
}

/// Domain-name grammar used for CNAME/NS/PTR targets and new zone names.
///
/// Anything ending in '.' is let through as-is; PowerDNS has the final word
/// on those.
pub fn is_valid_domain_target(name: &str) -> bool {
    DOMAIN_RE.is_match(name) || name.ends_with('.')
}

/// Check `content` against the grammar for `rrtype`, with a reason on failure.
pub fn check(rrtype: &RecordType, content: &str) -> Result<(), ContentError> {
    match rrtype {
        RecordType::A if !IPV4_RE.is_match(content) => Err(ContentError::InvalidIpv4),
        RecordType::Aaaa if !IPV6_RE.is_match(content) => Err(ContentError::InvalidIpv6),
        RecordType::Cname | RecordType::Ns | RecordType::Ptr
            if !is_valid_domain_target(content) =>
        {
            Err(ContentError::InvalidDomainName)
        }
        RecordType::Mx if !MX_RE.is_match(content) => Err(ContentError::InvalidMx),
        RecordType::Txt if content.is_empty() => Err(ContentError::Empty),
        // everything else is left to the authoritative server
        _ => Ok(()),
    }
}

pub fn validate(rrtype: &RecordType, content: &str) -> bool {
    check(rrtype, content).is_ok()
}

pub fn describe(rrtype: &RecordType) -> &str {
    rrtype.describe()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(code: &str) -> RecordType {
        code.parse().unwrap()
    }

    #[test]
    fn ipv4_octets_are_bounded() {
        for ok in ["0.0.0.0", "192.0.2.1", "255.255.255.255", "010.1.1.1"] {
            assert!(validate(&RecordType::A, ok), "{ok}");
        }
        for bad in [
            "256.0.0.1",
            "1.2.3",
            "1.2.3.4.5",
            "a.b.c.d",
            "1.2.3.4 ",
            "",
            "1000.1.1.1",
            "-1.2.3.4",
        ] {
            assert!(!validate(&RecordType::A, bad), "{bad}");
        }
    }

    #[test]
    fn ipv6_requires_eight_groups() {
        assert!(validate(&RecordType::Aaaa, "2001:db8:0:0:0:0:0:1"));
        assert!(validate(&RecordType::Aaaa, "2001:DB8:0:0:0:0:0:ABCD"));
        assert!(validate(&RecordType::Aaaa, ":::::::"));
        assert!(!validate(&RecordType::Aaaa, "2001:db8::1"));
        assert!(!validate(&RecordType::Aaaa, "2001:db8:0:0:0:0:0:12345"));
        assert!(!validate(&RecordType::Aaaa, "g::::::1"));
    }

    #[test]
    fn name_targets_accept_domains_and_trailing_dot() {
        for rrtype in [RecordType::Cname, RecordType::Ns, RecordType::Ptr] {
            assert!(validate(&rrtype, "www.example.com"));
            assert!(validate(&rrtype, "www.example.com."));
            assert!(validate(&rrtype, "anything."));
            assert!(validate(&rrtype, "-not_a-label!."));
            assert!(!validate(&rrtype, "localhost"));
            assert!(!validate(&rrtype, "bad_label.example.com"));
            assert!(!validate(&rrtype, ""));
        }
    }

    #[test]
    fn case_folding_stays_ascii() {
        assert!(validate(&RecordType::Cname, "K.EXAMPLE.com"));
        // KELVIN SIGN and LATIN SMALL LETTER LONG S fold to k and s in Unicode
        assert!(!validate(&RecordType::Cname, "\u{212A}.example.com"));
        assert!(!validate(&RecordType::Cname, "www.\u{17F}ite.com"));
        assert!(!is_valid_domain_target("\u{212A}ey.example.com"));
    }

    #[test]
    fn mx_needs_preference_and_target() {
        assert!(validate(&RecordType::Mx, "10 mail.example.com."));
        assert!(validate(&RecordType::Mx, "0\tmx"));
        assert!(!validate(&RecordType::Mx, "mail.example.com."));
        assert!(!validate(&RecordType::Mx, "10"));
        assert!(!validate(&RecordType::Mx, "10 "));
    }

    #[test]
    fn txt_only_rejects_empty() {
        assert!(validate(&RecordType::Txt, "\"v=spf1 -all\""));
        assert_eq!(check(&RecordType::Txt, ""), Err(ContentError::Empty));
    }

    #[test]
    fn unchecked_types_always_pass() {
        for code in ["SRV", "SOA", "CAA", "TLSA", "DS", "DNSKEY", "LOC", "a", ""] {
            assert!(validate(&t(code), ""), "{code}");
            assert!(validate(&t(code), "garbage !!"), "{code}");
        }
    }

    #[test]
    fn describe_falls_back_to_code() {
        assert_eq!(describe(&RecordType::Aaaa), "IPv6 Address");
        assert_eq!(describe(&RecordType::Caa), "Certification Authority Authorization");
        assert_eq!(describe(&t("HINFO")), "HINFO");
    }

    #[test]
    fn codes_round_trip_verbatim() {
        for rrtype in RecordType::KNOWN {
            assert_eq!(t(rrtype.as_str()), rrtype);
        }
        let json = serde_json::to_string(&t("aaaa")).unwrap();
        assert_eq!(json, "\"aaaa\"");
        let parsed: RecordType = serde_json::from_str("\"MX\"").unwrap();
        assert_eq!(parsed, RecordType::Mx);
    }
}
