use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::validation::RecordType;

/// Fields PowerDNS returns that the dashboard does not interpret but still
/// hands to the browser.
pub type Passthrough = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdnsServer {
    pub id: String, // usually "localhost"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daemon_type: Option<String>, // "authoritative"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub extra: Passthrough,
}

/// Zone as listed by `GET /servers/{id}/zones` (no RRSets).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdnsZoneSummary {
    pub id: String,   // "example.com."
    pub name: String, // "example.com."
    #[serde(default)]
    pub kind: String, // "Native", "Master", "Slave"
    #[serde(default)]
    pub serial: u32,
    #[serde(flatten)]
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdnsZone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub serial: u32,
    #[serde(default)]
    pub rrsets: Vec<PdnsRrset>,
    #[serde(flatten)]
    pub extra: Passthrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeType {
    /// Upsert the full record list for the (name, type) key.
    Replace,
    /// Remove every record for the (name, type) key.
    Delete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdnsRrset {
    pub name: String, // "www.example.com."
    #[serde(rename = "type")]
    pub rrtype: RecordType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changetype: Option<ChangeType>, // only set when patching
    // absent and empty differ upstream: a REPLACE without `comments` keeps them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<PdnsRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<PdnsComment>>,
    #[serde(flatten)]
    pub extra: Passthrough,
}

impl PdnsRrset {
    pub fn records(&self) -> &[PdnsRecord] {
        self.records.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdnsRecord {
    pub content: String, // "192.0.2.1" or "ns1.example.net."
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(flatten)]
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdnsComment {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<u64>,
    #[serde(flatten)]
    pub extra: Passthrough,
}

// Used when creating a zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdnsZoneCreate {
    pub name: String, // "example.com."
    #[serde(default)]
    pub kind: String, // "Native"
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nameservers: Vec<String>, // ["ns1.example.net.", "ns2.example.net."]
    #[serde(flatten)]
    pub extra: Passthrough, // masters, soa_edit_api, ...
}

/// One entry of `GET /servers/{id}/statistics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdnsMetric {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String, // "StatisticItem", "MapStatisticItem", "RingStatisticItem"
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Value>,
}

/// Body of a PowerDNS error response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PdnsErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
