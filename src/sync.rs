//! Combines record validation with submission to PowerDNS.
//!
//! A batch is either forwarded whole or rejected whole; nothing is sent
//! upstream while any record in it fails its type's grammar.
use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::powerdns::error::PdnsError;
use crate::powerdns::types::*;
use crate::powerdns::PowerDnsApi;
use crate::validation::{self, RecordType};

/// One offending entry of a rejected batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub rrtype: RecordType,
    /// `None` when the problem is with the RRSet itself rather than a record.
    pub content: Option<String>,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("{} invalid record(s) in change batch", .0.len())]
    Validation(Vec<InvalidRecord>),

    #[error("invalid zone: {0}")]
    InvalidZone(String),

    #[error(transparent)]
    Pdns(#[from] PdnsError),
}

pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Clone)]
pub struct ZoneSync {
    pdns: Arc<dyn PowerDnsApi>,
}

impl ZoneSync {
    pub fn new(pdns: Arc<dyn PowerDnsApi>) -> Self {
        Self { pdns }
    }

    pub async fn list_servers(&self) -> SyncResult<Vec<PdnsServer>> {
        Ok(self.pdns.list_servers().await?)
    }

    pub async fn list_zones(&self, server_id: &str) -> SyncResult<Vec<PdnsZoneSummary>> {
        Ok(self.pdns.list_zones(server_id).await?)
    }

    pub async fn get_zone(&self, server_id: &str, zone_id: &str) -> SyncResult<PdnsZone> {
        Ok(self.pdns.get_zone(server_id, zone_id).await?)
    }

    /// Read-only passthrough of the server's statistics.
    pub async fn statistics(&self, server_id: &str) -> SyncResult<Vec<PdnsMetric>> {
        Ok(self.pdns.statistics(server_id).await?)
    }

    /// Create a zone after checking its name and kind locally.
    pub async fn create_zone(&self, server_id: &str, zone: &PdnsZoneCreate) -> SyncResult<PdnsZone> {
        if !validation::is_valid_domain_target(&zone.name) {
            return Err(SyncError::InvalidZone(format!(
                "'{}' is not a valid zone name",
                zone.name
            )));
        }
        if zone.kind.trim().is_empty() {
            return Err(SyncError::InvalidZone("zone kind is required".into()));
        }

        let created = self.pdns.create_zone(server_id, zone).await?;
        info!(server_id, zone = %created.name, kind = %created.kind, "zone created");
        Ok(created)
    }

    pub async fn delete_zone(&self, server_id: &str, zone_id: &str) -> SyncResult<()> {
        self.pdns.delete_zone(server_id, zone_id).await?;
        info!(server_id, zone_id, "zone deleted");
        Ok(())
    }

    /// Validate the whole batch, then forward it unmodified in one call.
    pub async fn submit_record_changes(
        &self,
        server_id: &str,
        zone_id: &str,
        rrsets: &[PdnsRrset],
    ) -> SyncResult<()> {
        let invalid = check_batch(rrsets);
        if !invalid.is_empty() {
            warn!(
                server_id,
                zone_id,
                invalid = invalid.len(),
                "rejecting change batch before submission"
            );
            return Err(SyncError::Validation(invalid));
        }

        self.pdns
            .apply_rrset_changes(server_id, zone_id, rrsets)
            .await?;
        info!(server_id, zone_id, rrsets = rrsets.len(), "change batch applied");
        Ok(())
    }
}

/// Collect every problem in a batch; never stops at the first one.
pub fn check_batch(rrsets: &[PdnsRrset]) -> Vec<InvalidRecord> {
    let mut invalid = Vec::new();
    let mut seen = HashSet::new();

    for rr in rrsets {
        let rrset_problem = |reason: &str| InvalidRecord {
            name: rr.name.clone(),
            rrtype: rr.rrtype.clone(),
            content: None,
            reason: reason.to_string(),
        };

        // owner names compare case-insensitively in DNS
        if !seen.insert((rr.name.to_ascii_lowercase(), &rr.rrtype)) {
            invalid.push(rrset_problem("duplicate (name, type) in change batch"));
        }

        match rr.changetype {
            None => invalid.push(rrset_problem("changetype is required")),
            Some(ChangeType::Delete) if !rr.records().is_empty() => {
                invalid.push(rrset_problem("DELETE must not carry records"))
            }
            Some(ChangeType::Delete) => {}
            Some(ChangeType::Replace) if rr.records().is_empty() => {
                invalid.push(rrset_problem("REPLACE needs at least one record"))
            }
            Some(ChangeType::Replace) => {
                for rec in rr.records() {
                    if let Err(e) = validation::check(&rr.rrtype, &rec.content) {
                        invalid.push(InvalidRecord {
                            name: rr.name.clone(),
                            rrtype: rr.rrtype.clone(),
                            content: Some(rec.content.clone()),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }
    }

    invalid
}
