//! Typed access to the PowerDNS management API.
pub mod client;
pub mod error;
pub mod types;

use async_trait::async_trait;

use error::PdnsError;
use types::*;

pub type PdnsResult<T> = Result<T, PdnsError>;

/// Operations the dashboard issues against an authoritative server.
///
/// Every call is single-shot: no retries, no caching.
#[async_trait]
pub trait PowerDnsApi: Send + Sync {
    async fn list_servers(&self) -> PdnsResult<Vec<PdnsServer>>;

    async fn list_zones(&self, server_id: &str) -> PdnsResult<Vec<PdnsZoneSummary>>;

    async fn get_zone(&self, server_id: &str, zone_id: &str) -> PdnsResult<PdnsZone>;

    /// Fails with `PdnsError::Conflict` when the zone already exists.
    async fn create_zone(&self, server_id: &str, zone: &PdnsZoneCreate) -> PdnsResult<PdnsZone>;

    /// Fails with `PdnsError::NotFound` when the zone does not exist.
    async fn delete_zone(&self, server_id: &str, zone_id: &str) -> PdnsResult<()>;

    /// Submit one RRSet batch; PowerDNS applies it as a whole or not at all.
    async fn apply_rrset_changes(
        &self,
        server_id: &str,
        zone_id: &str,
        rrsets: &[PdnsRrset],
    ) -> PdnsResult<()>;

    async fn statistics(&self, server_id: &str) -> PdnsResult<Vec<PdnsMetric>>;
}
