use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, IntoUrl, Method, RequestBuilder, Response, Url};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::powerdns::error::PdnsError;
use crate::powerdns::types::*;
use crate::powerdns::{PdnsResult, PowerDnsApi};

#[derive(Clone)]
pub struct PowerDnsClient {
    http: Client,
    base_url: Url, // e.g. "http://127.0.0.1:8081/api/v1"
    api_key: String,
}

impl PowerDnsClient {
    pub fn new(
        base_url: impl IntoUrl,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into_url()?,
            api_key: api_key.into(),
        })
    }

    /// Base URL with `segments` appended, each percent-encoded as a single
    /// path segment.
    fn url(&self, segments: &[&str]) -> PdnsResult<Url> {
        for segment in segments {
            if segment.is_empty() || *segment == "." || *segment == ".." {
                return Err(PdnsError::InvalidIdentifier(segment.to_string()));
            }
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PdnsError::InvalidIdentifier(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> PdnsResult<RequestBuilder> {
        let url = self.url(segments)?;
        debug!(%method, %url, "PowerDNS request");
        Ok(self
            .http
            .request(method, url)
            .header("X-API-Key", &self.api_key))
    }

    /// Send once and turn any non-success status into a `PdnsError`.
    async fn send(&self, req: RequestBuilder) -> PdnsResult<Response> {
        let res = req.send().await.map_err(|e| {
            warn!(error = %e, "PowerDNS request failed without a response");
            PdnsError::Transport(e)
        })?;

        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        // error bodies are best-effort; fall back to the generic message
        let body = res.json::<PdnsErrorBody>().await.unwrap_or_default();
        let err = PdnsError::from_status(status, body.error);
        warn!(%status, error = %err, "PowerDNS rejected request");
        Err(err)
    }

    async fn json<T: DeserializeOwned>(&self, req: RequestBuilder) -> PdnsResult<T> {
        self.send(req)
            .await?
            .json::<T>()
            .await
            .map_err(PdnsError::InvalidResponse)
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        body: &B,
    ) -> PdnsResult<T> {
        self.json(req.json(body)).await
    }
}

#[async_trait]
impl PowerDnsApi for PowerDnsClient {
    async fn list_servers(&self) -> PdnsResult<Vec<PdnsServer>> {
        self.json(self.request(Method::GET, &["servers"])?).await
    }

    async fn list_zones(&self, server_id: &str) -> PdnsResult<Vec<PdnsZoneSummary>> {
        let req = self.request(Method::GET, &["servers", server_id, "zones"])?;
        self.json(req).await
    }

    async fn get_zone(&self, server_id: &str, zone_id: &str) -> PdnsResult<PdnsZone> {
        let req = self.request(Method::GET, &["servers", server_id, "zones", zone_id])?;
        self.json(req).await
    }

    async fn create_zone(&self, server_id: &str, zone: &PdnsZoneCreate) -> PdnsResult<PdnsZone> {
        let req = self.request(Method::POST, &["servers", server_id, "zones"])?;
        self.send_json(req, zone).await
    }

    async fn delete_zone(&self, server_id: &str, zone_id: &str) -> PdnsResult<()> {
        let req = self.request(Method::DELETE, &["servers", server_id, "zones", zone_id])?;
        self.send(req).await?;
        Ok(())
    }

    async fn apply_rrset_changes(
        &self,
        server_id: &str,
        zone_id: &str,
        rrsets: &[PdnsRrset],
    ) -> PdnsResult<()> {
        #[derive(Serialize)]
        struct PatchBody<'a> {
            rrsets: &'a [PdnsRrset],
        }

        let req = self.request(Method::PATCH, &["servers", server_id, "zones", zone_id])?;
        let body = PatchBody { rrsets };
        self.send(req.json(&body)).await?;
        Ok(())
    }

    async fn statistics(&self, server_id: &str) -> PdnsResult<Vec<PdnsMetric>> {
        let req = self.request(Method::GET, &["servers", server_id, "statistics"])?;
        self.json(req).await
    }
}
