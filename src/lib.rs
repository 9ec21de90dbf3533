//! Crate entrypoint wiring together configuration, PowerDNS, and APIs.

pub mod api;
pub mod config;
pub mod error;
pub mod powerdns;
pub mod sync;
pub mod validation;
pub mod web;

use powerdns::PowerDnsApi;
use sync::ZoneSync;

use axum::Router;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Complete application dependencies shared across handlers.
pub struct AppState {
    pub sync: ZoneSync,
}

impl AppState {
    pub fn new(pdns: Arc<dyn PowerDnsApi>) -> Self {
        Self {
            sync: ZoneSync::new(pdns),
        }
    }
}

/// Arc-wrapped version of `AppState` passed into Axum extensions.
pub type SharedState = Arc<AppState>;

/// JSON API, page shell and static assets behind request tracing.
pub fn build_app(state: SharedState) -> Router {
    Router::new()
        .merge(api::create_router(state))
        .merge(web::create_router())
        .layer(CatchPanicLayer::custom(web::panic_response))
        .layer(TraceLayer::new_for_http())
}
