//! # azul-rates: ARS/USD Exchange-Rate Client
//!
//! Fetches the peso-per-dollar quotation used for bulk currency conversion.
//!
//! ## Session Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Exchange-Rate Lookup                                │
//! │                                                                         │
//! │  Operator clicks "convert to USD"                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RateService::ars_per_usd_or_fallback()                                │
//! │       │                                                                 │
//! │       ├── cached this session? ──────────────► return cached           │
//! │       │                                                                 │
//! │       ├── fetch quotation API ── ok ─────────► cache + return          │
//! │       │                                                                 │
//! │       └── fetch failed / bad payload ────────► warn + FALLBACK rate    │
//! │                                                                         │
//! │  The rate is fetched at most once per editing session and NEVER        │
//! │  blocks pricing: conversion is only ever invoked with a concrete rate. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The conversion math itself lives in `azul-core::fx`; this crate only
//! produces the number to feed it.

use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use thiserror::Error;

/// Public quotation endpoint (official wholesale rate, ARS per USD).
const RATE_ENDPOINT: &str = "https://dolarapi.com/v1/dolares/oficial";

/// Request timeout for the quotation API.
const FETCH_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Fixed fallback applied when no rate can be fetched. The operator sees a
/// non-fatal warning and can re-convert later with a live rate.
pub const FALLBACK_ARS_PER_USD: f64 = 1000.0;

// =============================================================================
// Errors
// =============================================================================

/// Exchange-rate lookup failures. All of them are recoverable: callers using
/// [`RateService::ars_per_usd_or_fallback`] degrade to the fixed rate.
#[derive(Debug, Error)]
pub enum RateError {
    /// Network or protocol failure talking to the quotation API.
    #[error("Rate fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Rate service unavailable: {0}")]
    Unavailable(String),

    /// The API answered, but with a rate unusable for conversion.
    #[error("Fetched rate is not a positive number: {0}")]
    InvalidRate(f64),
}

// =============================================================================
// API payload
// =============================================================================

/// The slice of the DolarApi payload we consume. `venta` (sell) is the rate
/// a client would actually pay pesos at.
#[derive(Debug, Deserialize)]
struct Quotation {
    venta: f64,
}

// =============================================================================
// RateService
// =============================================================================

/// Session-scoped exchange-rate lookup with a fixed fallback.
///
/// Create one per editing session and share it; the first successful fetch
/// is cached for the service's lifetime.
#[derive(Debug)]
pub struct RateService {
    client: reqwest::Client,
    session_rate: RwLock<Option<f64>>,
}

impl RateService {
    /// Creates a new RateService.
    pub fn new() -> Result<Self, RateError> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;

        Ok(RateService {
            client,
            session_rate: RwLock::new(None),
        })
    }

    /// Returns the session's ARS-per-USD rate, fetching it on first use.
    ///
    /// ## Errors
    /// Any fetch or payload problem. The cache is only populated on success,
    /// so a later call retries the fetch.
    pub async fn ars_per_usd(&self) -> Result<f64, RateError> {
        if let Some(rate) = *self.session_rate.read().await {
            return Ok(rate);
        }

        let rate = self.fetch().await?;
        *self.session_rate.write().await = Some(rate);

        debug!(rate, "Exchange rate cached for session");

        Ok(rate)
    }

    /// Returns the session rate, or the fixed fallback when the lookup
    /// fails. The degradation is logged but deliberately non-fatal: a stale
    /// conversion the operator can redo beats a save that cannot happen.
    pub async fn ars_per_usd_or_fallback(&self) -> f64 {
        match self.ars_per_usd().await {
            Ok(rate) => rate,
            Err(err) => {
                warn!(
                    error = %err,
                    fallback = FALLBACK_ARS_PER_USD,
                    "Exchange rate unavailable, using fallback"
                );
                FALLBACK_ARS_PER_USD
            }
        }
    }

    /// One shot against the quotation API.
    async fn fetch(&self) -> Result<f64, RateError> {
        let response = self.client.get(RATE_ENDPOINT).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateError::Unavailable(status.to_string()));
        }

        let quotation: Quotation = response.json().await?;

        if !quotation.venta.is_finite() || quotation.venta <= 0.0 {
            return Err(RateError::InvalidRate(quotation.venta));
        }

        Ok(quotation.venta)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
