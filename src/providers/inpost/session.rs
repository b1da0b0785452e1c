//! Authenticated ShipX session
//!
//! Bundles the transport with the account parameters. Cloning is cheap and
//! clones share the same transport, so one session can serve concurrent
//! operations.

use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::config::{InpostParameters, Settings};
use crate::providers::http_client::{InpostHttpClient, Transport, TransportError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("HTTP client error: {0}")]
    Transport(#[from] TransportError),
}

#[derive(Clone)]
pub struct InpostSession {
    transport: Arc<dyn Transport>,
    parameters: Arc<InpostParameters>,
}

impl InpostSession {
    pub fn new(transport: Arc<dyn Transport>, parameters: InpostParameters) -> Self {
        InpostSession {
            transport,
            parameters: Arc::new(parameters),
        }
    }

    /// Build a session with the reqwest client described by `settings`
    pub fn from_settings(settings: &Settings) -> Result<Self, SessionError> {
        let base_url = settings.api.resolved_base_url()?;
        let client = InpostHttpClient::from_settings(&settings.api, base_url)?;

        info!(
            base_url = %client.base_url(),
            organization_id = settings.parameters.organization_id(),
            "InPost session configured"
        );

        Ok(Self::new(Arc::new(client), settings.parameters.clone()))
    }

    pub fn client(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub fn parameters(&self) -> &InpostParameters {
        &self.parameters
    }
}

impl std::fmt::Debug for InpostSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InpostSession")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}
