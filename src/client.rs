//! HTTP client for the external tile-pool service.
//!
//! Every call is a single attempt: failures are surfaced to the caller and
//! the user decides whether to retry the triggering action. No backoff, no
//! request cancellation.

use crate::game::{BingoCard, NewTilePool, TilePool, TilePoolSummary};
use derive_more::{Display, Error, From};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

/// Errors from tile-pool service calls.
#[derive(Debug, Display, Error, From)]
pub enum ClientError {
    /// Transport-level failure before an HTTP status was received.
    #[display("network error: {_0}")]
    Network(reqwest::Error),
    /// Non-2xx response, carrying the status and body text.
    #[display("HTTP {status}: {body}")]
    #[from(ignore)]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },
    /// 2xx response whose body was not the expected shape.
    #[display("decode error: {_0}")]
    Decode(serde_json::Error),
}

/// Client for the tile-pool HTTP API.
#[derive(Debug, Clone)]
pub struct TilePoolClient {
    base_url: String,
    client: reqwest::Client,
}

impl TilePoolClient {
    /// Creates a client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lists tile-pool summaries via `GET /tilepools`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-2xx status, or an
    /// unexpected body.
    #[instrument(skip(self))]
    pub async fn list_pools(&self) -> Result<Vec<TilePoolSummary>, ClientError> {
        let pools: Vec<TilePoolSummary> =
            self.get_json(format!("{}/tilepools", self.base_url)).await?;
        info!(count = pools.len(), "Listed tile pools");
        Ok(pools)
    }

    /// Fetches a full tile pool via `GET /tilepools/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-2xx status, or an
    /// unexpected body.
    #[instrument(skip(self))]
    pub async fn get_pool(&self, id: &str) -> Result<TilePool, ClientError> {
        let pool: TilePool = self
            .get_json(format!("{}/tilepools/{}", self.base_url, id))
            .await?;
        info!(name = %pool.name(), "Fetched tile pool");
        Ok(pool)
    }

    /// Draws a bingo card via `GET /bingocard/{id}?size&seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-2xx status, or an
    /// unexpected body.
    #[instrument(skip(self))]
    pub async fn get_card(&self, id: &str, size: usize, seed: u64) -> Result<BingoCard, ClientError> {
        let card: BingoCard = self
            .get_json(format!(
                "{}/bingocard/{}?size={}&seed={}",
                self.base_url, id, size, seed
            ))
            .await?;
        info!(card_id = %card.id(), tiles = card.tiles().len(), "Fetched bingo card");
        Ok(card)
    }

    /// Creates a tile pool via `POST /tilepools` and returns it with its
    /// generated id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-2xx status, or an
    /// unexpected body.
    #[instrument(skip(self, pool), fields(name = %pool.name()))]
    pub async fn create_pool(&self, pool: &NewTilePool) -> Result<TilePool, ClientError> {
        debug!(tiles = pool.tiles().len(), "Posting new tile pool");
        let response = self
            .client
            .post(format!("{}/tilepools", self.base_url))
            .json(pool)
            .send()
            .await?;

        let created: TilePool = decode(response).await?;
        info!(pool_id = %created.id(), "Tile pool created");
        Ok(created)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ClientError> {
        debug!(url = %url, "GET");
        let response = self.client.get(&url).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        warn!(status = status.as_u16(), "Request failed");
        return Err(ClientError::Http {
            status: status.as_u16(),
            body,
        });
    }

    Ok(serde_json::from_str(&body)?)
}
