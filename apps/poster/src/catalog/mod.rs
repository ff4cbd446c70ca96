//! Catalog client — the single point of entry for all Spotify Web API calls.
//!
//! Uses the client-credentials flow: one token request, then the album
//! lookup. Transient failures (429, 5xx) are retried with exponential
//! backoff; everything else surfaces immediately.

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const ALBUM_URL: &str = "https://api.spotify.com/v1/albums";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("not a Spotify album URL: {0}")]
    InvalidUrl(String),

    #[error("rate limited after {retries} retries")]
    RateLimited { retries: u32 },
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct AlbumResponse {
    name: String,
    artists: Vec<ArtistObject>,
    images: Vec<ImageObject>,
    tracks: TrackPage,
}

#[derive(Debug, Deserialize)]
struct ArtistObject {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: String,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    items: Vec<TrackObject>,
}

#[derive(Debug, Deserialize)]
struct TrackObject {
    name: String,
}

/// Album metadata as the poster pipeline consumes it.
#[derive(Debug, Clone)]
pub struct AlbumDetails {
    pub name: String,
    pub artist: String,
    /// Largest cover image, when the catalog has one.
    pub cover_url: Option<String>,
    /// Track names in album order.
    pub tracks: Vec<String>,
    /// The original share URL, encoded into the scannable code.
    pub url: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Extracts the album id from a Spotify share URL
/// (`https://open.spotify.com/album/<id>?si=...`).
pub fn extract_album_id(url: &str) -> Result<&str, CatalogError> {
    if !url.contains("spotify.com/album/") {
        return Err(CatalogError::InvalidUrl(url.to_string()));
    }
    let id = url
        .rsplit('/')
        .next()
        .unwrap_or("")
        .split('?')
        .next()
        .unwrap_or("");
    if id.is_empty() {
        return Err(CatalogError::InvalidUrl(url.to_string()));
    }
    Ok(id)
}

/// The catalog client used by the poster pipeline.
#[derive(Clone)]
pub struct SpotifyClient {
    client: Client,
    client_id: String,
    client_secret: String,
}

impl SpotifyClient {
    pub fn new(client_id: String, client_secret: String) -> Result<Self, CatalogError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()?,
            client_id,
            client_secret,
        })
    }

    /// The underlying HTTP client, shared with the artwork fetchers.
    pub fn http(&self) -> &Client {
        &self.client
    }

    /// Fetches album name, artist, cover URL, and the full track list for a
    /// share URL.
    pub async fn album(&self, album_url: &str) -> Result<AlbumDetails, CatalogError> {
        let album_id = extract_album_id(album_url)?;
        debug!(album_id, "fetching album details");

        let token = self.token().await?;
        let response: AlbumResponse = self
            .get_with_retry(&format!("{ALBUM_URL}/{album_id}"), &token)
            .await?;

        Ok(AlbumDetails {
            name: response.name,
            artist: response
                .artists
                .first()
                .map(|a| a.name.clone())
                .unwrap_or_default(),
            cover_url: response.images.first().map(|i| i.url.clone()),
            tracks: response.tracks.items.into_iter().map(|t| t.name).collect(),
            url: album_url.to_string(),
        })
    }

    /// Requests a client-credentials access token.
    async fn token(&self) -> Result<String, CatalogError> {
        let response = self
            .client
            .post(TOKEN_URL)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    /// GET with bearer auth, retrying 429 and 5xx with exponential backoff.
    async fn get_with_retry<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        token: &str,
    ) -> Result<T, CatalogError> {
        let mut last_error: Option<CatalogError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "catalog call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.get(url).bearer_auth(token).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(CatalogError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("catalog API returned {}: {}", status, body);
                last_error = Some(CatalogError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(CatalogError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            return Ok(response.json().await?);
        }

        Err(last_error.unwrap_or(CatalogError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
