//! Instagram oEmbed fetching
//!
//! The gallery links out to Instagram posts; the frontend asks this endpoint
//! for the embed markup so the browser never talks to Instagram directly
//! (CORS, and the admin can swap providers server-side).

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::utils::{AppError, AppResult};

const DEFAULT_OEMBED_ENDPOINT: &str = "https://api.instagram.com/oembed";
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// The subset of the oEmbed payload the storefront renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstagramEmbed {
    pub html: String,
    pub author_name: Option<String>,
    pub thumbnail_url: Option<String>,
    pub provider_name: Option<String>,
}

/// oEmbed client with a hard timeout.
#[derive(Debug, Clone)]
pub struct InstagramClient {
    http: reqwest::Client,
    endpoint: String,
}

impl InstagramClient {
    /// # Panics
    ///
    /// Panics if the TLS backend cannot initialize. Constructed once at
    /// startup, alongside the rest of the server state.
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent("bakehouse-storefront/0.1")
            .build()
            .expect("Failed to build HTTP client");
        let endpoint = std::env::var("INSTAGRAM_OEMBED_URL")
            .unwrap_or_else(|_| DEFAULT_OEMBED_ENDPOINT.to_string());
        Self { http, endpoint }
    }

    /// Fetch embed markup for an Instagram post URL.
    pub async fn fetch_embed(&self, post_url: &str) -> AppResult<InstagramEmbed> {
        if !is_instagram_url(post_url) {
            return Err(AppError::validation(
                "url must be an instagram.com post link",
            ));
        }

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("url", post_url), ("omitscript", "true")])
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Instagram oEmbed request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "Instagram oEmbed returned {}",
                response.status()
            )));
        }

        response
            .json::<InstagramEmbed>()
            .await
            .map_err(|e| AppError::upstream(format!("Instagram oEmbed payload unreadable: {e}")))
    }
}

impl Default for InstagramClient {
    fn default() -> Self {
        Self::new()
    }
}

fn is_instagram_url(url: &str) -> bool {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .map(|rest| {
            rest.starts_with("www.instagram.com/") || rest.starts_with("instagram.com/")
        })
        .unwrap_or(false)
}
