use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::Result;

const DEFAULT_API_BASE: &str = "https://www.youtube.com";

/// Client version for the Android InnerTube context. The Android client
/// returns caption tracks without the throttling applied to web clients.
const ANDROID_CLIENT_VERSION: &str = "19.09.37";

/// Minimal client for YouTube's `youtubei/v1` player endpoint
#[derive(Clone)]
pub struct InnerTubeClient {
    client: Client,
    api_base: String,
}

impl InnerTubeClient {
    pub fn new() -> Self {
        Self::with_api_base(DEFAULT_API_BASE)
    }

    /// Create a client against a non-default base URL (used by tests)
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into(),
        }
    }

    /// Fetch player metadata for a video, including its caption-track list
    pub async fn player(&self, video_id: &str) -> Result<PlayerResponse> {
        tracing::debug!(video_id, "fetching player metadata");

        let body = serde_json::json!({
            "videoId": video_id,
            "context": {
                "client": {
                    "clientName": "ANDROID",
                    "clientVersion": ANDROID_CLIENT_VERSION,
                    "hl": "en",
                },
            },
        });

        let response = self
            .client
            .post(format!(
                "{}/youtubei/v1/player?prettyPrint=false",
                self.api_base
            ))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("player request failed: HTTP {}", response.status());
        }

        Ok(response.json().await?)
    }

    /// Fetch a caption document (timed-text XML or json3) from a track URL
    pub async fn fetch_caption_document(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("caption request failed: HTTP {}", response.status());
        }

        Ok(response.text().await?)
    }

    /// Append a `fmt` query parameter to a caption track URL
    pub fn caption_url_with_format(base_url: &str, fmt: &str) -> Result<String> {
        let mut url = Url::parse(base_url)
            .map_err(|_| anyhow::anyhow!("invalid caption track URL: {}", base_url))?;
        url.query_pairs_mut().append_pair("fmt", fmt);
        Ok(url.into())
    }
}

impl Default for InnerTubeClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Subset of the player response the resolver depends on
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    video_details: Option<VideoDetails>,
    captions: Option<Captions>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoDetails {
    title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

/// A selectable caption stream for a video
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: Option<String>,
    /// `"asr"` marks an auto-generated track
    pub kind: Option<String>,
}

impl PlayerResponse {
    pub fn title(&self) -> Option<&str> {
        self.video_details.as_ref()?.title.as_deref()
    }

    /// All available caption tracks, empty if the video has none
    pub fn caption_tracks(&self) -> &[CaptionTrack] {
        self.captions
            .as_ref()
            .and_then(|c| c.player_captions_tracklist_renderer.as_ref())
            .map(|r| r.caption_tracks.as_slice())
            .unwrap_or(&[])
    }
}
