use async_trait::async_trait;
use serde::Deserialize;

use super::innertube::InnerTubeClient;
use super::TranscriptStrategy;
use crate::Result;

/// Primary strategy: fetch a caption track in the json3 segment format and
/// concatenate its text fragments. Prefers the auto-generated (asr) track.
pub struct SegmentStrategy {
    client: InnerTubeClient,
}

impl SegmentStrategy {
    pub fn new(client: InnerTubeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TranscriptStrategy for SegmentStrategy {
    fn name(&self) -> &'static str {
        "segments"
    }

    async fn fetch(&self, video_id: &str) -> Result<String> {
        let info = self.client.player(video_id).await?;
        if let Some(title) = info.title() {
            tracing::debug!(video_id, title, "player metadata fetched");
        }

        let tracks = info.caption_tracks();
        let first = tracks
            .first()
            .ok_or_else(|| anyhow::anyhow!("no caption tracks available"))?;

        let track = tracks
            .iter()
            .find(|t| t.kind.as_deref() == Some("asr"))
            .unwrap_or(first);

        let url = InnerTubeClient::caption_url_with_format(&track.base_url, "json3")?;
        let document = self.client.fetch_caption_document(&url).await?;

        concat_segments(&document)
    }
}

/// Concatenate all text fragments of a json3 caption document with single
/// spaces, in their given order
pub fn concat_segments(document: &str) -> Result<String> {
    #[derive(Deserialize)]
    struct Json3 {
        #[serde(default)]
        events: Vec<Event>,
    }

    #[derive(Deserialize)]
    struct Event {
        #[serde(default)]
        segs: Vec<Seg>,
    }

    #[derive(Deserialize)]
    struct Seg {
        #[serde(default)]
        utf8: String,
    }

    let parsed: Json3 = serde_json::from_str(document)
        .map_err(|e| anyhow::anyhow!("malformed json3 caption document: {}", e))?;

    let fragments: Vec<&str> = parsed
        .events
        .iter()
        .flat_map(|event| event.segs.iter())
        .map(|seg| seg.utf8.trim())
        .filter(|text| !text.is_empty())
        .collect();

    Ok(fragments.join(" "))
}
