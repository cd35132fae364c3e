use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;

use super::innertube::InnerTubeClient;
use super::TranscriptStrategy;
use crate::Result;

static TEXT_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<text[^>]*>(.*?)</text>").expect("text element pattern"));

static MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("markup pattern"));

/// Fallback strategy: fetch the first caption track's raw timed-text XML
/// and scrape the `<text>` element bodies out of it.
pub struct TimedTextStrategy {
    client: InnerTubeClient,
}

impl TimedTextStrategy {
    pub fn new(client: InnerTubeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TranscriptStrategy for TimedTextStrategy {
    fn name(&self) -> &'static str {
        "timedtext"
    }

    async fn fetch(&self, video_id: &str) -> Result<String> {
        let info = self.client.player(video_id).await?;
        let track = info
            .caption_tracks()
            .first()
            .ok_or_else(|| anyhow::anyhow!("no caption tracks available"))?;

        let xml = self.client.fetch_caption_document(&track.base_url).await?;
        Ok(extract_text(&xml))
    }
}

/// Extract caption text from a timed-text XML document: pull out `<text>`
/// bodies, strip embedded markup, unescape entities, join with spaces
pub fn extract_text(xml: &str) -> String {
    let fragments: Vec<String> = TEXT_ELEMENT
        .captures_iter(xml)
        .map(|caps| {
            let inner = MARKUP.replace_all(&caps[1], "");
            unescape_entities(inner.trim())
        })
        .filter(|text| !text.is_empty())
        .collect();

    fragments.join(" ").trim().to_string()
}

/// Unescape the five standard HTML entities found in timed-text payloads
pub fn unescape_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
}
