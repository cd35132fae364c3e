use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;

pub mod innertube;
pub mod segments;
pub mod timedtext;

use crate::config::ResolverConfig;
use crate::Result;
use innertube::InnerTubeClient;

/// Matches a `v=` query parameter or a path segment carrying the
/// 11-character video id, e.g. `watch?v=dQw4w9WgXcQ` or `youtu.be/dQw4w9WgXcQ`.
static VIDEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:v=|/)([A-Za-z0-9_-]{11})").expect("video id pattern"));

/// Extract the 11-character video id from a YouTube URL
pub fn extract_video_id(input: &str) -> Option<String> {
    VIDEO_ID
        .captures(input.trim())
        .map(|caps| caps[1].to_string())
}

/// Outcome of a single strategy attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyOutcome {
    /// Usable transcript text meeting the length threshold
    Text(String),
    /// The strategy produced text, but shorter than its threshold
    InsufficientText { chars: usize },
    /// The strategy failed outright (network, parse, no caption tracks)
    Failed(String),
}

/// Record of one non-winning strategy attempt, kept for diagnostics
#[derive(Debug, Clone)]
pub struct StrategyAttempt {
    pub strategy: &'static str,
    pub outcome: StrategyOutcome,
}

/// Errors crossing the resolver boundary
#[derive(thiserror::Error, Debug)]
pub enum ResolveError {
    #[error("Invalid YouTube URL")]
    InvalidUrl,

    #[error("자막을 가져올 수 없습니다")]
    Exhausted { attempts: Vec<StrategyAttempt> },
}

/// Trait for fetching caption text for a video id
#[async_trait]
pub trait TranscriptStrategy: Send + Sync {
    /// Get the name of this strategy
    fn name(&self) -> &'static str;

    /// Fetch raw transcript text for the given video id
    async fn fetch(&self, video_id: &str) -> Result<String>;
}

/// Resolves a video URL to caption text by trying strategies in a fixed
/// order and stopping at the first one that yields sufficiently long text.
pub struct TranscriptResolver {
    strategies: Vec<(Box<dyn TranscriptStrategy>, usize)>,
}

impl TranscriptResolver {
    /// Create a resolver with the default strategy chain
    pub fn new(config: &ResolverConfig) -> Self {
        let client = InnerTubeClient::new();
        Self::with_strategies(vec![
            (
                Box::new(segments::SegmentStrategy::new(client.clone())),
                config.min_segment_chars,
            ),
            (
                Box::new(timedtext::TimedTextStrategy::new(client)),
                config.min_timedtext_chars,
            ),
        ])
    }

    /// Create a resolver from an explicit list of strategies, each paired
    /// with its minimum-length threshold in characters
    pub fn with_strategies(strategies: Vec<(Box<dyn TranscriptStrategy>, usize)>) -> Self {
        Self { strategies }
    }

    /// Resolve a video URL to transcript text.
    ///
    /// Strategy failures are recovered locally and recorded; only the final
    /// outcome crosses this boundary.
    pub async fn resolve(&self, url: &str) -> std::result::Result<String, ResolveError> {
        let video_id = extract_video_id(url).ok_or(ResolveError::InvalidUrl)?;

        let mut attempts = Vec::new();
        for (strategy, min_chars) in &self.strategies {
            let outcome = match strategy.fetch(&video_id).await {
                Ok(text) => {
                    let text = text.trim().to_string();
                    let chars = text.chars().count();
                    if chars >= *min_chars {
                        StrategyOutcome::Text(text)
                    } else {
                        StrategyOutcome::InsufficientText { chars }
                    }
                }
                Err(e) => StrategyOutcome::Failed(e.to_string()),
            };

            match outcome {
                StrategyOutcome::Text(text) => {
                    tracing::info!(
                        strategy = strategy.name(),
                        chars = text.chars().count(),
                        "transcript resolved"
                    );
                    return Ok(text);
                }
                other => {
                    tracing::debug!(strategy = strategy.name(), outcome = ?other, "strategy skipped");
                    attempts.push(StrategyAttempt {
                        strategy: strategy.name(),
                        outcome: other,
                    });
                }
            }
        }

        Err(ResolveError::Exhausted { attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Canned {
        name: &'static str,
        text: Option<&'static str>,
        calls: Arc<AtomicUsize>,
    }

    impl Canned {
        fn new(name: &'static str, text: Option<&'static str>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    name,
                    text,
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl TranscriptStrategy for Canned {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch(&self, _video_id: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.text {
                Some(text) => Ok(text.to_string()),
                None => anyhow::bail!("canned failure"),
            }
        }
    }

    #[test]
    fn test_extract_video_id_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_extract_video_id_short_url() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_extract_video_id_with_extra_params() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=120"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_extract_video_id_rejects_garbage() {
        assert_eq!(extract_video_id("not-a-url"), None);
        assert_eq!(extract_video_id(""), None);
        assert_eq!(extract_video_id("https://example.com"), None);
    }

    #[tokio::test]
    async fn test_invalid_url_skips_strategies() {
        let (strategy, calls) = Canned::new("a", Some("plenty of caption text here"));
        let resolver = TranscriptResolver::with_strategies(vec![(Box::new(strategy), 10)]);

        let result = resolver.resolve("not-a-url").await;
        assert!(matches!(result, Err(ResolveError::InvalidUrl)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_first_strategy_short_circuits() {
        let (a, _) = Canned::new("a", Some("plenty of caption text here"));
        let (b, b_calls) = Canned::new("b", Some("should never be reached"));
        let resolver =
            TranscriptResolver::with_strategies(vec![(Box::new(a), 10), (Box::new(b), 10)]);

        let text = resolver
            .resolve("https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap();
        assert_eq!(text, "plenty of caption text here");
        assert_eq!(b_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_strategy_falls_through() {
        let (a, a_calls) = Canned::new("a", None);
        let (b, b_calls) = Canned::new("b", Some("fallback caption text"));
        let resolver =
            TranscriptResolver::with_strategies(vec![(Box::new(a), 10), (Box::new(b), 10)]);

        let text = resolver
            .resolve("https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap();
        assert_eq!(text, "fallback caption text");
        assert_eq!(a_calls.load(Ordering::SeqCst), 1);
        assert_eq!(b_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_all_strategies_short_is_exhausted() {
        let (a, _) = Canned::new("a", Some("tiny"));
        let (b, _) = Canned::new("b", None);
        let resolver =
            TranscriptResolver::with_strategies(vec![(Box::new(a), 10), (Box::new(b), 10)]);

        let err = resolver
            .resolve("https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap_err();
        match err {
            ResolveError::Exhausted { attempts } => {
                assert_eq!(attempts.len(), 2);
                assert_eq!(
                    attempts[0].outcome,
                    StrategyOutcome::InsufficientText { chars: 4 }
                );
                assert!(matches!(attempts[1].outcome, StrategyOutcome::Failed(_)));
            }
            other => panic!("expected Exhausted, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_whitespace_is_trimmed_before_threshold() {
        let (a, _) = Canned::new("a", Some("   ok   "));
        let resolver = TranscriptResolver::with_strategies(vec![(Box::new(a), 10)]);

        let err = resolver
            .resolve("https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap_err();
        match err {
            ResolveError::Exhausted { attempts } => {
                assert_eq!(
                    attempts[0].outcome,
                    StrategyOutcome::InsufficientText { chars: 2 }
                );
            }
            other => panic!("expected Exhausted, got {:?}", other),
        }
    }
}
