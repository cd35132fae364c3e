//! ytbrief - a web service that summarizes YouTube videos from their captions
//!
//! This library resolves a video's caption transcript through an ordered
//! fallback chain and forwards it to the Gemini API to produce a structured
//! Korean-language summary served over a single HTTP endpoint.

pub mod cli;
pub mod config;
pub mod server;
pub mod summarize;
pub mod transcript;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use summarize::{GeminiClient, Summarizer};
pub use transcript::{ResolveError, StrategyOutcome, TranscriptResolver, TranscriptStrategy};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;
