use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ytbrief",
    about = "ytbrief - summarize YouTube videos from their captions with Gemini",
    version,
    long_about = "A small web service that resolves a YouTube video's caption transcript through an ordered fallback chain and summarizes it with Google's Gemini API. Serves a browser form at / and a JSON API at /api/summarize."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind (overrides the config file)
        #[arg(long, value_name = "HOST")]
        host: Option<String>,

        /// Port to listen on (overrides the config file)
        #[arg(short, long, value_name = "PORT")]
        port: Option<u16>,
    },

    /// Show current configuration
    Config,
}
