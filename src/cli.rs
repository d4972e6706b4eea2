//! Command-line interface for tilebingo.

use clap::{Parser, Subcommand};

/// Default tile-pool service URL when neither flag nor environment is set.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Default saved-card file.
pub const DEFAULT_CARDS_FILE: &str = "saved_bingo_cards.json";

/// Tilebingo - terminal bingo card client
#[derive(Parser, Debug)]
#[command(name = "tilebingo")]
#[command(about = "Play bingo cards drawn from a tile-pool service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a bingo card in the terminal
    Play {
        /// Tile-pool service URL (falls back to TILEBINGO_SERVER_URL)
        #[arg(long)]
        server_url: Option<String>,

        /// Tile pool to draw from; defaults to the first listed pool
        #[arg(long)]
        pool: Option<String>,

        /// Card side length
        #[arg(long, default_value = "5")]
        size: usize,

        /// Card seed; random if not provided
        #[arg(long)]
        seed: Option<u64>,

        /// Build the card locally from this word list (one per line)
        /// instead of fetching one from the service
        #[arg(long)]
        words_file: Option<std::path::PathBuf>,

        /// Path to the saved-card file
        #[arg(long, default_value = DEFAULT_CARDS_FILE)]
        cards_file: std::path::PathBuf,
    },

    /// List tile pools on the service
    Pools {
        /// Tile-pool service URL (falls back to TILEBINGO_SERVER_URL)
        #[arg(long)]
        server_url: Option<String>,
    },

    /// Create a tile pool from a file of one tile per line
    CreatePool {
        /// Name for the new pool
        #[arg(long)]
        name: String,

        /// File with one tile content per line
        #[arg(long)]
        tiles_file: std::path::PathBuf,

        /// Tile-pool service URL (falls back to TILEBINGO_SERVER_URL)
        #[arg(long)]
        server_url: Option<String>,
    },

    /// List locally saved bingo cards
    Cards {
        /// Path to the saved-card file
        #[arg(long, default_value = DEFAULT_CARDS_FILE)]
        cards_file: std::path::PathBuf,
    },
}
