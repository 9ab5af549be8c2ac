pub mod cache;
pub mod clock;
pub mod color;
pub mod config;
pub mod feed;
pub mod patterns;
pub mod ranking;
pub mod server;
pub mod types;

/// Blaze "double" roulette recent-results feed (public, no auth required)
pub const FEED_URL: &str =
    "https://blaze.bet.br/api/singleplayer-originals/originals/roulette_games/recent/history/1";

/// Browser-like User-Agent — the feed rejects obvious bot agents
pub const FEED_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/555.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/555.36";
