use serde::{Deserialize, Serialize};

/// Default listing host
pub const DEFAULT_BASE_URL: &str = "https://boardgamegeek.com";

/// Default desktop browser identification sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Reviewer-Scrape
///
/// Every section is optional in the TOML file; missing keys fall back to the
/// defaults the scraper has always used.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub scraper: ScraperConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Relational store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "board-games.db".to_string(),
        }
    }
}

/// Page range and pacing
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Scheme and host of the listing site
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// First page index to scrape (1-based, inclusive)
    #[serde(rename = "start-page")]
    pub start_page: u32,

    /// Last page index to scrape (inclusive)
    #[serde(rename = "end-page")]
    pub end_page: u32,

    /// Delay before moving on to each page (milliseconds)
    #[serde(rename = "page-delay-ms")]
    pub page_delay_ms: u64,

    /// Delay right before each page request is sent (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            start_page: 11,
            end_page: 30,
            page_delay_ms: 2000,
            request_delay_ms: 2000,
        }
    }
}

impl ScraperConfig {
    /// Number of pages in the configured range
    ///
    /// Widened to `u64` because `0..=u32::MAX` holds one more page than `u32`
    /// can count.
    pub fn page_count(&self) -> u64 {
        if self.end_page < self.start_page {
            0
        } else {
            u64::from(self.end_page - self.start_page) + 1
        }
    }
}

/// Request identification
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Full `User-Agent` header value
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
