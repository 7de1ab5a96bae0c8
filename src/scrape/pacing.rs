//! Request pacing
//!
//! The scraper waits before moving to a page and again before sending the
//! request. The waits come from a `DelayPolicy` so the scrape loop does not
//! care whether they are fixed or derived from something else.

use crate::config::ScraperConfig;
use std::time::Duration;

/// Decides how long to wait around each page request
pub trait DelayPolicy {
    /// Delay before the scraper starts work on `page`
    fn before_page(&self, page: u32) -> Duration;

    /// Delay immediately before the request for `page` is sent
    fn before_request(&self, page: u32) -> Duration;
}

/// Constant delays, independent of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    page_delay: Duration,
    request_delay: Duration,
}

impl FixedDelay {
    pub fn new(page_delay: Duration, request_delay: Duration) -> Self {
        Self {
            page_delay,
            request_delay,
        }
    }

    pub fn from_config(config: &ScraperConfig) -> Self {
        Self::new(
            Duration::from_millis(config.page_delay_ms),
            Duration::from_millis(config.request_delay_ms),
        )
    }
}

impl DelayPolicy for FixedDelay {
    fn before_page(&self, _page: u32) -> Duration {
        self.page_delay
    }

    fn before_request(&self, _page: u32) -> Duration {
        self.request_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_delay_from_default_config() {
        let policy = FixedDelay::from_config(&ScraperConfig::default());
        assert_eq!(policy.before_page(11), Duration::from_secs(2));
        assert_eq!(policy.before_request(11), Duration::from_secs(2));
        assert_eq!(policy.before_page(30), Duration::from_secs(2));
    }

    #[test]
    fn test_zero_delay_config() {
        let mut config = ScraperConfig::default();
        config.page_delay_ms = 0;
        config.request_delay_ms = 0;
        let policy = FixedDelay::from_config(&config);
        assert_eq!(policy.before_page(1), Duration::ZERO);
        assert_eq!(policy.before_request(1), Duration::ZERO);
    }
}
