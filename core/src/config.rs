//! Client configuration.
//!
//! Use the builder methods to customize the defaults.
//!
//! ```
//! use pokedex_core::ClientConfig;
//! use std::time::Duration;
//!
//! let config = ClientConfig::new()
//!     .with_base_url("http://127.0.0.1:3000")
//!     .with_page_limit(20)
//!     .with_timeout(Duration::from_secs(10));
//! assert_eq!(config.page_limit(), 20);
//! ```

use std::time::Duration;

/// Public PokéAPI root.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Number of index entries requested in the single fetched page.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    page_limit: u32,
    /// `None` means requests may hang indefinitely.
    timeout: Option<Duration>,
    user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
            timeout: None,
            user_agent: concat!("pokedex-core/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API root. A trailing slash is stripped.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub const fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit;
        self
    }

    /// Bound every request by `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn page_limit(&self) -> u32 {
        self.page_limit
    }

    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
