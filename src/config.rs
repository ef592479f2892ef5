//! Application configuration
//!
//! Every value here is compiled in. The struct exists so the client and
//! the gallery can be pointed at other endpoints (or tuned) in tests.

use std::time::Duration;

/// Met collection search endpoint
pub const SEARCH_URL: &str = "https://collectionapi.metmuseum.org/public/collection/v1/search";

/// Met collection object endpoint (the object ID is appended as a path segment)
pub const OBJECT_URL: &str = "https://collectionapi.metmuseum.org/public/collection/v1/objects";

/// Number of detail records requested per batch
pub const FETCH_QUANTITY: usize = 5;

/// Typing inactivity before a search is sent
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Query shown when the app starts
pub const SEED_QUERY: &str = "flowers";

/// Maximum width of the search input and the picture, in pixels
pub const MAX_WIDTH: u32 = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub search_url: String,
    pub object_url: String,
    /// Detail records fetched per batch (never zero)
    pub batch_size: usize,
    pub debounce: Duration,
    pub seed_query: String,
    pub input_max_width: u32,
    /// Pictures wider than this are downscaled before display
    pub picture_max_width: u32,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_url: SEARCH_URL.to_string(),
            object_url: OBJECT_URL.to_string(),
            batch_size: FETCH_QUANTITY,
            debounce: DEBOUNCE_WINDOW,
            seed_query: SEED_QUERY.to_string(),
            input_max_width: MAX_WIDTH,
            picture_max_width: MAX_WIDTH,
            user_agent: format!("blind-museum/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// URL of the detail record for one object ID
    pub fn object_url_for(&self, id: &str) -> String {
        format!("{}/{}", self.object_url.trim_end_matches('/'), id)
    }

    /// Batch size clamped to at least one record
    pub fn batch_size(&self) -> usize {
        self.batch_size.max(1)
    }
}
