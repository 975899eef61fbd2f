use chrono::{DateTime, Utc};

// Outcome of one completed fetch, handed back to PageDb through the
// scheduler.
#[derive(Debug, Clone, PartialEq)]
pub struct CrawledPage {
    pub url: String,
    pub time: DateTime<Utc>,
    // Hash of the fetched body; None when the fetch produced no content
    pub content_hash: Option<u64>,
}

impl CrawledPage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            time: Utc::now(),
            content_hash: None,
        }
    }
}
