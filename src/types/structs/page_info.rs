use chrono::{DateTime, Utc};

// Per-page crawl state as reported by PageDb. The scheduler only reads the
// fields below; everything else about a page stays inside PageDb.
#[derive(Debug, Clone, PartialEq)]
pub struct PageInfo {
    pub url: String,
    // First and most recent completed fetch; None when never crawled
    pub first_crawl: Option<DateTime<Utc>>,
    pub last_crawl: Option<DateTime<Utc>>,
    // Completed fetches
    pub n_crawls: u64,
    // Fetches where the content hash changed
    pub n_changes: u64,
    // Crawl starting points are excluded from frequency scheduling
    pub is_seed: bool,
}

impl PageInfo {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            first_crawl: None,
            last_crawl: None,
            n_crawls: 0,
            n_changes: 0,
            is_seed: false,
        }
    }

    // Observed change rate in changes per second over the crawled window.
    // Zero until two crawls span a non-empty window.
    pub fn rate(&self) -> f32 {
        match (self.first_crawl, self.last_crawl) {
            (Some(first), Some(last)) if self.n_crawls >= 2 && last > first => {
                let window = (last - first).num_milliseconds() as f32 / 1000.0;
                self.n_changes as f32 / window
            }
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    #[test]
    fn test_rate_zero_before_second_crawl() {
        let mut info = PageInfo::new("https://example.com/");
        assert_eq!(info.rate(), 0.0);

        info.n_crawls = 1;
        info.first_crawl = Some(Utc::now());
        info.last_crawl = info.first_crawl;
        assert_eq!(info.rate(), 0.0);
    }

    #[test]
    fn test_rate_is_changes_per_second() {
        let first = Utc::now();
        let info = PageInfo {
            url: "https://example.com/".to_owned(),
            first_crawl: Some(first),
            last_crawl: Some(first + TimeDelta::seconds(100)),
            n_crawls: 5,
            n_changes: 2,
            is_seed: false,
        };

        assert!((info.rate() - 0.02).abs() < 1e-6);
    }
}
