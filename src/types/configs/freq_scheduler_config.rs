use std::path::PathBuf;

pub struct FreqSchedulerConfig {
    // Schedule directory; derived from the PageDb path when absent
    pub path: Option<PathBuf>,
    // Keep the directory on shutdown
    pub persist: bool,
    // Fractional earliness slack; None disables backpressure
    pub margin: Option<f32>,
    // Per-page lifetime crawl cap; None is unlimited
    pub max_n_crawls: Option<u64>,
    // Initial LMDB map size in bytes
    pub map_size: usize,
}

impl Default for FreqSchedulerConfig {
    fn default() -> Self {
        Self {
            path: None,
            persist: true,
            margin: None,
            max_n_crawls: None,
            map_size: 256 * 1024 * 1024,
        }
    }
}
