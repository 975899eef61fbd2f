use std::fs::{create_dir_all, remove_dir, remove_file};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::services::schedule_store::ScheduleStore;
use crate::types::{
    configs::freq_scheduler_config::FreqSchedulerConfig,
    error::{ResultExt, SchedulerError},
    structs::{
        crawled_page::CrawledPage, page_freq::PageFreq, page_request::PageRequest,
        schedule_key::ScheduleKey,
    },
    traits::page_db::PageDb,
};
use crate::utils::mmap::MmapArray;

// Frequency-driven revisit scheduler. Keeps a persistent priority queue of
// (score, hash) -> freq where the score is a virtual clock: every dequeue
// moves the page one nominal period (1/freq) into the future, so over time
// each page is fetched at roughly its requested rate.
pub struct FreqScheduler {
    page_db: Arc<dyn PageDb>,
    store: Option<ScheduleStore>,
    path: PathBuf,
    persist: bool,
    margin: Option<f32>,
    max_n_crawls: Option<u64>,
}

impl FreqScheduler {
    pub fn new(
        page_db: Arc<dyn PageDb>,
        config: FreqSchedulerConfig,
    ) -> Result<Self, SchedulerError> {
        let path = match config.path {
            Some(path) => path,
            None => match page_db.path() {
                Some(db_path) => {
                    let mut name = db_path.as_os_str().to_owned();
                    name.push("_freqs");
                    PathBuf::from(name)
                }
                None => {
                    return Err(SchedulerError::InvalidPath(
                        "no directory given and the page db has no path to derive one".to_owned(),
                    ))
                }
            },
        };

        create_dir_all(&path)
            .map_err(|e| SchedulerError::InvalidPath(format!("{}: {}", path.display(), e)))?;

        let store = ScheduleStore::open(&path, config.map_size)?;
        info!(path = %path.display(), "frequency scheduler open");

        Ok(Self {
            page_db,
            store: Some(store),
            path,
            persist: config.persist,
            margin: config.margin,
            max_n_crawls: config.max_n_crawls,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Populate the schedule from every page PageDb knows. Pages are included
    // once they have been crawled at least once, are below the lifetime cap
    // and are not seeds; their frequency is freq_scale times the observed
    // change rate when both are positive, else freq_default. One transaction:
    // a stream failure loads nothing.
    pub fn load_simple(&self, freq_default: f32, freq_scale: f32) -> Result<(), SchedulerError> {
        let stream = self
            .page_db
            .hash_info_stream()
            .context("creating page info stream")?;

        let mut session = self.store()?.session()?;
        let mut n_pages = 0usize;

        for item in stream {
            let (hash, info) = item.context("reading page info stream")?;

            if info.n_crawls == 0 || info.is_seed {
                continue;
            }
            if let Some(cap) = self.max_n_crawls {
                if info.n_crawls >= cap {
                    continue;
                }
            }

            let mut freq = freq_default;
            if freq_scale > 0.0 {
                let rate = info.rate();
                if rate > 0.0 {
                    freq = freq_scale * rate;
                }
            }

            session.insert(&ScheduleKey { score: 0.0, hash }, freq)?;
            n_pages += 1;
        }

        session.commit()?;
        debug!(n_pages, "loaded schedule from page db");
        Ok(())
    }

    // Populate the schedule from a flat frequency table. Initial scores are
    // staggered at one nominal period so higher-frequency pages come up
    // first.
    pub fn load_mmap(&self, freqs: &MmapArray<PageFreq>) -> Result<(), SchedulerError> {
        let store = self.store()?;
        store
            .expand(2 * freqs.len() * freqs.element_size())
            .context("resizing schedule database")?;

        let mut session = store.session()?;
        for record in freqs.iter() {
            if record.freq <= 0.0 {
                continue;
            }

            let key = ScheduleKey {
                score: 1.0 / record.freq,
                hash: record.hash,
            };
            session.insert(&key, record.freq)?;
        }

        session.commit()?;
        debug!(n_records = freqs.len(), "loaded schedule from frequency table");
        Ok(())
    }

    // Dequeue up to max_requests URLs, rotating each dequeued entry to
    // score + 1/freq. Pages unknown to PageDb are dropped from the schedule;
    // pages at the lifetime cap are retired the same way. With a margin set,
    // the batch stops early rather than fetch a page inside its nominal
    // period. All mutations commit together at the end.
    pub fn request(&self, max_requests: usize) -> Result<PageRequest, SchedulerError> {
        let mut session = self.store()?.session()?;
        let mut request = PageRequest::with_capacity(max_requests);

        while request.n_urls() < max_requests {
            let (mut key, freq) = match session.first()? {
                Some(entry) => entry,
                // no more pages left
                None => break,
            };

            let info = self
                .page_db
                .get_info(key.hash)
                .context("retrieving page info")?;

            if let (Some(margin), Some(info)) = (self.margin, info.as_ref()) {
                if let Some(last_crawl) = info.last_crawl {
                    let elapsed = (Utc::now() - last_crawl).num_milliseconds() as f64 / 1000.0;
                    if elapsed < 1.0 / (freq as f64 * (1.0 + margin as f64)) {
                        // head of the queue is not due yet: stop without
                        // touching the schedule
                        break;
                    }
                }
            }

            let crawl = match info.as_ref() {
                Some(info) => self.max_n_crawls.map_or(true, |cap| info.n_crawls < cap),
                None => false,
            };

            session.remove(&key)?;

            match info {
                Some(info) if crawl => {
                    request.add_url(info.url);
                    key.advance(freq);
                    session.insert(&key, freq)?;
                }
                // retired or unknown page: the entry stays deleted
                _ => {}
            }
        }

        session.commit()?;
        debug!(n_urls = request.n_urls(), "request batch ready");
        Ok(request)
    }

    // Record a completed fetch with PageDb. The schedule itself is untouched;
    // scores only advance in request.
    pub fn add(&self, page: &CrawledPage) -> Result<(), SchedulerError> {
        self.page_db.add(page).context("adding crawled page")
    }

    // Write the schedule in sort order, one "<score> <hash> <freq>" line per
    // entry.
    pub fn dump(&self, out: &mut impl Write) -> Result<(), SchedulerError> {
        for (key, freq) in self.store()?.entries()? {
            writeln!(out, "{} {:016x} {}", sci(key.score), key.hash, sci(freq))?;
        }
        Ok(())
    }

    // Close the environment; with persist off, remove the store files and
    // the directory. Dropping the scheduler does the same.
    pub fn close(mut self) {
        self.shutdown();
    }

    fn store(&self) -> Result<&ScheduleStore, SchedulerError> {
        self.store
            .as_ref()
            .ok_or_else(|| SchedulerError::from("schedule store is closed"))
    }

    fn shutdown(&mut self) {
        // the environment must be closed before its files are unlinked
        drop(self.store.take());

        if !self.persist {
            let _ = remove_file(self.path.join("data.mdb"));
            let _ = remove_file(self.path.join("lock.mdb"));
            let _ = remove_dir(&self.path);
            self.persist = true;
        }
    }
}

impl Drop for FreqScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// printf("%.2e")-compatible formatting: Rust writes 1.5e0 where C writes
// 1.50e+00, and dumps stay diffable against the latter.
fn sci(value: f32) -> String {
    let formatted = format!("{:.2e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.abs())
        }
        None => formatted,
    }
}
