use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::types::{
    error::SchedulerError,
    structs::{crawled_page::CrawledPage, page_info::PageInfo},
    traits::page_db::{HashInfoStream, PageDb},
};
use crate::utils::web::page_hash;

struct PageRecord {
    info: PageInfo,
    // Body hash of the most recent fetch, for change detection
    content_hash: Option<u64>,
}

// In-memory PageDb backend. The reference implementation for tests and
// single-process crawls; interior locking keeps the `&self` contract.
#[derive(Default)]
pub struct MemPageDb {
    pages: Mutex<BTreeMap<u64, PageRecord>>,
}

impl MemPageDb {
    pub fn new() -> Self {
        Self::default()
    }

    // Register a page under its URL hash.
    pub fn insert(&self, info: PageInfo) -> Result<u64, SchedulerError> {
        let hash = page_hash(&info.url);
        self.insert_with_hash(hash, info)?;
        Ok(hash)
    }

    // Register a page under a caller-chosen hash, e.g. when the hash space
    // is owned by an external frequency table.
    pub fn insert_with_hash(&self, hash: u64, info: PageInfo) -> Result<(), SchedulerError> {
        let mut pages = self.lock()?;
        pages.insert(
            hash,
            PageRecord {
                info,
                content_hash: None,
            },
        );
        Ok(())
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<u64, PageRecord>>, SchedulerError> {
        self.pages
            .lock()
            .map_err(|_| SchedulerError::from("page db lock poisoned"))
    }
}

impl PageDb for MemPageDb {
    fn get_info(&self, hash: u64) -> Result<Option<PageInfo>, SchedulerError> {
        Ok(self.lock()?.get(&hash).map(|record| record.info.clone()))
    }

    fn add(&self, page: &CrawledPage) -> Result<(), SchedulerError> {
        let hash = page_hash(&page.url);
        let mut pages = self.lock()?;

        let record = pages.entry(hash).or_insert_with(|| PageRecord {
            info: PageInfo::new(page.url.clone()),
            content_hash: None,
        });

        record.info.n_crawls += 1;
        if record.info.first_crawl.is_none() {
            record.info.first_crawl = Some(page.time);
        }
        record.info.last_crawl = Some(page.time);

        if let Some(content_hash) = page.content_hash {
            if record.content_hash.is_some() && record.content_hash != Some(content_hash) {
                record.info.n_changes += 1;
            }
            record.content_hash = Some(content_hash);
        }

        Ok(())
    }

    fn hash_info_stream(&self) -> Result<HashInfoStream<'_>, SchedulerError> {
        let snapshot: Vec<(u64, PageInfo)> = self
            .lock()?
            .iter()
            .map(|(hash, record)| (*hash, record.info.clone()))
            .collect();

        Ok(Box::new(snapshot.into_iter().map(Ok)))
    }
}
