use std::path::Path;

use crate::types::{
    error::SchedulerError,
    structs::{crawled_page::CrawledPage, page_info::PageInfo},
};

// Lazy sequence of every (hash, PageInfo) pair known to PageDb.
pub type HashInfoStream<'a> =
    Box<dyn Iterator<Item = Result<(u64, PageInfo), SchedulerError>> + 'a>;

// Contract with the page metadata store. The scheduler reads crawl state
// through `get_info`, records completed fetches through `add`, and bulk-loads
// from `hash_info_stream`; a page missing from PageDb is normal churn, not an
// error. Implementations make `&self` mutation safe on their own terms.
pub trait PageDb {
    fn get_info(&self, hash: u64) -> Result<Option<PageInfo>, SchedulerError>;

    fn add(&self, page: &CrawledPage) -> Result<(), SchedulerError>;

    fn hash_info_stream(&self) -> Result<HashInfoStream<'_>, SchedulerError>;

    // On-disk location, used to derive the schedule directory when the
    // scheduler is not given one explicitly.
    fn path(&self) -> Option<&Path> {
        None
    }
}
