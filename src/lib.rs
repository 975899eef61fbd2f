pub mod services;
pub mod tasks;
pub mod types;
pub mod utils;

pub use services::page_db::mem::MemPageDb;
pub use services::schedule_store::ScheduleStore;
pub use tasks::freq_scheduler::FreqScheduler;
pub use types::configs::freq_scheduler_config::FreqSchedulerConfig;
pub use types::error::SchedulerError;
pub use types::structs::crawled_page::CrawledPage;
pub use types::structs::page_freq::PageFreq;
pub use types::structs::page_info::PageInfo;
pub use types::structs::page_request::PageRequest;
pub use types::structs::schedule_key::ScheduleKey;
pub use types::traits::page_db::{HashInfoStream, PageDb};
