pub mod crawled_page;
pub mod page_freq;
pub mod page_info;
pub mod page_request;
pub mod schedule_key;
