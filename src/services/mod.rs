pub mod page_db;
pub mod schedule_store;
