pub mod page_db;
