pub mod fs;
pub mod mmap;
pub mod web;
