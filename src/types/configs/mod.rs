pub mod freq_scheduler_config;
