pub mod config;
pub mod trace;
