#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod metrics;
pub mod node;
pub mod time;
pub mod trace;
