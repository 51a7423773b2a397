#![forbid(unsafe_code)]

pub use aer_core;

pub mod aggregate;
pub mod energy;
pub mod qos;
pub mod run;
pub mod security;
pub mod stream;
