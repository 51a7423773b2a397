#![forbid(unsafe_code)]

pub mod tagged;
