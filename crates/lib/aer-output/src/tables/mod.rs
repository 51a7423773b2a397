pub mod energy;
pub mod network;
pub mod qos;
pub mod security;
pub mod summary;
