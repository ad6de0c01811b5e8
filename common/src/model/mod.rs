pub mod channel;
pub mod color;
pub mod config;
pub mod raw;
