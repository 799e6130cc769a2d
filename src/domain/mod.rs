pub mod config;
pub mod deal;
