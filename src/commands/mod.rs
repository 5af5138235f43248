pub mod config;
pub mod rows;
