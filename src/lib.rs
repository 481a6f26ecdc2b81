pub mod acquire;
pub mod config;
pub mod constants;
pub mod dedup;
pub mod error;
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod sources;
pub mod support;
pub mod types;

// Entry points shared by the binaries
pub mod app;
