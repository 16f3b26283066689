pub mod app;
pub mod batch;
pub mod cli;
pub mod config;
pub mod logging;
pub mod render;
pub mod state;
pub mod utils;
pub mod wizard;
