pub mod callbacks;
pub mod fetcher;
pub mod logging;
pub mod orchestrator;
pub mod types;
