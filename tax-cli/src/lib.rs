pub mod app;
pub mod cli;
pub mod format;
pub mod logging;
pub mod report;
pub mod utils;
