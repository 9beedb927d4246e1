// Wed Aug 05 2026 - Alex

pub mod logging;

pub use logging::LoggingUtils;
