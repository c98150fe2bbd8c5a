//! Infrastructure layer: state stores, in-memory chain collaborators, config and logging.

pub mod chain;
pub mod config;
pub mod logging;
pub mod storage;
