//! Trash-sweep - stale trash removal library
//!
//! Walks trash folders and removes entries that are older than an age
//! threshold, or large and older than a shorter one.

pub mod cli;
pub mod config;
pub mod entry;
pub mod error;
pub mod platform;
pub mod report;
pub mod sweeper;

pub use config::ThresholdConfig;
pub use entry::Entry;
pub use error::{Result, SweepError};
pub use report::{ConsoleObserver, Severity, SweepObserver};
pub use sweeper::{classify, Decision, SweepResult, Sweeper};
