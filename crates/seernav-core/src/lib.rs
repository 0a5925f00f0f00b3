//! Seernav Core Library
//!
//! Metrics aggregation and type-aware sorting for SEER result trees
//! (sessions of tasks of steps, each with a JSON summary file).

pub mod aggregate;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod metrics;
pub mod record;
pub mod sort;
pub mod table;
pub mod tree;
pub mod view;
pub mod weight;
