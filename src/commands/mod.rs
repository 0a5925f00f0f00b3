//! Command implementations for seernav

pub mod dispatch;
pub mod view;
