//! Integration tests for the seernav CLI
//!
//! These tests run the seernav binary against fixture result trees.

mod cli;
