//! ekomcode: a menu-driven Python course for the terminal.
//!
//! The binary in `main.rs` wires these modules to a terminal; the library
//! target exposes them to the integration tests.

pub mod app;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod event;
pub mod navigator;
pub mod runner;
pub mod store;
pub mod ui;
