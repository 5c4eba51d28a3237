//! Photo Filter Lab - library crate.
//!
//! Provides the pixel buffer, the point-wise filter engine and the editing
//! session used by the desktop app and the headless `filter_cli` binary.

pub mod buffer;
pub mod config;
pub mod error;
pub mod filter;
pub mod image_io;
pub mod session;
