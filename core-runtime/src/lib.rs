//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the tag core:
//! - Logging and tracing infrastructure
//! - Runtime error type shared by host-facing setup code
//!
//! ## Overview
//!
//! This crate establishes the logging conventions used throughout the
//! workspace. The tag crate only emits `tracing` events; hosts call
//! [`logging::init_logging`] once to decide where those events go.

pub mod error;
pub mod logging;

pub use error::{Error, Result};
