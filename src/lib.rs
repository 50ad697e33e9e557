//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (`core-tag`, `core-runtime`). Host applications can depend
//! on `tagger-workspace` and enable the documented features without needing to
//! wire each crate individually.

#[cfg(feature = "tag")]
pub use core_tag;

#[cfg(feature = "logging")]
pub use core_runtime;
