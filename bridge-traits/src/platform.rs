//! Thread-safety marker shared by every bridge trait.
//!
//! Host adapters are installed once and then shared with the logging layers,
//! which may run on any thread that emits a `tracing` event.

/// Marker trait that applies `Send + Sync` to host adapters.
pub trait PlatformSendSync: Send + Sync {}

impl<T> PlatformSendSync for T where T: Send + Sync {}
