//! Integration test common infrastructure.
//!
//! Provides a fresh registry/service pair, a registry wrapper that records
//! every call, and one that parks an action mid-flight.

#![allow(dead_code)]

pub mod gated;
pub mod recording;

#[allow(unused_imports)]
pub use gated::GatedRegistry;
#[allow(unused_imports)]
pub use recording::{Call, RecordingRegistry};

use chanbind::{ChannelActions, MemoryRegistry};
use std::sync::Arc;

/// An empty in-memory registry and a service over it.
pub fn fresh() -> (Arc<MemoryRegistry>, ChannelActions) {
    let registry = Arc::new(MemoryRegistry::new());
    let actions = ChannelActions::new(registry.clone());
    (registry, actions)
}

/// A recording registry and a service over it.
pub fn recorded() -> (Arc<RecordingRegistry>, ChannelActions) {
    let registry = Arc::new(RecordingRegistry::new());
    let actions = ChannelActions::new(registry.clone());
    (registry, actions)
}

/// A gated registry parking the first lookup of `member`, and a service over it.
pub fn gated(member: &str) -> (Arc<GatedRegistry>, ChannelActions) {
    let registry = Arc::new(GatedRegistry::new(member));
    let actions = ChannelActions::new(registry.clone());
    (registry, actions)
}
