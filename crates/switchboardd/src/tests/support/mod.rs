//! Test harness utilities for the router suites.

mod application;
mod mocks;
mod rig;
mod sinks;
mod windows;

pub use application::{FakeApplication, Recorded};
pub use mocks::{MockDict, MockEngine};
pub use rig::{TestRig, collaborators};
pub use sinks::{RecordingReplyTo, RecordingSink};
pub use windows::{RecordingWindows, ScriptedDialogs};
