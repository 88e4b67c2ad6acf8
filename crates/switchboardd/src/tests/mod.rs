//! Test suites for the switchboard backend.

mod frame_transport;
pub(crate) mod support;
