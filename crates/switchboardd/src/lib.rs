//! Command routing between the switchboard frontend and its backend.
//!
//! The frontend talks to the backend over named channels. The `message`
//! channel is asynchronous and carries command envelopes, optionally
//! correlated with a `cypher` so the backend can answer them. The `config`,
//! `typo`, `getCitation` and `updateItems` channels are synchronous queries
//! answered immediately.
//!
//! This crate owns the routing layer only. It classifies inbound frames,
//! looks commands up in a static dispatch table and delegates to the backend
//! subsystems described in [`collaborators`]. Updates flow back to the
//! frontend through [`Router::send`]. The binary serves a Unix or TCP socket
//! configured through [`switchboard_config`] and wires placeholder
//! collaborators so it can run on its own.

mod bootstrap;
pub mod collaborators;
mod dispatch;
pub mod placeholder;
mod process;
mod telemetry;
mod transport;

pub use bootstrap::{
    Backend, BootstrapError, ConfigLoader, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use dispatch::{
    DispatchError, Disposition, FrontendId, FrontendSink, Mode, Outbound, Router, SharedRouter,
};
pub use process::{
    LaunchError, ShutdownError, ShutdownSignal, SystemShutdownSignal, run_backend,
    run_foreground,
};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
