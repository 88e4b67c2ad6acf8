//! Message routing between the frontend and the backend collaborators.
//!
//! The [`Router`] accepts [`ChannelFrame`](switchboard_protocol::ChannelFrame)s.
//! Frames on a synchronous channel are answered immediately. Frames on the
//! `message` channel are classified as intercept commands, correlated calls
//! or notifications and dispatched through a static command table. Handlers
//! push updates back to the frontend through [`Outbound`].

mod errors;
mod handlers;
mod outbound;
mod registry;
mod router;
mod shared;
mod sync_channels;

pub use errors::DispatchError;
pub use outbound::{FrontendId, FrontendSink, Outbound};
pub use registry::Mode;
pub use router::{Disposition, Router};
pub use shared::SharedRouter;
