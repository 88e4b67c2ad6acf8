//! Socket transport carrying channel frames between frontend and router.
//!
//! The listener binds the configured endpoint and accepts connections in a
//! background thread. Each connection is a stream of newline-delimited
//! [`ChannelFrame`](switchboard_protocol::ChannelFrame)s handled by
//! [`FrameConnectionHandler`].

mod errors;
mod frames;
mod handler;
mod listener;

#[cfg(unix)]
pub(crate) use self::errors::StaleSocketError;
pub(crate) use self::errors::ListenerError;
pub(crate) use self::frames::FrameConnectionHandler;
pub(crate) use self::handler::{ConnectionHandler, ConnectionStream};
pub(crate) use self::listener::{ListenerHandle, SocketListener};

const LISTENER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");
