//! Static command registration table.
//!
//! Every command has exactly one handler. The modes attached to it decide
//! which routes may reach it: `notify` (plain Envelope), `call`
//! (CorrelatedCall answered with `returnValue`) or `intercept` (runs before
//! classification, with the reply-to capability). Commands such as the window
//! controls are registered for both `notify` and `call`.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::collaborators::{Collaborators, ReplyTo};

use super::errors::DispatchError;
use super::handlers;
use super::outbound::Outbound;

/// Invocation route a command may be reached through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Fire-and-forget Envelope; the result is discarded.
    Notify,
    /// CorrelatedCall; the result becomes `returnValue`.
    Call,
    /// Handled before classification, with the raw connection.
    Intercept,
}

impl Mode {
    /// Returns the lowercase name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notify => "notify",
            Self::Call => "call",
            Self::Intercept => "intercept",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Everything a handler may touch while it runs.
pub(crate) struct HandlerContext<'a> {
    pub(crate) collaborators: &'a mut Collaborators,
    pub(crate) outbound: &'a mut Outbound,
    pub(crate) reply_to: &'a mut dyn ReplyTo,
    /// Route the current message arrived through.
    pub(crate) mode: Mode,
}

/// Handler signature. The returned value is only observed in `call` mode.
pub(crate) type Handler = fn(&mut HandlerContext<'_>, Value) -> Result<Value, DispatchError>;

/// One registration: name, reachable modes, handler.
pub(crate) struct CommandSpec {
    pub(crate) name: &'static str,
    pub(crate) modes: &'static [Mode],
    pub(crate) handler: Handler,
}

impl CommandSpec {
    pub(crate) const fn notify(name: &'static str, handler: Handler) -> Self {
        Self {
            name,
            modes: &[Mode::Notify],
            handler,
        }
    }

    pub(crate) const fn call(name: &'static str, handler: Handler) -> Self {
        Self {
            name,
            modes: &[Mode::Call],
            handler,
        }
    }

    pub(crate) const fn notify_or_call(name: &'static str, handler: Handler) -> Self {
        Self {
            name,
            modes: &[Mode::Notify, Mode::Call],
            handler,
        }
    }

    pub(crate) const fn intercept(name: &'static str, handler: Handler) -> Self {
        Self {
            name,
            modes: &[Mode::Intercept],
            handler,
        }
    }

    pub(crate) fn supports(&self, mode: Mode) -> bool {
        self.modes.contains(&mode)
    }
}

static TABLE: Lazy<CommandTable> = Lazy::new(|| CommandTable::build(handlers::all()));

/// Lookup table from command name to registration, built once.
pub(crate) struct CommandTable {
    entries: HashMap<&'static str, &'static CommandSpec>,
}

impl CommandTable {
    /// The process-wide table.
    pub(crate) fn global() -> &'static Self {
        &TABLE
    }

    fn build(specs: impl IntoIterator<Item = &'static CommandSpec>) -> Self {
        let entries = specs.into_iter().map(|spec| (spec.name, spec)).collect();
        Self { entries }
    }

    /// Finds the handler for `command` reachable through `mode`.
    pub(crate) fn resolve(
        &self,
        command: &str,
        mode: Mode,
    ) -> Result<&'static CommandSpec, DispatchError> {
        self.entries
            .get(command)
            .copied()
            .filter(|spec| spec.supports(mode))
            .ok_or_else(|| DispatchError::unknown_command(command, mode))
    }

    /// Whether `command` bypasses classification.
    pub(crate) fn intercepts(&self, command: &str) -> bool {
        self.entries
            .get(command)
            .is_some_and(|spec| spec.supports(Mode::Intercept))
    }

    /// Sorted names of the commands reachable through `mode`.
    pub(crate) fn commands(&self, mode: Mode) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .entries
            .values()
            .filter(|spec| spec.supports(mode))
            .map(|spec| spec.name)
            .collect();
        names.sort_unstable();
        names
    }
}

/// Deserialises handler content, mapping failures to
/// [`DispatchError::InvalidContent`].
pub(crate) fn parse_content<T: DeserializeOwned>(
    command: &str,
    content: Value,
) -> Result<T, DispatchError> {
    serde_json::from_value(content)
        .map_err(|error| DispatchError::invalid_content(command, error.to_string()))
}
