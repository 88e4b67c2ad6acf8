//! Command handlers, grouped by the collaborator they drive.
//!
//! Each submodule exports a `COMMANDS` registration slice; the registry
//! concatenates them into the lookup table.

mod intercept;
mod projects;
mod settings;
mod viewer;
mod window;
mod workspace;

use super::registry::CommandSpec;

/// Every registered command.
pub(super) fn all() -> impl Iterator<Item = &'static CommandSpec> {
    [
        window::COMMANDS,
        workspace::COMMANDS,
        projects::COMMANDS,
        settings::COMMANDS,
        viewer::COMMANDS,
        intercept::COMMANDS,
    ]
    .into_iter()
    .flatten()
}
