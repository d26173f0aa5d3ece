//! Application runtime composition modules.

pub(crate) mod command_dispatcher;
