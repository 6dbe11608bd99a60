//! Backend bridge: commands queued by the controller and the worker that runs them.

pub mod commands;
pub mod runtime;
