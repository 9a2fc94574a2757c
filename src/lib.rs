//! rovetree
//!
//! Virtualized, keyboard-navigable tree with roving focus.
//!
//! The pure core (`flatten`, `model`, `state`, `view_state`) turns a nested
//! source tree into a flat item sequence and keeps focus, expansion and
//! selection consistent. The impure shell (`config`, `logging`, `source`,
//! `view`) reads input, resolves configuration and drives the terminal.

pub mod config;
pub mod flatten;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;
