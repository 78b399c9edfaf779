//! podkit - dispatch core of a Cocoa library package manager CLI
//!
//! Commands live in a tree of abstract and concrete nodes with
//! inherited option declarations. Resolution walks argv greedily,
//! plugins register extra subcommands under recognized namespace
//! prefixes, an environment gate runs before any body, and every
//! raised condition funnels through one classifier that maps it to a
//! user-facing message and exit behavior.

pub mod argv;
pub mod command;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod installer;
pub mod plugins;
pub mod preflight;
pub mod ui;

pub use command::{Command, Invocation, Opt, OptKind};
pub use config::Config;
pub use dispatch::Outcome;
pub use error::{Condition, Result};
