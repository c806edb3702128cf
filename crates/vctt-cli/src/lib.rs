//! VCTT CLI library.
//!
//! Argument parsing, configuration loading, provider selection and the
//! command implementations behind the `vctt` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod provider;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use provider::Provider;
