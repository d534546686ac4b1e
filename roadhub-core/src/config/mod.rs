//! Hub configuration
//!
//! Every threshold and cadence the control logic uses lives here, with
//! `Default` giving the values the console ships with. The firmware fills a
//! [`HubConfig`] from its embedded `hub.toml` via [`parse_config`].

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
