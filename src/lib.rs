//! pamsh: Privileged Access Management Shell
//!
//! An interactive command shell for administering a privileged access management
//! vault. Lines are tokenized, dispatched to named commands and their results
//! rendered as a table, JSON or YAML.

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod shell;
