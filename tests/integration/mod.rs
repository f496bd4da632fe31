//! Integration tests for the pamsh shell

mod test_utils;

mod command_flows;
mod shell_modes;
mod xdg_config;

pub use test_utils::*;
