//! Configuration sources layered on top of the defaults.

pub mod global_file;
