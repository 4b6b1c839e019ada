//! Command implementations for the heartlog CLI.
//!
//! Each submodule implements the logic for a command group.

pub mod analyze;
pub mod doctor;
pub mod emotions;
pub mod memories;
pub mod word;
