//! End-to-end tests for the rampart binary
//!
//! These tests spawn the built executable with a temporary project
//! directory, feed event payloads on stdin and check the exit status and
//! the JSON document printed on stdout.

pub mod helpers;
pub mod hook_cli;
pub mod install;
pub mod scaffold;
pub mod validate;
