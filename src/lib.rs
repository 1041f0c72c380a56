pub mod commands;
pub mod completions;
pub mod config;
pub mod fs;
pub mod hooks;
pub mod install;
pub mod logging;
pub mod manifest;
pub mod parser;
pub mod project;
pub mod protocol;
pub mod rules;
pub mod runner;
pub mod scaffold;
pub mod validate;
pub mod validation;
