//! Migrates a local Expo project to a new SDK version.
//!
//! The project folder is moved aside to `old_<name>` and rebuilt: a clean
//! manifest, the requested framework version, the user's files, and the old
//! dependencies reinstalled at versions the new SDK accepts.

pub mod cli;
pub mod config;
pub mod install;
pub mod project;
pub mod ui;
pub mod versions;
