//! Safe, recursive renaming of files and directories to URL-friendly slugs.
//!
//! The public API is organised into layers:
//!
//! - **[`slug`]**, **[`extension`]**, **[`ignore`]**: pure name computations
//! - **[`operations`]**: filesystem access behind a trait, plus the dry-run overlay
//! - **[`engine`]**: the tree walk and the change applier, reporting [`engine::Event`]s
//! - **[`config`]**, **[`cli`]**, **[`git`]**, **[`commands`]**: the command-line shell
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod exec;
pub mod extension;
pub mod git;
pub mod ignore;
pub mod logging;
pub mod operations;
pub mod slug;
