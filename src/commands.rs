//! Subcommand implementations
//!
//! Each handler takes the [`AppContext`](crate::app::AppContext) plus the
//! prompter and command runner it should use, so the same code runs against
//! the terminal and against scripted answers in tests.

pub mod create_jira_ticket;
pub mod gh_pull_request;
pub mod hello;
pub mod setup;
