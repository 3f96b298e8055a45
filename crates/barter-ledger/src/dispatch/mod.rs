//! # Dispatch Module
//!
//! Positional string interface of the ledger, in the shape hosts invoke it:
//! a function name plus a list of string arguments.
//!
//! ## Modules
//!
//! - `function`: [`LedgerFunction`] names and aliases
//! - `command`: [`Command`] parsing with 1-based argument validation
//! - `handler`: [`LedgerDispatcher`] routing commands to the service

mod command;
mod function;
mod handler;

pub use command::Command;
pub use function::LedgerFunction;
pub use handler::{error_response, LedgerDispatcher};
