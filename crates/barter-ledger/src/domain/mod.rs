//! # Domain Layer
//!
//! Records, value objects, errors and the pure matching rules.
//!
//! This module contains NO I/O dependencies. All state store access goes
//! through the ports in the `ports` module.

pub mod entities;
pub mod errors;
pub mod matching;
pub mod outcomes;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use matching::{find_match, prune_unsatisfiable};
pub use outcomes::*;
pub use value_objects::*;
