//! Script execution
//!
//! A parsed [`Script`](crate::parser::Script) is run command by command
//! against a [`Scene`](crate::scene::Scene). Names after `then` are looked up
//! in a [`HandlerRegistry`]; anything else there is rejected as not callable.
//!
//! # Example
//!
//! ```text
//! align top .card then log
//! distribute horizontal .card gap 12
//! canvas center .card to #page border: exclude
//! ```

mod executor;
mod registry;

pub use executor::{CommandError, CommandReport, Executor};
pub use registry::{describe, Handler, HandlerRegistry, RegistryError};
