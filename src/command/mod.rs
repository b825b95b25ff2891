//! Command module for foam-cutter.
//!
//! Line parsing for `G0`, `G90` and `G91`, and the command-context processor
//! that applies them and paces acknowledgments.

mod parser;
mod processor;

pub use parser::{parameter_value, Command};
pub use processor::{Ack, CommandProcessor};
