//! Boreas Codegen
//!
//! Python source generation from the Boreas IR.
//!
//! # Architecture
//!
//! Generation is a single recursive pass over the statement tree:
//!
//! 1. **Expression mapping**: Precedence-aware rendering of expression
//!    subtrees to Python text, parenthesizing only where binding or
//!    source grouping requires it
//! 2. **Statement emission**: Line-oriented rendering of statements and
//!    program units with indentation tracking and width-based wrapping
//!
//! Scalar out-arguments drop from the emitted signature and return as a
//! trailing tuple instead, so callers bind results the Python way.
//!
//! # Modules
//!
//! - [`emitter`]: Output abstraction for generated text
//! - [`mapper`]: Expression-to-text rendering
//! - [`pygen`]: Statement and program-unit generation
//! - [`types`]: Declared-type to numpy annotation mapping

pub mod emitter;
pub mod error;
pub mod mapper;
pub mod pygen;
pub mod types;

pub use emitter::{Emitter, StringEmitter};
pub use error::PyGenError;
pub use mapper::PyExprMapper;
pub use pygen::{pygen, pygen_with, PyBackend, PyCodegen, PyGenConfig};
pub use types::numpy_type;
