//! Boreas Transform
//!
//! Batch-mode transformations over whole source files.
//!
//! A [`Transformation`] is the unit a build driver schedules: it receives
//! one parsed [`SourceFile`] together with the shared IR context and
//! performs its effect, typically generating text and writing it next to
//! the source or into a build directory.
//!
//! # Modules
//!
//! - [`file_write`]: Code generation to disk with derived output paths

use std::path::PathBuf;

use boreas_codegen::PyGenError;
use boreas_ir::{ExprArena, NameInterner, SourceFile, SymbolTable};
use thiserror::Error;

pub mod file_write;

pub use file_write::FileWriteTransformation;

/// Shared read-only IR state a transformation runs against.
pub struct TransformContext<'ir> {
    pub arena: &'ir ExprArena,
    pub names: &'ir NameInterner,
    pub symbols: &'ir SymbolTable,
}

impl<'ir> TransformContext<'ir> {
    /// Bundles the IR borrows for one transformation run.
    pub fn new(
        arena: &'ir ExprArena,
        names: &'ir NameInterner,
        symbols: &'ir SymbolTable,
    ) -> Self {
        TransformContext {
            arena,
            names,
            symbols,
        }
    }
}

/// An error produced while applying a transformation.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The source file carries no path, so no output location can be
    /// derived.
    #[error("source file has no path to derive an output location from")]
    MissingSourcePath,

    /// Writing generated output failed.
    #[error("failed to write `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Code generation failed before any output was written.
    #[error(transparent)]
    Codegen(#[from] PyGenError),
}

/// A whole-file transformation applied by a build driver.
pub trait Transformation {
    /// Applies the transformation to one source file.
    fn transform_file(
        &self,
        file: &SourceFile,
        ctx: &TransformContext<'_>,
    ) -> Result<(), TransformError>;
}
