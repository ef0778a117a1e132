//! Code generation to disk.
//!
//! The output path is derived from the source file's recorded path: the
//! stem is kept, an optional mode tag is inserted, and the configured
//! suffix replaces the source extension. With a build directory set the
//! file lands there under its bare name, otherwise next to the source.

use std::fs;
use std::path::{Path, PathBuf};

use boreas_codegen::pygen;
use boreas_ir::SourceFile;

use crate::{TransformContext, TransformError, Transformation};

/// Generates Python for each transformed file and writes it out.
#[derive(Debug, Clone)]
pub struct FileWriteTransformation {
    /// Target directory for outputs. `None` writes alongside the source.
    pub builddir: Option<PathBuf>,
    /// Mode tag inserted between stem and suffix (`cloudsc.numpy.py`).
    pub mode: Option<String>,
    /// Output suffix, replacing the source extension.
    pub suffix: String,
}

impl Default for FileWriteTransformation {
    fn default() -> Self {
        FileWriteTransformation {
            builddir: None,
            mode: None,
            suffix: ".py".to_string(),
        }
    }
}

impl FileWriteTransformation {
    /// Transformation writing `<stem>.py` next to each source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places outputs in the given directory instead of alongside sources.
    pub fn in_builddir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.builddir = Some(dir.into());
        self
    }

    /// Tags output file names with a mode segment before the suffix.
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Replaces the default `.py` output suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Derives the output path for a source path.
    pub fn output_path(&self, source: &Path) -> PathBuf {
        let stem = source.file_stem().unwrap_or(source.as_os_str());
        let mut name = stem.to_os_string();
        if let Some(mode) = &self.mode {
            name.push(".");
            name.push(mode);
        }
        name.push(&self.suffix);
        match &self.builddir {
            Some(dir) => dir.join(name),
            None => source.with_file_name(name),
        }
    }
}

impl Transformation for FileWriteTransformation {
    #[tracing::instrument(level = "debug", skip_all)]
    fn transform_file(
        &self,
        file: &SourceFile,
        ctx: &TransformContext<'_>,
    ) -> Result<(), TransformError> {
        let source = file
            .path
            .as_deref()
            .ok_or(TransformError::MissingSourcePath)?;
        let target = self.output_path(source);
        let text = pygen(file, ctx.arena, ctx.names, ctx.symbols)?;
        tracing::debug!(
            path = %target.display(),
            bytes = text.len(),
            "writing generated source"
        );
        fs::write(&target, &text).map_err(|err| TransformError::Io {
            path: target,
            source: err,
        })
    }
}
