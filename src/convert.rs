//! Conversion of compiled Interface Builder files into XML descriptors

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::error::CompileError;

/// Program used when none is configured
pub const DEFAULT_CONVERTER: &str = "ibtool";

/// Turns a source file into an XML descriptor at `destination`
pub trait Converter {
    fn convert(&self, source: &Path, destination: &Path) -> Result<(), CompileError>;
}

/// Runs `<program> <source> --write <destination>`
#[derive(Debug, Clone)]
pub struct IbtoolConverter {
    program: PathBuf,
}

impl Default for IbtoolConverter {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERTER)
    }
}

impl IbtoolConverter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Converter for IbtoolConverter {
    fn convert(&self, source: &Path, destination: &Path) -> Result<(), CompileError> {
        info!(
            program = %self.program.display(),
            source = %source.display(),
            "converting descriptor"
        );
        let program = self.program.display().to_string();

        let output = Command::new(&self.program)
            .arg(source)
            .arg("--write")
            .arg(destination)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| CompileError::conversion_failed(format!("{program}: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CompileError::conversion_failed(format!(
                "{program} exited with {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        debug!(destination = %destination.display(), "converter finished");
        Ok(())
    }
}

/// Copies a descriptor that is already XML
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyConverter;

impl Converter for CopyConverter {
    fn convert(&self, source: &Path, destination: &Path) -> Result<(), CompileError> {
        debug!(source = %source.display(), "copying XML descriptor");
        std::fs::copy(source, destination)
            .map(|_| ())
            .map_err(|e| CompileError::conversion_failed(format!("{}: {e}", source.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_converter() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("in.xml");
        let dst = dir.path().join("out.xml");
        std::fs::write(&src, "<document/>").unwrap();
        CopyConverter.convert(&src, &dst).unwrap();
        assert_eq!(std::fs::read_to_string(&dst).unwrap(), "<document/>");
    }

    #[test]
    fn test_copy_converter_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = CopyConverter
            .convert(&dir.path().join("absent.xml"), &dir.path().join("out.xml"))
            .unwrap_err();
        assert!(matches!(err, CompileError::ConversionFailed { .. }));
    }

    #[test]
    fn test_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let converter = IbtoolConverter::new("xib2objc-no-such-converter");
        let err = converter
            .convert(&dir.path().join("a.xib"), &dir.path().join("a.xml"))
            .unwrap_err();
        assert!(matches!(err, CompileError::ConversionFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let converter = IbtoolConverter::new("false");
        let err = converter
            .convert(&dir.path().join("a.xib"), &dir.path().join("a.xml"))
            .unwrap_err();
        assert!(err.to_string().contains("exited with 1"));
    }

    #[test]
    fn test_default_program() {
        assert_eq!(IbtoolConverter::default().program(), Path::new("ibtool"));
    }
}
