//! Destinations for generated header and implementation files

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::codegen::Artifacts;
use crate::error::CompileError;

/// Receives both generated files, all or nothing
pub trait OutputSink {
    fn write(&mut self, artifacts: &Artifacts) -> Result<(), CompileError>;
}

/// Writes `<Name>.h` and `<Name>.m` into a directory, creating it on demand
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl OutputSink for DirectorySink {
    fn write(&mut self, artifacts: &Artifacts) -> Result<(), CompileError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| CompileError::output_write_failed(&self.dir, e.to_string()))?;

        let header = self.dir.join(artifacts.header_file_name());
        let implementation = self.dir.join(artifacts.implementation_file_name());

        std::fs::write(&header, &artifacts.header)
            .map_err(|e| CompileError::output_write_failed(&header, e.to_string()))?;

        if let Err(e) = std::fs::write(&implementation, &artifacts.implementation) {
            if let Err(cleanup) = std::fs::remove_file(&header) {
                warn!(path = %header.display(), error = %cleanup, "could not remove partial output");
            }
            return Err(CompileError::output_write_failed(&implementation, e.to_string()));
        }

        info!(
            header = %header.display(),
            implementation = %implementation.display(),
            "wrote generated files"
        );
        Ok(())
    }
}

/// Keeps generated files in memory, keyed by file name
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub files: BTreeMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.files.get(file_name).map(String::as_str)
    }
}

impl OutputSink for MemorySink {
    fn write(&mut self, artifacts: &Artifacts) -> Result<(), CompileError> {
        self.files
            .insert(artifacts.header_file_name(), artifacts.header.clone());
        self.files.insert(
            artifacts.implementation_file_name(),
            artifacts.implementation.clone(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifacts() -> Artifacts {
        Artifacts {
            name: "CardView".to_string(),
            header: "@interface CardView : UIView\n@end\n".to_string(),
            implementation: "@implementation CardView\n@end\n".to_string(),
        }
    }

    #[test]
    fn test_directory_sink_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("nested").join("out");
        let mut sink = DirectorySink::new(&out);
        sink.write(&artifacts()).unwrap();
        assert_eq!(
            std::fs::read_to_string(out.join("CardView.h")).unwrap(),
            "@interface CardView : UIView\n@end\n"
        );
        assert!(out.join("CardView.m").exists());
    }

    #[test]
    fn test_directory_sink_second_write_failure_removes_header() {
        let tmp = tempfile::tempdir().unwrap();
        // A directory where the implementation file should go makes that write fail
        std::fs::create_dir(tmp.path().join("CardView.m")).unwrap();
        let mut sink = DirectorySink::new(tmp.path());
        let err = sink.write(&artifacts()).unwrap_err();
        assert!(matches!(err, CompileError::OutputWriteFailed { .. }));
        assert!(!tmp.path().join("CardView.h").exists());
    }

    #[test]
    fn test_directory_sink_unwritable_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let mut sink = DirectorySink::new(blocker.join("out"));
        assert!(matches!(
            sink.write(&artifacts()),
            Err(CompileError::OutputWriteFailed { .. })
        ));
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::new();
        sink.write(&artifacts()).unwrap();
        assert_eq!(sink.files.len(), 2);
        assert_eq!(sink.get("CardView.m"), Some("@implementation CardView\n@end\n"));
    }
}
