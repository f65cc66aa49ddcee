//! xib2objc - Interface Builder descriptors to Objective-C view classes
//!
//! This library parses the XML form of a `.xib` file, builds an object model
//! of its view hierarchy, and generates Objective-C code that recreates the
//! views and their Auto Layout constraints with Masonry.
//!
//! # Example
//!
//! ```rust
//! use xib2objc::compile;
//!
//! let generated = compile(r#"
//!     <document>
//!         <objects>
//!             <view id="root">
//!                 <subviews>
//!                     <label text="Hello" userLabel="greeting" id="l"/>
//!                 </subviews>
//!             </view>
//!         </objects>
//!     </document>
//! "#).unwrap();
//!
//! assert_eq!(generated.view_file.name, "GeneratedView");
//! assert!(generated.body.contains("[self addSubview:self.greeting];"));
//! ```

pub mod codegen;
pub mod config;
pub mod convert;
pub mod error;
pub mod handlers;
pub mod model;
pub mod output;
pub mod parser;

pub use codegen::{Artifacts, EmitConfig, ProjectInfo, TemplateSet};
pub use config::{ConfigError, Settings};
pub use convert::{Converter, CopyConverter, IbtoolConverter};
pub use error::{CompileError, ParseError};
pub use handlers::HandlerRegistry;
pub use model::{ObjectModel, ViewFile};
pub use output::{DirectorySink, MemorySink, OutputSink};
pub use parser::{parse, Document};

use std::path::{Path, PathBuf};

use tracing::{debug, info};

/// File name of the converter output inside the system temp directory
pub const DEFAULT_TEMP_FILE: &str = "xib2objc.xml";

/// Default location for the converter's intermediate XML
pub fn default_temp_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_TEMP_FILE)
}

/// Configuration for the complete compile pipeline
#[derive(Debug, Clone, Default)]
pub struct CompileConfig {
    /// Name of the generated class; derived from the input when unset
    pub view_name: Option<String>,
    /// Statement formatting
    pub emit: EmitConfig,
    /// Element handlers
    pub registry: HandlerRegistry,
    /// Author and date for the file templates
    pub project: ProjectInfo,
}

impl CompileConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the generated class name
    pub fn with_view_name(mut self, name: impl Into<String>) -> Self {
        self.view_name = Some(name.into());
        self
    }

    /// Set the emitter configuration
    pub fn with_emit(mut self, config: EmitConfig) -> Self {
        self.emit = config;
        self
    }

    /// Set the handler registry
    pub fn with_registry(mut self, registry: HandlerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Set the project information
    pub fn with_project(mut self, project: ProjectInfo) -> Self {
        self.project = project;
        self
    }
}

/// Generated code for one descriptor, before templating
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub view_file: ViewFile,
    /// Declarations, attachments and constraint blocks
    pub body: String,
    /// `@property` declarations for labeled views
    pub properties: String,
}

impl Generated {
    /// Fill the header and implementation skeletons
    pub fn render(&self, templates: &TemplateSet, project: &ProjectInfo) -> Artifacts {
        templates.render(&self.view_file, &self.properties, &self.body, project)
    }
}

/// Compile descriptor XML with default configuration
pub fn compile(source: &str) -> Result<Generated, CompileError> {
    compile_with_config(source, &CompileConfig::default())
}

/// Compile descriptor XML with custom configuration
pub fn compile_with_config(source: &str, config: &CompileConfig) -> Result<Generated, CompileError> {
    let doc = parse(source)?;
    let model = model::build(&doc, &config.registry, config.view_name.as_deref())?;
    let view_file = model
        .view_file
        .clone()
        .ok_or(CompileError::MissingRootView)?;

    let body = codegen::render_layout(&model, &config.emit);
    let properties = codegen::render_properties(&model);
    info!(view = %view_file.name, nodes = model.nodes.len(), "compiled descriptor");

    Ok(Generated {
        view_file,
        body,
        properties,
    })
}

/// Run `converter` on `path` and read back the XML descriptor
///
/// Any previous output at `temp_path` is removed first so a converter that
/// silently writes nothing is reported instead of yielding stale text.
pub fn read_descriptor(
    path: &Path,
    converter: &dyn Converter,
    temp_path: &Path,
) -> Result<String, CompileError> {
    if !path.exists() {
        return Err(CompileError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }

    match std::fs::remove_file(temp_path) {
        Ok(()) => debug!(path = %temp_path.display(), "removed stale converter output"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(CompileError::conversion_failed(format!(
                "can't remove stale output {}: {e}",
                temp_path.display()
            )))
        }
    }

    converter.convert(path, temp_path)?;
    if !temp_path.exists() {
        return Err(CompileError::conversion_failed(format!(
            "converter produced no output at {}",
            temp_path.display()
        )));
    }
    std::fs::read_to_string(temp_path)
        .map_err(|e| CompileError::conversion_failed(format!("{}: {e}", temp_path.display())))
}

/// Convert, compile and write one descriptor file
///
/// The class name defaults to the file stem. Nothing reaches `sink` unless
/// every earlier stage succeeds.
///
/// # Arguments
/// * `path` - The `.xib` (or XML) file to compile
/// * `config` - Compile configuration
/// * `converter` - Produces the XML descriptor at `temp_path`
/// * `temp_path` - Location of the intermediate XML; removed before conversion
/// * `templates` - Header and implementation skeletons
/// * `sink` - Receives the rendered files
pub fn compile_file(
    path: &Path,
    config: &CompileConfig,
    converter: &dyn Converter,
    temp_path: &Path,
    templates: &TemplateSet,
    sink: &mut dyn OutputSink,
) -> Result<Artifacts, CompileError> {
    let source = read_descriptor(path, converter, temp_path)?;

    let mut config = config.clone();
    if config.view_name.is_none() {
        config.view_name = file_stem(path);
    }

    let generated = compile_with_config(&source, &config)?;
    let artifacts = generated.render(templates, &config.project);
    sink.write(&artifacts)?;
    Ok(artifacts)
}

/// Class name derived from an input path
pub fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}
