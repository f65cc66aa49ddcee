//! xib2objc CLI
//!
//! Usage:
//!   xib2objc [OPTIONS] <INPUT>
//!
//! Options:
//!   -o, --output-dir <DIR>   Directory for the generated .h and .m files
//!   -c, --config <FILE>      Settings file (TOML format)
//!   --xml                    Input is already an XML descriptor
//!   --stdout                 Print the generated layout body instead of writing files
//!   -h, --help               Print help

use std::path::{Path, PathBuf};
use std::process::Command;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use xib2objc::{
    compile_file, compile_with_config, default_temp_path, file_stem, read_descriptor,
    CompileConfig, CompileError, Converter, CopyConverter, DirectorySink, IbtoolConverter,
    Settings,
};

#[derive(Parser)]
#[command(name = "xib2objc")]
#[command(about = "Generate Objective-C Masonry layout code from Interface Builder files")]
struct Cli {
    /// Input .xib file (or XML descriptor with --xml)
    input: PathBuf,

    /// Directory for the generated files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Settings file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Location of the converter's intermediate XML
    #[arg(long)]
    temp_path: Option<PathBuf>,

    /// Converter program
    #[arg(long)]
    converter: Option<PathBuf>,

    /// Input is already an XML descriptor; skip the converter
    #[arg(long)]
    xml: bool,

    /// Print the generated layout body instead of writing files
    #[arg(long)]
    stdout: bool,

    /// Name of the generated class (defaults to the input file stem)
    #[arg(long)]
    name: Option<String>,

    /// Author stamped into the file headers
    #[arg(long)]
    author: Option<String>,

    /// Date stamped into the file headers (defaults to today)
    #[arg(long)]
    date: Option<String>,

    /// Reveal the output directory when done
    #[arg(long)]
    open: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match &cli.config {
        Some(path) => match Settings::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading settings '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let templates = match settings.templates() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut project = settings.project.clone();
    if let Some(author) = &cli.author {
        project = project.with_author(author.as_str());
    }
    if let Some(date) = &cli.date {
        project = project.with_date(date.as_str());
    }

    let mut config = CompileConfig::new().with_project(project.or_today());
    if let Some(name) = &cli.name {
        config = config.with_view_name(name.as_str());
    }

    let converter: Box<dyn Converter> = if cli.xml {
        Box::new(CopyConverter)
    } else {
        match cli.converter.as_ref().or(settings.converter.as_ref()) {
            Some(program) => Box::new(IbtoolConverter::new(program)),
            None => Box::new(IbtoolConverter::default()),
        }
    };
    let temp_path = cli
        .temp_path
        .clone()
        .or_else(|| settings.temp_path.clone())
        .unwrap_or_else(default_temp_path);
    let output_dir = cli
        .output_dir
        .clone()
        .or_else(|| settings.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    if cli.stdout {
        print_body(&cli, config, converter.as_ref(), &temp_path);
        return;
    }

    let mut sink = DirectorySink::new(&output_dir);
    match compile_file(
        &cli.input,
        &config,
        converter.as_ref(),
        &temp_path,
        &templates,
        &mut sink,
    ) {
        Ok(artifacts) => {
            println!(
                "{}",
                output_dir.join(artifacts.implementation_file_name()).display()
            );
        }
        Err(e) => fail(&e, &temp_path),
    }

    if cli.open {
        reveal(&output_dir);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Compile the input and print the property block and layout body
fn print_body(cli: &Cli, mut config: CompileConfig, converter: &dyn Converter, temp_path: &Path) {
    let source = match read_descriptor(&cli.input, converter, temp_path) {
        Ok(content) => content,
        Err(e) => fail(&e, temp_path),
    };
    if config.view_name.is_none() {
        config.view_name = file_stem(&cli.input);
    }

    match compile_with_config(&source, &config) {
        Ok(generated) => {
            print!("{}", generated.properties);
            if !generated.properties.is_empty() {
                println!();
            }
            print!("{}", generated.body);
        }
        Err(e) => fail(&e, temp_path),
    }
}

/// Report `error` and exit; parse errors are rendered against the converter output
fn fail(error: &CompileError, temp_path: &Path) -> ! {
    let source = match error {
        CompileError::Parse(_) => std::fs::read_to_string(temp_path).unwrap_or_else(|e| {
            warn!(path = %temp_path.display(), error = %e, "can't reread descriptor");
            String::new()
        }),
        _ => String::new(),
    };
    eprint!("{}", error.report(&source, &temp_path.display().to_string()));
    std::process::exit(1);
}

/// Open the output directory with the platform's `open`; failures only warn
fn reveal(dir: &Path) {
    match Command::new("open").arg(dir).status() {
        Ok(status) if status.success() => info!(dir = %dir.display(), "revealed output"),
        Ok(status) => warn!(dir = %dir.display(), %status, "open exited unsuccessfully"),
        Err(e) => warn!(dir = %dir.display(), error = %e, "could not run open"),
    }
}
