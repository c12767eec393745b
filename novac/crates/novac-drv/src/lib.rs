//! novac-drv - Compiler driver for the Nova language.
//!
//! The driver is the entry point and orchestrator for the pipeline:
//!
//! ```text
//! Source file (.nova)
//!        │
//!        ▼
//!   [Lexer] ──▶ Token stream
//!        │
//!        ▼
//!   [Parser] ──▶ AST
//!        │
//!        ▼
//!   [Semantic Analysis] ──▶ typed AST
//!        │
//!        ▼
//!   [Code Generation] ──▶ C source
//!        │
//!        ▼
//!   host `cc` ──▶ executable (run mode only)
//! ```
//!
//! Every stage reports into one [`Handler`]; the pipeline stops at the
//! first stage boundary where errors have accumulated, the driver prints
//! them to stderr, and the process exits with status 1. Driver-level
//! problems (missing file, wrong extension, `cc` failure) travel as
//! `anyhow` errors and are printed as `error: …`.

use anyhow::{bail, Context, Result};
use novac_gen::CodeGenerator;
use novac_lex::Lexer;
use novac_par::Parser;
use novac_sem::SemanticAnalyzer;
use novac_util::{Handler, Span};
use std::path::PathBuf;
use std::process::Command;

/// Compiler configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Input source file
    pub input: PathBuf,

    /// Output C file; `None` selects compile-and-run mode
    pub output: Option<PathBuf>,

    /// Print phase progress to stderr
    pub verbose: bool,
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// `--help` / `-h`: print usage, exit 0
    Help,
    /// Wrong argument count: print usage, exit 1
    Usage,
    /// Compile the given input
    Compile(Config),
}

/// Usage text printed by `--help` and on argument errors.
pub fn usage() -> String {
    [
        "Usage:",
        "  novac <file.nova>                # Compile and run",
        "  novac <file.nova> <output.c>     # Compile to C file",
        "  novac --help                     # Show this help",
        "",
        "Options:",
        "  --verbose                        # Print phase progress to stderr",
        "",
    ]
    .join("\n")
}

/// Parse command-line arguments (without the program name).
pub fn parse_args(args: &[String]) -> Invocation {
    let mut verbose = false;
    let mut positional = Vec::new();

    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Invocation::Help,
            "--verbose" => verbose = true,
            _ => positional.push(arg.clone()),
        }
    }

    match positional.len() {
        1 => Invocation::Compile(Config {
            input: PathBuf::from(&positional[0]),
            output: None,
            verbose,
        }),
        2 => Invocation::Compile(Config {
            input: PathBuf::from(&positional[0]),
            output: Some(PathBuf::from(&positional[1])),
            verbose,
        }),
        _ => Invocation::Usage,
    }
}

/// Top-level CLI entry: returns the process exit code.
pub fn run_cli(args: &[String]) -> Result<i32> {
    match parse_args(args) {
        Invocation::Help => {
            print!("{}", usage());
            Ok(0)
        },
        Invocation::Usage => {
            print!("{}", usage());
            Ok(1)
        },
        Invocation::Compile(config) => run(&config),
    }
}

/// Run one compilation according to `config`.
///
/// Returns the process exit code: 0 on success, 1 after compile errors,
/// or the executed program's status in run mode.
pub fn run(config: &Config) -> Result<i32> {
    if !config.input.exists() {
        bail!("File not found: {}", config.input.display());
    }
    if config.input.extension().and_then(|e| e.to_str()) != Some("nova") {
        bail!("Input file must have .nova extension");
    }

    let source = std::fs::read_to_string(&config.input)
        .with_context(|| format!("Could not read {}", config.input.display()))?;

    let handler = Handler::new();
    let Some(c_code) = compile_source(&source, &handler, config.verbose) else {
        for diag in handler.diagnostics() {
            eprintln!("{}", diag);
        }
        return Ok(1);
    };

    match &config.output {
        Some(output) => {
            std::fs::write(output, c_code)
                .with_context(|| format!("Could not open output file {}", output.display()))?;
            println!(
                "Successfully compiled {} to {}",
                config.input.display(),
                output.display()
            );
            Ok(0)
        },
        None => compile_and_run(&c_code, config),
    }
}

/// Run the pipeline over `source`. Returns the generated C on success;
/// on failure the diagnostics are left in `handler` and `None` comes
/// back. The handler is not printed here so callers stay in charge of
/// presentation.
pub fn compile_source(source: &str, handler: &Handler, verbose: bool) -> Option<String> {
    if verbose {
        eprintln!("Parsing...");
    }
    let mut program = {
        let mut parser = Parser::new(Lexer::new(source), handler);
        parser.parse()
    };
    if handler.has_errors() {
        return None;
    }

    if verbose {
        eprintln!("Analyzing...");
    }
    {
        let mut analyzer = SemanticAnalyzer::new(handler);
        analyzer.analyze(&mut program);
    }
    if handler.has_errors() {
        return None;
    }

    if verbose {
        eprintln!("Generating C...");
    }
    let mut gen = CodeGenerator::new();
    if let Err(e) = gen.generate(&program) {
        handler.error(e.to_string(), Span::DUMMY);
        return None;
    }

    Some(gen.output().to_string())
}

/// Write the C to a scratch directory, build it with the host `cc`, run
/// the executable, and hand back its exit status. The scratch directory
/// (and both files in it) is removed when this function returns.
fn compile_and_run(c_code: &str, config: &Config) -> Result<i32> {
    println!("Compiling {}...", config.input.display());

    let scratch = tempfile::TempDir::new().context("Could not create temporary directory")?;
    let c_path = scratch.path().join("nova_temp.c");
    let exe_path = scratch.path().join("nova_temp");

    std::fs::write(&c_path, c_code).context("Could not write temporary C file")?;

    if config.verbose {
        eprintln!("Invoking cc...");
    }
    let cc_output = Command::new("cc")
        .arg("-o")
        .arg(&exe_path)
        .arg(&c_path)
        .output()
        .context("Could not invoke the host C compiler (cc)")?;
    if !cc_output.status.success() {
        bail!("Failed to compile generated C code");
    }

    let status = Command::new(&exe_path)
        .status()
        .context("Could not run compiled program")?;

    Ok(status.code().unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_help() {
        assert_eq!(parse_args(&args(&["--help"])), Invocation::Help);
        assert_eq!(parse_args(&args(&["-h"])), Invocation::Help);
        // Help wins regardless of other arguments
        assert_eq!(parse_args(&args(&["a.nova", "--help"])), Invocation::Help);
    }

    #[test]
    fn test_parse_args_run_mode() {
        match parse_args(&args(&["a.nova"])) {
            Invocation::Compile(config) => {
                assert_eq!(config.input, PathBuf::from("a.nova"));
                assert!(config.output.is_none());
                assert!(!config.verbose);
            },
            other => panic!("Expected compile invocation, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_args_output_mode() {
        match parse_args(&args(&["a.nova", "out.c"])) {
            Invocation::Compile(config) => {
                assert_eq!(config.output, Some(PathBuf::from("out.c")));
            },
            other => panic!("Expected compile invocation, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_args_verbose_flag() {
        match parse_args(&args(&["--verbose", "a.nova"])) {
            Invocation::Compile(config) => assert!(config.verbose),
            other => panic!("Expected compile invocation, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_args_bad_counts() {
        assert_eq!(parse_args(&[]), Invocation::Usage);
        assert_eq!(
            parse_args(&args(&["a.nova", "b.c", "c.c"])),
            Invocation::Usage
        );
    }

    #[test]
    fn test_compile_source_success() {
        let handler = Handler::new();
        let c_code = compile_source(
            "function void main() { int x = 2 + 3 * 4; print(x); }",
            &handler,
            false,
        )
        .expect("compilation should succeed");

        assert!(c_code.starts_with("#include <stdio.h>"));
        assert!(c_code.contains("int x = (2 + (3 * 4));"));
        assert!(c_code.contains("printf(\"%d\\n\", x);"));
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_compile_source_parse_error_stops_pipeline() {
        let handler = Handler::new();
        let result = compile_source("function void main() { int = 1; }", &handler, false);
        assert!(result.is_none());
        assert!(handler.has_errors());
    }

    #[test]
    fn test_compile_source_semantic_error_stops_pipeline() {
        let handler = Handler::new();
        let result = compile_source("function void main() { print(y); }", &handler, false);
        assert!(result.is_none());
        assert_eq!(
            handler.diagnostics()[0].to_string(),
            "Error at line 1, column 30: Undefined variable: y"
        );
    }

    #[test]
    fn test_compile_source_empty_input() {
        let handler = Handler::new();
        let c_code = compile_source("", &handler, false).expect("empty program compiles");
        assert_eq!(
            c_code,
            "#include <stdio.h>\n#include <stdlib.h>\n#include <string.h>\n\n"
        );
    }

    #[test]
    fn test_handler_is_reusable_between_compilations() {
        let handler = Handler::new();
        assert!(compile_source("print(y);", &handler, false).is_none());
        handler.clear();
        assert!(compile_source("print(1);", &handler, false).is_some());
        assert!(!handler.has_errors());
    }
}
