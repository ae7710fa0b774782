//! Command-line interface for citemark.
//!
//! Provides commands for parsing model output against source documents,
//! stripping citation markup, checking markup structure, and showing the
//! resolved configuration.

use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config;
use crate::domain::{Document, ParsedResult};
use crate::grounding::offset_to_line_col;
use crate::markup::{check_structure, find_markers, split_blocks, strip_markers, StructuralWarning};
use crate::parser::OutputParser;

pub mod report;

/// citemark - Span-accurate citation and hallucination extraction
#[derive(Parser, Debug)]
#[command(name = "citemark")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a model output into resolved citations and hallucinations
    Parse {
        /// Model output file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// JSON array of {"doc_id", "text"} source documents
        #[arg(short, long)]
        docs: Option<PathBuf>,

        /// Separate chain-of-thought text before parsing
        #[arg(long)]
        thinking: bool,

        /// Skip the span consistency check
        #[arg(long)]
        no_validate: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Print the response with citation markup removed
    Strip {
        /// Model output file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Report structural problems in citation markup
    Check {
        /// Model output file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Output format for `parse`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Assistant message as pretty-printed JSON
    Json,

    /// Human-readable report with line:col positions
    Text,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Parse {
                input,
                docs,
                thinking,
                no_validate,
                format,
            } => parse_command(input, docs, thinking, no_validate, format),
            Commands::Strip { input } => strip_command(input),
            Commands::Check { input } => check_command(input),
            Commands::Config => show_config(),
        }
    }
}

/// Read model output from a file, or from stdin when it is piped
fn read_input(input_file: Option<PathBuf>) -> Result<String> {
    if let Some(path) = input_file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input file: {}", path.display()));
    }

    if io::stdin().is_terminal() {
        anyhow::bail!("No input provided. Use --input <file> or pipe to stdin");
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(buffer)
}

/// Load source documents from a JSON array
fn load_documents(path: &Path) -> Result<Vec<Document>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read documents file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse documents file: {}", path.display()))
}

/// Execute the `parse` command
fn parse_command(
    input: Option<PathBuf>,
    docs_file: Option<PathBuf>,
    thinking: bool,
    no_validate: bool,
    format: OutputFormat,
) -> Result<()> {
    let raw = read_input(input)?;
    let docs = match docs_file {
        Some(path) => load_documents(&path)?,
        None => Vec::new(),
    };

    let mut options = config::config()?.parse.clone();
    options.thinking |= thinking;
    if no_validate {
        options.validate_spans = false;
    }

    let parser = OutputParser::new(options);
    let message = parser
        .process(&raw, &docs)
        .context("Failed to parse model output")?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&message)
                .context("Failed to serialize assistant message")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            let parsed = ParsedResult {
                docs,
                response: message.content.clone(),
                citations: message.citations.clone(),
                hallucinations: message.hallucinations.clone(),
            };
            let fingerprint = parsed
                .fingerprint()
                .context("Failed to fingerprint parse result")?;
            let text = report::render(&message, &fingerprint)
                .context("Failed to render report")?;
            print!("{}", text);
        }
    }

    Ok(())
}

/// Execute the `strip` command
fn strip_command(input: Option<PathBuf>) -> Result<()> {
    let raw = read_input(input)?;
    let blocks = split_blocks(&raw);
    println!("{}", strip_markers(blocks.response).trim());
    Ok(())
}

/// Execute the `check` command
fn check_command(input: Option<PathBuf>) -> Result<()> {
    let raw = read_input(input)?;
    let blocks = split_blocks(&raw);

    let entries = if blocks.citations.is_empty() {
        0
    } else {
        // Count entry markers without requiring a well-formed block
        find_markers(blocks.citations).len()
    };

    let warnings = check_structure(blocks.response, entries);
    if warnings.is_empty() {
        println!("OK: no structural problems found");
        return Ok(());
    }

    for warning in &warnings {
        let position = match warning {
            StructuralWarning::NestedTags { offset } => {
                let pos = offset_to_line_col(blocks.response, *offset);
                format!(" (line {}, col {})", pos.line, pos.col)
            }
            _ => String::new(),
        };
        println!("WARNING: {}{}", warning, position);
    }

    Ok(())
}

/// Show resolved configuration
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("citemark configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Parser:");
    println!("  Validate spans: {}", cfg.parse.validate_spans);
    println!("  Thinking:       {}", cfg.parse.thinking);

    if let Some(limits) = &cfg.parse.limits {
        println!();
        println!("Input limits:");
        println!("  Max output size:   {} bytes", limits.max_output_bytes);
        println!("  Max documents:     {}", limits.max_documents);
        println!("  Max document size: {} bytes", limits.max_document_bytes);
    }

    Ok(())
}
