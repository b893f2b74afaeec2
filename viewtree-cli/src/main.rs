//! Command-line interface for viewtree
//! This binary tokenizes view.tree files and prints the token stream in different formats.
//!
//! Usage:
//!   viewtree `<path>` [--config `<file>`] [--format `<format>`] [--set `<key=value>`]...
//!   viewtree --list-formats                           - List all output formats

use clap::{Arg, ArgAction, Command};
use std::ops::Range;
use viewtree_config::{Loader, OutputFormat, ViewtreeConfig};
use viewtree_scanner::viewtree::lexing::{tokenize, LexerOutput};
use viewtree_scanner::viewtree::token::{format_simple, format_structure, Token};

fn main() {
    let formats: Vec<&'static str> = OutputFormat::ALL.iter().map(|f| f.as_str()).collect();

    let matches = Command::new("viewtree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tokenize view.tree files with the indentation scanner")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the view.tree file")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (default: from configuration, token-simple)")
                .value_parser(formats),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .short('s')
                .value_name("KEY=VALUE")
                .help("Override a configuration key, e.g. scanner.same_level=true")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let path = matches
        .get_one::<String>("path")
        .expect("path is required unless listing formats");
    let config_path = matches.get_one::<String>("config");
    let format = matches.get_one::<String>("format");
    let overrides: Vec<&String> = matches
        .get_many::<String>("set")
        .map(|values| values.collect())
        .unwrap_or_default();

    let config = load_config(config_path, format, &overrides).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    handle_tokenize_command(path, &config);
}

fn load_config(
    config_path: Option<&String>,
    format: Option<&String>,
    overrides: &[&String],
) -> Result<ViewtreeConfig, String> {
    let mut loader = Loader::new().with_local_file(".");
    if let Some(path) = config_path {
        loader = loader.with_file(path);
    }
    for item in overrides {
        loader = loader.with_assignment(item).map_err(|e| e.to_string())?;
    }
    if let Some(format) = format {
        let format: OutputFormat = format.parse()?;
        loader = loader.with_format(format).map_err(|e| e.to_string())?;
    }
    loader.build().map_err(|e| e.to_string())
}

/// Handle the tokenize command
fn handle_tokenize_command(path: &str, config: &ViewtreeConfig) {
    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(1);
    });

    let output = tokenize(&source, &config.scanner);
    for diagnostic in &output.diagnostics {
        eprintln!("warning: {}: {}", path, diagnostic);
    }

    let tokens: Vec<(Token, Range<usize>)> = if config.output.skip_trivia {
        output
            .tokens
            .iter()
            .filter(|(token, _)| !matches!(token, Token::Content(content) if content.is_trivia()))
            .cloned()
            .collect()
    } else {
        output.tokens.clone()
    };

    let formatted = match config.output.format {
        OutputFormat::TokenSimple => format_simple(&tokens, &source),
        OutputFormat::TokenJson => {
            let mut json = serde_json::to_string_pretty(&tokens).unwrap_or_else(|e| {
                eprintln!("Error formatting tokens: {}", e);
                std::process::exit(1);
            });
            json.push('\n');
            json
        }
        OutputFormat::TokenYaml => serde_yaml::to_string(&tokens).unwrap_or_else(|e| {
            eprintln!("Error formatting tokens: {}", e);
            std::process::exit(1);
        }),
        OutputFormat::Structure => format!("{}\n", format_structure(&tokens)),
        OutputFormat::Snapshots => format_snapshots(&output),
    };

    print!("{}", formatted);
}

/// One line per checkpoint: offset, token index and the snapshot bytes in hex.
fn format_snapshots(output: &LexerOutput) -> String {
    output
        .checkpoints
        .iter()
        .map(|checkpoint| {
            let hex: String = checkpoint
                .snapshot
                .as_bytes()
                .iter()
                .map(|byte| format!("{:02x}", byte))
                .collect();
            format!(
                "@{} #{} {}\n",
                checkpoint.offset, checkpoint.token_index, hex
            )
        })
        .collect()
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available output formats:\n");
    for format in OutputFormat::ALL {
        println!("  {}", format);
    }
}
