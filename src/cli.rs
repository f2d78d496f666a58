use anyhow::{bail, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub boards: Vec<String>,
    pub api_key: Option<String>,
    pub format: OutputFormat,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Extract(ExtractOptions),
}

/// Parse command-line arguments (program name excluded).
///
/// Supported forms:
///   monday-extract
///   monday-extract -b 123 -b 456
///   monday-extract --board 123,456 --json
///   monday-extract --api-key KEY --board 123
pub fn parse_args(args: &[String]) -> Result<Command> {
    let mut opts = ExtractOptions::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-b" | "--board" => {
                i += 1;
                let Some(value) = args.get(i) else {
                    bail!("Missing value for -b/--board flag");
                };
                opts.boards.extend(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|id| !id.is_empty())
                        .map(String::from),
                );
            }
            "--api-key" => {
                i += 1;
                let Some(value) = args.get(i) else {
                    bail!("Missing value for --api-key flag");
                };
                opts.api_key = Some(value.clone());
            }
            "--json" => opts.format = OutputFormat::Json,
            other => bail!("Unknown argument: {other}\n\nRun with --help for usage."),
        }
        i += 1;
    }

    Ok(Command::Extract(opts))
}

pub fn print_help() {
    println!("monday-extract — dump monday.com boards as tables\n");
    println!("USAGE:");
    println!("  monday-extract [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -b, --board <id>   Board to extract (repeatable, or comma-separated)");
    println!("      --api-key <k>  API token (overrides MONDAY_API_KEY and config)");
    println!("      --json         Print JSON instead of text tables");
    println!("  -h, --help         Show this help");
    println!();
    println!("CONFIG:");
    println!("  ~/.monday-extract/config.toml may set api_key, boards and endpoint.");
    println!("  RUST_LOG controls log verbosity (default: monday_extract=info).");
}
