// canonjava: canonical re-printer for a small Java-like teaching language

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use canonjava::printer::DEFAULT_MAX_LINE_WIDTH;
use canonjava::{canonicalize_with, parse_source, tokenize, PrinterConfig};

/// Reformat a source file into canonical layout.
#[derive(Debug, Parser)]
#[command(name = "canonjava", version, about)]
struct Args {
    /// Source file to read, or `-` for standard input
    input: PathBuf,

    /// Write the canonical text here instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dump the token stream instead of printing
    #[arg(long, conflicts_with = "ast")]
    tokens: bool,

    /// Dump the parsed AST as JSON instead of printing
    #[arg(long)]
    ast: bool,

    /// Warn about canonical lines wider than this
    #[arg(long, default_value_t = DEFAULT_MAX_LINE_WIDTH)]
    max_width: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_env("CANONJAVA_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let source = read_input(&args.input)?;
    let name = args.input.display().to_string();
    info!(input = %name, bytes = source.len(), "read source");

    let rendered = if args.tokens {
        match tokenize(&source) {
            Ok(tokens) => tokens
                .iter()
                .map(|t| format!("{}:{} {}\n", t.location.line, t.location.column, t))
                .collect::<String>(),
            Err(e) => fail(&name, &e),
        }
    } else if args.ast {
        match parse_source(&source) {
            Ok(program) => serde_json::to_string_pretty(&program)? + "\n",
            Err(e) => fail(&name, &e),
        }
    } else {
        let config = PrinterConfig {
            max_line_width: args.max_width,
        };
        match canonicalize_with(&source, &config) {
            Ok(canonical) => {
                for warning in &canonical.warnings {
                    warn!(input = %name, "{}", warning);
                }
                canonical.text
            }
            Err(e) => fail(&name, &e),
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)?;
            info!(output = %path.display(), "wrote canonical text");
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn read_input(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(path)
    }
}

fn fail(name: &str, err: &dyn std::error::Error) -> ! {
    eprintln!("{}: {}", name, err);
    std::process::exit(1);
}
