use std::fs;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use miette::{IntoDiagnostic, NamedSource, Report};

use exprtree::emit::{self, Emitter, Format};
use exprtree::parser::lexer;
use exprtree::{ExprError, LexPolicy, ParseOptions};

#[derive(Parser)]
#[command(name = "exprtree")]
#[command(about = "Parse arithmetic expressions into operator trees", version)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an expression and print its tree
    Parse {
        /// Expression text, e.g. "(2+3)*4"
        expression: Option<String>,

        /// Read the expression from a file instead
        #[arg(short, long, conflicts_with = "expression")]
        file: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "json")]
        format: String,

        #[command(flatten)]
        flags: ParseFlags,
    },

    /// Show the tokens of an expression
    Tokens {
        expression: String,

        #[arg(long)]
        strict: bool,
    },

    /// Re-render a JSON tree produced by `parse`
    Render {
        /// JSON file
        input: PathBuf,

        #[arg(long, default_value = "infix")]
        format: String,
    },

    /// List output formats
    Formats,
}

#[derive(Args)]
struct ParseFlags {
    /// Fail on unrecognized characters instead of truncating
    #[arg(long)]
    strict: bool,

    /// Keep the old `!` handling, where prefix negate never applies
    #[arg(long)]
    legacy_negate: bool,
}

impl From<&ParseFlags> for ParseOptions {
    fn from(flags: &ParseFlags) -> Self {
        ParseOptions {
            lex_policy: lex_policy(flags.strict),
            legacy_negate: flags.legacy_negate,
        }
    }
}

fn lex_policy(strict: bool) -> LexPolicy {
    if strict {
        LexPolicy::Reject
    } else {
        LexPolicy::Truncate
    }
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Parse {
            expression,
            file,
            format,
            flags,
        } => {
            let source = match (expression, file) {
                (Some(expression), _) => expression,
                (None, Some(path)) => {
                    let text = fs::read_to_string(&path).into_diagnostic()?;
                    text.trim_end_matches(['\n', '\r']).to_string()
                }
                (None, None) => miette::bail!("No expression supplied"),
            };

            let mut emitter = emitter_for(&format)?;
            let parsed = exprtree::parse(&source, &ParseOptions::from(&flags))
                .map_err(|e| with_source(e, &source))?;
            println!("{}", emitter.emit(&parsed)?);
        }
        Commands::Tokens { expression, strict } => {
            let lexed = lexer::tokenize(&expression, lex_policy(strict))
                .map_err(|e| with_source(e, &expression))?;
            for token in &lexed.tokens {
                println!("{:>3}..{:<3} {:?}", token.span.start, token.span.end, token.kind);
            }
            if let Some(stop) = lexed.stopped_at {
                println!("stopped at {} on '{}'", stop.position, stop.found);
            }
        }
        Commands::Render { input, format } => {
            let mut emitter = emitter_for(&format)?;
            let json = fs::read_to_string(&input).into_diagnostic()?;
            let parsed = emit::json::read(&json)?;
            println!("{}", emitter.emit(&parsed)?);
        }
        Commands::Formats => {
            println!("Supported formats:");
            for format in Format::all() {
                println!("  {:6} - {}", format.name(), format.description());
            }
        }
    }

    Ok(())
}

fn emitter_for(name: &str) -> miette::Result<Box<dyn Emitter>> {
    match Format::from_name(name) {
        Some(format) => Ok(format.create()),
        None => miette::bail!("Unknown format: {name} (see `exprtree formats`)"),
    }
}

fn with_source(err: ExprError, source: &str) -> Report {
    Report::new(err).with_source_code(NamedSource::new("input", source.to_string()))
}
