use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use morny_cli::output::{render_tokens, render_tree, Format, Rendered};
use morny_cli::{DEMO_SOURCE, MAX_SOURCE_SIZE};
use morny_parse::{lex, parse_str};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "morny")]
#[command(about = "morny: lexer and parser for the morny language")]
struct Cli {
    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lex source text and dump the tokens
    Lex {
        #[command(flatten)]
        input: Input,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },

    /// Parse source text and dump the tree
    Parse {
        #[command(flatten)]
        input: Input,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },

    /// Lex and parse the built-in demo input
    Demo,
}

#[derive(Args, Debug)]
struct Input {
    /// Path to a .morny source file
    #[arg(required_unless_present = "expr", conflicts_with = "expr")]
    file: Option<PathBuf>,

    /// Source text given on the command line
    #[arg(short, long)]
    expr: Option<String>,
}

impl Input {
    fn read(&self) -> Result<String> {
        if let Some(expr) = &self.expr {
            return Ok(expr.clone());
        }
        let Some(path) = &self.file else {
            bail!("no input given");
        };
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read source file '{}'", path.display()))?;
        if src.len() > MAX_SOURCE_SIZE {
            bail!(
                "source file exceeds {}MB limit ({} bytes)",
                MAX_SOURCE_SIZE / 1_000_000,
                src.len()
            );
        }
        debug!(path = %path.display(), bytes = src.len(), "read source");
        Ok(src)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let failed = match cli.command {
        Commands::Lex { input, format } => emit(render_tokens(&lex(&input.read()?), format)?),
        Commands::Parse { input, format } => {
            emit(render_tree(&parse_str(&input.read()?), format)?)
        }
        Commands::Demo => {
            cmd_demo()?;
            false
        }
    };

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn emit(rendered: Rendered) -> bool {
    println!("{}", rendered.body);
    for diagnostic in &rendered.diagnostics {
        eprintln!("{}", diagnostic);
    }
    rendered.failed
}

fn cmd_demo() -> Result<()> {
    let tokens = render_tokens(&lex(DEMO_SOURCE), Format::Pretty)?;
    let tree = render_tree(&parse_str(DEMO_SOURCE), Format::Pretty)?;
    println!("SOURCE: {:?}", DEMO_SOURCE);
    println!("TOKENS: {}", tokens.body);
    println!("TREE: {}", tree.body);
    for diagnostic in tokens.diagnostics.iter().chain(&tree.diagnostics) {
        println!("DIAGNOSTIC: {}", diagnostic);
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let directive = match verbose {
        0 => "morny_cli=warn,morny_parse=warn",
        1 => "morny_cli=debug,morny_parse=debug",
        _ => "morny_cli=trace,morny_parse=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive)),
        )
        .with_writer(std::io::stderr)
        .init();
}
