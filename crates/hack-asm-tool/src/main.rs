use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use hack_asm::{AsmConfig, Assembled, Assembler};

mod report;
use report::{symbols_text, Report};

#[derive(Parser, Debug)]
#[command(author, version, about = "Hack assembler tool", long_about = None)]
struct Cli {
    /// Input assembly path
    #[arg(value_name = "ASMFILE")]
    input: PathBuf,
    /// Repeated labels take the later address instead of failing
    #[arg(long, global = true)]
    allow_label_redefinition: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble to a .hack file
    Assemble {
        /// Output path (default: input with .hack extension)
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Also print a listing: text or json
        #[arg(long, value_enum)]
        report: Option<OutputFormat>,
    },
    /// Print the resolved symbol table
    Symbols {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Include SP, R0..R15, SCREEN, KBD and friends
        #[arg(long)]
        builtins: bool,
        /// Write to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn load(path: &Path, cfg: AsmConfig) -> Result<Assembled> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Assembler::new(cfg)
        .assemble_str(&text)
        .with_context(|| format!("assembling {}", path.display()))
}

fn emit(out: Option<&Path>, body: &str) -> Result<()> {
    match out {
        Some(path) => std::fs::write(path, body).with_context(|| format!("writing {}", path.display())),
        None => {
            print!("{body}");
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = AsmConfig {
        allow_label_redefinition: cli.allow_label_redefinition,
    };
    let assembled = load(&cli.input, cfg)?;

    match cli.cmd {
        Command::Assemble { out, report } => {
            let path = out.unwrap_or_else(|| cli.input.with_extension("hack"));
            emit(Some(&path), &assembled.to_hack())?;
            match report {
                Some(OutputFormat::Text) => print!("{}", assembled.listing()),
                Some(OutputFormat::Json) => {
                    let r = Report::new(&assembled, false);
                    println!("{}", serde_json::to_string_pretty(&r)?);
                }
                None => {}
            }
        }
        Command::Symbols { format, builtins, out } => {
            let r = Report::new(&assembled, builtins);
            let body = match format {
                OutputFormat::Text => symbols_text(&r.symbols),
                OutputFormat::Json => serde_json::to_string_pretty(&r.symbols)? + "\n",
            };
            emit(out.as_deref(), &body)?;
        }
    }
    Ok(())
}
