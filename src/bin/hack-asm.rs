use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use hack_asm::{AsmConfig, Assembler};

#[derive(Parser, Debug)]
#[command(author, version, about = "Assemble a Hack .asm file into .hack machine code")]
struct Opts {
    /// Output file (default: INPUT with a .hack extension)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Write the final symbol table as JSON
    #[arg(long, value_name = "FILE")]
    symbols: Option<PathBuf>,
    /// Print an address/word/source listing to stdout
    #[arg(long)]
    listing: bool,
    /// Let a repeated label take the later address instead of failing
    #[arg(long)]
    allow_label_redefinition: bool,
    #[arg(value_name = "INPUT")]
    input: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let text = std::fs::read_to_string(&opts.input)
        .with_context(|| format!("reading {}", opts.input.display()))?;

    let asm = Assembler::new(AsmConfig {
        allow_label_redefinition: opts.allow_label_redefinition,
    });
    let out = asm
        .assemble_str(&text)
        .with_context(|| format!("assembling {}", opts.input.display()))?;

    let output = opts
        .output
        .unwrap_or_else(|| opts.input.with_extension("hack"));
    std::fs::write(&output, out.to_hack())
        .with_context(|| format!("writing {}", output.display()))?;
    tracing::info!(words = out.program.len(), output = %output.display(), "assembled");

    if let Some(path) = &opts.symbols {
        let json = serde_json::to_string_pretty(&out.symbols.entries())?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }
    if opts.listing {
        print!("{}", out.listing());
    }
    Ok(())
}
