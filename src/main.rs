use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;
use probe_table::logger::initialize_logger;
use probe_table::report::{render, top_n};
use probe_table::text::{count_bytes, count_tokens};
use probe_table::{Djb2, Identity, Table, TableConfig};

/// Count whitespace-delimited tokens and bytes in a file and print the most
/// frequent of each.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to read
    #[arg(default_value = "test.txt")]
    file: PathBuf,

    /// Entries to print per report
    #[arg(short = 'n', long, default_value_t = 10)]
    top: usize,

    /// Initial slot count of the token table
    #[arg(long, default_value_t = 1000)]
    token_capacity: usize,

    /// Initial slot count of the character table
    #[arg(long, default_value_t = 256)]
    char_capacity: usize,

    /// Load factor at which a table grows
    #[arg(long, default_value_t = probe_table::config::DEFAULT_GROW_AT)]
    grow_at: f64,

    /// Load factor under which a table shrinks; must stay under half of --grow-at
    #[arg(long, default_value_t = probe_table::config::DEFAULT_SHRINK_BELOW)]
    shrink_below: f64,

    /// Keep both tables at their initial capacity; fail when one fills up
    #[arg(long)]
    no_resize: bool,

    /// Only report tokens
    #[arg(long, conflicts_with = "chars_only")]
    tokens_only: bool,

    /// Only report characters
    #[arg(long)]
    chars_only: bool,
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = TableConfig::default()
        .with_grow_at(args.grow_at)
        .with_shrink_below(args.shrink_below)
        .with_resizable(!args.no_resize);

    let data = std::fs::read(&args.file)
        .map_err(|e| format!("cannot read {}: {}", args.file.display(), e))?;
    info!("read {} bytes from {}", data.len(), args.file.display());

    if !args.chars_only {
        let mut tokens: Table<&[u8], u64, Djb2> =
            Table::with_config(args.token_capacity, Djb2, config)?;
        count_tokens(&data, &mut tokens)?;
        print!(
            "{}",
            render(&format!("Top {} tokens", args.top), &top_n(&tokens, args.top))
        );
        tokens.destroy();
    }

    if !args.tokens_only {
        let mut chars: Table<u8, u64, Identity> =
            Table::with_config(args.char_capacity, Identity, config)?;
        count_bytes(&data, &mut chars)?;
        print!(
            "{}",
            render(&format!("Top {} characters", args.top), &top_n(&chars, args.top))
        );
        chars.destroy();
    }

    Ok(())
}

fn main() -> ExitCode {
    initialize_logger();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}
