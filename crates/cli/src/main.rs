use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use chrono::{DateTime, NaiveDateTime};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use receiptkit_core::ReceiptError;
use receiptkit_normalizer::{ReceiptOrder, canonicalize_str, canonicalize_str_at};

/// receiptkit: turn upstream order JSON into one canonical receipt
#[derive(Parser)]
#[command(name = "receiptkit", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical receipt as JSON
    Normalize {
        /// Order JSON file; `-` or nothing reads stdin
        file: Option<PathBuf>,
        /// Indent the output
        #[arg(long)]
        pretty: bool,
        /// Clock used when the order carries no date (RFC 3339)
        #[arg(long, value_parser = parse_now)]
        now: Option<NaiveDateTime>,
    },

    /// Print the detected source, item lines and totals
    Inspect {
        /// Order JSON file; `-` or nothing reads stdin
        file: Option<PathBuf>,
    },
}

fn parse_now(s: &str) -> Result<NaiveDateTime, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.naive_local())
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

fn read_input(file: Option<&Path>) -> Result<String, ReceiptError> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|e| ReceiptError::unreadable(format!("{}: {e}", path.display()))),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| ReceiptError::unreadable(format!("stdin: {e}")))?;
            Ok(buf)
        }
    }
}

fn load(file: Option<&Path>, now: Option<NaiveDateTime>) -> anyhow::Result<ReceiptOrder> {
    let text = read_input(file).context("failed to read order")?;
    let receipt = match now {
        Some(now) => canonicalize_str_at(&text, now),
        None => canonicalize_str(&text),
    }
    .context("failed to parse order")?;
    info!(
        source = receipt.source.as_str(),
        items = receipt.items.len(),
        "receipt normalized"
    );
    Ok(receipt)
}

fn summary(receipt: &ReceiptOrder) -> String {
    let mut out = String::new();
    out.push_str(&format!("source:    {}\n", receipt.source));
    out.push_str(&format!("order:     {}\n", receipt.order_no));
    out.push_str(&format!("date:      {}\n", receipt.date_time));
    out.push_str(&format!(
        "items:     {} ({} products, {} services)\n",
        receipt.items.len(),
        receipt.products().count(),
        receipt.services().count()
    ));
    for item in &receipt.items {
        let variant = item.variant.as_deref().map(|v| format!(" [{v}]")).unwrap_or_default();
        out.push_str(&format!(
            "  {:<8} {}{} x{} = {}\n",
            item.kind.as_str(),
            item.name,
            variant,
            item.qty,
            item.line_total
        ));
    }
    let t = &receipt.totals;
    out.push_str(&format!("subtotal:  {}\n", t.subtotal));
    out.push_str(&format!("discount:  {}\n", t.discount));
    out.push_str(&format!("tax:       {}\n", t.tax));
    out.push_str(&format!("shipping:  {}\n", t.shipping));
    out.push_str(&format!("total:     {}\n", t.total));
    out.push_str(&format!("paid:      {}\n", t.paid));
    out.push_str(&format!("due:       {}\n", t.due));
    out.push_str(&format!("change:    {}\n", t.change));
    out
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Normalize { file, pretty, now } => {
            let receipt = load(file.as_deref(), now)?;
            let json = if pretty {
                serde_json::to_string_pretty(&receipt)
            } else {
                serde_json::to_string(&receipt)
            }
            .context("failed to serialize receipt")?;
            println!("{json}");
        }
        Commands::Inspect { file } => {
            let receipt = load(file.as_deref(), None)?;
            print!("{}", summary(&receipt));
        }
    }
    Ok(())
}

fn main() {
    receiptkit_observability::init();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        error!(error = %format!("{err:#}"), "receiptkit failed");
        eprintln!("receiptkit: {err:#}");
        process::exit(1);
    }
}
