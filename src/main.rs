//! debt-settlement CLI
//!
//! Build debt graphs from shared-expense documents and settle them.
//!
//! # Usage
//!
//! ```bash
//! # Build a graph from an intent document and persist it
//! debt-settlement build --input intent.json --output data.json
//!
//! # Show net balances
//! debt-settlement balances --input intent.json
//!
//! # Compute settlement payments and persist the simplified graph
//! debt-settlement settle --snapshot data.json --write data.json
//!
//! # Generate a random intent document for testing
//! debt-settlement generate --members 10 --transactions 30
//! ```

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use debt_settlement::prelude::*;
use debt_settlement::simulation::random_ledger::{generate_random_intent, LedgerConfig};
use log::info;
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};

/// Track shared expenses and settle them with as few payments as possible
#[derive(Parser, Debug)]
#[command(name = "debt-settlement", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a debt graph from an intent document and save it as a snapshot
    Build {
        /// Path to the JSON intent document
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the graph snapshot
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print every member's net balance
    Balances {
        #[command(flatten)]
        source: Source,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Compute settlement payments
    Settle {
        #[command(flatten)]
        source: Source,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Balances at or below this magnitude count as settled
        #[arg(long, default_value = "0.01")]
        epsilon: Decimal,

        /// Save the simplified graph to this snapshot file
        #[arg(short, long)]
        write: Option<PathBuf>,
    },

    /// Generate a random intent document
    Generate {
        #[arg(long, default_value_t = 10)]
        members: usize,

        #[arg(long, default_value_t = 30)]
        transactions: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Write to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Where the debt graph comes from.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Source {
    /// JSON intent document
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Graph snapshot written by `build` or `settle --write`
    #[arg(short, long)]
    snapshot: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// JSON output schema for `settle`.
#[derive(serde::Serialize)]
struct SettleOutput<'a> {
    balances: &'a Balances,
    payments: &'a [SettlementPayment],
    summary: &'a SettlementSummary,
}

fn load_graph(source: &Source) -> Result<DebtGraph> {
    if let Some(path) = &source.input {
        let intent = Intent::load(path)
            .with_context(|| format!("failed to read intent '{}'", path.display()))?;
        return intent
            .to_graph()
            .with_context(|| format!("failed to apply intent '{}'", path.display()));
    }
    if let Some(path) = &source.snapshot {
        let snapshot = GraphSnapshot::load(path)
            .with_context(|| format!("failed to read snapshot '{}'", path.display()))?;
        return DebtGraph::from_snapshot(snapshot)
            .with_context(|| format!("failed to restore snapshot '{}'", path.display()));
    }
    bail!("either --input or --snapshot is required")
}

fn cmd_build(input: &Path, output: &Path) -> Result<()> {
    let graph = load_graph(&Source {
        input: Some(input.to_path_buf()),
        snapshot: None,
    })?;
    graph
        .snapshot()
        .save(output)
        .with_context(|| format!("failed to write snapshot '{}'", output.display()))?;
    eprintln!(
        "Built graph with {} members and {} debts → {}",
        graph.member_count(),
        graph.edge_count(),
        output.display()
    );
    Ok(())
}

fn cmd_balances(source: &Source, format: Format) -> Result<()> {
    let balances = load_graph(source)?.net_balances();
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&balances)?),
        Format::Text => print!("{}", balances),
    }
    Ok(())
}

fn cmd_settle(
    source: &Source,
    format: Format,
    epsilon: Decimal,
    write: Option<&Path>,
) -> Result<()> {
    let config = SettlementConfig::default().with_epsilon(epsilon);
    if let Err(reason) = config.validate() {
        bail!("invalid settlement config: {}", reason);
    }

    let mut graph = load_graph(source)?;
    let balances = graph.net_balances_at(config.precision);
    let optimizer = SettlementOptimizer::new(config);
    let payments = optimizer.optimize(&balances);
    let summary = SettlementSummary::new(&graph, &payments);
    info!(
        "settled {} members with {} payments",
        graph.member_count(),
        payments.len()
    );

    match format {
        Format::Json => {
            let output = SettleOutput {
                balances: &balances,
                payments: &payments,
                summary: &summary,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Text => {
            print!("{}", balances);
            println!("\n=== Payments ===");
            if payments.is_empty() {
                println!("  Everyone is settled.");
            }
            for payment in &payments {
                println!("  {}", payment);
            }
            println!();
            print!("{}", summary);
        }
    }

    if let Some(path) = write {
        graph.replace_with(&payments)?;
        graph
            .snapshot()
            .save(path)
            .with_context(|| format!("failed to write snapshot '{}'", path.display()))?;
        eprintln!("Simplified graph → {}", path.display());
    }
    Ok(())
}

fn cmd_generate(
    members: usize,
    transactions: usize,
    seed: Option<u64>,
    output: Option<&Path>,
) -> Result<()> {
    let config = LedgerConfig {
        member_count: members,
        transaction_count: transactions,
        seed,
        ..Default::default()
    };
    let intent = generate_random_intent(&config);
    let json = intent.to_json()?;

    match output {
        Some(path) => {
            fs::write(path, &json)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            eprintln!(
                "Generated {} transactions across {} members → {}",
                intent.transactions.len(),
                members,
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Build { input, output } => cmd_build(input, output),
        Commands::Balances { source, format } => cmd_balances(source, *format),
        Commands::Settle {
            source,
            format,
            epsilon,
            write,
        } => cmd_settle(source, *format, *epsilon, write.as_deref()),
        Commands::Generate {
            members,
            transactions,
            seed,
            output,
        } => cmd_generate(*members, *transactions, *seed, output.as_deref()),
    }
}
