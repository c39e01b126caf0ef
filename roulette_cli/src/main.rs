use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use roulette_core::{
    Bankroll, CategoryKind, Paytable, ProvablyFairRng, Recommendation, RouletteAnalyzer,
    SpinHistory, Thresholds,
};

#[derive(Parser)]
#[command(name = "roulette-cli", about = "Feed roulette outcomes and get bet recommendations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// JSON file of per-category thresholds, e.g. {"color": 8, "split": 18}
    #[arg(long, global = true, env = "ROULETTE_THRESHOLDS")]
    thresholds: Option<PathBuf>,
    /// Override one threshold, e.g. --threshold color=3 (repeatable)
    #[arg(long = "threshold", global = true, value_name = "KIND=N")]
    overrides: Vec<String>,
    /// Base stake for recommendations
    #[arg(long, global = true, default_value_t = 10.0)]
    stake: f64,
    /// Number of recommendations to print
    #[arg(long, global = true, default_value_t = 15)]
    top: usize,
    /// Print the report as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Spin the provably-fair wheel N times, settling recommendations as it goes
    Simulate(SimulateArgs),
    /// Feed outcomes by hand; invalid ones are reported and skipped
    Feed {
        #[arg(allow_negative_numbers = true, required = true)]
        outcomes: Vec<i64>,
    },
    /// Print the effective thresholds
    Thresholds,
}

#[derive(Args)]
struct SimulateArgs {
    #[arg(long, default_value_t = 20)]
    spins: u64,
    #[arg(long, default_value_t = 1000.0)]
    bankroll: f64,
    #[arg(long, env = "ROULETTE_SERVER_SEED", default_value = "dev-server-seed")]
    server_seed: String,
    #[arg(long, default_value = "demo-seed")]
    client_seed: String,
    /// Nonce of the first spin; each spin uses the next one
    #[arg(long, default_value_t = 1)]
    nonce: u64,
    /// Write one row per spin to this CSV path
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn load_thresholds(cli: &Cli) -> anyhow::Result<Thresholds> {
    let mut thresholds = match &cli.thresholds {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading thresholds from {}", path.display()))?;
            Thresholds::from_json(&text)?
        }
        None => Thresholds::default(),
    };
    for assignment in &cli.overrides {
        thresholds.apply_override(assignment)?;
    }
    Ok(thresholds)
}

#[derive(serde::Serialize)]
struct Report<'a> {
    spins: u64,
    history: Vec<u8>,
    stats: &'a roulette_core::RouletteStats,
    recommendations: &'a [Recommendation],
    #[serde(skip_serializing_if = "Option::is_none")]
    bankroll: Option<&'a Bankroll>,
}

fn print_report(
    cli: &Cli,
    engine: &RouletteAnalyzer,
    history: &SpinHistory,
    bankroll: Option<&Bankroll>,
) -> anyhow::Result<()> {
    let recs = engine.evaluate(cli.stake);
    let shown = &recs[..recs.len().min(cli.top)];
    if cli.json {
        let report = Report {
            spins: engine.spins(),
            history: history.iter_recent().map(|(n, _)| n).collect(),
            stats: engine.snapshot(),
            recommendations: shown,
            bankroll,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Spins: {}", engine.spins());
    let recent: Vec<String> = history
        .iter_recent()
        .take(20)
        .map(|(n, color)| format!("{n}({color:?})"))
        .collect();
    println!("Last spins: {}", recent.join(", "));

    println!("\nStatistics:");
    for category in engine.snapshot().categories() {
        let kind = category.kind();
        let mut rows: Vec<_> = category.iter().collect();
        if kind.member_count() > 3 {
            // only the longest-absent members of the big tables
            rows.sort_by(|a, b| b.1.absence_streak.cmp(&a.1.absence_streak));
            rows.truncate(3);
        }
        let cells: Vec<String> = rows
            .iter()
            .map(|(key, s)| {
                format!(
                    "{key} n={} streak={}/{} absent={}",
                    s.count, s.streak, s.max_streak, s.absence_streak
                )
            })
            .collect();
        println!("  {:<10} {}", kind.category_name(), cells.join(" | "));
    }

    println!("\nRecommended bets ({} total):", recs.len());
    if shown.is_empty() {
        println!("  No recommended bets at this time");
    }
    for rec in shown {
        let numbers = numbers_label(rec);
        println!(
            "  {:<8} {:<18} absent={:<3} stake={:>8.2}  {}{}",
            rec.bet.kind, rec.bet.value, rec.bet.absence_streak, rec.stake, rec.reason, numbers
        );
    }

    if let Some(bank) = bankroll {
        println!(
            "\nBankroll: {:.2} (start {:.2}, profit {:+.2}, staked {:.2} over {} rounds)",
            bank.balance,
            bank.initial,
            bank.profit(),
            bank.total_staked,
            bank.rounds
        );
    }
    Ok(())
}

fn numbers_label(rec: &Recommendation) -> String {
    match rec.bet.kind {
        CategoryKind::Street
        | CategoryKind::Split
        | CategoryKind::Corner
        | CategoryKind::SixLine
        | CategoryKind::Straight => String::new(),
        kind => {
            let numbers = kind.member_numbers(rec.bet.member);
            format!(" [{} numbers]", numbers.len())
        }
    }
}

fn simulate(cli: &Cli, thresholds: Thresholds, args: &SimulateArgs) -> anyhow::Result<()> {
    let SimulateArgs {
        spins,
        bankroll,
        server_seed,
        client_seed,
        nonce,
        csv: csv_path,
    } = args;
    let (spins, nonce) = (*spins, *nonce);
    let mut engine = RouletteAnalyzer::new(thresholds);
    let mut history = SpinHistory::default();
    let mut bank = Bankroll::new(*bankroll);
    let paytable = Paytable::single_zero();
    let mut pending: Vec<Recommendation> = Vec::new();

    let mut wtr = match csv_path {
        Some(path) => {
            let mut w = csv::Writer::from_path(path)
                .with_context(|| format!("creating {}", path.display()))?;
            w.write_record([
                "spin", "ts", "nonce", "outcome", "color", "bets", "staked", "net", "balance",
            ])?;
            Some(w)
        }
        None => None,
    };

    let hash = ProvablyFairRng::new(server_seed, client_seed, nonce).server_seed_hash_hex();
    info!(server_seed_hash = %hash, spins, "starting simulation");

    for i in 0..spins {
        let spin_nonce = nonce + i;
        let outcome = ProvablyFairRng::new(server_seed, client_seed, spin_nonce).outcome();
        let round = bank.settle_round(&paytable, &pending, outcome);
        engine.update(outcome)?;
        history.push(outcome);

        if let Some(w) = wtr.as_mut() {
            w.write_record(&[
                (i + 1).to_string(),
                Utc::now().to_rfc3339(),
                spin_nonce.to_string(),
                outcome.to_string(),
                format!("{:?}", roulette_core::wheel_color(outcome)).to_lowercase(),
                pending.len().to_string(),
                format!("{:.2}", round.staked),
                format!("{:.2}", round.net),
                format!("{:.2}", bank.balance),
            ])?;
        }
        pending = engine.evaluate(cli.stake);
    }

    if let Some(mut w) = wtr {
        w.flush()?;
        if let Some(path) = csv_path {
            info!("exported {} rows to {}", spins, path.display());
        }
    }

    println!("server_seed_hash={hash}");
    print_report(cli, &engine, &history, Some(&bank))
}

fn feed(cli: &Cli, thresholds: Thresholds, outcomes: &[i64]) -> anyhow::Result<()> {
    let mut engine = RouletteAnalyzer::new(thresholds);
    let mut history = SpinHistory::default();
    for &raw in outcomes {
        match engine.update_checked(raw) {
            Ok(()) => history.push(raw as u8),
            Err(e) => {
                warn!("skipping: {e}");
                eprintln!("skipping {raw}: {e}");
            }
        }
    }
    print_report(cli, &engine, &history, None)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let thresholds = load_thresholds(&cli)?;

    match &cli.command {
        Commands::Simulate(args) => simulate(&cli, thresholds, args)?,
        Commands::Feed { outcomes } => feed(&cli, thresholds, outcomes)?,
        Commands::Thresholds => println!("{}", serde_json::to_string_pretty(&thresholds)?),
    }

    Ok(())
}
