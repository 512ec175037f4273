//! K-ary Question Oracle - CLI
//!
//! Exact expected-cost question asking over attribute tables, with TUI and
//! CLI modes.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kary_oracle::{
    commands::{
        BenchmarkConfig, SolveConfig, analyze_state, parse_constraint, print_test_all_statistics,
        run_benchmark, run_demo, run_simple, run_test_all, solve_target, summary_to_json,
        write_summary_csv,
    },
    core::ItemTable,
    datasets::{demo_items, load_items_from_file},
    interactive::{App, Session, run_tui},
    oracle::ExactQueryOracle,
    output::{
        print_analysis_result, print_benchmark_result, print_demo_result, print_solve_result,
    },
};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "kary_oracle",
    about = "Exact oracle for identifying objects with multi-way attribute questions",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Item table as JSON (`{"id": {"attribute": "value", ...}, ...}`); built-in demo table if omitted
    #[arg(short, long, global = true)]
    items: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (interactive questions without TUI)
    Simple,

    /// Print the optimal root cost and one example trajectory
    Demo,

    /// Follow the optimal policy for a hidden target
    Solve {
        /// The target object ID
        id: String,

        /// Show the target's record and per-question details
        #[arg(short, long)]
        verbose: bool,
    },

    /// Analyze the state left after some known answers
    Analyze {
        /// Known answer as ATTRIBUTE=VALUE (repeatable)
        #[arg(short, long = "given")]
        given: Vec<String>,
    },

    /// Simulate random targets and summarize entropy per step
    Benchmark {
        /// Number of random targets to sample
        #[arg(short = 'n', long, default_value = "30")]
        count: usize,

        /// Seed for reproducible sampling
        #[arg(short, long)]
        seed: Option<u64>,

        /// Model name written to the summary rows
        #[arg(short, long, default_value = "Oracle")]
        label: String,

        /// Write the per-step summary as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the per-step summary as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Test the oracle on ALL objects
    TestAll {
        /// Limit number of targets to test
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Load the item table from `--items`, or the embedded demo table
fn load_items(path: Option<&Path>) -> Result<ItemTable> {
    match path {
        Some(path) => load_items_from_file(path)
            .with_context(|| format!("failed to load items from {}", path.display())),
        None => demo_items().context("embedded demo table is invalid"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let items = load_items(cli.items.as_deref())?;
    let mut oracle = ExactQueryOracle::new(items)?;

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    match command {
        Commands::Play => run_tui(App::new(Session::new(oracle))),
        Commands::Simple => {
            run_simple(&mut Session::new(oracle)).context("interactive session failed")
        }
        Commands::Demo => {
            let result = run_demo(&mut oracle)?;
            print_demo_result(&result);
            Ok(())
        }
        Commands::Solve { id, verbose } => {
            let result = solve_target(SolveConfig::new(id), &mut oracle)?;
            print_solve_result(&result, verbose);
            Ok(())
        }
        Commands::Analyze { given } => run_analyze_command(&mut oracle, &given),
        Commands::Benchmark {
            count,
            seed,
            label,
            csv,
            json,
        } => {
            let config = BenchmarkConfig {
                count,
                seed,
                label,
            };
            run_benchmark_command(&mut oracle, &config, csv.as_deref(), json.as_deref())
        }
        Commands::TestAll { limit } => {
            run_test_all_command(&mut oracle, limit)?;
            Ok(())
        }
    }
}

fn run_analyze_command(oracle: &mut ExactQueryOracle, given: &[String]) -> Result<()> {
    let constraints = given
        .iter()
        .map(String::as_str)
        .map(parse_constraint)
        .collect::<Result<Vec<_>, _>>()?;

    let result = analyze_state(oracle, &constraints)?;
    print_analysis_result(&result);
    Ok(())
}

fn run_benchmark_command(
    oracle: &mut ExactQueryOracle,
    config: &BenchmarkConfig,
    csv: Option<&Path>,
    json: Option<&Path>,
) -> Result<()> {
    println!(
        "Running benchmark on {} random targets...",
        config.count.min(oracle.items().len())
    );

    let result = run_benchmark(oracle, config)?;
    print_benchmark_result(&result);

    if let Some(path) = csv {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        write_summary_csv(file, &result.summary)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("\nSummary CSV written to {}", path.display());
    }

    if let Some(path) = json {
        let text = summary_to_json(&result.summary)?;
        fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
        println!("Summary JSON written to {}", path.display());
    }

    Ok(())
}

fn run_test_all_command(oracle: &mut ExactQueryOracle, limit: Option<usize>) -> Result<()> {
    let items = oracle.items();
    println!("\n{}", "═".repeat(70));
    println!(" Exhaustive Oracle Test ");
    println!("{}", "═".repeat(70));
    println!(
        "\nTesting against {} objects with {} attributes: {}",
        items.len(),
        items.num_attributes(),
        items.attributes().join(", ")
    );
    println!();

    let stats = run_test_all(oracle, limit)?;
    print_test_all_statistics(&stats);
    Ok(())
}
