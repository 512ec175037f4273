//! Test all targets - exhaustive oracle evaluation
//!
//! Follows the optimal policy for every object in the table (or a prefix of
//! them) and reports question counts, unresolved equivalence classes and how
//! the average compares with the solver's expected cost.

use crate::core::OracleError;
use crate::oracle::{ExactQueryOracle, Trajectory, entropy_uniform};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::time::{Duration, Instant};

/// Statistics from testing all targets
#[derive(Debug)]
pub struct TestAllStatistics {
    pub total_targets: usize,
    pub table_size: usize,
    pub resolved: usize,
    pub unresolved: usize,
    pub question_distribution: HashMap<usize, usize>,
    pub solve_time: Duration,
    pub total_time: Duration,
    pub average_questions: f64,
    pub max_questions: usize,
    pub min_questions: usize,
    pub root_cost: f64,
    pub cached_states: usize,
    pub hardest_targets: Vec<(String, usize)>,
    /// Distinct groups of objects no attribute can tell apart
    pub equivalence_classes: Vec<Vec<String>>,
    pub attribute_usage: HashMap<String, usize>,
}

/// Run the oracle on every target (or the first `limit` of them)
///
/// # Errors
///
/// Only fails if the solved policy cannot answer a lookup, which would be a
/// solver bug.
///
/// # Panics
///
/// Panics if the progress bar template is malformed.
pub fn run_test_all(
    oracle: &mut ExactQueryOracle,
    limit: Option<usize>,
) -> Result<TestAllStatistics, OracleError> {
    let total_start = Instant::now();
    let table_size = oracle.items().len();
    let targets: Vec<String> = oracle
        .items()
        .ids()
        .iter()
        .take(limit.unwrap_or(table_size))
        .cloned()
        .collect();

    println!("🧮 Solving {table_size} objects...");
    let policy = oracle.solved_policy();
    let root_cost = policy.root_cost();
    let solve_time = total_start.elapsed();

    println!("🎯 Testing {} targets...", targets.len());

    let pb = ProgressBar::new(targets.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
            .unwrap()
            .progress_chars("█▓▒░"),
    );

    let results: Vec<Trajectory> = targets
        .par_iter()
        .map(|id| {
            let trajectory = policy.simulate_target(id);
            pb.inc(1);
            trajectory
        })
        .collect::<Result<_, _>>()?;

    pb.finish_with_message("Complete!");
    let cached_states = oracle.cached_states();

    let mut question_distribution: HashMap<usize, usize> = HashMap::new();
    let mut attribute_usage: HashMap<String, usize> = HashMap::new();
    let mut classes: BTreeSet<Vec<String>> = BTreeSet::new();

    for trajectory in &results {
        *question_distribution
            .entry(trajectory.num_questions())
            .or_insert(0) += 1;
        for step in &trajectory.steps {
            *attribute_usage.entry(step.attribute.clone()).or_insert(0) += 1;
        }
        if !trajectory.is_resolved() {
            classes.insert(trajectory.final_candidates.clone());
        }
    }

    let resolved = results.iter().filter(|t| t.is_resolved()).count();
    let total_questions: usize = results.iter().map(Trajectory::num_questions).sum();
    let average_questions = if results.is_empty() {
        0.0
    } else {
        total_questions as f64 / results.len() as f64
    };

    let mut hardest_targets: Vec<(String, usize)> = results
        .iter()
        .map(|t| (t.target.clone(), t.num_questions()))
        .collect();
    hardest_targets.sort_by_key(|(_, n)| std::cmp::Reverse(*n));
    hardest_targets.truncate(10);

    Ok(TestAllStatistics {
        total_targets: results.len(),
        table_size,
        resolved,
        unresolved: results.len() - resolved,
        question_distribution,
        solve_time,
        total_time: total_start.elapsed(),
        average_questions,
        max_questions: results
            .iter()
            .map(Trajectory::num_questions)
            .max()
            .unwrap_or(0),
        min_questions: results
            .iter()
            .map(Trajectory::num_questions)
            .min()
            .unwrap_or(0),
        root_cost,
        cached_states,
        hardest_targets,
        equivalence_classes: classes.into_iter().collect(),
        attribute_usage,
    })
}

/// Print test-all statistics
#[allow(clippy::too_many_lines)] // Comprehensive output formatting
pub fn print_test_all_statistics(stats: &TestAllStatistics) {
    println!("\n{}", "═".repeat(70));
    println!(" Test Results ");
    println!("{}", "═".repeat(70));

    println!("\n📊 {}", "Overall Performance".bright_cyan().bold());
    println!("  Targets tested:      {}", stats.total_targets);
    println!(
        "  Uniquely identified: {} {}",
        stats.resolved,
        format!(
            "({:.1}%)",
            stats.resolved as f64 / stats.total_targets.max(1) as f64 * 100.0
        )
        .green()
    );
    if stats.unresolved > 0 {
        println!(
            "  Left in a class:     {} {}",
            stats.unresolved,
            format!(
                "({:.1}%)",
                stats.unresolved as f64 / stats.total_targets.max(1) as f64 * 100.0
            )
            .yellow()
        );
    }
    println!(
        "  Average questions:   {}",
        format!("{:.3}", stats.average_questions)
            .bright_yellow()
            .bold()
    );
    println!(
        "  Range:               {} - {}",
        stats.min_questions, stats.max_questions
    );
    println!("  Solve time:          {:.2}s", stats.solve_time.as_secs_f64());
    println!("  Total time:          {:.2}s", stats.total_time.as_secs_f64());
    println!("  Solved states:       {}", stats.cached_states);

    println!("\n📈 {}", "Question Distribution".bright_cyan().bold());
    let max_count = *stats.question_distribution.values().max().unwrap_or(&1);
    let mut counts: Vec<(&usize, &usize)> = stats.question_distribution.iter().collect();
    counts.sort();
    for (&questions, &count) in counts {
        let percentage = count as f64 / stats.total_targets.max(1) as f64 * 100.0;
        let bar_len = (count * 40 / max_count.max(1)).max(usize::from(count > 0));
        let bar = format!(
            "{}{}",
            "█".repeat(bar_len).green(),
            "░".repeat(40_usize.saturating_sub(bar_len)).bright_black()
        );
        println!("  {questions:2} questions: {bar} {count:4} ({percentage:5.1}%)");
    }

    println!("\n🧮 Information Theory Metrics");
    let total_bits = entropy_uniform(stats.table_size);
    let bits_per_question = if stats.average_questions > 0.0 {
        total_bits / stats.average_questions
    } else {
        0.0
    };
    println!("  Prior entropy:       {total_bits:.3} bits");
    println!("  Bits per question:   {bits_per_question:.3} bits");

    if !stats.equivalence_classes.is_empty() {
        println!("\n🔗 {}", "Indistinguishable Objects".yellow().bold());
        for class in stats.equivalence_classes.iter().take(10) {
            println!(
                "  {} ({:.3} bits left)",
                class.join(", ").yellow(),
                entropy_uniform(class.len())
            );
        }
    }

    if !stats.hardest_targets.is_empty() {
        println!("\n😰 {}", "Longest Trajectories".yellow().bold());
        for (target, questions) in stats.hardest_targets.iter().take(5) {
            println!("  {} ({} questions)", target.bright_white(), questions);
        }
    }

    println!("\n🎯 Attribute Usage");
    let mut usage: Vec<(&String, &usize)> = stats.attribute_usage.iter().collect();
    usage.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (attribute, count) in usage {
        println!("  {attribute}: {count} times");
    }

    println!("\n📐 {}", "Optimality Check".bright_cyan().bold());
    println!(
        "  Expected (solver):   {} questions",
        format!("{:.3}", stats.root_cost).bright_yellow().bold()
    );
    if stats.total_targets == stats.table_size {
        let difference = stats.average_questions - stats.root_cost;
        let diff_str = format!("{difference:+.6} questions");
        let colored_diff = if difference.abs() < 1e-9 {
            diff_str.green()
        } else {
            diff_str.red()
        };
        println!("  Difference:          {colored_diff}");
    } else {
        println!(
            "  Difference:          (only {} of {} targets tested)",
            stats.total_targets, stats.table_size
        );
    }
}
