//! Display functions for command results

use super::formatters::{create_progress_bar, entropy_bar, format_id_list};
use crate::commands::{AnalysisResult, BenchmarkResult, DemoResult, SolveResult};
use crate::oracle::entropy_uniform;
use colored::Colorize;

/// Print the demo summary in the `step N: H = x.xxx bits (asked: attr)` form
pub fn print_demo_result(result: &DemoResult) {
    println!(
        "Loaded {} objects with {} attributes",
        result.items, result.attributes
    );
    println!(
        "Optimal expected #questions from prior: {}",
        format!("{:.3}", result.root_cost).bright_yellow().bold()
    );
    println!("Example trajectory for target {:?}:", result.example.target);

    let asked = std::iter::once("<prior>").chain(
        result
            .example
            .steps
            .iter()
            .map(|step| step.attribute.as_str()),
    );
    for (step, (entropy, attribute)) in result.example.entropies().iter().zip(asked).enumerate() {
        println!(
            "  step {:2}: H = {entropy:5.3} bits   (asked: {attribute})",
            step + 1
        );
    }
    println!("Solved states cached: {}", result.cached_states);
}

/// Print the path the oracle took to a target
pub fn print_solve_result(result: &SolveResult, verbose: bool) {
    let trajectory = &result.trajectory;
    let prior = entropy_uniform(trajectory.initial_candidates);

    println!("\n{}", "─".repeat(60).cyan());
    println!("Target: {}", result.target.bright_yellow().bold());
    if verbose {
        for (attribute, value) in &result.record {
            println!("  {attribute}: {value}");
        }
    }
    println!("{}", "─".repeat(60).cyan());

    for (i, step) in trajectory.steps.iter().enumerate() {
        println!(
            "\nQuestion {}: {}? → {}",
            i + 1,
            step.attribute.bright_white().bold(),
            step.answer.green()
        );

        if verbose {
            println!(
                "  Candidates:  {} → {}",
                step.candidates_before, step.candidates_after
            );
            println!(
                "  Info gained: {:.3} bits ({:.1}x reduction)",
                step.information_gained(),
                step.candidates_before as f64 / step.candidates_after.max(1) as f64
            );
            println!(
                "  Entropy:     [{}] {:.3} bits",
                entropy_bar(entropy_uniform(step.candidates_after), prior, 20),
                entropy_uniform(step.candidates_after)
            );
        }
    }

    println!();
    if result.success() {
        println!(
            "{}",
            format!(
                "✅ Identified in {} questions (expected over all targets: {:.3})",
                trajectory.num_questions(),
                result.root_cost
            )
            .green()
            .bold()
        );
    } else {
        println!(
            "{}",
            format!(
                "🔗 Narrowed to {} indistinguishable objects after {} questions: {}",
                trajectory.final_candidates.len(),
                trajectory.num_questions(),
                trajectory.final_candidates.join(", ")
            )
            .yellow()
            .bold()
        );
    }
}

/// Print the analysis of a partially answered state
pub fn print_analysis_result(result: &AnalysisResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "STATE ANALYSIS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    if result.constraints.is_empty() {
        println!("\nNo answers given (full table)");
    } else {
        println!("\nGiven:");
        for (attribute, value) in &result.constraints {
            println!("  {attribute} = {}", value.green());
        }
    }

    println!(
        "\n📊 {} candidates: {}",
        result.candidates.len(),
        format_id_list(&result.candidates, 12)
    );
    println!("   Entropy:        {:.3} bits", result.entropy);
    println!(
        "   Expected cost:  {} questions",
        format!("{:.3}", result.expected_cost).bright_yellow().bold()
    );
    match &result.best_attribute {
        Some(attribute) => println!("   Ask next:       {}", attribute.bright_white().bold()),
        None if result.candidates.len() > 1 => println!(
            "   Ask next:       {}",
            "nothing separates these objects".yellow()
        ),
        None => println!("   Ask next:       {}", "already identified".green()),
    }

    println!("\n🎯 {}", "Attributes".bright_cyan().bold());
    println!(
        "   {:<16} {:>8} {:>8} {:>10} {:>6} {:>8}",
        "attribute", "cost", "gain", "remaining", "worst", "branches"
    );
    for metrics in &result.metrics {
        let cost = metrics
            .expected_cost
            .map_or_else(|| "-".to_string(), |cost| format!("{cost:.3}"));
        let line = format!(
            "   {:<16} {:>8} {:>8.3} {:>10.2} {:>6} {:>8}",
            metrics.attribute,
            cost,
            metrics.information_gain,
            metrics.expected_remaining,
            metrics.max_branch,
            metrics.branches
        );
        if result.best_attribute.as_deref() == Some(metrics.attribute.as_str()) {
            println!("{}", line.bright_yellow());
        } else if metrics.splits() {
            println!("{line}");
        } else {
            println!("{}", line.bright_black());
        }
    }
    println!("\n   Solved states cached: {}", result.cached_states);
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "BENCHMARK RESULTS".bright_cyan().bold(),
        format!("({})", result.label).bright_black()
    );
    println!("{}", "═".repeat(60).cyan());

    let tested = result.targets.len();
    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Targets tested:     {tested}");
    println!(
        "   Average questions:  {}",
        format!("{:.3}", result.average_questions)
            .bright_yellow()
            .bold()
    );
    println!("   Optimal (all):      {:.3}", result.root_cost);
    println!(
        "   Best case:          {}",
        format!("{}", result.min_questions).green()
    );
    println!(
        "   Worst case:         {}",
        format!("{}", result.max_questions).yellow()
    );
    println!("   Identified:         {} / {tested}", result.resolved);
    println!(
        "   Solve time:         {:.2}s",
        result.solve_duration.as_secs_f64()
    );
    println!(
        "   Simulate time:      {:.3}s",
        result.simulate_duration.as_secs_f64()
    );

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    let mut counts: Vec<(&usize, &usize)> = result.distribution.iter().collect();
    counts.sort();
    for (&questions, &count) in counts {
        let pct = count as f64 / tested.max(1) as f64 * 100.0;
        let bar = create_progress_bar(pct, 100.0, 40);
        println!("   {questions:2}: {} {count:4} ({pct:5.1}%)", bar.green());
    }

    println!("\n📉 {}", "Entropy by step:".bright_cyan().bold());
    let prior = result
        .summary
        .first()
        .map_or(0.0, |row| row.entropy_bits_mean);
    for row in &result.summary {
        println!(
            "   step {:2}: [{}] {:.3} ± {:.3} bits",
            row.step,
            entropy_bar(row.entropy_bits_mean, prior, 30).cyan(),
            row.entropy_bits_mean,
            row.entropy_bits_std
        );
    }
}
