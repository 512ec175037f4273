//! Command implementations

pub mod analyze;
pub mod benchmark;
pub mod demo;
pub mod simple;
pub mod solve;
pub mod summary;
pub mod test_all;

pub use analyze::{AnalysisResult, AnalyzeError, analyze_state, parse_constraint};
pub use benchmark::{BenchmarkConfig, BenchmarkResult, run_benchmark, sample_targets};
pub use demo::{DemoResult, run_demo};
pub use simple::run_simple;
pub use solve::{SolveConfig, SolveResult, solve_target};
pub use summary::{StepSummary, summarize_trajectories, summary_to_json, write_summary_csv};
pub use test_all::{TestAllStatistics, print_test_all_statistics, run_test_all};
