use std::time::Instant;

use clap::{Parser, ValueEnum};
use gridmatch::matcher::benchmark::{compute_optimal_cost, run_strategy, Strategy, Testcase};

#[derive(Clone, ValueEnum)]
pub enum AlgorithmType {
    Greedy,
    EditDistance,
    MinCostFlow,
}

impl AlgorithmType {
    pub fn convert(&self) -> Strategy {
        match &self {
            AlgorithmType::Greedy => Strategy::Greedy,
            AlgorithmType::EditDistance => Strategy::EditDistance,
            AlgorithmType::MinCostFlow => Strategy::MinCostFlow,
        }
    }
}

#[derive(Parser)]
struct Args {
    /// Length of the generated sequences.
    #[arg(short, long, default_value_t = 200)]
    size: usize,

    /// Random edits between the two sequences of a mutated testcase.
    #[arg(short, long, default_value_t = 20)]
    edits: usize,

    /// Values are drawn from 0..ALPHABET.
    #[arg(short, long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    alphabet: u32,

    #[arg(long, default_value_t = 5)]
    testcases: u64,

    #[arg(value_enum)]
    algorithms: Vec<AlgorithmType>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let algorithms = if args.algorithms.is_empty() {
        vec![AlgorithmType::Greedy, AlgorithmType::EditDistance, AlgorithmType::MinCostFlow]
    } else {
        args.algorithms
    };

    for seed in 0..args.testcases {
        let testcase = if seed % 2 == 0 {
            Testcase::mutated(seed, args.size, args.edits, args.alphabet)
        } else {
            Testcase::random(seed, [args.size, args.size], args.alphabet)
        };
        println!("Testcase #{seed}: {} vs {} elements", testcase.list_a.len(), testcase.list_b.len());

        let optimal_cost = compute_optimal_cost(&testcase)?;
        println!("Optimal cost is {optimal_cost}");

        for algorithm in algorithms.iter() {
            let strategy = algorithm.convert();
            let start = Instant::now();
            let pairings = run_strategy(&testcase, strategy)?;
            let elapsed = start.elapsed();
            let cost = testcase.total_cost(&pairings);
            println!("{strategy:?}: cost {cost}, {elapsed:.2?}");
            anyhow::ensure!(
                optimal_cost <= cost + 1e-9,
                "{strategy:?} found cost {cost}, below the optimum {optimal_cost}"
            );
        }
    }

    Ok(())
}
