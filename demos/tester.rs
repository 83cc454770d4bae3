//! Randomized tester for diagram construction and order search.
//!
//! For every variable count in the requested range, random sum-of-products expressions
//! are built under the alphabetical order and under the best order found by the search.
//! Both diagrams are checked against direct evaluation of the expression on all `2^n`
//! assignments.
//!
//! Run with:
//! ```bash
//! cargo run --release --example tester -- --min-vars 2 --max-vars 12 --tests 50
//! ```

use std::time::{Duration, Instant};

use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use sop_bdd::ast::Expr;
use sop_bdd::bdd::{Bdd, BddConfig, LeafPolicy};
use sop_bdd::order::VarOrder;
use sop_bdd::stats::{extra_reduction_percent, reduction_percent};
use sop_bdd::types::ALPHABET_SIZE;

#[derive(Debug, Parser)]
#[command(author, version, about = "Randomized BDD construction tester")]
struct Cli {
    /// Smallest number of variables
    #[arg(long, default_value = "2")]
    min_vars: usize,

    /// Largest number of variables
    #[arg(long, default_value = "12")]
    max_vars: usize,

    /// Number of random expressions per variable count
    #[arg(long, default_value = "20")]
    tests: usize,

    /// Seed of the random generator
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Node arena capacity in bits (capacity = 2^bits)
    #[arg(long, default_value = "20")]
    storage_bits: usize,

    /// Share one leaf per value instead of allocating a leaf per request
    #[arg(long)]
    shared_leaves: bool,
}

#[derive(Debug, Default)]
struct Row {
    reduction: f64,
    extra_reduction: f64,
    default_time: Duration,
    best_time: Duration,
    memory: usize,
    errors: usize,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Warn,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let cli = Cli::parse();
    if cli.min_vars == 0 || cli.min_vars > cli.max_vars || cli.max_vars > ALPHABET_SIZE {
        color_eyre::eyre::bail!("variable range must satisfy 1 <= min <= max <= {}", ALPHABET_SIZE);
    }

    let leaf_policy = if cli.shared_leaves {
        LeafPolicy::Shared
    } else {
        LeafPolicy::Fresh
    };
    let config = BddConfig::default()
        .with_storage_bits(cli.storage_bits)
        .with_leaf_policy(leaf_policy);
    let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);

    println!(
        "{:>5} {:>12} {:>12} {:>14} {:>14} {:>12} {:>7}",
        "Vars", "Reduction", "Extra", "Default (us)", "Best (us)", "Memory (B)", "Errors"
    );
    println!("{}", "-".repeat(82));

    let time_total = Instant::now();
    let mut total_errors = 0;

    for n in cli.min_vars..=cli.max_vars {
        let letters: String = ('A'..='Z').take(n).collect();
        let order = VarOrder::parse(&letters)?;
        let mut row = Row::default();

        for _ in 0..cli.tests {
            let expr = Expr::random(&mut rng, &order);

            let start = Instant::now();
            let default = Bdd::from_expr(&expr, order.clone(), &config)?;
            row.default_time += start.elapsed();

            let start = Instant::now();
            let (best, stats) = Bdd::search_order(&expr, &config, &mut rng)?;
            row.best_time += start.elapsed();

            row.reduction += reduction_percent(default.size(), n);
            row.extra_reduction += extra_reduction_percent(default.size(), best.size());
            row.memory += default.estimated_memory();
            row.errors += count_errors(&expr, &order, &default, &best);
            info!("{}: default size {}, {}", expr, default.size(), stats);

            default.release();
            best.release();
        }

        let tests = cli.tests.max(1);
        println!(
            "{:>5} {:>11.2}% {:>11.2}% {:>14.1} {:>14.1} {:>12} {:>7}",
            n,
            row.reduction / tests as f64,
            row.extra_reduction / tests as f64,
            row.default_time.as_secs_f64() * 1e6 / tests as f64,
            row.best_time.as_secs_f64() * 1e6 / tests as f64,
            row.memory / tests,
            row.errors
        );
        total_errors += row.errors;
    }

    println!("{}", "-".repeat(82));
    println!(
        "Total errors: {}, done in {:.3} s",
        total_errors,
        time_total.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Compare both diagrams with direct evaluation on every assignment over `order`.
fn count_errors(expr: &Expr, order: &VarOrder, default: &Bdd, best: &Bdd) -> usize {
    let (Some(default_root), Some(best_root)) = (default.root(), best.root()) else {
        return 1;
    };

    let n = order.len();
    let mut errors = 0;
    for bits in 0..(1u64 << n) {
        let values: Vec<bool> = (0..n).map(|i| (bits >> (n - 1 - i)) & 1 == 1).collect();
        let expected = expr.eval_with_order(order, &values);

        // The best order only lists referenced variables, in its own sequence.
        let best_values: Vec<bool> = best
            .order()
            .vars()
            .iter()
            .map(|&var| order.position(var).is_some_and(|i| values[i]))
            .collect();

        if default.evaluate_bits(default_root, &values) != Ok(expected) {
            errors += 1;
        }
        if best.evaluate_bits(best_root, &best_values) != Ok(expected) {
            errors += 1;
        }
    }
    errors
}
