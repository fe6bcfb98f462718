//! Command-line front end for the `<primary> [secondary] option;` text
//! format, grounded in `examples/original_source/src/main.c`'s `parse_cli`/
//! `process_file` (same flag set, same exit codes) and in
//! `examples/other_examples/66bad263_xgillard-ddo__ddo-examples-misp-main.rs.rs`'s
//! `#[derive(Parser)]` struct for the clap idiom.

use std::env;
use std::fs;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, LevelFilter};
use xcc_dlx::error::ReadError;
use xcc_dlx::Heuristic;

/// Sets up logging the way `examples/original_source/src/log.c` gates
/// `dbg`/`trc` output: by the mere presence of `XCC_DEBUG`/`XCC_TRACE`, not
/// by `RUST_LOG`.
fn init_logging() {
    let level = if env::var_os("XCC_TRACE").is_some() {
        LevelFilter::Trace
    } else if env::var_os("XCC_DEBUG").is_some() {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new().filter_level(level).init();
}

/// Solve XCC problems read from the `<primary> [secondary] option;` text format.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the problem file.
    path: String,

    /// Print each solution as item-name rows instead of option indices.
    #[arg(short = 'p', long = "print")]
    print_rows: bool,

    /// Emit every solution, then print the count found.
    #[arg(short, long)]
    enumerate: bool,

    /// Always choose the leftmost active primary item.
    #[arg(long)]
    naive: bool,

    /// Minimum-remaining-values selection (default).
    #[arg(long, alias = "smrv")]
    mrv: bool,

    /// Plain exact cover, Algorithm X. Runs the same driver as `-c`: with no
    /// coloured secondary items in the input, `commit`/`uncommit` already
    /// degrade to plain `cover'`/`uncover'`.
    #[arg(short = 'x')]
    algorithm_x: bool,

    /// Exact cover with colours, Algorithm C (default).
    #[arg(short = 'c')]
    algorithm_c: bool,

    /// Algorithm M, the tweak/untweak multiplicity extension.
    #[arg(short = 'm')]
    algorithm_m: bool,

    /// Bridge to an external SAT solver via Knuth's CNF encoding.
    #[arg(short = 'k')]
    algorithm_knuth_cnf: bool,

    /// Dump the problem matrix before and after each step.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    if args.algorithm_m || args.algorithm_knuth_cnf {
        error!("algorithm M and the SAT bridge are not implemented by this crate");
        return ExitCode::FAILURE;
    }

    let heuristic = if args.naive {
        Heuristic::Naive
    } else {
        Heuristic::Mrv
    };

    let text = match fs::read_to_string(&args.path) {
        Ok(text) => text,
        Err(e) => {
            error!("could not read {}: {e}", args.path);
            return ExitCode::FAILURE;
        }
    };

    let mut driver = match xcc_dlx::text::read_problem(&text, heuristic) {
        Ok(driver) => driver,
        Err(ReadError::Build(e)) => {
            error!("malformed problem: {e}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            error!("could not parse {}: {e}", args.path);
            return ExitCode::FAILURE;
        }
    };

    let mut count = 0usize;
    if args.verbose {
        println!("before:\n{}", driver.arena());
    }
    loop {
        let result = driver.next_solution();
        if args.verbose {
            println!("after:\n{}", driver.arena());
        }
        match result {
            Ok(Some(solution)) => {
                count += 1;
                if args.print_rows {
                    println!("{}", render_rows(&solution, driver.arena()));
                } else {
                    let indices: Vec<String> = solution
                        .option_indices()
                        .iter()
                        .map(ToString::to_string)
                        .collect();
                    println!("{}", indices.join(" "));
                }
                if !args.enumerate {
                    return ExitCode::from(10);
                }
                println!();
            }
            Ok(None) => {
                if args.enumerate {
                    println!("Found {count} solutions!");
                    return ExitCode::from(if count > 0 { 10 } else { 20 });
                }
                return ExitCode::from(20);
            }
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        }
    }
}

fn render_rows(solution: &xcc_dlx::Solution, problem: &xcc_dlx::arena::Arena) -> String {
    info!("rendering {} selected option(s)", solution.len());
    solution
        .rows(problem)
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|(name, color)| match color {
                    Some(c) => format!("{name}:{c}"),
                    None => name,
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(";\n")
}
