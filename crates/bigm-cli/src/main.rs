use bigm_solver::{CanonicalLp, ConstraintOp, RawLp, SolveResult, SolveStatus, Solver, TableauEngine};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bigm")]
#[command(about = "Solve linear programs with the Big-M tableau simplex method", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Penalty cost on artificial variables
    #[arg(long, global = true, default_value_t = bigm_solver::DEFAULT_BIG_M)]
    big_m: f64,
    /// Maximum number of pivots
    #[arg(long, global = true, default_value_t = bigm_solver::DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,
    /// Tolerance for zero tests
    #[arg(long, global = true, default_value_t = bigm_solver::DEFAULT_TOLERANCE)]
    tolerance: f64,
    /// More output per occurrence (info, debug, trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem stored as JSON
    Solve {
        /// The problem file
        file: PathBuf,
        /// Output format (json, pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Print the canonical form of a problem stored as JSON
    Standardize {
        /// The problem file
        file: PathBuf,
        /// Output format (json, pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Solve the built-in example problems
    Demo,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let solver = Solver::new()
        .with_big_m(cli.big_m)
        .with_max_iterations(cli.max_iterations)
        .with_tolerance(cli.tolerance);

    match cli.command {
        Commands::Solve { file, format } => {
            let problem = load_or_exit(&file);
            let mut engine = engine_or_exit(&solver, &problem);
            let result = engine.solve();

            if format == "json" {
                match serde_json::to_string_pretty(&result) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        eprintln!("Error serializing result: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                print_result(&engine, &result);
            }

            if !result.status.is_optimal() {
                std::process::exit(1);
            }
        }
        Commands::Standardize { file, format } => {
            let problem = load_or_exit(&file);
            let engine = engine_or_exit(&solver, &problem);

            if format == "json" {
                match serde_json::to_string_pretty(engine.canonical()) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        eprintln!("Error serializing canonical form: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                print_canonical(engine.canonical());
            }
        }
        Commands::Demo => {
            for (title, problem) in demo_problems() {
                println!("=== {} ===", title);
                let mut engine = engine_or_exit(&solver, &problem);
                let result = engine.solve();
                print_result(&engine, &result);
                println!();
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Info);
        }
        2 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

fn load_problem(path: &Path) -> Result<RawLp, String> {
    let source = std::fs::read_to_string(path).map_err(|e| format!("Error reading file: {}", e))?;
    parse_problem(&source)
}

fn parse_problem(source: &str) -> Result<RawLp, String> {
    let problem: RawLp = serde_json::from_str(source).map_err(|e| format!("Invalid problem: {}", e))?;
    problem.validate().map_err(|e| format!("Invalid problem: {}", e))?;
    Ok(problem)
}

fn load_or_exit(path: &Path) -> RawLp {
    match load_problem(path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn engine_or_exit(solver: &Solver, problem: &RawLp) -> TableauEngine {
    match solver.engine(problem) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_result(engine: &TableauEngine, result: &SolveResult) {
    println!("Status: {}", result.status);
    println!("Iterations: {}", result.iterations);

    match (&result.solution, result.objective_value) {
        (Some(solution), Some(objective)) => {
            println!("Objective: {:.6}", objective);
            println!();
            println!("Variables:");
            for (i, value) in engine.canonical().recover(solution).iter().enumerate() {
                println!("  x{:<4} {:12.6}", i + 1, value);
            }
            println!("Canonical solution: {:?}", solution);
        }
        _ => match result.status {
            SolveStatus::Unbounded => println!("The problem has no finite optimal solution."),
            SolveStatus::Infeasible => println!("No solution exists that satisfies all constraints."),
            SolveStatus::MaxIterations => {
                println!("Stopped after the iteration limit; the problem may be cycling.")
            }
            _ => {}
        },
    }
}

fn print_canonical(lp: &CanonicalLp) {
    println!("Cost: {:?}", lp.cost);
    println!("Constraints:");
    for row in &lp.constraints {
        let cells: Vec<String> = row.iter().map(|v| format!("{:>10.2}", v)).collect();
        println!("  [{}]", cells.join(" "));
    }
    println!("RHS: {:?}", lp.rhs);
    println!("Basic columns: {:?}", lp.basic);
    println!("Columns:");
    for (j, kind) in lp.columns.iter().enumerate() {
        println!("  {:<4} {:?}", j, kind);
    }
}

fn demo_problems() -> Vec<(&'static str, RawLp)> {
    vec![
        (
            "Unique optimum",
            RawLp::new(
                vec![3.0, 2.0, 1.0],
                vec![vec![1.0, 1.0, 1.0], vec![2.0, 1.0, 0.0], vec![1.0, 3.0, 2.0]],
                vec![10.0, 8.0, 12.0],
            )
            .maximize(),
        ),
        (
            "Unbounded",
            RawLp::new(vec![1.0, 1.0], vec![vec![-1.0, -1.0]], vec![-1.0]).maximize(),
        ),
        (
            "Multiple optima",
            RawLp::new(vec![1.0, 1.0], vec![vec![1.0, 1.0]], vec![1.0]).maximize(),
        ),
        (
            "Mixed relations",
            RawLp::new(
                vec![2.0, 3.0, 1.0],
                vec![vec![1.0, 1.0, 1.0], vec![1.0, -1.0, 0.0], vec![0.0, 1.0, 1.0]],
                vec![10.0, 2.0, 6.0],
            )
            .with_relations(vec![ConstraintOp::Le, ConstraintOp::Ge, ConstraintOp::Eq]),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigm_solver::{Sense, VariableSign};

    #[test]
    fn test_parse_problem_with_defaults() {
        let problem = parse_problem(
            r#"{
                "cost": [1, 1],
                "constraints": [[1, 1]],
                "rhs": [1]
            }"#,
        )
        .unwrap();

        assert_eq!(problem.sense, Sense::Minimize);
        assert!(problem.relations.is_empty());
        assert_eq!(problem.relation(0), ConstraintOp::Le);
    }

    #[test]
    fn test_parse_problem_with_symbols() {
        let problem = parse_problem(
            r#"{
                "cost": [3, 2, 3],
                "constraints": [[1, 1, 1], [2, 1, 3], [3, 4, 5]],
                "rhs": [4, 3, 5],
                "sense": "max",
                "relations": [">=", "<=", "="],
                "signs": [">=0", "free", "<=0"]
            }"#,
        )
        .unwrap();

        assert_eq!(problem.sense, Sense::Maximize);
        assert_eq!(
            problem.relations,
            vec![ConstraintOp::Ge, ConstraintOp::Le, ConstraintOp::Eq]
        );
        assert_eq!(
            problem.signs,
            vec![VariableSign::NonNegative, VariableSign::Free, VariableSign::NonPositive]
        );
    }

    #[test]
    fn test_parse_problem_rejects_bad_shape() {
        let err = parse_problem(
            r#"{
                "cost": [1, 1],
                "constraints": [[1, 1], [1, 0]],
                "rhs": [1]
            }"#,
        )
        .unwrap_err();

        assert!(err.contains("Shape mismatch"), "{}", err);
    }

    #[test]
    fn test_demo_problems_solve() {
        let statuses: Vec<SolveStatus> = demo_problems()
            .iter()
            .map(|(_, p)| Solver::new().solve(p).unwrap().status)
            .collect();

        assert_eq!(
            statuses,
            vec![
                SolveStatus::Unique,
                SolveStatus::Unbounded,
                SolveStatus::Multiple,
                SolveStatus::Unique,
            ]
        );
    }

    #[test]
    fn test_result_json_uses_status_labels() {
        let problem = RawLp::new(vec![1.0, 1.0], vec![vec![1.0, 1.0]], vec![1.0]).maximize();
        let result = Solver::new().solve(&problem).unwrap();

        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["status"], "inf solutions");
        assert_eq!(json["objective_value"], 1.0);
    }
}
