use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use presswork::io::{load_problem, write_assignments_csv, write_report_json};
use presswork::{AllocationService, Backend, SolveReport, SolverFactory};

struct Args {
    problem: PathBuf,
    backend: Backend,
    output_csv: Option<PathBuf>,
    report_json: Option<PathBuf>,
    verbose: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut problem = None;
    let mut backend = Backend::Auto;
    let mut output_csv = None;
    let mut report_json = None;
    let mut verbose = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--backend" => {
                let name = args.next().ok_or("--backend needs a value")?;
                backend = Backend::parse(&name)
                    .ok_or_else(|| format!("unknown backend '{name}' (auto|cbc|highs)"))?;
            }
            "--output" | "-o" => {
                output_csv = Some(PathBuf::from(args.next().ok_or("--output needs a path")?));
            }
            "--report" => {
                report_json = Some(PathBuf::from(args.next().ok_or("--report needs a path")?));
            }
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other if problem.is_none() && !other.starts_with('-') => {
                problem = Some(PathBuf::from(other));
            }
            other => return Err(format!("unexpected argument '{other}'")),
        }
    }

    Ok(Args {
        problem: problem.ok_or("missing problem file argument")?,
        backend,
        output_csv,
        report_json,
        verbose,
    })
}

fn print_usage() {
    println!(
        "usage: presswork <problem.json> [--backend auto|cbc|highs] \
         [--output FILE.csv] [--report FILE.json] [--verbose]"
    );
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("error: {message}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(report) if report.status.has_solution() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<SolveReport, String> {
    let store = load_problem(&args.problem).map_err(|e| e.to_string())?;

    let service = AllocationService::new(SolverFactory::create(args.backend));
    let report = service.solve(&store).map_err(|e| e.to_string())?;

    print_summary(&report, args.verbose);

    if let Some(path) = &args.output_csv {
        write_assignments_csv(path, &store, &report).map_err(|e| e.to_string())?;
        println!("assignments written to {}", path.display());
    }
    if let Some(path) = &args.report_json {
        write_report_json(path, &report).map_err(|e| e.to_string())?;
        println!("report written to {}", path.display());
    }

    Ok(report)
}

fn print_summary(report: &SolveReport, verbose: bool) {
    println!("status: {}", report.status);
    println!("solve time: {:.2}s", report.solve_time_seconds);
    if let Some(objective) = report.objective_value {
        println!("total cost: {objective:.2}");
        println!(
            "items assigned: {} (total quantity {})",
            report.total_items, report.total_quantity
        );
    }
    if verbose {
        for (provider, methods) in &report.provider_utilization {
            for (method, pct) in methods {
                println!("  {provider}/{method}: {pct:.1}% utilized");
            }
        }
        for a in &report.assignments {
            println!(
                "  {} -> {} [{}] qty {} @ {:.2} = {:.2}",
                a.item, a.provider, a.method, a.quantity, a.unit_cost, a.total_cost
            );
        }
    }
}
