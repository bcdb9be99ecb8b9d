use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::{Path, PathBuf};

use bakeplan_planner::{FeasibleRegionSample, Plan, Scenario};
use bakeplan_solver::SolutionStatus;

#[derive(Parser)]
#[command(name = "bakeplan")]
#[command(about = "Find the most profitable production mix under resource limits", long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a scenario and print the optimal production plan
    Solve {
        /// JSON scenario file (defaults to the bakery example)
        #[arg(short, long)]
        scenario: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Pretty)]
        format: ReportFormat,
        /// Show resource usage and binding constraints
        #[arg(short, long)]
        analysis: bool,
    },
    /// Sample the feasible region of a two-product scenario for plotting
    Region {
        /// JSON scenario file (defaults to the bakery example)
        #[arg(short, long)]
        scenario: Option<PathBuf>,
        /// Largest first-product quantity to sweep
        #[arg(long)]
        horizon: Option<f64>,
        /// Number of sample points
        #[arg(long)]
        samples: Option<usize>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = RegionFormat::Csv)]
        format: RegionFormat,
    },
    /// Print the default scenario as JSON
    Template,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    Pretty,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum RegionFormat {
    Csv,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();

    match cli.command {
        Commands::Solve { scenario, format, analysis } => {
            let scenario = load_scenario(scenario.as_deref());
            let plan = run(&scenario);

            match format {
                ReportFormat::Json => {
                    let output = serde_json::json!({
                        "solution": plan.solution,
                        "report": plan.report,
                    });
                    match serde_json::to_string_pretty(&output) {
                        Ok(s) => println!("{}", s),
                        Err(e) => exit_with(&format!("Error writing JSON: {}", e)),
                    }
                }
                ReportFormat::Pretty => print_report(&plan, analysis),
            }

            if plan.solution.status != SolutionStatus::Optimal {
                std::process::exit(1);
            }
        }
        Commands::Region { scenario, horizon, samples, format } => {
            let mut scenario = load_scenario(scenario.as_deref());
            if let Some(horizon) = horizon {
                scenario = scenario.with_horizon(horizon);
            }
            if let Some(samples) = samples {
                scenario = scenario.with_samples(samples);
            }

            let plan = run(&scenario);
            let Some(region) = plan.region else {
                exit_with(&format!(
                    "The feasible region can only be drawn for 2 products, found {}",
                    scenario.products.len()
                ));
            };

            match format {
                RegionFormat::Csv => print_region_csv(&region),
                RegionFormat::Json => {
                    let output = serde_json::json!({
                        "region": region,
                        "optimum": plan.optimum,
                    });
                    match serde_json::to_string_pretty(&output) {
                        Ok(s) => println!("{}", s),
                        Err(e) => exit_with(&format!("Error writing JSON: {}", e)),
                    }
                }
            }
        }
        Commands::Template => match serde_json::to_string_pretty(&Scenario::default()) {
            Ok(s) => println!("{}", s),
            Err(e) => exit_with(&format!("Error writing JSON: {}", e)),
        },
    }
}

fn exit_with(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

fn load_scenario(path: Option<&Path>) -> Scenario {
    let Some(path) = path else {
        return Scenario::default();
    };

    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => exit_with(&format!("Error reading file: {}", e)),
    };

    match serde_json::from_str(&source) {
        Ok(scenario) => scenario,
        Err(e) => exit_with(&format!("Invalid scenario {}: {}", path.display(), e)),
    }
}

fn run(scenario: &Scenario) -> Plan {
    match bakeplan_planner::plan(scenario) {
        Ok(plan) => plan,
        Err(e) => exit_with(&format!("Planning error: {}", e)),
    }
}

fn print_report(plan: &Plan, analysis: bool) {
    match plan.report.status {
        SolutionStatus::Optimal => {
            println!("Status: OPTIMAL");
            println!();
            println!("Production:");
            for line in &plan.report.lines {
                println!(
                    "  {:20} {:10.2} unit  x {:>12} = {:>14}",
                    line.product,
                    line.quantity,
                    format_rupiah(line.profit_per_unit),
                    format_rupiah(line.profit_contribution)
                );
            }
            if let Some(total) = plan.report.total_profit {
                println!();
                println!("Total profit: {}", format_rupiah(total));
            }

            if analysis {
                println!();
                println!("Analysis:");
                println!();

                if !plan.solution.analysis.binding_constraints.is_empty() {
                    println!("Binding constraints (bottlenecks):");
                    for name in &plan.solution.analysis.binding_constraints {
                        println!("  - {}", name);
                    }
                    println!();
                }

                println!("Resource usage:");
                for r in &plan.solution.analysis.resources {
                    println!(
                        "  {:20} {:12.2} of {:12.2} (slack {:.2})",
                        r.constraint, r.used, r.capacity, r.slack
                    );
                }
                println!();
                println!(
                    "Solved by {:?} in {} iterations",
                    plan.solution.method, plan.solution.iterations
                );
            }
        }
        SolutionStatus::Infeasible => {
            println!("Status: INFEASIBLE");
            println!("No production plan satisfies every resource limit.");
        }
        SolutionStatus::Unbounded => {
            println!("Status: UNBOUNDED");
            println!("A product earns profit without using any limited resource.");
        }
    }
}

fn print_region_csv(region: &FeasibleRegionSample) {
    let mut header = vec!["x".to_string()];
    header.extend(region.lines.iter().map(|l| csv_field(&l.name)));
    header.push("envelope".to_string());
    println!("{}", header.join(","));

    for (i, x) in region.xs.iter().enumerate() {
        let mut row = vec![x.to_string()];
        row.extend(region.lines.iter().map(|l| csv_value(l.ys[i])));
        row.push(csv_value(region.envelope[i]));
        println!("{}", row.join(","));
    }
}

fn csv_field(name: &str) -> String {
    if name.contains([',', '"']) {
        format!("\"{}\"", name.replace('"', "\"\""))
    } else {
        name.to_string()
    }
}

fn csv_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_infinite() => "inf".to_string(),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

/// Format a money amount the way the bakery reads it: `Rp 170,000`
fn format_rupiah(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}Rp {}", sign, grouped)
}
