// Wed Aug 19 2026 - Alex

use clap::{Parser, Subcommand};
use colored::Colorize;
use devops_validator::{
    config::{Policy, ValidatorConfig},
    engine::{expand_paths, ValidationRunner},
    health,
    report::{emit, OutputFormat, Severity},
    rules::RuleRegistry,
    utils::logging,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

const EXIT_PASS: i32 = 0;
const EXIT_FINDINGS: i32 = 1;
const EXIT_USAGE: i32 = 2;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "DevOps configuration validator", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate configuration files and report findings
    Validate {
        /// Files or directories to validate
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Report format: human or json
        #[arg(short, long, default_value = "human")]
        format: String,

        /// Lowest severity that fails the run
        #[arg(long, default_value = "error")]
        fail_on: String,

        /// Rule ids to suppress (repeatable)
        #[arg(long = "ignore")]
        ignore: Vec<String>,

        /// Drop findings below this severity
        #[arg(long, default_value = "info")]
        min_severity: String,

        /// Abort evaluation after this many seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Evaluate files one at a time
        #[arg(long)]
        no_parallel: bool,

        #[arg(long)]
        no_progress: bool,

        #[arg(short, long)]
        verbose: bool,
    },

    /// List the built-in rules
    Rules,

    /// Check the local environment for DevOps tooling
    Health,
}

fn main() {
    let args = Args::parse();

    let code = match args.command {
        Command::Validate {
            paths,
            format,
            fail_on,
            ignore,
            min_severity,
            timeout,
            no_parallel,
            no_progress,
            verbose,
        } => run_validate(
            &paths,
            &format,
            &fail_on,
            ignore,
            &min_severity,
            timeout,
            no_parallel,
            no_progress,
            verbose,
        ),
        Command::Rules => run_rules(),
        Command::Health => run_health(),
    };

    std::process::exit(code);
}

#[allow(clippy::too_many_arguments)]
fn run_validate(
    paths: &[PathBuf],
    format: &str,
    fail_on: &str,
    ignore: Vec<String>,
    min_severity: &str,
    timeout: Option<u64>,
    no_parallel: bool,
    no_progress: bool,
    verbose: bool,
) -> i32 {
    logging::init(verbose);

    let output_format = match format.parse::<OutputFormat>() {
        Ok(f) => f,
        Err(e) => return usage_error(&e),
    };
    let fail_threshold = match fail_on.parse::<Severity>() {
        Ok(s) => s,
        Err(e) => return usage_error(&e),
    };
    let min_severity = match min_severity.parse::<Severity>() {
        Ok(s) => s,
        Err(e) => return usage_error(&e),
    };

    let mut policy = Policy::new()
        .with_fail_threshold(fail_threshold)
        .with_min_severity(min_severity);
    for rule_id in ignore {
        policy = policy.with_ignored_rule(&rule_id);
    }

    let mut config = ValidatorConfig::default()
        .with_policy(policy)
        .with_parallel(!no_parallel);
    if let Some(seconds) = timeout {
        config = config.with_timeout_seconds(seconds);
    }
    config.enable_progress = !no_progress;
    config.enable_verbose_output = verbose;

    if let Err(e) = config.validate() {
        return usage_error(&e);
    }

    let registry = match RuleRegistry::builtin() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{} Failed to build rule registry: {}", "[!]".red(), e);
            return EXIT_USAGE;
        }
    };

    let human = output_format == OutputFormat::Human;
    if human {
        println!("{} Validating {} input path(s)...", "[*]".blue(), paths.len());
    }

    let start_time = Instant::now();
    let runner = ValidationRunner::new(registry, config.clone());

    // The callback ticks once per expanded file, not per input path, so the
    // bar length has to come from the expansion (directories fan out).
    let (expanded, _) = expand_paths(paths);
    let progress = if human && config.enable_progress && expanded.len() > 1 {
        let pb = ProgressBar::new(expanded.len() as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        Some(pb)
    } else {
        None
    };

    let outcome = runner.run_with(paths, |file| {
        if let Some(ref pb) = progress {
            pb.set_message(file.to_string());
            pb.inc(1);
        }
    });

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    // Load failures go to stderr so the report on stdout stays parseable.
    for failure in &outcome.failures {
        eprintln!("{} {}: {}", "[!]".red(), failure.file, failure.message);
    }

    println!("{}", emit(&outcome.verdict, output_format));

    if human {
        let elapsed = start_time.elapsed();
        if outcome.verdict.pass {
            println!(
                "{} Validation passed in {:.2}s ({} finding(s))",
                "[+]".green(),
                elapsed.as_secs_f64(),
                outcome.verdict.counts.total()
            );
        } else {
            println!(
                "{} Validation failed in {:.2}s ({} finding(s))",
                "[!]".red(),
                elapsed.as_secs_f64(),
                outcome.verdict.counts.total()
            );
        }
    }

    if outcome.has_failures() {
        EXIT_USAGE
    } else if outcome.verdict.pass {
        EXIT_PASS
    } else {
        EXIT_FINDINGS
    }
}

fn run_rules() -> i32 {
    let registry = match RuleRegistry::builtin() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{} Failed to build rule registry: {}", "[!]".red(), e);
            return EXIT_USAGE;
        }
    };

    println!("{}", "Built-in Rules".cyan().bold());
    println!("{}", "-".repeat(40).cyan());

    for rule in registry.all() {
        println!(
            "  {} [{}] {}",
            rule.id().cyan(),
            rule.severity().label().yellow(),
            rule.description()
        );
    }

    println!();
    println!("{} {} rule(s) registered", "[+]".green(), registry.len());

    EXIT_PASS
}

fn run_health() -> i32 {
    let report = health::collect();

    println!("{}", "System".cyan().bold());
    println!("{}", "-".repeat(40).cyan());
    for (key, value) in &report.system {
        println!("  {} {}", format!("{}:", key).cyan(), value);
    }

    println!();
    println!("{}", "DevOps Tools".cyan().bold());
    println!("{}", "-".repeat(40).cyan());
    for tool in &report.tools {
        match &tool.version {
            Some(version) => println!("  {} {} {}", "[+]".green(), tool.name.cyan(), version),
            None => println!("  {} {} not found", "[!]".yellow(), tool.name.cyan()),
        }
    }

    println!();
    println!("{}", "Environment".cyan().bold());
    println!("{}", "-".repeat(40).cyan());
    for var in &report.env {
        match (&var.value, var.required) {
            (Some(_), _) => println!("  {} {} is set", "[+]".green(), var.name.cyan()),
            (None, true) => println!("  {} {} not set", "[!]".yellow(), var.name.cyan()),
            (None, false) => println!("  {} {} (not set)", "[*]".blue(), var.name.cyan()),
        }
    }

    println!();
    let warnings = report.warnings();
    if warnings == 0 {
        println!("{} System is healthy - all checks passed", "[+]".green());
        EXIT_PASS
    } else {
        println!("{} System has {} warning(s)", "[!]".yellow(), warnings);
        EXIT_FINDINGS
    }
}

fn usage_error(message: &str) -> i32 {
    eprintln!("{} {}", "[!]".red(), message);
    EXIT_USAGE
}
