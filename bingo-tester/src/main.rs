mod common;
mod logic;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use common::scenario::{all_scenario_keys, get_scenario, list_scenarios};
use common::split_csv;
use logic::{LogicTester, ScenarioResult, SeedInfo, TesterAssets, resolve_seed_inputs};

#[derive(Debug, Parser)]
#[command(name = "bingo-tester", version = "0.1.0")]
#[command(about = "Automated QA testing for bingo board data, scoring, rosters and tile races")]
struct Args {
    /// Game JSON to test (defaults to the bundled sample game)
    #[arg(long)]
    game: Option<PathBuf>,

    /// Wise Old Man group memberships JSON (defaults to the bundled group)
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Engine config JSON (defaults to the bundled config)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated integers, or `game` for the board's race seed)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per seed for seeded scenarios
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Args {
    fn is_console(&self) -> bool {
        self.report == "console"
    }

    fn check(&self) -> Result<()> {
        ensure!(self.iterations > 0, "--iterations must be at least 1");
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }
    args.check()?;

    if args.is_console() {
        announce_banner();
    }

    let start_time = Instant::now();
    let assets = TesterAssets::load(
        args.game.as_deref(),
        args.roster.as_deref(),
        args.config.as_deref(),
    )?;
    let scenarios = expand_scenarios(&args.scenarios);
    let seed_infos = resolve_seed_inputs(&split_csv(&args.seeds), &assets.game.details)?;
    let seeds: Vec<u64> = seed_infos.iter().map(|s| s.seed).collect();
    let seed_list = seed_infos
        .iter()
        .map(SeedInfo::describe)
        .collect::<Vec<_>>()
        .join(", ");
    log::info!("running {} scenario(s)", scenarios.len());
    if args.is_console() {
        println!("🎯 Seeds: {seed_list}");
    } else {
        log::info!("seeds: {seed_list}");
    }

    let results = run_logic_scenarios(&args, &assets, &scenarios, &seeds);
    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:12} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🎲 Bingo Automated Tester".bright_cyan().bold());
    println!("{}", "=========================".cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s.eq_ignore_ascii_case("all")) {
        scenarios.retain(|s| !s.eq_ignore_ascii_case("all"));
        for key in all_scenario_keys() {
            if !scenarios.contains(&key) {
                scenarios.push(key);
            }
        }
    }
    scenarios
}

fn run_logic_scenarios(
    args: &Args,
    assets: &TesterAssets,
    scenarios: &[String],
    seeds: &[u64],
) -> Vec<ScenarioResult> {
    if args.is_console() {
        println!("{}", "🧠 Running Logic Tests".bright_yellow().bold());
        println!("{}", "-".repeat(30).yellow());
    }

    let tester = LogicTester::new(assets, args.verbose);
    let mut results = Vec::new();
    for scenario_name in scenarios {
        if let Some(scenario) = get_scenario(scenario_name) {
            results.extend(tester.run_scenario(&scenario, seeds, args.iterations));
        } else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
        }
    }
    results
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, results)?,
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Bingo Logic Test Results\n\n_No scenarios executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        _ => {
            let duration = start_time.elapsed();
            if results.is_empty() {
                writeln!(&mut output_target, "No logic scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(&mut output_target, results, duration)?;
            }
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
