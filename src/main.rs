// logictrace: step-by-step tracer for a small Python-like teaching language

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use logictrace::interpreter::constants::DEFAULT_STEP_LIMIT;
use logictrace::ui::App;
use logictrace::{trace_with_config, Trace, TraceConfig, TraceResult};

/// Output produced for a traced program
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Interactive step player
    Tui,
    /// The full trace result as JSON on stdout
    Json,
    /// One plain-text block per step
    Text,
}

/// Trace a small Python-like program one step at a time
#[derive(Parser, Debug)]
#[command(name = "logictrace")]
#[command(version)]
#[command(about = "Run a beginner program and explain every step it takes")]
struct Cli {
    /// Program to trace
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// How to present the trace
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Tui)]
    format: OutputFormat,

    /// Maximum number of steps before the trace is aborted
    #[arg(long, value_name = "N", default_value_t = DEFAULT_STEP_LIMIT)]
    step_limit: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read '{}'", cli.file.display()))?;

    let config = TraceConfig::default().with_step_limit(cli.step_limit);
    log::info!("Tracing {} (step limit {})", cli.file.display(), config.step_limit);

    let result = trace_with_config(&source, &config);

    match cli.format {
        OutputFormat::Json => {
            let result = TraceResult::from(result);
            let success = result.success;
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !success {
                process::exit(1);
            }
        }
        OutputFormat::Text => match result {
            Ok(trace) => print_text(&trace),
            Err(err) => {
                eprintln!("{}", err);
                process::exit(1);
            }
        },
        OutputFormat::Tui => match result {
            Ok(trace) => run_player(trace, source)?,
            Err(err) => {
                eprintln!("{}", err);
                process::exit(1);
            }
        },
    }

    Ok(())
}

fn print_text(trace: &Trace) {
    for (idx, step) in trace.iter().enumerate() {
        println!("Step {} | line {} | {}", idx + 1, step.line_no, step.action);
        println!("  code:      {}", step.source_line);
        println!("  reason:    {}", step.reason);

        let variables: Vec<String> = step
            .variables
            .iter()
            .map(|(name, value)| format!("{} = {}", name, value.repr()))
            .collect();
        println!("  variables: {}", variables.join(", "));

        if let Some(last) = step.output.last() {
            println!("  output:    {} line(s), last: {}", step.output.len(), last);
        }
        println!();
    }

    println!("{} steps", trace.len());
}

fn run_player(trace: Trace, source: String) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(trace, source);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("step player failed")
}
