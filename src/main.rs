use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod log;
mod model;
mod render;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "wic-perf")]
#[command(about = "Summarize WIC operation timings from log output", long_about = None)]
struct Cli {
    /// Log file to analyze. Reads stdin when omitted.
    log: Option<PathBuf>,
}

/// Diagnostics go to stderr so the report on stdout stays clean.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    // anstream strips the styles when stdout is not a color terminal.
    let theme = render::Theme::default();

    anstream::print!("{}", render::render_banner(&theme));

    if cli.log.is_none() && std::io::stdin().is_terminal() {
        anstream::eprintln!("{}", render::render_stdin_hint(&theme));
    }

    // 1) Read + parse log.
    let text = log::read_log_input(cli.log.as_deref())?;
    let operations = log::parse_log_text(&text)?;

    // 2) Aggregate + render.
    match model::build_report_data(&operations) {
        Some(data) => anstream::print!("{}", render::render_text_report(&data, &theme)?),
        None => anstream::print!("{}", render::render_no_data(&theme)),
    }

    anstream::print!("{}", render::render_footer(&theme));

    Ok(())
}
