//! CLI for enumerating circle arrangements.
//!
//! Prints every distinct arrangement of N circles, numbered in canonical order, followed by the
//! total count.

use std::num::NonZeroUsize;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;

use circles_core::{calculate_circles_with, parse_log_level, Arrangement, Arrangements, Config};

#[derive(Debug, Parser)]
#[command(name = "circles")]
#[command(about = "Enumerate topologically distinct arrangements of N circles", long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CIRCLES_BUILD_SHA"), ")"))]
struct Cli {
    /// Number of circles (positive integer)
    n: NonZeroUsize,

    /// Print arrangements as JSON
    #[arg(short, long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace); defaults to $RUST_LOG, else warn
    #[arg(short, long)]
    log_level: Option<String>,

    /// Largest circle count to attempt
    #[arg(long)]
    max_circles: Option<usize>,

    /// Largest number of candidate arrangements to generate
    #[arg(long)]
    max_candidates: Option<usize>,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    circles: usize,
    count: usize,
    arrangements: Vec<&'a Arrangement>,
}

fn init_logs(level: Option<&str>) -> Result<()> {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(level) = level {
        builder.filter_level(parse_log_level(Some(level))?);
    }
    builder.init();
    Ok(())
}

fn render_text(num_circles: usize, arrangements: &Arrangements) -> String {
    let mut out = String::new();
    for (idx, arrangement) in arrangements.iter().enumerate() {
        out += &format!("{}: {}\n", idx + 1, arrangement);
    }
    out += &format!(
        "The number of solutions for `{}` circles is `{}`\n",
        num_circles,
        arrangements.len(),
    );
    out
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logs(cli.log_level.as_deref())?;

    let num_circles = cli.n.get();
    let config = Config::new(cli.max_circles, cli.max_candidates);
    info!("{:?}", config);
    let arrangements = calculate_circles_with(num_circles, &config)
        .with_context(|| format!("enumerating arrangements of {} circles", num_circles))?;

    if cli.json {
        let report = Report {
            circles: num_circles,
            count: arrangements.len(),
            arrangements: arrangements.iter().collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(num_circles, &arrangements));
    }
    Ok(())
}
