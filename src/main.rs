use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use grade_audit::config::AuditConfig;
use grade_audit::{pipeline, report, sheet};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser)]
#[command(name = "grade-audit")]
#[command(about = "Audits bulk grade exports for averages, rankings and total mismatches", long_about = None)]
struct Cli {
    /// Path to the grade sheet (CSV export)
    #[arg(long)]
    path: Option<PathBuf>,
    /// Comma-separated class IDs to include
    #[arg(long)]
    class: Option<String>,
    /// Any non-empty value writes the report to report.json
    #[arg(long)]
    export: Option<String>,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(path) = cli.path else {
        anyhow::bail!("Please provide the file path with --path <file>");
    };
    let config = AuditConfig::from_env(cli.class.as_deref(), cli.export.as_deref())?;

    if !config.classes.is_empty() {
        let classes: Vec<_> = config.classes.classes().collect();
        println!("Filtering for class {}", classes.join(","));
    }

    let sheet = sheet::read_sheet(&path)?;
    info!(
        path = %path.display(),
        rows = sheet.rows.len(),
        batch_year = %config.batch_year,
        "Auditing grade sheet"
    );

    let report = pipeline::run(&sheet, &config)?;
    print!("{}", report::render_summary(&report));

    if let Some(out) = &config.export {
        report::export_report(&report, out)
            .with_context(|| format!("report not exported to {}", out.display()))?;
        println!("Report exported to {}", out.display());
    }

    Ok(())
}
