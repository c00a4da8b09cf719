use anyhow::Context;
use clap::Parser;
use fundrec_core::domain::contract::RunRequest;
use fundrec_core::domain::recommendation::RecommendationSnapshot;
use fundrec_core::engine::recommend;
use fundrec_core::report::{export_recommendations_csv, format_lakhs};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "fundrec_worker")]
struct Args {
    /// Fund universe file (.csv or .json). Defaults to FUND_UNIVERSE_PATH.
    #[arg(long)]
    universe: Option<PathBuf>,

    /// Risk preference: "No Preference", "Low", "Moderate" or "High".
    #[arg(long, default_value = "No Preference")]
    risk: String,

    /// Investment type used for the headline projection: sip or lumpsum.
    #[arg(long, default_value = "sip")]
    mode: String,

    /// Monthly SIP contribution; the lump sum is sized to the same total.
    #[arg(long, default_value_t = 5000.0)]
    amount: f64,

    /// Investment horizon in years (1..=30).
    #[arg(long, default_value_t = 10)]
    years: u32,

    /// Include the SIP vs lump-sum comparison.
    #[arg(long)]
    compare: bool,

    /// CSV report path. Defaults to REPORT_OUTPUT_PATH.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the full snapshot as JSON to stdout.
    #[arg(long)]
    json: bool,

    /// Do everything except writing the report.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = fundrec_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    if let Err(err) = run(&settings, args) {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %format!("{err:#}"), "recommendation run failed");
        return Err(err);
    }
    Ok(())
}

fn run(settings: &fundrec_core::config::Settings, args: Args) -> anyhow::Result<()> {
    let universe_path = match args.universe {
        Some(p) => p,
        None => settings.require_fund_universe_path()?.to_path_buf(),
    };
    let universe = fundrec_core::universe::load_scored_universe(&universe_path)?;

    let params = RunRequest {
        risk: args.risk,
        mode: args.mode,
        amount: args.amount,
        years: args.years,
        compare: args.compare,
    }
    .validate_and_into_params()
    .context("invalid run parameters")?;

    let snapshot = recommend(&universe, &params).context("recommendation run failed")?;
    log_snapshot(&snapshot);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).context("serialize snapshot failed")?
        );
    }

    if args.dry_run {
        tracing::info!(
            snapshot_id = %snapshot.id,
            dry_run = true,
            items_len = snapshot.items.len(),
            "skipping report write"
        );
        return Ok(());
    }

    let output = args
        .output
        .unwrap_or_else(|| settings.report_output_path.clone());
    let csv = export_recommendations_csv(&snapshot)?;
    std::fs::write(&output, csv)
        .with_context(|| format!("failed to write report {}", output.display()))?;

    tracing::info!(snapshot_id = %snapshot.id, path = %output.display(), "wrote recommendation report");
    Ok(())
}

fn log_snapshot(snapshot: &RecommendationSnapshot) {
    tracing::info!(caption = %snapshot.caption, "selection");

    match &snapshot.summary {
        Some(s) => tracing::info!(
            top_fund = %s.top_fund,
            projected_value = %s.projected_value_display,
            confidence_percent = s.confidence_percent,
            "top ranked fund"
        ),
        None => tracing::warn!(risk = %snapshot.params.risk, "no funds matched the risk preference"),
    }

    for item in &snapshot.items {
        tracing::info!(
            rank = item.rank,
            fund = %item.fund.name(),
            risk_bucket = %item.fund.risk_bucket(),
            ranking_score = item.fund.ranking_score,
            confidence_percent = item.confidence_percent,
            sip = %format_lakhs(item.projected_sip_value),
            lumpsum = %format_lakhs(item.projected_lumpsum_value),
            rationale = %item.rationale,
            "recommendation"
        );
    }

    if let Some(rows) = &snapshot.comparison {
        for row in rows {
            tracing::info!(
                fund = %row.fund,
                sip_lakhs = row.sip_lakhs,
                lumpsum_lakhs = row.lumpsum_lakhs,
                "sip vs lumpsum"
            );
        }
    }
}

fn init_sentry(settings: &fundrec_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
