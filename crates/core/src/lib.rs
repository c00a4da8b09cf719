pub mod domain;
pub mod engine;
pub mod error;
pub mod report;
pub mod universe;

pub mod config {
    use anyhow::Context;
    use std::path::PathBuf;

    const DEFAULT_PORT: u16 = 3000;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub fund_universe_path: Option<PathBuf>,
        pub report_output_path: PathBuf,
        pub sentry_dsn: Option<String>,
        pub port: u16,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let port = match std::env::var("PORT") {
                Ok(s) => s
                    .parse::<u16>()
                    .with_context(|| format!("PORT must be a port number (got {s:?})"))?,
                Err(_) => DEFAULT_PORT,
            };

            Ok(Self {
                fund_universe_path: std::env::var_os("FUND_UNIVERSE_PATH").map(PathBuf::from),
                report_output_path: std::env::var_os("REPORT_OUTPUT_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(crate::report::REPORT_FILE_NAME)),
                sentry_dsn: std::env::var("SENTRY_DSN").ok().filter(|s| !s.trim().is_empty()),
                port,
            })
        }

        pub fn require_fund_universe_path(&self) -> anyhow::Result<&std::path::Path> {
            self.fund_universe_path
                .as_deref()
                .context("FUND_UNIVERSE_PATH is required")
        }
    }
}
