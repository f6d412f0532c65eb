use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::api::{ApiClient, DEFAULT_SYNC_PER_PAGE};
use crate::auth::SyncToken;
use crate::config::ApiConfig;
use crate::present::{PresentationSettings, DEFAULT_MIN_BAR_HEIGHT};
use crate::query::{RawRunQuery, RunQuery, DEFAULT_TREND_DAYS};
use crate::views::{DashboardView, DeploymentView};

#[derive(Parser)]
#[command(name = "pipeboard")]
#[command(author, version, about = "Pipeline and supply-chain dashboard views", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend origin (falls back to API_BASE, NEXT_PUBLIC_API_BASE, then http://api:5000)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Output file path (defaults to stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Pretty print JSON output
    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,
}

/// Dashboard navigation state. Values are taken as typed and normalized,
/// never rejected.
#[derive(Args)]
struct DashboardArgs {
    /// Page of the run list
    #[arg(long, allow_hyphen_values = true)]
    page: Option<String>,

    /// Runs per page (1-100)
    #[arg(short, long, allow_hyphen_values = true)]
    limit: Option<String>,

    /// Category filter (ci, security, cd, other)
    #[arg(short, long)]
    category: Option<String>,

    /// Branch filter
    #[arg(short, long)]
    branch: Option<String>,

    /// Lookback window of the security trend chart, in days (1-90)
    #[arg(long, default_value_t = DEFAULT_TREND_DAYS)]
    trend_days: u32,

    /// Minimum trend bar height, in percent
    #[arg(long, default_value_t = DEFAULT_MIN_BAR_HEIGHT)]
    min_bar_height: u32,
}

impl DashboardArgs {
    fn query(&self) -> RunQuery {
        RunQuery::normalize(&RawRunQuery {
            page: self.page.clone(),
            limit: self.limit.clone(),
            category: self.category.clone(),
            branch: self.branch.clone(),
        })
    }

    fn settings(&self) -> PresentationSettings {
        PresentationSettings::default().with_min_bar_height(self.min_bar_height)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Pipeline runs, category status, security summary and trends
    Dashboard {
        #[command(flatten)]
        args: DashboardArgs,

        /// Emit the merged backend data instead of the view model
        #[arg(long, default_value_t = false)]
        raw: bool,
    },

    /// Latest CD run and supply-chain verification signals
    Deployment,

    /// Dashboard and deployment views together
    Board {
        #[command(flatten)]
        args: DashboardArgs,
    },

    /// Check that the backend is up
    Health,

    /// Ask the backend to sync workflow runs from its CI provider
    Sync {
        /// Shared sync secret
        #[arg(short, long, env = "SYNC_TOKEN", hide_env_values = true)]
        token: String,

        /// Number of workflow runs to pull (1-100)
        #[arg(long, default_value_t = DEFAULT_SYNC_PER_PAGE)]
        per_page: u32,
    },
}

#[derive(Serialize)]
struct BoardOutput {
    dashboard: DashboardView,
    deployment: DeploymentView,
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        let config = ApiConfig::resolve(self.api_base.as_deref());
        let client = ApiClient::new(&config)?;
        info!("Using backend at {}", client.base_url());

        match &self.command {
            Commands::Dashboard { args, raw } => {
                let query = args.query();
                info!("Collecting dashboard data for {query:?}");

                let data = client.get_dashboard_data(&query, args.trend_days).await;
                if *raw {
                    self.write(&data)
                } else {
                    self.write(&DashboardView::build(&data, &query, &args.settings()))
                }
            }
            Commands::Deployment => {
                let deployment = client.get_deployment_data().await;
                self.write(&DeploymentView::from_summary(deployment.as_ref().into_option()))
            }
            Commands::Board { args } => {
                let query = args.query();
                let (data, deployment) = client.get_board_data(&query, args.trend_days).await;

                self.write(&BoardOutput {
                    dashboard: DashboardView::build(&data, &query, &args.settings()),
                    deployment: DeploymentView::from_summary(deployment.as_ref().into_option()),
                })
            }
            Commands::Health => {
                let health = client.health().await?;
                self.write(&health)
            }
            Commands::Sync { token, per_page } => {
                let token = SyncToken::from(token.as_str());
                let result = client.trigger_sync(&token, *per_page).await?;
                self.write(&result)
            }
        }
    }

    fn write<T: Serialize>(&self, value: &T) -> Result<()> {
        let json_output = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        if let Some(output_path) = &self.output {
            std::fs::write(output_path, json_output)?;
            info!("Output written to: {}", output_path.display());
        } else {
            println!("{json_output}");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_page_is_accepted_and_normalized() {
        let cli = Cli::try_parse_from([
            "pipeboard",
            "dashboard",
            "--page",
            "-3",
            "--limit",
            "500",
            "--category",
            "  CI ",
        ])
        .unwrap();

        let Commands::Dashboard { args, raw } = cli.command else {
            panic!("expected dashboard command");
        };
        let query = args.query();

        assert!(!raw);
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 100);
        assert_eq!(query.category.as_deref(), Some("ci"));
        assert_eq!(query.branch, None);
    }

    #[test]
    fn test_dashboard_defaults() {
        let cli = Cli::try_parse_from(["pipeboard", "board"]).unwrap();

        let Commands::Board { args } = cli.command else {
            panic!("expected board command");
        };

        assert_eq!(args.query(), RunQuery::default());
        assert_eq!(args.trend_days, 14);
        assert_eq!(args.settings(), PresentationSettings::default());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pipeboard",
            "deployment",
            "--api-base",
            "http://localhost:5000",
            "--pretty",
        ])
        .unwrap();

        assert!(cli.pretty);
        assert_eq!(cli.api_base.as_deref(), Some("http://localhost:5000"));
    }
}
