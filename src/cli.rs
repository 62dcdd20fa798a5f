use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(
    name = "servly",
    version,
    about = "Terminal client for the Servly local-services marketplace"
)]
pub struct Args {
    /// Base URL of the Servly API (overrides `api.base_url` in config.toml)
    #[arg(long, env = "SERVLY_API_URL")]
    pub api_url: Option<String>,

    /// Act as this account id instead of the stored session
    #[arg(short, long)]
    pub user: Option<i64>,

    /// Page to open first (e.g. "/about", "provider/dashboard")
    #[arg(short, long)]
    pub route: Option<String>,

    /// Verification documents to upload on the provider dashboard
    #[arg(long, num_args = 1.., value_name = "FILE")]
    pub upload: Vec<PathBuf>,
}
