//! exofuse server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) and serves the
//! fused exoplanet catalog over HTTP.
//!
//! # Offline fusion
//!
//! To fuse local dumps once and print the result instead of serving:
//!
//! ```text
//! cargo run -p exofuse-server -- --fuse-archive ps.json --fuse-community exoplanet.eu.csv
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use exofuse_core::CatalogSource;
use exofuse_server::ServerConfig;
use exofuse_upstream::FileCatalog;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Exoplanet catalog fusion server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Fuse this archive JSON dump, print the result to stdout and exit.
  #[arg(long, value_name = "FILE")]
  fuse_archive: Option<PathBuf>,

  /// Community CSV export to fuse alongside `--fuse-archive`.
  #[arg(long, value_name = "FILE", requires = "fuse_archive")]
  fuse_community: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing. Logs go to stderr so offline output stays clean.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  // Helper mode: fuse local files and exit.
  if let Some(archive) = cli.fuse_archive {
    return fuse_files(archive, cli.fuse_community).await;
  }

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("EXOFUSE"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let source = server_cfg
    .http_catalog()
    .context("failed to build HTTP client")?;
  let app = exofuse_server::router(server_cfg.state(source));
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

async fn fuse_files(
  archive: PathBuf,
  community: Option<PathBuf>,
) -> anyhow::Result<()> {
  let source = FileCatalog::new(&archive, community);
  let (rows, csv) = tokio::try_join!(source.archive_rows(), source.community_csv())
    .context("failed to read catalog files")?;

  let output = exofuse_fusion::fuse_with_csv(&rows, csv.as_deref());

  let stdout = std::io::stdout().lock();
  serde_json::to_writer_pretty(stdout, &output).context("failed to write output")?;
  println!();
  Ok(())
}
