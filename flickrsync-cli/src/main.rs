//! Command-line entry point: authorize against Flickr, then run one
//! local → remote sync pass over the given photo root.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use bridge_desktop::console::StdinPrompt;
use bridge_desktop::http::ReqwestHttpClient;
use clap::Parser;
use core_auth::{AuthFlow, AuthManager, Consumer, FileTokenStore, Perms};
use core_sync::{LocalLibrary, SyncEngine};
use provider_flickr::FlickrConnector;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flickrsync", version, about = "Mirror local photo folders to Flickr albums")]
struct Args {
    /// Root directory of the local photo library
    root: PathBuf,

    /// Flickr API key
    #[arg(long, env = "FLICKR_API_KEY")]
    api_key: String,

    /// Flickr API secret
    #[arg(long, env = "FLICKR_API_SECRET")]
    api_secret: String,

    /// Flickr user NSID to operate on (defaults to the authorized user)
    #[arg(long, env = "FLICKR_USER_ID")]
    user_id: Option<String>,

    /// Where the OAuth access token is cached between runs
    #[arg(long)]
    token_cache: Option<PathBuf>,
}

fn default_token_cache() -> anyhow::Result<PathBuf> {
    let base = dirs::config_dir().context("no user configuration directory available")?;
    Ok(base.join("flickrsync").join("token.json"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let token_cache = match args.token_cache {
        Some(path) => path,
        None => default_token_cache()?,
    };

    let http = Arc::new(ReqwestHttpClient::new());
    let consumer = Consumer::new(args.api_key, args.api_secret);

    let manager = AuthManager::new(
        AuthFlow::new(&consumer, http.clone()),
        FileTokenStore::new(&token_cache),
        Arc::new(StdinPrompt::new()),
    );
    let access = manager
        .ensure_authorized(Perms::Write)
        .await
        .context("Flickr authorization failed")?;
    info!(user = %access.username, "Authorized");

    let mut connector = FlickrConnector::new(http, &consumer, access);
    if let Some(user_id) = args.user_id {
        connector = connector.with_user(user_id);
    }

    let engine = SyncEngine::new(LocalLibrary::new(&args.root), Arc::new(connector));
    let report = engine
        .run()
        .await
        .with_context(|| format!("sync of {} failed", args.root.display()))?;

    info!(
        albums_created = report.albums_created,
        photos_uploaded = report.photos_uploaded,
        photos_skipped = report.photos_skipped,
        "Done"
    );
    Ok(())
}
