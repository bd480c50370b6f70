use async_trait::async_trait;
use clap::Parser;
use hn_core::{NotificationPayload, Notifier, PermissionStatus, Result};
use hn_storage::ArticleCache;
use hn_sync::{
    ArticleStore, ChangePoller, HnClient, NotificationSettings, OnlineCheck, Refresher,
    POLL_INTERVAL, SUGGESTED_FILTERS,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Storage backend to use (memory or file)
    #[arg(long, default_value = "file")]
    storage: String,
    /// Data directory for the file backend
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Refresh once, then poll for new articles until interrupted
    Run,
    /// Fetch one page and reconcile it with the local partitions
    Refresh {
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// One-shot check against the persisted last-seen timestamp, as an OS
    /// scheduler would run it
    Check,
    /// Show or replace the notification keyword filters
    Filters {
        /// New keyword list; prints the current list when omitted
        keywords: Vec<String>,
        /// Install the suggested mobile keyword list
        #[arg(long)]
        suggested: bool,
    },
}

/// Stands in for the OS notification primitive: prints to the terminal.
struct TerminalNotifier;

#[async_trait]
impl Notifier for TerminalNotifier {
    async fn deliver(&self, payload: &NotificationPayload) -> Result<()> {
        match &payload.url {
            Some(url) => println!("🔔 {}: {} ({})", payload.title, payload.body, url),
            None => println!("🔔 {}: {}", payload.title, payload.body),
        }
        Ok(())
    }

    async fn permission_status(&self) -> Result<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    async fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let backend = hn_storage::create_store(&cli.storage, cli.data_dir)?;
    let cache = ArticleCache::new(backend);
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier);
    let settings = NotificationSettings::new(cache.clone(), notifier.clone());
    let store = ArticleStore::new(cache.clone());
    store.load_starting_data().await;

    match cli.command {
        Commands::Run => {
            let client = Arc::new(HnClient::new()?);
            let connectivity = Arc::new(OnlineCheck::new()?);
            let refresher = Refresher::new(
                client.clone(),
                connectivity,
                store.clone(),
                cache.clone(),
            );
            refresher.refresh(0).await;
            info!("📰 {} active articles after refresh", store.active().await.len());

            let handle = ChangePoller::new(client, notifier, settings).spawn();
            info!(
                "🔄 Polling every {}s, press Ctrl-C to stop",
                POLL_INTERVAL.as_secs()
            );
            tokio::signal::ctrl_c().await?;
            handle.shutdown();
            info!("Poller stopped");
        }
        Commands::Refresh { page } => {
            let client = Arc::new(HnClient::new()?);
            let connectivity = Arc::new(OnlineCheck::new()?);
            let refresher = Refresher::new(client, connectivity, store.clone(), cache);
            refresher.refresh(page).await;

            for article in store.active().await {
                println!("{}  {}", article.id, article.display_title());
            }
        }
        Commands::Check => {
            let client = HnClient::new()?;
            hn_sync::background::run_background_check(&client, &cache, notifier.as_ref()).await?;
        }
        Commands::Filters { keywords, suggested } => {
            if suggested {
                settings
                    .set_filters(SUGGESTED_FILTERS.iter().map(|k| k.to_string()).collect())
                    .await;
            } else if !keywords.is_empty() {
                settings.set_filters(keywords).await;
            }
            for keyword in settings.filters().await {
                println!("{}", keyword);
            }
        }
    }

    Ok(())
}
