//! CLI administration tool for the link cache.
//!
//! Warms, inspects and invalidates cached links without going through the
//! HTTP service.
//!
//! # Usage
//!
//! ```bash
//! # Cache every link of a domain (existing entries are kept)
//! cargo run --bin link-cache-admin -- warm --domain dub.sh
//!
//! # Cache one link
//! cargo run --bin link-cache-admin -- set dub.sh launch
//!
//! # Show what is cached for a link
//! cargo run --bin link-cache-admin -- get dub.sh launch
//!
//! # Drop a cached link (asks for confirmation unless -y)
//! cargo run --bin link-cache-admin -- invalidate dub.sh launch
//!
//! # Check Redis connectivity
//! cargo run --bin link-cache-admin -- ping
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `link_cache::config`); Redis must be configured.

use link_cache::application::services::LinkCache;
use link_cache::config::{self, Config};
use link_cache::domain::repositories::LinkRepository;
use link_cache::infrastructure::cache::{CacheStore, RedisStore};
use link_cache::infrastructure::persistence::PgLinkRepository;
use link_cache::{logging, server};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing the link cache.
#[derive(Parser)]
#[command(name = "link-cache-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cache every link of a domain
    Warm {
        /// Domain whose links are cached
        #[arg(short, long)]
        domain: String,

        /// Links loaded and written per pipeline
        #[arg(short, long, default_value_t = 500)]
        batch_size: i64,
    },

    /// Cache a single link
    Set { domain: String, key: String },

    /// Show the cached projection of a link
    Get { domain: String, key: String },

    /// Remove a cached link
    Invalidate {
        domain: String,
        key: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Check Redis connection
    Ping,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;
    logging::init("warn", &config.log_format)?;

    let store = connect_redis(&config).await?;

    match cli.command {
        Commands::Ping => ping(store.health_check().await),
        command => run(command, &config, store).await,
    }
}

/// Runs the commands that need both Postgres and Redis.
async fn run(command: Commands, config: &Config, store: Arc<dyn CacheStore>) -> Result<()> {
    let pool = Arc::new(server::connect_database(config).await?);
    let links = PgLinkRepository::new(pool.clone());
    let cache = server::build_link_cache(store, pool);

    match command {
        Commands::Warm { domain, batch_size } => warm(&links, &cache, &domain, batch_size).await,
        Commands::Set { domain, key } => set(&links, &cache, &domain, &key).await,
        Commands::Get { domain, key } => get(&cache, &domain, &key).await,
        Commands::Invalidate { domain, key, yes } => invalidate(&cache, &domain, &key, yes).await,
        Commands::Ping => ping(cache.health_check().await),
    }
}

async fn connect_redis(config: &Config) -> Result<Arc<dyn CacheStore>> {
    let redis_url = config
        .redis_url
        .as_deref()
        .context("REDIS_URL (or REDIS_HOST) must be set")?;

    let store = RedisStore::connect(redis_url)
        .await
        .context("Failed to connect to Redis")?;

    Ok(Arc::new(store))
}

/// Pages through a domain's links and caches each page with one pipeline.
///
/// Entries already in the cache are left untouched.
async fn warm(
    links: &PgLinkRepository,
    cache: &LinkCache,
    domain: &str,
    batch_size: i64,
) -> Result<()> {
    if batch_size <= 0 {
        anyhow::bail!("--batch-size must be positive, got {}", batch_size);
    }

    println!("{} {}", "Warming cache for".bright_blue().bold(), domain.cyan());

    let mut after_id: Option<String> = None;
    let mut total = 0usize;

    loop {
        let page = links
            .list_by_domain(domain, after_id.clone(), batch_size)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to load links: {}", e))?;

        let Some(last) = page.last() else {
            break;
        };
        after_id = Some(last.id.clone());

        cache
            .set_many(&page)
            .await
            .with_context(|| format!("Failed to cache batch ending at {}", last.id))?;

        total += page.len();
        println!("  {} {} links", "cached".green(), total);

        if (page.len() as i64) < batch_size {
            break;
        }
    }

    if total == 0 {
        println!("{}", "  No links found".yellow());
    } else {
        println!("{} {} links submitted", "Done:".green().bold(), total);
    }

    Ok(())
}

async fn set(links: &PgLinkRepository, cache: &LinkCache, domain: &str, key: &str) -> Result<()> {
    let link = links
        .find_by_domain_key(domain, key)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load link: {}", e))?
        .with_context(|| format!("No link {}:{}", domain, key))?;

    if cache.set(&link).await? {
        println!("{} {}:{}", "Cached".green().bold(), domain, key);
    } else {
        println!(
            "{} {}:{} (use invalidate first to replace it)",
            "Already cached".yellow(),
            domain,
            key
        );
    }

    Ok(())
}

async fn get(cache: &LinkCache, domain: &str, key: &str) -> Result<()> {
    match cache.get(domain, key).await? {
        Some(cached) => println!("{}", serde_json::to_string_pretty(&cached)?),
        None => println!("{} {}:{}", "Not cached".yellow(), domain, key),
    }

    Ok(())
}

async fn invalidate(cache: &LinkCache, domain: &str, key: &str, skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove {}:{} from the cache?", domain, key))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    if cache.delete(domain, key).await? {
        println!("{} {}:{}", "Removed".green().bold(), domain, key);
    } else {
        println!("{} {}:{}", "Not cached".yellow(), domain, key);
    }

    Ok(())
}

fn ping(reachable: bool) -> Result<()> {
    if reachable {
        println!("{}", "Redis reachable".green().bold());
        Ok(())
    } else {
        anyhow::bail!("Redis PING failed")
    }
}
