//! Process configuration: command-line flags with environment fallbacks.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tenderwatch_core::{FIND_A_TENDER_ORIGIN, TenderSort};
use tenderwatch_service::{DEFAULT_KEYWORD, ServiceConfig, TenderService};
use tenderwatch_store::{JsonFileStore, MemoryStore, SnapshotStore};
use tenderwatch_sync::{FIND_A_TENDER_FEED, FeedClient};

#[derive(Parser)]
#[command(name = "tenderwatch", version, about = "Watch published tenders for one organisation")]
pub struct Cli {
    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Command,
}

/// Settings shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// OCDS release-package endpoint to poll.
    #[arg(long, global = true, env = "TENDERWATCH_FEED_URL", default_value = FIND_A_TENDER_FEED)]
    pub feed_url: String,

    /// Keyword a release must mention to be listed (case-insensitive).
    #[arg(long, global = true, env = "TENDERWATCH_KEYWORD", default_value = DEFAULT_KEYWORD)]
    pub keyword: String,

    /// Origin for notice links on releases without a document URL.
    #[arg(long, global = true, env = "TENDERWATCH_NOTICE_ORIGIN", default_value = FIND_A_TENDER_ORIGIN)]
    pub notice_origin: String,

    /// Where the last good snapshot is kept between runs.
    #[arg(long, global = true, env = "TENDERWATCH_CACHE_FILE", default_value = "data/tenders_cache.json")]
    pub cache_file: PathBuf,

    /// Keep the snapshot in memory only.
    #[arg(long, global = true)]
    pub no_cache_file: bool,

    /// Upstream request timeout in seconds.
    #[arg(long, global = true, env = "TENDERWATCH_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the dashboard API (and optional static dashboard files).
    Serve {
        #[arg(long, env = "TENDERWATCH_BIND", default_value = "127.0.0.1:5000")]
        bind: SocketAddr,

        /// Directory of static dashboard assets served at `/`.
        #[arg(long, env = "TENDERWATCH_STATIC_DIR")]
        static_dir: Option<PathBuf>,
    },
    /// Print the current tender list.
    List(ListArgs),
    /// Fetch the feed now, ignoring the cache, and print the result.
    Refresh(ListArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Ignore a fresh snapshot and fetch the feed.
    #[arg(long)]
    pub refresh: bool,

    #[arg(long, value_enum, default_value_t = SortArg::DateDesc)]
    pub sort: SortArg,

    /// Only tenders published on or after this day (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Only tenders published on or before this day (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Print the API JSON instead of cards.
    #[arg(long)]
    pub json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum SortArg {
    DateDesc,
    DateAsc,
    DeadlineAsc,
    DeadlineDesc,
    Title,
}

impl From<SortArg> for TenderSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::DateDesc => TenderSort::DateDesc,
            SortArg::DateAsc => TenderSort::DateAsc,
            SortArg::DeadlineAsc => TenderSort::DeadlineAsc,
            SortArg::DeadlineDesc => TenderSort::DeadlineDesc,
            SortArg::Title => TenderSort::Title,
        }
    }
}

impl Settings {
    /// Wire the feed client, snapshot store, and service together.
    pub fn build_service(&self) -> anyhow::Result<TenderService> {
        let keyword = self.keyword.trim();
        anyhow::ensure!(!keyword.is_empty(), "keyword must not be empty");

        let source = FeedClient::new(&self.feed_url, Duration::from_secs(self.timeout_secs))
            .context("building feed client")?;
        let store: Arc<dyn SnapshotStore> = if self.no_cache_file {
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(JsonFileStore::new(&self.cache_file))
        };
        let config = ServiceConfig {
            keyword: keyword.to_string(),
            notice_origin: self.notice_origin.clone(),
        };
        Ok(TenderService::new(Arc::new(source), store, config))
    }
}
