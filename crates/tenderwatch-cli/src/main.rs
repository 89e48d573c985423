mod config;
mod display;
mod server;

use chrono::Utc;
use clap::Parser;
use tenderwatch_core::{sort_tenders, within_dates};
use tenderwatch_service::TenderService;
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, Command, ListArgs};
use crate::server::TendersResponse;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("tenderwatch v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let service = cli.settings.build_service()?;

    match cli.command {
        Command::Serve { bind, static_dir } => server::serve(service, bind, static_dir).await,
        Command::List(args) => print_listing(&service, args, false).await,
        Command::Refresh(args) => print_listing(&service, args, true).await,
    }
}

async fn print_listing(
    service: &TenderService,
    args: ListArgs,
    force: bool,
) -> anyhow::Result<()> {
    let mut listing = service.get_tenders(force || args.refresh).await;
    listing.tenders.retain(|t| within_dates(t, args.from, args.to));
    sort_tenders(&mut listing.tenders, args.sort.into());

    if args.json {
        let body = TendersResponse::from(listing);
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print!("{}", display::render_listing(&listing, Utc::now()));
    }
    Ok(())
}
