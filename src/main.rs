//! Spotify → Apple Music playlist migration CLI.
//!
//! Reads the source playlist, resolves every track against the destination
//! catalog under its rate limit, creates the destination playlist, and
//! prints a final report of what transferred and what did not.

mod progress;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use bridge_http::{HttpClient, ReqwestHttpClient};
use core_auth::{issue_developer_token, UserToken};
use core_limit::RateLimiter;
use core_resolve::{
    Orchestrator, ProgressSink, ResolutionReport, ResolveOptions, SongCatalog, TrackResolver,
    DEFAULT_MAX_CONCURRENCY,
};
use core_runtime::{init_logging, AppConfig, LogFormat, LoggingConfig};
use provider_apple_music::AppleMusicClient;
use provider_spotify::{parse_playlist_ref, request_access_token, SpotifyClient};

#[derive(Parser)]
#[command(name = "tuneport")]
#[command(about = "Migrate a playlist from Spotify to Apple Music")]
struct Args {
    /// Source playlist URL or id (prompted when omitted)
    playlist: Option<String>,

    /// Name for the destination playlist (defaults to the source name)
    #[arg(long)]
    name: Option<String>,

    /// Maximum number of concurrent resolution workers
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    concurrency: usize,

    /// Overall resolution deadline in seconds
    #[arg(long)]
    deadline_secs: Option<u64>,

    /// Destination catalog storefront
    #[arg(long, default_value = provider_apple_music::DEFAULT_STOREFRONT)]
    storefront: String,

    /// Log output format: pretty, compact, or json
    #[arg(long, default_value = "pretty")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig::default().with_format(args.log_format))?;

    // All required secrets must be present before any network call.
    let config = AppConfig::from_env().context("loading configuration")?;

    let playlist_ref = match &args.playlist {
        Some(reference) => reference.clone(),
        None => prompt("Source playlist URL or id: ")?,
    };
    let playlist_id = parse_playlist_ref(&playlist_ref)?;

    let developer_token = issue_developer_token(
        &config.apple_private_key,
        &config.apple_team_id,
        &config.apple_key_id,
    )
    .context("issuing destination developer token")?;
    let user_token = UserToken::new(config.apple_user_token.clone());

    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    let search_limiter = Arc::new(RateLimiter::new(
        "apple-music-search",
        config.limits.search_calls,
        config.limits.search_period,
    ));
    let listing_limiter = Arc::new(RateLimiter::new(
        "spotify-listing",
        config.limits.listing_calls,
        config.limits.listing_period,
    ));

    let apple = Arc::new(
        AppleMusicClient::new(Arc::clone(&http), developer_token, search_limiter)
            .with_storefront(args.storefront.clone()),
    );
    apple
        .verify_user_token(&user_token)
        .await
        .context("verifying destination user token")?;

    let access_token = request_access_token(
        http.as_ref(),
        &config.spotify_client_id,
        &config.spotify_client_secret,
    )
    .await
    .context("requesting source access token")?;
    let spotify = SpotifyClient::new(Arc::clone(&http), access_token, listing_limiter);
    let playlist = spotify
        .fetch_playlist(&playlist_id)
        .await
        .context("fetching source playlist")?;

    let destination_name = match &args.name {
        Some(name) => name.clone(),
        None => {
            let input = prompt(&format!("Destination playlist name [{}]: ", playlist.name))?;
            if input.is_empty() {
                playlist.name.clone()
            } else {
                input
            }
        }
    };

    println!(
        "Migrating {} tracks from \"{}\"...",
        playlist.tracks.len(),
        playlist.name
    );

    let resolver = Arc::new(TrackResolver::new(
        Arc::clone(&apple) as Arc<dyn SongCatalog>
    ));
    let bar = progress::resolution_bar(playlist.tracks.len() as u64);
    let orchestrator = Orchestrator::new(resolver)
        .with_progress(Arc::new(progress::BarSink::new(bar.clone())) as Arc<dyn ProgressSink>);
    let options = ResolveOptions {
        max_concurrency: args.concurrency,
        deadline: args.deadline_secs.map(Duration::from_secs),
    };
    let report = orchestrator.resolve_all(playlist.tracks, options).await;
    bar.finish_and_clear();

    // Create first, report after: even when creation fails, the user still
    // sees how many tracks would have transferred.
    let creation = apple
        .create_playlist(&destination_name, &report.ordered_ids, &user_token)
        .await;
    print_report(&report);

    let created = creation.context("creating destination playlist")?;
    println!(
        "\nCreated destination playlist \"{}\" ({})",
        created.name, created.id
    );
    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn print_report(report: &ResolutionReport) {
    if !report.not_found.is_empty() {
        println!("\nTracks not found on the destination catalog:");
        for track in &report.not_found {
            if track.has_album() {
                println!("- {} by {} ({})", track.title, track.artist, track.album);
            } else {
                println!("- {} by {}", track.title, track.artist);
            }
        }
    }

    println!(
        "\nTransferred {} out of {} tracks",
        report.transferred(),
        report.total
    );
    if report.total > 0 {
        println!("Success rate: {:.1}%", report.success_rate() * 100.0);
    }
}
