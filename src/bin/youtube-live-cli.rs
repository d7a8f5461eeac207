//! One-shot diagnostic CLI: run a single fetch cycle and print the result.
//!
//! Usage: `youtube-live-cli <url-or-video-id> <api-key>`

use eyre::Context;
use std::io::IsTerminal;
use tokio_util::sync::CancellationToken;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use youtube_live_panel::fetcher::{FetchLive, LiveDataFetcher, RefreshRequest};
use youtube_live_panel::video_id::extract_video_id;
use youtube_live_panel::youtube_api::YouTubeClient;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stdout().is_terminal())
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(url), Some(api_key)) = (args.next(), args.next()) else {
        eyre::bail!("usage: youtube-live-cli <url-or-video-id> <api-key>");
    };

    let video_id = extract_video_id(&url)
        .ok_or_else(|| eyre::eyre!("unable to determine the video ID from {url:?}"))?;

    let fetcher = LiveDataFetcher::new(YouTubeClient::new(reqwest::Client::new()));
    let data = fetcher
        .fetch(
            RefreshRequest { api_key, video_id },
            CancellationToken::new(),
        )
        .await
        .context("run fetch cycle")?;

    eprintln!("{}", data.status_text);
    eprintln!("{}", data.viewers_text);
    eprintln!("Live chat:");
    for (index, line) in data.comments.iter().enumerate() {
        eprintln!("  {index:>2}. {line}");
    }

    Ok(())
}
