//! `orey`: a terminal front end for the pet game runtime.
//!
//! Persists state under the platform data directory and syncs to the remote
//! backend when `API_BASE_URL`/`API_KEY` are set; otherwise the session is
//! fully offline.

use std::sync::Arc;

use anyhow::{Context, Result};
use pet_core::{Action, BuyItemAction, FeedPetAction, PlayWithPetAction, TapAction};
use runtime::{CacheStore, FileStore, HttpGateway, RemoteGateway, Runtime, RuntimeHandle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let dirs = directories::ProjectDirs::from("", "", "orey")
        .context("no home directory available")?;
    let store = Arc::new(FileStore::new(dirs.data_dir())?);
    info!(dir = %dirs.data_dir().display(), "using data directory");

    let mut builder = Runtime::builder().store(store as Arc<dyn CacheStore>);
    if let (Ok(base_url), Ok(api_key)) = (std::env::var("API_BASE_URL"), std::env::var("API_KEY"))
    {
        info!(%base_url, "remote sync enabled");
        let gateway = Arc::new(HttpGateway::new(base_url, api_key));
        builder = builder.gateway(gateway as Arc<dyn RemoteGateway>);
    }
    let runtime = builder.build()?;
    let handle = runtime.handle();

    println!("orey is awake. commands: tap [n] | feed | play | buy <price> | state | quit");
    repl(&handle).await?;

    runtime.shutdown().await?;
    Ok(())
}

async fn repl(handle: &RuntimeHandle) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut words = line.split_whitespace();
        match words.next() {
            Some("tap") => {
                let count: u32 = words.next().and_then(|w| w.parse().ok()).unwrap_or(1);
                for _ in 0..count {
                    handle.dispatch(Action::Tap(TapAction::new(1))).await?;
                }
                print_state(handle).await?;
            }
            Some("feed") => {
                handle.dispatch(Action::FeedPet(FeedPetAction)).await?;
                print_state(handle).await?;
            }
            Some("play") => {
                handle
                    .dispatch(Action::PlayWithPet(PlayWithPetAction))
                    .await?;
                print_state(handle).await?;
            }
            Some("buy") => match words.next().and_then(|w| w.parse::<u64>().ok()) {
                Some(price) => {
                    handle
                        .dispatch(Action::BuyItem(BuyItemAction::new(price)))
                        .await?;
                    print_state(handle).await?;
                }
                None => println!("usage: buy <price>"),
            },
            Some("state") => print_state(handle).await?,
            Some("quit") | Some("exit") => break,
            Some(other) => println!("unknown command: {other}"),
            None => {}
        }
    }
    Ok(())
}

async fn print_state(handle: &RuntimeHandle) -> Result<()> {
    let state = handle.state().await?;
    println!(
        "lvl {} | {} taps ({}/{} to evolve) | {} coins | energy {}/{} | satiety {} mood {} health {}",
        state.level.current,
        state.achievements.total_taps,
        state.progress.current,
        state.progress.required,
        state.coins,
        state.energy.current,
        state.energy.max,
        state.profile.satiety,
        state.profile.mood,
        state.profile.health,
    );
    Ok(())
}
