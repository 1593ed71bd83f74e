//! placemap-app - run the map screen from a terminal
//!
//! Drives a headless map through the full screen lifecycle, searches places
//! with Photon and prints the resulting markers and camera.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use crossbeam_channel::TryRecvError;
use placemap::prelude::*;
use placemap::constants;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Profile {
    /// English labels
    Default,
    /// Japanese labels, camera over Shibuya
    Tokyo,
}

#[derive(Parser)]
#[command(name = "placemap")]
#[command(about = "Search nearby places and drop a marker on each result", long_about = None)]
struct Args {
    /// Place or address to search for
    query: String,

    /// Latitude of the simulated location fix
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of the simulated location fix
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lng: Option<f64>,

    /// JSON configuration file, overrides the profile
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "default")]
    profile: Profile,

    /// Display and search language
    #[arg(long)]
    language: Option<String>,

    /// Photon API endpoint
    #[arg(long, default_value = constants::DEFAULT_PHOTON_ENDPOINT)]
    endpoint: String,

    /// Seconds to wait for the search to settle
    #[arg(long, default_value = "15")]
    timeout: u64,

    /// Answer the location permission prompt with "deny"
    #[arg(long)]
    deny_permission: bool,
}

type Screen<N> = MapScreen<HeadlessMap, PhotonBackend, StaticPermissions, N>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(&args)?;
    config.validate().context("invalid configuration")?;

    let map = HeadlessMap::new(Point::new(1080.0, 1920.0)).auto_complete_styles(true);
    let (backend, completions) = PhotonBackend::new(args.endpoint.clone());
    let permissions = if args.deny_permission {
        StaticPermissions::denied()
    } else {
        StaticPermissions::granted()
    };
    let notices = |notice: Notice| eprintln!("notice: {}", notice);

    let mut screen = MapScreen::new(config, map, backend, permissions, notices);
    screen.on_create()?;
    screen.on_start()?;

    // StaticPermissions never answers a prompt, so answer with its state
    if let Some(&request_code) = screen.permissions().requests().first() {
        let granted = screen.permissions().is_granted(Permission::FineLocation);
        screen.handle(ScreenEvent::PermissionResult {
            request_code,
            granted,
        })?;
    }
    pump(&mut screen)?;

    if !screen.session().is_ready() {
        bail!("map did not become ready: {:?}", screen.session().state());
    }

    if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
        screen.map_mut()?.push_position(LatLng::new(lat, lng));
        pump(&mut screen)?;
    }

    screen.handle(ScreenEvent::QuerySubmitted(args.query.clone()))?;

    let deadline = Instant::now() + Duration::from_secs(args.timeout);
    while screen.search().has_pending() {
        if Instant::now() > deadline {
            bail!("search timed out after {}s", args.timeout);
        }
        match completions.try_recv() {
            Ok(completion) => {
                screen.handle(ScreenEvent::Search(completion))?;
                pump(&mut screen)?;
            }
            Err(TryRecvError::Empty) => tokio::time::sleep(Duration::from_millis(50)).await,
            Err(TryRecvError::Disconnected) => break,
        }
    }

    for (i, marker) in screen.markers().markers().enumerate() {
        println!(
            "{:>2}. {} {}",
            i + 1,
            marker.title().unwrap_or("(untitled)"),
            marker.position()
        );
    }
    let camera = screen.session().camera()?;
    println!("camera: center {} zoom {:.1}", camera.center, camera.zoom);

    screen.handle(ScreenEvent::Destroy)?;
    Ok(())
}

fn load_config(args: &Args) -> anyhow::Result<ScreenConfig> {
    let mut config = match &args.config {
        Some(path) => ScreenConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => match args.profile {
            Profile::Default => ScreenProfile::Default.resolve(),
            Profile::Tokyo => ScreenProfile::Tokyo.resolve(),
        },
    };
    if let Some(language) = &args.language {
        config.style.language = language.clone();
        config.search.language = language.clone();
    }
    Ok(config)
}

/// Feeds everything the headless map queued back into the screen.
fn pump<N: NoticeSink>(screen: &mut Screen<N>) -> anyhow::Result<()> {
    loop {
        let events = screen.map_mut()?.take_events();
        if events.is_empty() {
            return Ok(());
        }
        for event in events {
            log::debug!("dispatching {}", event.kind());
            screen.handle(event)?;
        }
    }
}
