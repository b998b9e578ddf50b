//! Soccer Ball Viewer - Headless Entry Point
//!
//! Loads the data document, shows the first design and then switches designs
//! from stdin: `n` for next, `p` for previous, a number to jump, `q` to quit.

use std::path::Path;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use soccer_ball_viewer::geometry::PanelMesh;
use soccer_ball_viewer::settings::DEFAULT_SETTINGS_FILE;
use soccer_ball_viewer::switcher::{switch_queue, SwitchRequester};
use soccer_ball_viewer::telemetry::{init_logging, LogConfig};
use soccer_ball_viewer::texture::AssetPaths;
use soccer_ball_viewer::viewer::LoggingObserver;
use soccer_ball_viewer::{
    DesignSwitcher, FsImageSource, SoccerBallData, TextureSynthesizer, ViewerCamera, ViewerSettings,
};

/// Viewport assumed until a real shell reports its size
const DEFAULT_VIEWPORT: (u32, u32) = (1280, 720);

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _log_guard = init_logging(&LogConfig::default())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let settings = ViewerSettings::load_or_default(Path::new(DEFAULT_SETTINGS_FILE))
        .context("Failed to load viewer settings")?;
    tracing::info!("Viewer mode: {:?}", settings.mode);

    let data = SoccerBallData::fetch(&settings.catalog_path, settings.mode)
        .await
        .context("Failed to load soccer ball data")?;

    let mesh = PanelMesh::build(&data.object).context("Invalid soccer ball mesh")?;
    if settings.mode.is_debug() {
        tracing::debug!("Debug markers: {:?}", mesh.debug_markers());
    }

    let mut camera = ViewerCamera::new(&settings.camera, 1.0);
    camera.resize(DEFAULT_VIEWPORT.0, DEFAULT_VIEWPORT.1);
    tracing::debug!("Camera fov {:.2} at distance {}", camera.fov(), camera.distance());

    let design_count = data.catalog.len();
    let synthesizer = TextureSynthesizer::new(
        FsImageSource,
        AssetPaths::new(&settings.asset_root),
        settings.mode,
    );
    let mut switcher = DesignSwitcher::new(
        data.catalog,
        synthesizer,
        LoggingObserver,
        settings.name_character_limit,
    );

    // A failed first design leaves blank materials; the user can still navigate
    if let Err(e) = switcher.select_design(0).await {
        tracing::warn!("Starting without a design on screen: {}", e);
    }

    let (requester, queue) = switch_queue(0, design_count);
    let input = read_commands(requester);
    let driver = queue.run(&mut switcher);
    let (input, switches) = tokio::join!(input, driver);
    input.context("Failed to read commands")?;

    tracing::info!("Exiting after {} design switch(es)", switches);
    Ok(())
}

/// Map stdin lines to switch requests until `q` or end of input
async fn read_commands(requester: SwitchRequester) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "n" | "next" => requester.step(1),
            "p" | "prev" | "previous" => requester.step(-1),
            "q" | "quit" => break,
            "" => {}
            other => match other.parse::<usize>() {
                Ok(index) => requester.request(index),
                Err(_) => tracing::warn!("Unknown command {:?} (use n, p, <index> or q)", other),
            },
        }
    }
    // Dropping the requester closes the queue
    Ok(())
}
