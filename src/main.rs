use std::{fs, process, sync::Mutex};

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use celpad::editor::{config::EditorConfig, Editor};
use celpad::player::{Player, RefreshTicker};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const DRAW_USAGE: &str = "celpad draw [--fps <n>] [--no-loop]";
const CONFIG_USAGE: &str = "celpad config";

fn run() -> Result<()> {
    init_logging()?;

    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        None | Some("draw") => {
            let mut config = EditorConfig::load();
            apply_draw_flags(&mut config, args)?;
            draw(config)
        }
        Some("config") => {
            let config = EditorConfig::load();
            println!("{}", serde_json::to_string_pretty(&config)?);
            eprintln!("(read from {})", EditorConfig::config_path().display());
            Ok(())
        }
        _ => bail!(
            "celpad — frame-by-frame terminal sketchpad\n\nUsage:\n  {DRAW_USAGE}\n  {CONFIG_USAGE}"
        ),
    }
}

fn apply_draw_flags(config: &mut EditorConfig, mut args: impl Iterator<Item = String>) -> Result<()> {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--fps" => {
                let value = args.next().context(DRAW_USAGE)?;
                config.playback.player.fps = value
                    .parse()
                    .with_context(|| format!("Invalid --fps value {value:?}"))?;
            }
            "--no-loop" => config.playback.player.loop_playback = false,
            other => bail!("Unknown argument {other:?}\n\nUsage:\n  {DRAW_USAGE}"),
        }
    }
    Ok(())
}

fn draw(config: EditorConfig) -> Result<()> {
    // Fail before the terminal is taken over, not when playback starts.
    Player::new(config.playback.player.clone()).context("Invalid playback settings")?;
    RefreshTicker::new(config.playback.refresh_hz).context("Invalid playback settings")?;
    tracing::info!(
        fps = config.playback.player.fps,
        looping = config.playback.player.loop_playback,
        "starting editor"
    );
    let mut editor = Editor::new(config)?;
    editor.run()
}

/// The terminal is the drawing surface, so logs go to the file named by
/// `CELPAD_LOG`. Without it, nothing is logged.
fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("CELPAD_LOG") else {
        return Ok(());
    };
    let file = fs::File::create(&path).with_context(|| format!("Failed to create log file {path}"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
