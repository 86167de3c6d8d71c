//! `touchpad-replay`: feeds a recorded input script through the translator.
//!
//! Wires the translator to a log-only remote sink (or a recording sink with
//! `--json`), a standalone viewport, and the portable gesture detector, then
//! replays every script step in order.
//!
//! ```text
//! main()
//!  └─ load_config()            -- TOML settings (or defaults)
//!  └─ load_script()            -- JSON steps
//!  └─ TouchpadTranslator::new()
//!  └─ replay loop
//!       ├─ touch    -> on_touch_event
//!       ├─ key_*    -> on_key_down / on_key_up
//!       ├─ poll     -> poll (gesture timers)
//!       └─ sleep    -> real-time wait (d-pad mover ticks)
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::runtime::Handle;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use touchpad_client::application::dpad_mouse::DpadMouseHandler;
use touchpad_client::application::mouse_mover::MouseMover;
use touchpad_client::application::ports::{ClickPacer, RemoteSink};
use touchpad_client::application::remote_pointer::RemotePointer;
use touchpad_client::application::translate_touch::{Collaborators, TouchpadTranslator};
use touchpad_client::infrastructure::{
    config::load_config,
    feedback::LogFeedback,
    gesture_detector::TouchGestureDetector,
    pacing::{NoPacer, TokioBlockingPacer},
    recording::RecordingSink,
    script::{load_script, ScriptStep},
    tracing_sink::TracingSink,
    viewport::ZoomViewport,
};
use touchpad_core::RemotePointerState;

/// Replays a touch/key script through the touchpad translator.
#[derive(Debug, Parser)]
#[command(name = "touchpad-replay", version)]
struct Args {
    /// JSON script to replay.
    script: PathBuf,

    /// Config file; defaults to the platform config path.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level, overriding the config file (RUST_LOG still wins).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Skip the real-time pause between click transitions.
    #[arg(long)]
    no_pacing: bool,

    /// Print the emitted remote events as JSON on stdout when done.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    let steps = load_script(&args.script)?;
    info!(steps = steps.len(), script = %args.script.display(), "replaying script");

    // ── Collaborators ─────────────────────────────────────────────────────────
    let recording = Arc::new(RecordingSink::new());
    let sink: Arc<dyn RemoteSink> = if args.json {
        Arc::clone(&recording) as Arc<dyn RemoteSink>
    } else {
        Arc::new(TracingSink::new())
    };
    let pacer: Arc<dyn ClickPacer> = if args.no_pacing {
        Arc::new(NoPacer)
    } else {
        Arc::new(TokioBlockingPacer)
    };

    let display = &config.display;
    let state = RemotePointerState::with_bounds(display.remote_width, display.remote_height)?;
    let pointer = RemotePointer::new(state, sink);
    let feedback = Arc::new(LogFeedback::new());

    let mover = MouseMover::new(pointer.clone(), config.timing.mover_tick(), Handle::current());
    let dpad = DpadMouseHandler::new(pointer.clone(), mover, config.input.dpad_settings());
    let parts = Collaborators {
        pointer,
        viewport: Arc::new(ZoomViewport::from_config(display)),
        feedback: Arc::clone(&feedback) as _,
        pacer,
        gestures: Box::new(TouchGestureDetector::new(config.timing.detector_settings())),
    };
    let mut translator = TouchpadTranslator::new(parts, dpad, config.timing.click_pacing());

    // ── Replay loop ───────────────────────────────────────────────────────────
    for (index, step) in steps.into_iter().enumerate() {
        debug!(index, ?step, "step");
        let consumed = match step {
            ScriptStep::Touch { event } => translator.on_touch_event(&event),
            ScriptStep::KeyDown { key } => translator.on_key_down(key),
            ScriptStep::KeyUp { key } => translator.on_key_up(key),
            ScriptStep::Poll { now_ms } => {
                translator.poll(now_ms);
                true
            }
            ScriptStep::Sleep { ms } => {
                tokio::time::sleep(Duration::from_millis(ms)).await;
                true
            }
        };
        if !consumed {
            debug!(index, "step not consumed");
        }
    }

    let (x, y) = translator.pointer().position();
    info!(
        x,
        y,
        indicator_shows = feedback.indicator_shows(),
        haptics = feedback.haptics(),
        "replay finished"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&recording.events())?);
    }
    Ok(())
}
