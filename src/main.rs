// What you SEE:
// • draw mode: a white 32x32 grid. Hold Left Mouse to paint black cells.
//   C clears, P asks the classifier (result printed as JSON), ESC quits.
// • generate mode: G renders a synthetic digit. Up/Down change steps,
//   Left/Right change guidance, 0-9 pick a target digit, R picks random.

use anyhow::Context as _;
use clap::Parser as _;
use digit_pad::client::{GenerationParams, PlaceholderGenerator, UnconfiguredClassifier};
use digit_pad::config::{Cli, Mode, PadConfig};
use digit_pad::draw::{self, Drawer, Layout, PointerTracker};
use digit_pad::types::FrameBuffer;
use digit_pad::{DeviceBrushes, GenerationOutcome, Surface};
use minifb::Key;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = Cli::parse().validate().context("invalid arguments")?;
    tracing::info!(?cfg, "starting digit pad");

    let brushes = DeviceBrushes::standard()?;
    let mut surface = Surface::new(cfg.grid_size, cfg.cell_px, brushes)?;
    let layout = Layout::new(cfg.grid_size * cfg.cell_px as usize);
    surface.set_bounds(layout.canvas_bounds());

    let title = match cfg.mode {
        Mode::Draw => "Digit Pad - Draw",
        Mode::Generate => "Digit Pad - Generate",
    };
    let mut drawer = Drawer::new(title, layout.width, layout.height).context("opening window")?;

    match cfg.mode {
        Mode::Draw => run_draw(&mut drawer, &mut surface, layout),
        Mode::Generate => run_generate(&mut drawer, &mut surface, layout, &cfg),
    }
}

fn run_draw(drawer: &mut Drawer, surface: &mut Surface, layout: Layout) -> anyhow::Result<()> {
    let mut screen = FrameBuffer::new(layout.width, layout.height, draw::BACKGROUND);
    let mut tracker = PointerTracker::new();
    let mut classifier = UnconfiguredClassifier;
    let mut status = String::from("READY");
    let mut dirty = true;
    let mut last_cursor = None;

    while drawer.is_open() && !drawer.esc_pressed() {
        let cursor = drawer.mouse_pos();
        for event in tracker.update(drawer.left_mouse_down(), cursor) {
            dirty |= surface.handle(&event);
        }
        if cursor != last_cursor {
            last_cursor = cursor;
            dirty = true; // crosshair moved
        }

        if drawer.pressed_once(Key::C) {
            surface.clear();
            status = String::from("CLEARED");
            dirty = true;
        }
        if drawer.pressed_once(Key::P) {
            let outcome = surface.predict(&mut classifier);
            println!("{}", outcome.to_pretty_json()?);
            status = String::from(if outcome.is_failure() {
                "PREDICTION FAILED"
            } else {
                "PREDICTED - SEE TERMINAL"
            });
            dirty = true;
        }

        if dirty {
            let hud = ["DRAW | LMB: PAINT  C: CLEAR  P: PREDICT", status.as_str()];
            layout.compose(&mut screen, surface.raster(), &hud);
            if let Some((mx, my)) = cursor {
                draw::draw_crosshair(&mut screen, mx as i32, my as i32, 6, draw::CROSSHAIR);
            }
            drawer.present(&screen)?;
            dirty = false;
        } else {
            drawer.poll();
        }
    }
    Ok(())
}

fn run_generate(
    drawer: &mut Drawer,
    surface: &mut Surface,
    layout: Layout,
    cfg: &PadConfig,
) -> anyhow::Result<()> {
    let mut screen = FrameBuffer::new(layout.width, layout.height, draw::BACKGROUND);
    let mut generator = PlaceholderGenerator::new(cfg.grid_size, cfg.seed);
    let mut params = cfg.params;
    let mut status = String::from("READY");
    let mut dirty = true;

    while drawer.is_open() && !drawer.esc_pressed() {
        let before = params;
        if drawer.pressed_once(Key::Up) {
            params.nudge_steps(true);
        }
        if drawer.pressed_once(Key::Down) {
            params.nudge_steps(false);
        }
        if drawer.pressed_once(Key::Right) {
            params.nudge_guidance(true);
        }
        if drawer.pressed_once(Key::Left) {
            params.nudge_guidance(false);
        }
        if drawer.pressed_once(Key::R) {
            params.digit = None;
        }
        if let Some(d) = drawer.digit_pressed_once() {
            params.digit = Some(d);
        }
        dirty |= params != before;

        if drawer.pressed_once(Key::G) {
            status = match surface.generate(&mut generator, &params)? {
                GenerationOutcome::Generated => String::from("GENERATED"),
                GenerationOutcome::Fallback { .. } => {
                    String::from("GENERATION FAILED - FALLBACK SHOWN")
                }
            };
            dirty = true;
        }

        if dirty {
            let knobs = describe(&params);
            layout.compose(&mut screen, surface.raster(), &[knobs.as_str(), status.as_str()]);
            drawer.present(&screen)?;
            dirty = false;
        } else {
            drawer.poll();
        }
    }
    Ok(())
}

fn describe(params: &GenerationParams) -> String {
    let digit = params.digit.map_or(String::from("RANDOM"), |d| d.to_string());
    format!(
        "G: GO | STEPS {} | GUIDANCE {:.1} | DIGIT {}",
        params.steps, params.guidance_scale, digit
    )
}
