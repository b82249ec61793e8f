mod display;

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use far_west::compute::{set_view_size, tick};
use far_west::config::GameConfig;
use far_west::entities::{FrameInput, GameState};
use far_west::spawn::init_state;

const FRAME: Duration = Duration::from_micros(16_667); // ≈60 FPS

/// Frames a key stays down after its last press or repeat event. Terminals
/// without release events only send OS key-repeats, which arrive faster
/// than this.
const HOLD_WINDOW: u64 = 8;

#[derive(Parser)]
#[command(name = "far_west", about = "Top-down arcade shooter in the terminal")]
struct Opts {
    /// JSON file overriding the default gameplay settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,
    /// Write log output here instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn).parse_default_env();
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("when creating log file at {:?}", path))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    matches!(key_frame.get(key), Some(&last) if frame.saturating_sub(last) <= HOLD_WINDOW)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

fn chars(cs: &str) -> Vec<KeyCode> {
    cs.chars().map(KeyCode::Char).collect()
}

/// Build this frame's controls from held keys and keys pressed this frame.
fn frame_input(
    key_frame: &HashMap<KeyCode, u64>,
    pressed: &HashSet<KeyCode>,
    frame: u64,
) -> FrameInput {
    let just = |cs: &str| chars(cs).iter().any(|k| pressed.contains(k));
    FrameInput {
        move_up: any_held(key_frame, &chars("wWzZ"), frame),
        move_down: any_held(key_frame, &chars("sS"), frame),
        move_left: any_held(key_frame, &chars("aAqQ"), frame),
        move_right: any_held(key_frame, &chars("dD"), frame),
        look_up: is_held(key_frame, &KeyCode::Up, frame),
        look_down: is_held(key_frame, &KeyCode::Down, frame),
        look_left: is_held(key_frame, &KeyCode::Left, frame),
        look_right: is_held(key_frame, &KeyCode::Right, frame),
        shoot: just(" "),
        draw_revolver: just("1"),
        holster: just("0"),
        cycle_weapon: pressed.contains(&KeyCode::Tab),
        confirm: just(" "),
        pause: just("pP"),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key, so held movement and aim keys apply
/// every frame while one-shot actions (shoot, weapon, pause) only fire on
/// the frame their key went down.
fn game_loop<W: Write>(
    out: &mut W,
    mut state: GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> anyhow::Result<()> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Input ─────────────────────────────────────────────────────────────
        let mut pressed: HashSet<KeyCode> = HashSet::new();
        while let Ok(ev) = rx.try_recv() {
            if let Event::Resize(cols, rows) = ev {
                set_view_size(
                    &mut state,
                    f64::from(cols) * display::CELL_W,
                    f64::from(rows) * display::CELL_H,
                );
                continue;
            }
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    match code {
                        KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        _ => {}
                    }
                    // OS key-repeat arrives as repeated presses on classic
                    // terminals; only the first one is a fresh press.
                    if !is_held(&key_frame, &code, frame) {
                        pressed.insert(code);
                    }
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let input = frame_input(&key_frame, &pressed, frame);
        state = tick(&state, &input, rng);

        display::render(out, &state).context("when drawing a frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    init_logging(opts.log_file.as_ref())?;

    let mut config = match &opts.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if opts.seed.is_some() {
        config.seed = opts.seed;
    }
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!("starting with {:?}", config);
    let mut state = init_state(config, &mut rng);

    // The camera centres the player in the terminal, whatever the world size.
    let (cols, rows) = terminal::size().context("when querying the terminal size")?;
    set_view_size(
        &mut state,
        f64::from(cols) * display::CELL_W,
        f64::from(rows) * display::CELL_H,
    );

    let mut out = BufWriter::new(stdout());
    let release_events = enter_terminal(&mut out).context("when setting up the terminal")?;

    // Blocking reads happen on their own thread; the loop drains the channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = game_loop(&mut out, state, &rx, &mut rng);
    leave_terminal(&mut out, release_events);
    result
}

/// Raw mode, alternate screen, hidden cursor. Returns whether the terminal
/// accepted the request for key-release events.
fn enter_terminal<W: Write>(out: &mut W) -> std::io::Result<bool> {
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?
        .execute(cursor::Hide)?;
    Ok(out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok())
}

/// Undo `enter_terminal`. Runs on every exit path, so failures are ignored.
fn leave_terminal<W: Write>(out: &mut W, release_events: bool) {
    if release_events {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}
