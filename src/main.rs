use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    style::{Color, ResetColor, SetBackgroundColor},
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ledcube::{
    AnimationDriver, CancellationSignal, LedStrip, MemoryStrip, Outcome, Scenario, Settings,
    SpinPacer, TerminalStrip, VirtualClock,
};
use std::{
    fs::File,
    io::{self, Stdout},
    path::PathBuf,
    sync::Mutex,
    thread::{self, JoinHandle},
    time::Duration,
};
use tracing::{info, warn, Level};

/// Frames given to the endless animations when nothing can cancel them.
const HEADLESS_FRAMES: u64 = 500;

#[derive(Parser, Debug)]
#[command(name = "ledcube", version)]
#[command(about = "Animations for a serpentine-wired RGB LED cube, previewed in the terminal")]
struct Args {
    /// Cube edge length
    #[arg(long, default_value_t = 4)]
    side: usize,

    /// First scenario to play
    #[arg(long, value_enum, default_value_t = Scenario::GreenFire)]
    scenario: Scenario,

    /// Fixed random seed (default: fresh entropy for every run)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop the fire after N frames instead of running until skipped
    #[arg(long)]
    fire_frames: Option<u64>,

    /// Stop the rain after N frames instead of running until skipped
    #[arg(long)]
    rain_frames: Option<u64>,

    /// Chance in percent that a dark strand starts a new drop each frame
    #[arg(long, default_value_t = 5)]
    ignition_percent: u8,

    /// Number of draws of the random fade
    #[arg(long, default_value_t = 16_000)]
    fade_draws: u64,

    /// Hold after the sweeps and the fade finish, in ms
    #[arg(long, default_value_t = 2000)]
    linger_ms: u64,

    /// Run every scenario once against an in-memory strip and print a summary
    #[arg(long, default_value_t = false)]
    headless: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,
}

impl Args {
    fn settings(&self) -> Settings {
        let mut s = Settings {
            side: self.side,
            seed: self.seed,
            linger_ms: self.linger_ms,
            ..Settings::default()
        };
        s.fire.frames = self.fire_frames;
        s.rain.frames = self.rain_frames;
        s.rain.ignition_percent = self.ignition_percent;
        s.fade.draws = self.fade_draws;
        s
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let settings = args.settings();
    settings.validate().context("invalid settings")?;

    if args.headless {
        return run_headless(settings);
    }

    let mut out = io::stdout();

    terminal::enable_raw_mode()?;
    execute!(
        out,
        EnterAlternateScreen,
        DisableLineWrap,
        cursor::Hide,
        SetBackgroundColor(Color::Black),
        Clear(ClearType::All)
    )?;

    let result = run(&mut out, args.scenario, settings);

    execute!(
        out,
        ResetColor,
        cursor::Show,
        EnableLineWrap,
        LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;

    result
}

fn init_logging(args: &Args) -> Result<()> {
    match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("could not create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_max_level(args.log_level)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            // stderr shares the screen with the preview, keep it quiet
            let level = if args.headless {
                args.log_level
            } else {
                Level::WARN
            };
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

/// Scenario selection loop: play the current scenario until it is skipped,
/// replaying it whenever it finishes on its own.
fn run(out: &mut Stdout, first: Scenario, settings: Settings) -> Result<()> {
    let skip = CancellationSignal::new();
    let quit = CancellationSignal::new();
    let input = spawn_input(skip.clone(), quit.clone());

    let strip = TerminalStrip::new(out, settings.side);
    let mut driver = AnimationDriver::new(strip, SpinPacer, skip.clone(), settings)?;

    let mut scenario = first;
    let result = loop {
        if quit.is_raised() {
            break Ok(());
        }

        driver
            .strip_mut()
            .set_title(format!("ledcube · {scenario}"));

        let outcome = match driver.run(scenario) {
            Ok(outcome) => outcome,
            Err(err) => break Err(err).context("LED strip failed"),
        };

        if skip.is_raised() {
            skip.clear();
            scenario = scenario.next();
        } else if outcome == Outcome::Aborted {
            scenario = scenario.next();
        }
    };

    quit.raise();
    if input.join().is_err() {
        warn!("input thread panicked");
    }
    result
}

/// Keyboard reader standing in for the cube's push button.
fn spawn_input(skip: CancellationSignal, quit: CancellationSignal) -> JoinHandle<()> {
    thread::spawn(move || {
        while !quit.is_raised() {
            match event::poll(Duration::from_millis(50)) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(err) => {
                    warn!(%err, "keyboard unavailable");
                    return;
                }
            }

            let key = match event::read() {
                Ok(Event::Key(k)) if k.kind == KeyEventKind::Press => k,
                _ => continue,
            };

            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    quit.raise();
                    skip.raise();
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    quit.raise();
                    skip.raise();
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char(' ') | KeyCode::Enter => {
                    skip.raise();
                }
                _ => {}
            }
        }
    })
}

/// Play each scenario once on a virtual clock and report what it left lit.
fn run_headless(mut settings: Settings) -> Result<()> {
    settings.fire.frames = settings.fire.frames.or(Some(HEADLESS_FRAMES));
    settings.rain.frames = settings.rain.frames.or(Some(HEADLESS_FRAMES));

    let strip = MemoryStrip::new(settings.total_cell_count());
    let mut driver =
        AnimationDriver::new(strip, VirtualClock::new(), CancellationSignal::new(), settings)?;

    for scenario in Scenario::ALL {
        let refreshes = driver.strip().refreshes();
        let elapsed = driver.pacer().elapsed();

        let outcome = driver
            .run(scenario)
            .with_context(|| format!("{scenario} failed"))?;

        let strip = driver.strip();
        let lit = strip.lit();
        let total = strip.len();
        let frames = strip.refreshes() - refreshes;
        let took = driver.pacer().elapsed() - elapsed;
        info!(%scenario, ?outcome, frames, lit, "headless run");
        println!(
            "{:<11} {:?}: {} frames, {:.1}s, {}/{} lit",
            scenario.name(),
            outcome,
            frames,
            took.as_secs_f32(),
            lit,
            total
        );
    }
    Ok(())
}
