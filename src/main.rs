//! Blob Sallad headless driver
//!
//! Runs a scripted session against the simulation and prints one JSON
//! snapshot per line. Usage: `blob-sallad [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io::{self, BufWriter, Write};
    use std::path::PathBuf;

    use blob_sallad::from_pixels;
    use blob_sallad::settings::Settings;
    use blob_sallad::sim::{Direction, PointerEvent, SimState, TickInput, tick};
    use blob_sallad::{SimError, Vector2};

    /// Ticks between printed snapshots
    const REPORT_EVERY: u64 = 20;

    /// What a scripted step feeds the simulation on its first tick
    enum Action {
        Input(TickInput),
        /// Press the pointer on the first live blob, as a renderer would
        /// report it in pixels
        GrabFirst,
        Pointer(PointerEvent),
    }

    /// One scripted step, followed by idle ticks
    struct Step {
        label: &'static str,
        action: Action,
        ticks: u32,
    }

    impl Step {
        fn input(label: &'static str, input: TickInput) -> Self {
            Self {
                label,
                action: Action::Input(input),
                ticks: 1,
            }
        }

        fn idle(ticks: u32) -> Self {
            Self {
                label: "settle",
                action: Action::Input(TickInput::default()),
                ticks,
            }
        }

        fn pointer(label: &'static str, event: PointerEvent) -> Self {
            Self {
                label,
                action: Action::Pointer(event),
                ticks: 1,
            }
        }
    }

    fn script(settings: &Settings) -> Vec<Step> {
        let scale = settings.scale_factor;
        let push = |d: Direction, mag: f64| TickInput {
            push: Some(d.force(mag)),
            ..Default::default()
        };
        let split = TickInput {
            split: true,
            ..Default::default()
        };
        let join = TickInput {
            join: true,
            ..Default::default()
        };
        let toggle = TickInput {
            toggle_gravity: true,
            ..Default::default()
        };

        let target = from_pixels(Vector2::new(400.0, 180.0), scale);

        vec![
            Step::idle(40),
            Step::input("split", split.clone()),
            Step::idle(40),
            Step::input("split", split.clone()),
            Step::input("split", split),
            Step::idle(40),
            Step::input("nudge right", push(Direction::Right, settings.button_nudge)),
            Step::idle(20),
            Step::input("nudge up", push(Direction::Up, settings.key_nudge)),
            Step::idle(20),
            Step {
                label: "grab",
                action: Action::GrabFirst,
                ticks: 1,
            },
            Step::pointer("drag", PointerEvent::Move(target)),
            Step::idle(20),
            Step::pointer("release", PointerEvent::Release),
            Step::input("toggle gravity", toggle.clone()),
            Step::idle(40),
            Step::input("toggle gravity", toggle),
            Step::input("join", join.clone()),
            Step::idle(20),
            Step::input("join", join.clone()),
            Step::input("join", join),
            Step::idle(40),
        ]
    }

    fn first_input(state: &SimState, action: &Action, scale: f64) -> TickInput {
        let pointer = match action {
            Action::Input(input) => return input.clone(),
            Action::Pointer(event) => *event,
            Action::GrabFirst => {
                let view = state.snapshot().to_pixels(scale);
                match view.blobs.first() {
                    Some(blob) => PointerEvent::Press(from_pixels(blob.center, scale)),
                    None => return TickInput::default(),
                }
            }
        };
        TickInput {
            pointer: Some(pointer),
            ..Default::default()
        }
    }

    fn report<W: Write>(state: &SimState, out: &mut W) -> Result<(), SimError> {
        let line = serde_json::to_string(&state.snapshot())?;
        writeln!(out, "{}", line)?;
        Ok(())
    }

    pub fn run() -> Result<(), SimError> {
        let path = std::env::args().nth(1).map(PathBuf::from);
        let settings = Settings::load(path.as_deref());
        let mut state = SimState::new(&settings)?;

        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());

        report(&state, &mut out)?;
        for step in script(&settings) {
            log::debug!("{} ({} ticks)", step.label, step.ticks);
            for n in 0..step.ticks {
                let input = if n == 0 {
                    first_input(&state, &step.action, settings.scale_factor)
                } else {
                    TickInput::default()
                };
                tick(&mut state, &input, settings.timestep);
                if state.time_ticks % REPORT_EVERY == 0 {
                    report(&state, &mut out)?;
                }
            }
        }
        report(&state, &mut out)?;
        out.flush()?;

        log::info!(
            "Finished after {} ticks with {} blob(s)",
            state.time_ticks,
            state.population.active_count()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Blob Sallad (headless) starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Embedders drive `sim::tick` directly on this target
}
