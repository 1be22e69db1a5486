//! Crook & Souls headless runner
//!
//! Plays a run with the built-in autopilot at a fixed 60 Hz and logs what
//! happened. Usage: `crook-souls [tuning.json] [--seed N] [--seconds S]`

mod headless {
    use std::path::PathBuf;

    use crook_souls::consts::FRAME_DT;
    use crook_souls::sim::{Arena, GamePhase, GameState, autopilot, tick};
    use crook_souls::{AudioMixer, LogSink, Tuning};

    const DEFAULT_SECONDS: f32 = 120.0;

    struct Args {
        tuning: Option<PathBuf>,
        seed: u64,
        seconds: f32,
    }

    fn parse_args() -> Result<Args, String> {
        let mut args = Args {
            tuning: None,
            seed: 0,
            seconds: DEFAULT_SECONDS,
        };
        let mut it = std::env::args().skip(1);
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--seed" => {
                    let v = it.next().ok_or("--seed needs a value")?;
                    args.seed = v.parse().map_err(|_| format!("bad seed: {v}"))?;
                }
                "--seconds" => {
                    let v = it.next().ok_or("--seconds needs a value")?;
                    args.seconds = v.parse().map_err(|_| format!("bad duration: {v}"))?;
                }
                other if other.starts_with("--") => return Err(format!("unknown flag {other}")),
                path => args.tuning = Some(PathBuf::from(path)),
            }
        }
        Ok(args)
    }

    pub fn run() -> std::process::ExitCode {
        env_logger::init();

        let args = match parse_args() {
            Ok(a) => a,
            Err(e) => {
                log::error!("{e}");
                eprintln!("usage: crook-souls [tuning.json] [--seed N] [--seconds S]");
                return std::process::ExitCode::FAILURE;
            }
        };

        let tuning = match &args.tuning {
            Some(path) => Tuning::load_or_default(path),
            None => Tuning::default(),
        };
        if let Err(e) = tuning.validate() {
            log::error!("Rejected tuning: {e}");
            return std::process::ExitCode::FAILURE;
        }

        let arena = Arena::default();
        let mut state = GameState::new(args.seed, tuning, &arena);
        let mixer = AudioMixer::default();
        let mut sink = LogSink::default();

        let max_frames = (args.seconds.max(0.0) / FRAME_DT).ceil() as u64;
        log::info!("Running up to {max_frames} frames");

        while state.frame < max_frames && state.phase == GamePhase::Playing {
            let input = autopilot(&state);
            tick(&mut state, &input, &arena, FRAME_DT);
            let events = state.drain_events();
            for event in &events {
                log::debug!("frame {}: {event:?}", state.frame);
            }
            mixer.dispatch(&events, &mut sink);
        }

        log::info!(
            "Run over after {} frames ({:.1}s): {} kills, {} souls, {} ultimates, health {}/{}, {} cues",
            state.frame,
            state.time,
            state.kills,
            state.player.soul_count,
            state.ultimates_used,
            state.player.health,
            state.player.max_health,
            sink.played,
        );
        std::process::ExitCode::SUCCESS
    }
}

fn main() -> std::process::ExitCode {
    headless::run()
}
