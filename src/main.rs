//! Ring Escape headless runner
//!
//! Runs the simulation at a fixed frame rate with no window, logging
//! progress and the sound cues a real front end would play.
//!
//! Usage: `ring-escape [config.json] [seed]`

use ring_escape::Config;
use ring_escape::audio::{AudioCues, SoundEffect};
use ring_escape::consts::FRAME_DT;
use ring_escape::sim::{SimListener, Simulation};

/// Give up after this many simulated seconds
const TIME_LIMIT_SECS: f32 = 300.0;
/// Length of the song in one-second snippets
const SONG_SNIPPETS: usize = 180;

/// Forwards notifications to the cue sequencer and remembers the win
struct Frontend {
    cues: AudioCues,
    won: bool,
}

impl SimListener for Frontend {
    fn on_bounce(&mut self) {
        self.cues.on_bounce();
    }

    fn on_redirect(&mut self) {
        self.cues.on_redirect();
    }

    fn on_won(&mut self) {
        self.won = true;
    }
}

fn load_config(path: Option<&str>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    match Config::load(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{} - using default config", e);
            Config::default()
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Ring Escape (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first().map(String::as_str));
    let seed = args
        .get(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);

    let mut sim = Simulation::new(config, seed);
    let mut frontend = Frontend {
        cues: AudioCues::new(SONG_SNIPPETS),
        won: false,
    };
    sim.start();

    let mut cleared = 0;
    while !frontend.won && sim.elapsed() < TIME_LIMIT_SECS {
        sim.step(FRAME_DT, &mut frontend);
        frontend.cues.advance(FRAME_DT);

        for cue in frontend.cues.drain() {
            match cue {
                SoundEffect::RingBreak => log::debug!("cue: ring break"),
                SoundEffect::SongSnippet { index } => log::trace!("cue: snippet {}", index),
            }
        }

        if sim.rings_cleared() != cleared {
            cleared = sim.rings_cleared();
            log::info!(
                "{}/{} rings cleared, ball radius {:.3}",
                cleared,
                sim.rings().len(),
                sim.ball().radius
            );
        }
    }

    if frontend.won {
        log::info!("Escaped! {:.2}s, {} ticks", sim.elapsed(), sim.time_ticks());
    } else {
        log::info!(
            "Time limit reached with {}/{} rings cleared",
            sim.rings_cleared(),
            sim.rings().len()
        );
    }
}
