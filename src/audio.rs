//! Sound cue sequencing
//!
//! The simulation only says *that* something happened. This turns those
//! notifications into cues the host can play: a break sound per destroyed
//! ring, and the next one-second snippet of the song per redirect, so the
//! song plays along as the ball bounces.

use crate::sim::SimListener;

/// Minimum time between song snippets (seconds)
pub const SNIPPET_COOLDOWN: f32 = 0.1;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A ring broke
    RingBreak,
    /// Play song snippet `index` (one second each)
    SongSnippet { index: usize },
}

/// Rate-limited cue sequencer fed by the simulation
#[derive(Debug, Clone)]
pub struct AudioCues {
    /// Number of snippets the song was split into (0 = no song loaded)
    snippet_count: usize,
    next_snippet: usize,
    clock: f32,
    last_snippet_time: Option<f32>,
    muted: bool,
    pending: Vec<SoundEffect>,
}

impl AudioCues {
    pub fn new(snippet_count: usize) -> Self {
        if snippet_count == 0 {
            log::warn!("No song snippets available - redirects will be silent");
        }
        Self {
            snippet_count,
            next_snippet: 0,
            clock: 0.0,
            last_snippet_time: None,
            muted: false,
            pending: Vec::new(),
        }
    }

    /// Advance the cooldown clock by real frame time
    pub fn advance(&mut self, dt: f32) {
        self.clock += dt;
    }

    /// Mute/unmute; muted cues are dropped, not queued
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Start the song over from the first snippet
    pub fn reset_sequence(&mut self) {
        self.next_snippet = 0;
    }

    /// Index of the snippet the next redirect will play
    pub fn next_snippet(&self) -> usize {
        self.next_snippet
    }

    /// Take the cues raised since the last call
    pub fn drain(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.pending)
    }

    fn cooling_down(&self) -> bool {
        self.last_snippet_time
            .is_some_and(|last| self.clock - last <= SNIPPET_COOLDOWN)
    }
}

impl SimListener for AudioCues {
    fn on_bounce(&mut self) {
        if !self.muted {
            self.pending.push(SoundEffect::RingBreak);
        }
    }

    fn on_redirect(&mut self) {
        if self.muted || self.snippet_count == 0 || self.cooling_down() {
            return;
        }
        let index = self.next_snippet;
        self.pending.push(SoundEffect::SongSnippet { index });
        self.next_snippet = (index + 1) % self.snippet_count;
        self.last_snippet_time = Some(self.clock);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippets_play_in_order_and_wrap() {
        let mut cues = AudioCues::new(3);
        for _ in 0..4 {
            cues.on_redirect();
            cues.advance(0.2);
        }
        assert_eq!(
            cues.drain(),
            vec![
                SoundEffect::SongSnippet { index: 0 },
                SoundEffect::SongSnippet { index: 1 },
                SoundEffect::SongSnippet { index: 2 },
                SoundEffect::SongSnippet { index: 0 },
            ]
        );
        assert!(cues.drain().is_empty());
    }

    #[test]
    fn test_cooldown_drops_rapid_redirects() {
        let mut cues = AudioCues::new(10);
        cues.on_redirect();
        cues.advance(0.05);
        cues.on_redirect();
        cues.advance(0.1);
        cues.on_redirect();
        assert_eq!(
            cues.drain(),
            vec![
                SoundEffect::SongSnippet { index: 0 },
                SoundEffect::SongSnippet { index: 1 },
            ]
        );
    }

    #[test]
    fn test_ring_break_ignores_cooldown() {
        let mut cues = AudioCues::new(2);
        cues.on_redirect();
        cues.on_bounce();
        cues.on_bounce();
        assert_eq!(
            cues.drain(),
            vec![
                SoundEffect::SongSnippet { index: 0 },
                SoundEffect::RingBreak,
                SoundEffect::RingBreak,
            ]
        );
    }

    #[test]
    fn test_reset_and_mute() {
        let mut cues = AudioCues::new(4);
        cues.on_redirect();
        cues.advance(1.0);
        cues.on_redirect();
        assert_eq!(cues.next_snippet(), 2);
        cues.reset_sequence();
        assert_eq!(cues.next_snippet(), 0);

        cues.drain();
        cues.set_muted(true);
        cues.advance(1.0);
        cues.on_redirect();
        cues.on_bounce();
        assert!(cues.drain().is_empty());
    }

    #[test]
    fn test_no_song_is_silent() {
        let mut cues = AudioCues::new(0);
        cues.on_redirect();
        cues.on_bounce();
        assert_eq!(cues.drain(), vec![SoundEffect::RingBreak]);
    }
}
