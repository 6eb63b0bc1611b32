//! Audio plumbing
//!
//! Procedurally described sound effects played through an optional sink.
//! Each cue is a short list of tones; the sink decides how to voice them.

use crate::settings::AudioSettings;
use crate::sim::{GameEvent, RoundOutcome};

/// One tone of a cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Start frequency in Hz
    pub freq: f32,
    /// End frequency in Hz (equal to `freq` for a flat tone)
    pub end_freq: f32,
    /// Offset from the start of the cue, in seconds
    pub delay: f32,
    pub duration: f32,
    /// Relative gain (0.0 - 1.0)
    pub gain: f32,
}

const fn tone(freq: f32, end_freq: f32, delay: f32, duration: f32, gain: f32) -> Tone {
    Tone {
        freq,
        end_freq,
        delay,
        duration,
        gain,
    }
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Quick upward whoosh
    Dash,
    /// Ball grabbed
    Pickup,
    /// Ball released
    Throw,
    /// Ball hits a player
    Hit,
    /// Player knocked out
    Elimination,
    /// Ball reappears at a spawn point
    BallRespawn,
    /// Round decided with a survivor
    RoundEnd,
    /// Round ended with nobody standing
    Draw,
    /// New round starting
    RoundStart,
    /// Final results
    MatchOver,
}

impl SoundEffect {
    /// Cue for a gameplay event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Dashed { .. } => Some(Self::Dash),
            GameEvent::BallPickedUp { .. } => Some(Self::Pickup),
            GameEvent::BallThrown { .. } => Some(Self::Throw),
            GameEvent::PlayerDamaged { .. } => Some(Self::Hit),
            GameEvent::PlayerEliminated { .. } => Some(Self::Elimination),
            GameEvent::BallRespawned { .. } => Some(Self::BallRespawn),
            GameEvent::RoundResolved {
                outcome: RoundOutcome::Draw,
                ..
            } => Some(Self::Draw),
            GameEvent::RoundResolved { .. } => Some(Self::RoundEnd),
            GameEvent::RoundChanged { .. } => Some(Self::RoundStart),
            GameEvent::MatchOver { .. } => Some(Self::MatchOver),
            GameEvent::ScoreChanged { .. } => None,
        }
    }

    pub fn tones(self) -> &'static [Tone] {
        match self {
            Self::Dash => const { &[tone(300.0, 900.0, 0.0, 0.12, 0.3)] },
            Self::Pickup => const { &[
                tone(600.0, 600.0, 0.0, 0.06, 0.25),
                tone(900.0, 900.0, 0.05, 0.08, 0.25),
            ] },
            Self::Throw => const { &[tone(500.0, 200.0, 0.0, 0.15, 0.35)] },
            Self::Hit => const { &[tone(180.0, 80.0, 0.0, 0.2, 0.5)] },
            Self::Elimination => const { &[
                tone(400.0, 300.0, 0.0, 0.15, 0.4),
                tone(300.0, 150.0, 0.15, 0.3, 0.4),
            ] },
            Self::BallRespawn => const { &[tone(1200.0, 1200.0, 0.0, 0.1, 0.2)] },
            Self::RoundEnd => const { &[
                tone(400.0, 400.0, 0.0, 0.15, 0.3),
                tone(500.0, 500.0, 0.1, 0.15, 0.3),
                tone(600.0, 600.0, 0.2, 0.15, 0.3),
                tone(800.0, 800.0, 0.3, 0.25, 0.3),
            ] },
            Self::Draw => const { &[
                tone(400.0, 400.0, 0.0, 0.2, 0.3),
                tone(400.0, 300.0, 0.2, 0.35, 0.3),
            ] },
            Self::RoundStart => const { &[
                tone(440.0, 440.0, 0.0, 0.1, 0.3),
                tone(880.0, 880.0, 0.15, 0.2, 0.3),
            ] },
            Self::MatchOver => const { &[
                tone(500.0, 500.0, 0.0, 0.2, 0.35),
                tone(600.0, 600.0, 0.12, 0.2, 0.35),
                tone(700.0, 700.0, 0.24, 0.2, 0.35),
                tone(800.0, 800.0, 0.36, 0.2, 0.35),
                tone(1000.0, 1000.0, 0.48, 0.4, 0.35),
            ] },
        }
    }
}

/// Audio output backend
pub trait AudioSink {
    fn set_volume(&mut self, volume: f32);
    fn volume(&self) -> f32;
    /// Voice a cue at the given effective volume
    fn play(&mut self, effect: SoundEffect, tones: &[Tone], volume: f32);
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Option<Box<dyn AudioSink>>,
    master_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AudioManager {
    pub fn new(sink: Option<Box<dyn AudioSink>>) -> Self {
        if sink.is_none() {
            log::warn!("No audio sink - audio disabled");
        }
        Self {
            sink,
            master_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(sink: Option<Box<dyn AudioSink>>, settings: &AudioSettings) -> Self {
        let mut audio = Self::new(sink);
        if audio.sink.is_some() {
            audio.set_volume(settings.master_volume);
        }
        audio.set_muted(settings.muted);
        audio
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        let Some(sink) = self.sink.as_mut() else {
            log::error!("Cannot set volume to {vol}: no audio sink");
            return;
        };
        self.master_volume = vol.clamp(0.0, 1.0);
        sink.set_volume(self.master_volume);
    }

    /// Sink volume, full volume when there is no sink
    pub fn volume(&self) -> f32 {
        self.sink.as_ref().map_or(1.0, |s| s.volume())
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(sink) = self.sink.as_mut() else { return };
        sink.play(effect, effect.tones(), vol);
    }

    /// Play the cue for each event that has one
    pub fn play_events<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for effect in events.into_iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PlayerId;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorded {
        volume: f32,
        played: Vec<(SoundEffect, f32)>,
    }

    struct TestSink(Rc<RefCell<Recorded>>);

    impl AudioSink for TestSink {
        fn set_volume(&mut self, volume: f32) {
            self.0.borrow_mut().volume = volume;
        }

        fn volume(&self) -> f32 {
            self.0.borrow().volume
        }

        fn play(&mut self, effect: SoundEffect, tones: &[Tone], volume: f32) {
            assert!(!tones.is_empty());
            self.0.borrow_mut().played.push((effect, volume));
        }
    }

    fn with_sink() -> (AudioManager, Rc<RefCell<Recorded>>) {
        let rec = Rc::new(RefCell::new(Recorded::default()));
        (AudioManager::new(Some(Box::new(TestSink(rec.clone())))), rec)
    }

    #[test]
    fn test_volume_without_sink() {
        let mut audio = AudioManager::default();
        audio.set_volume(0.3);
        assert_eq!(audio.volume(), 1.0);
        audio.play(SoundEffect::Hit);
    }

    #[test]
    fn test_volume_clamps_and_forwards() {
        let (mut audio, rec) = with_sink();
        audio.set_volume(1.7);
        assert_eq!(rec.borrow().volume, 1.0);
        audio.set_volume(-0.5);
        assert_eq!(audio.volume(), 0.0);
        audio.set_volume(0.4);
        assert_eq!(audio.volume(), 0.4);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let (mut audio, rec) = with_sink();
        audio.set_muted(true);
        audio.play(SoundEffect::Throw);
        assert!(rec.borrow().played.is_empty());

        audio.set_muted(false);
        audio.play(SoundEffect::Throw);
        assert_eq!(rec.borrow().played, vec![(SoundEffect::Throw, 1.0)]);
    }

    #[test]
    fn test_event_cues() {
        let (mut audio, rec) = with_sink();
        let events = [
            GameEvent::BallPickedUp { player: PlayerId(0) },
            GameEvent::ScoreChanged { player: PlayerId(0), score: 1 },
            GameEvent::PlayerEliminated { player: PlayerId(1) },
        ];
        audio.play_events(&events);
        let played: Vec<SoundEffect> = rec.borrow().played.iter().map(|p| p.0).collect();
        assert_eq!(played, vec![SoundEffect::Pickup, SoundEffect::Elimination]);
    }

    #[test]
    fn test_every_cue_has_tones() {
        let all = [
            SoundEffect::Dash,
            SoundEffect::Pickup,
            SoundEffect::Throw,
            SoundEffect::Hit,
            SoundEffect::Elimination,
            SoundEffect::BallRespawn,
            SoundEffect::RoundEnd,
            SoundEffect::Draw,
            SoundEffect::RoundStart,
            SoundEffect::MatchOver,
        ];
        for effect in all {
            let tones = effect.tones();
            assert!(!tones.is_empty(), "{:?} has no tones", effect);
            assert!(tones.iter().all(|t| t.freq > 0.0 && t.duration > 0.0));
        }
    }

    #[test]
    fn test_draw_has_its_own_cue() {
        let draw = GameEvent::RoundResolved {
            round: 2,
            outcome: RoundOutcome::Draw,
        };
        let win = GameEvent::RoundResolved {
            round: 2,
            outcome: RoundOutcome::Survivor(PlayerId(0)),
        };
        assert_eq!(SoundEffect::for_event(&draw), Some(SoundEffect::Draw));
        assert_eq!(SoundEffect::for_event(&win), Some(SoundEffect::RoundEnd));
    }

    #[test]
    fn test_from_settings() {
        let rec = Rc::new(RefCell::new(Recorded::default()));
        let settings = AudioSettings {
            master_volume: 0.25,
            muted: true,
        };
        let audio = AudioManager::from_settings(Some(Box::new(TestSink(rec.clone()))), &settings);
        assert_eq!(audio.volume(), 0.25);
        assert!(audio.is_muted());
    }
}
