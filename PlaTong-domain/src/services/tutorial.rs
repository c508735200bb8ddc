//! Measurement guide session state
//!
//! `TutorialSession` is a plain state object: every command mutates it and
//! returns a [`Transition`] naming the side effects a driver has to carry out
//! (stopping a countdown, scheduling narration). It never touches a clock or
//! an audio device itself, see [`crate::services::player`] for that.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::entities::tutorial::{AudioEvent, SessionSnapshot, Step, TutorialCommand, TutorialPhase};

/// Tutorial errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TutorialError {
    /// A session needs at least one step
    #[error("The guide has no steps")]
    NoSteps,

    /// Session state lock was poisoned
    #[error("Session lock error: {0}")]
    Lock(String),
}

/// What should happen to the countdown after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerEffect {
    #[default]
    Unchanged,
    Start,
    Stop,
}

/// What should happen to narration after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioEffect {
    #[default]
    Unchanged,
    /// Play the current step's audio once the settle delay has passed
    Schedule,
    /// Play the current step's audio now
    Play,
    /// Drop any pending narration and pause the device
    Pause,
}

/// Side effects produced by a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    /// A step was (re)loaded, so any countdown and pending narration are stale
    pub step_loaded: bool,
    pub timer: TimerEffect,
    pub audio: AudioEffect,
}

impl Transition {
    pub fn is_noop(&self) -> bool {
        *self == Transition::default()
    }
}

/// State of one visit to the measurement guide
#[derive(Debug, Clone)]
pub struct TutorialSession {
    steps: Arc<[Step]>,
    current_index: usize,
    phase: TutorialPhase,
    time_remaining: Option<u32>,
    timer_running: bool,
    audio_playing: bool,
}

impl TutorialSession {
    /// Create a session positioned on the intro screen
    pub fn new(steps: Arc<[Step]>) -> Result<Self, TutorialError> {
        let first_timer = steps.first().ok_or(TutorialError::NoSteps)?.timer;
        Ok(Self {
            steps,
            current_index: 0,
            phase: TutorialPhase::NotStarted,
            time_remaining: first_timer,
            timer_running: false,
            audio_playing: false,
        })
    }

    pub fn phase(&self) -> TutorialPhase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn current_step(&self) -> &Step {
        &self.steps[self.current_index]
    }

    pub fn time_remaining(&self) -> Option<u32> {
        self.time_remaining
    }

    pub fn timer_running(&self) -> bool {
        self.timer_running
    }

    pub fn audio_playing(&self) -> bool {
        self.audio_playing
    }

    fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    /// Dispatch a user command
    pub fn apply(&mut self, command: TutorialCommand) -> Transition {
        let transition = match command {
            TutorialCommand::Start => self.start(),
            TutorialCommand::Next => self.next(),
            TutorialCommand::Previous => self.previous(),
            TutorialCommand::Restart => self.restart(),
            TutorialCommand::ToggleTimer => self.toggle_timer(),
            TutorialCommand::ToggleAudio => self.toggle_audio(),
        };
        debug!(
            ?command,
            phase = ?self.phase,
            index = self.current_index,
            ?transition,
            "Applied tutorial command"
        );
        transition
    }

    /// Leave the intro screen and show the first step
    pub fn start(&mut self) -> Transition {
        if self.phase != TutorialPhase::NotStarted {
            return Transition::default();
        }
        self.phase = TutorialPhase::InProgress;
        self.load_step(0)
    }

    /// Advance one step, or finish after the last one
    pub fn next(&mut self) -> Transition {
        if self.phase != TutorialPhase::InProgress {
            return Transition::default();
        }
        if self.current_index < self.last_index() {
            self.load_step(self.current_index + 1)
        } else {
            self.finish()
        }
    }

    /// Go back one step; nothing happens on the first step
    pub fn previous(&mut self) -> Transition {
        if self.phase != TutorialPhase::InProgress || self.current_index == 0 {
            return Transition::default();
        }
        self.load_step(self.current_index - 1)
    }

    /// Return to the intro screen after finishing
    pub fn restart(&mut self) -> Transition {
        if self.phase != TutorialPhase::Finished {
            return Transition::default();
        }
        self.phase = TutorialPhase::NotStarted;
        self.load_step(0)
    }

    /// Pause or resume the countdown without touching the remaining count
    pub fn toggle_timer(&mut self) -> Transition {
        if self.phase != TutorialPhase::InProgress {
            return Transition::default();
        }
        match self.time_remaining {
            Some(remaining) if remaining > 0 => {
                self.timer_running = !self.timer_running;
                Transition {
                    timer: if self.timer_running {
                        TimerEffect::Start
                    } else {
                        TimerEffect::Stop
                    },
                    ..Transition::default()
                }
            }
            _ => Transition::default(),
        }
    }

    /// One second of countdown; stops by itself at zero
    pub fn tick(&mut self) -> Transition {
        if self.phase != TutorialPhase::InProgress || !self.timer_running {
            return Transition::default();
        }
        match self.time_remaining {
            Some(remaining) if remaining > 0 => {
                let remaining = remaining - 1;
                self.time_remaining = Some(remaining);
                if remaining == 0 {
                    self.timer_running = false;
                    debug!(index = self.current_index, "Step countdown complete");
                    return Transition {
                        timer: TimerEffect::Stop,
                        ..Transition::default()
                    };
                }
                Transition::default()
            }
            _ => {
                self.timer_running = false;
                Transition {
                    timer: TimerEffect::Stop,
                    ..Transition::default()
                }
            }
        }
    }

    /// Pause narration if it is playing, otherwise play it
    pub fn toggle_audio(&mut self) -> Transition {
        if self.phase != TutorialPhase::InProgress || self.current_step().audio.is_none() {
            return Transition::default();
        }
        if self.audio_playing {
            self.audio_playing = false;
            Transition {
                audio: AudioEffect::Pause,
                ..Transition::default()
            }
        } else {
            Transition {
                audio: AudioEffect::Play,
                ..Transition::default()
            }
        }
    }

    /// Mirror a state change reported by the playback device
    pub fn audio_event(&mut self, event: AudioEvent) {
        self.audio_playing = matches!(event, AudioEvent::Played);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let step = self.current_step().clone();
        let timer_complete = step.timer.is_some() && self.time_remaining == Some(0);
        SessionSnapshot {
            phase: self.phase,
            started: self.phase == TutorialPhase::InProgress,
            finished: self.phase == TutorialPhase::Finished,
            current_index: self.current_index,
            step_count: self.steps.len(),
            step,
            time_remaining: self.time_remaining,
            timer_running: self.timer_running,
            timer_complete,
            audio_playing: self.audio_playing,
        }
    }

    fn load_step(&mut self, index: usize) -> Transition {
        self.current_index = index;
        self.time_remaining = self.steps[index].timer;
        self.timer_running = false;
        self.audio_playing = false;

        Transition {
            step_loaded: true,
            timer: TimerEffect::Stop,
            audio: if self.phase == TutorialPhase::InProgress {
                AudioEffect::Schedule
            } else {
                AudioEffect::Pause
            },
        }
    }

    fn finish(&mut self) -> Transition {
        self.phase = TutorialPhase::Finished;
        self.timer_running = false;
        self.audio_playing = false;

        Transition {
            step_loaded: false,
            timer: TimerEffect::Stop,
            audio: AudioEffect::Pause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(id: u32, timer: Option<u32>, audio: Option<&str>) -> Step {
        Step {
            id,
            title: format!("Step {}", id),
            content: format!("Content {}", id),
            points: vec![],
            timer,
            audio: audio.map(String::from),
            image: None,
            link: None,
            link_text: None,
        }
    }

    fn steps() -> Arc<[Step]> {
        vec![
            step(1, None, Some("/audio/1.mp3")),
            step(2, Some(3), Some("/audio/2.mp3")),
            step(3, Some(10), None),
        ]
        .into()
    }

    fn started_session() -> TutorialSession {
        let mut session = TutorialSession::new(steps()).unwrap();
        session.start();
        session
    }

    #[test]
    fn test_empty_guide_is_rejected() {
        let empty: Arc<[Step]> = Vec::new().into();
        assert_eq!(TutorialSession::new(empty).unwrap_err(), TutorialError::NoSteps);
    }

    #[test]
    fn test_start_enters_first_step() {
        let mut session = TutorialSession::new(steps()).unwrap();
        assert_eq!(session.phase(), TutorialPhase::NotStarted);

        let transition = session.start();

        assert_eq!(session.phase(), TutorialPhase::InProgress);
        assert_eq!(session.current_index(), 0);
        assert!(transition.step_loaded);
        assert_eq!(transition.audio, AudioEffect::Schedule);

        let snapshot = session.snapshot();
        assert!(snapshot.started);
        assert!(!snapshot.finished);
    }

    #[test]
    fn test_commands_before_start_are_ignored() {
        let mut session = TutorialSession::new(steps()).unwrap();

        assert!(session.next().is_noop());
        assert!(session.previous().is_noop());
        assert!(session.toggle_timer().is_noop());
        assert!(session.toggle_audio().is_noop());
        assert!(session.restart().is_noop());
        assert_eq!(session.phase(), TutorialPhase::NotStarted);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_start_twice_is_ignored() {
        let mut session = started_session();
        session.next();

        assert!(session.start().is_noop());
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn test_next_past_last_step_finishes() {
        let mut session = started_session();
        session.next();
        session.next();
        assert_eq!(session.current_index(), 2);

        let transition = session.next();

        assert_eq!(session.phase(), TutorialPhase::Finished);
        assert_eq!(session.current_index(), 2);
        assert_eq!(transition.timer, TimerEffect::Stop);
        assert_eq!(transition.audio, AudioEffect::Pause);

        let snapshot = session.snapshot();
        assert!(snapshot.finished);
        assert!(!snapshot.started);
    }

    #[test]
    fn test_previous_at_first_step_is_noop() {
        let mut session = started_session();
        let before = session.snapshot();

        assert!(session.previous().is_noop());
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_previous_steps_back() {
        let mut session = started_session();
        session.next();
        session.next();

        let transition = session.previous();

        assert_eq!(session.current_index(), 1);
        assert!(transition.step_loaded);
    }

    #[test]
    fn test_previous_after_finish_is_noop() {
        let mut session = started_session();
        for _ in 0..3 {
            session.next();
        }
        assert_eq!(session.phase(), TutorialPhase::Finished);

        assert!(session.previous().is_noop());
        assert_eq!(session.phase(), TutorialPhase::Finished);
        assert_eq!(session.current_index(), 2);
    }

    #[test]
    fn test_restart_returns_to_intro() {
        let mut session = started_session();
        for _ in 0..3 {
            session.next();
        }

        let transition = session.restart();

        assert_eq!(session.phase(), TutorialPhase::NotStarted);
        assert_eq!(session.current_index(), 0);
        assert!(transition.step_loaded);
        // No narration on the intro screen
        assert_eq!(transition.audio, AudioEffect::Pause);

        // A restart needs a fresh start before navigation works again
        assert!(session.next().is_noop());
        session.start();
        assert_eq!(session.phase(), TutorialPhase::InProgress);
    }

    #[test]
    fn test_restart_while_in_progress_is_ignored() {
        let mut session = started_session();
        session.next();

        assert!(session.restart().is_noop());
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.phase(), TutorialPhase::InProgress);
    }

    #[test]
    fn test_every_index_change_resets_timer() {
        let mut session = started_session();
        assert_eq!(session.time_remaining(), None);

        session.next();
        assert_eq!(session.time_remaining(), Some(3));
        session.toggle_timer();
        session.tick();
        assert_eq!(session.time_remaining(), Some(2));
        assert!(session.timer_running());

        let transition = session.next();
        assert_eq!(session.time_remaining(), Some(10));
        assert!(!session.timer_running());
        assert_eq!(transition.timer, TimerEffect::Stop);

        session.previous();
        assert_eq!(session.time_remaining(), Some(3));
        assert!(!session.timer_running());

        session.previous();
        assert_eq!(session.time_remaining(), None);
    }

    #[test]
    fn test_countdown_reaches_zero_after_n_ticks_and_stops() {
        let mut session = started_session();
        session.next();
        assert_eq!(session.toggle_timer().timer, TimerEffect::Start);

        session.tick();
        session.tick();
        let last = session.tick();

        assert_eq!(session.time_remaining(), Some(0));
        assert!(!session.timer_running());
        assert_eq!(last.timer, TimerEffect::Stop);
        assert!(session.snapshot().timer_complete);

        // Further ticks do nothing and the guide does not advance by itself
        assert!(session.tick().is_noop());
        assert_eq!(session.time_remaining(), Some(0));
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn test_toggle_timer_keeps_remaining_count() {
        let mut session = started_session();
        session.next();

        session.toggle_timer();
        session.tick();
        assert_eq!(session.toggle_timer().timer, TimerEffect::Stop);
        assert_eq!(session.time_remaining(), Some(2));

        // Paused ticks are ignored
        assert!(session.tick().is_noop());
        assert_eq!(session.time_remaining(), Some(2));

        assert_eq!(session.toggle_timer().timer, TimerEffect::Start);
        assert_eq!(session.time_remaining(), Some(2));
    }

    #[test]
    fn test_toggle_timer_without_timer_or_at_zero_is_noop() {
        let mut session = started_session();
        assert!(session.toggle_timer().is_noop());

        session.next();
        session.toggle_timer();
        for _ in 0..3 {
            session.tick();
        }
        assert!(session.toggle_timer().is_noop());
        assert!(!session.timer_running());
    }

    #[test]
    fn test_toggle_audio() {
        let mut session = started_session();

        assert_eq!(session.toggle_audio().audio, AudioEffect::Play);
        session.audio_event(AudioEvent::Played);
        assert!(session.audio_playing());

        assert_eq!(session.toggle_audio().audio, AudioEffect::Pause);
        assert!(!session.audio_playing());
    }

    #[test]
    fn test_toggle_audio_on_silent_step_is_noop() {
        let mut session = started_session();
        session.next();
        session.next();
        assert!(session.current_step().audio.is_none());

        assert!(session.toggle_audio().is_noop());
    }

    #[test]
    fn test_device_events_are_mirrored() {
        let mut session = started_session();

        session.audio_event(AudioEvent::Played);
        assert!(session.audio_playing());
        session.audio_event(AudioEvent::Ended);
        assert!(!session.audio_playing());
        session.audio_event(AudioEvent::Played);
        session.audio_event(AudioEvent::Paused);
        assert!(!session.audio_playing());
        session.audio_event(AudioEvent::Played);
        session.audio_event(AudioEvent::Failed);
        assert!(!session.audio_playing());
    }

    #[test]
    fn test_step_change_clears_audio_playing() {
        let mut session = started_session();
        session.audio_event(AudioEvent::Played);

        let transition = session.next();

        assert!(!session.audio_playing());
        assert_eq!(transition.audio, AudioEffect::Schedule);
    }

    #[test]
    fn test_apply_dispatches_commands() {
        let mut session = TutorialSession::new(steps()).unwrap();
        session.apply(TutorialCommand::Start);
        session.apply(TutorialCommand::Next);
        session.apply(TutorialCommand::ToggleTimer);
        assert!(session.timer_running());
        session.apply(TutorialCommand::Previous);
        assert_eq!(session.current_index(), 0);
        assert!(!session.timer_running());
    }

    #[test]
    fn test_snapshot_reports_current_step() {
        let mut session = started_session();
        session.next();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.current_index, 1);
        assert_eq!(snapshot.step_count, 3);
        assert_eq!(snapshot.step.id, 2);
        assert_eq!(snapshot.time_remaining, Some(3));
        assert!(!snapshot.timer_complete);
    }
}
