//! Drives a [`TutorialSession`] in real time
//!
//! The player owns the per-step countdown and the delayed narration. Both run
//! as tokio tasks holding only a weak reference back to the player, and both
//! are aborted whenever a command invalidates them or the player goes away.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant};
use tracing::{debug, warn};

use crate::entities::tutorial::{AudioEvent, SessionSnapshot, Step, TutorialCommand, TutorialPhase};
use crate::services::audio::AudioOutput;
use crate::services::tutorial::{AudioEffect, TimerEffect, TutorialError, TutorialSession};

/// Wait after a step loads before its narration starts
pub const SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Countdown resolution
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Default)]
struct ScheduledTasks {
    countdown: Option<JoinHandle<()>>,
    narration: Option<JoinHandle<()>>,
}

impl ScheduledTasks {
    fn stop_countdown(&mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.abort();
        }
    }

    fn cancel_narration(&mut self) {
        if let Some(handle) = self.narration.take() {
            handle.abort();
        }
    }

    fn abort_all(&mut self) {
        self.stop_countdown();
        self.cancel_narration();
    }
}

struct PlayerInner {
    session: Mutex<TutorialSession>,
    // Lock order: tasks, then session
    tasks: Mutex<ScheduledTasks>,
    audio: Arc<dyn AudioOutput>,
    settle_delay: Duration,
}

impl PlayerInner {
    fn session(&self) -> Result<MutexGuard<'_, TutorialSession>, TutorialError> {
        self.session
            .lock()
            .map_err(|e| TutorialError::Lock(e.to_string()))
    }

    fn tasks(&self) -> Result<MutexGuard<'_, ScheduledTasks>, TutorialError> {
        self.tasks
            .lock()
            .map_err(|e| TutorialError::Lock(e.to_string()))
    }

    /// Hand `source` to the device and record the outcome
    async fn play(&self, source: &str) -> Result<(), TutorialError> {
        let event = match self.audio.play(source).await {
            Ok(()) => AudioEvent::Played,
            Err(e) => {
                // Autoplay refusals land here too; the user can still press play
                warn!(source, error = %e, "Narration playback failed");
                AudioEvent::Failed
            }
        };
        self.session()?.audio_event(event);
        Ok(())
    }

    async fn pause(&self) -> Result<(), TutorialError> {
        if let Err(e) = self.audio.pause().await {
            warn!(error = %e, "Failed to pause narration");
        }
        self.session()?.audio_event(AudioEvent::Paused);
        Ok(())
    }
}

impl Drop for PlayerInner {
    fn drop(&mut self) {
        match self.tasks.get_mut() {
            Ok(tasks) => tasks.abort_all(),
            Err(poisoned) => poisoned.into_inner().abort_all(),
        }
    }
}

/// A guide session with its timers attached
pub struct TutorialPlayer {
    inner: Arc<PlayerInner>,
}

impl std::fmt::Debug for TutorialPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TutorialPlayer")
            .field("settle_delay", &self.inner.settle_delay)
            .finish_non_exhaustive()
    }
}

impl TutorialPlayer {
    /// Create a player that waits [`SETTLE_DELAY`] before narrating
    pub fn new(steps: Arc<[Step]>, audio: Arc<dyn AudioOutput>) -> Result<Self, TutorialError> {
        Self::with_settle_delay(steps, audio, SETTLE_DELAY)
    }

    pub fn with_settle_delay(
        steps: Arc<[Step]>,
        audio: Arc<dyn AudioOutput>,
        settle_delay: Duration,
    ) -> Result<Self, TutorialError> {
        let session = TutorialSession::new(steps)?;
        Ok(Self {
            inner: Arc::new(PlayerInner {
                session: Mutex::new(session),
                tasks: Mutex::new(ScheduledTasks::default()),
                audio,
                settle_delay,
            }),
        })
    }

    pub fn snapshot(&self) -> Result<SessionSnapshot, TutorialError> {
        Ok(self.inner.session()?.snapshot())
    }

    /// Apply a user command and carry out its side effects
    ///
    /// Must be called from within a tokio runtime.
    pub async fn apply(&self, command: TutorialCommand) -> Result<SessionSnapshot, TutorialError> {
        let follow_up = {
            let mut tasks = self.inner.tasks()?;
            let (transition, index, audio_source) = {
                let mut session = self.inner.session()?;
                let transition = session.apply(command);
                let index = session.current_index();
                (transition, index, session.current_step().audio.clone())
            };

            if transition.step_loaded {
                tasks.abort_all();
            }

            match transition.timer {
                TimerEffect::Start => {
                    tasks.stop_countdown();
                    tasks.countdown = Some(tokio::spawn(run_countdown(Arc::downgrade(&self.inner))));
                }
                TimerEffect::Stop => tasks.stop_countdown(),
                TimerEffect::Unchanged => {}
            }

            match transition.audio {
                AudioEffect::Schedule => {
                    tasks.cancel_narration();
                    if let Some(source) = audio_source {
                        tasks.narration = Some(tokio::spawn(run_narration(
                            Arc::downgrade(&self.inner),
                            index,
                            source,
                            self.inner.settle_delay,
                        )));
                    }
                    None
                }
                AudioEffect::Play => {
                    // A manual play supersedes the pending narration
                    tasks.cancel_narration();
                    audio_source.map(FollowUp::Play)
                }
                AudioEffect::Pause => {
                    tasks.cancel_narration();
                    Some(FollowUp::Pause)
                }
                AudioEffect::Unchanged => None,
            }
        };

        match follow_up {
            Some(FollowUp::Play(source)) => self.inner.play(&source).await?,
            Some(FollowUp::Pause) => self.inner.pause().await?,
            None => {}
        }

        self.snapshot()
    }

    /// Record a playback change reported by the device
    pub fn audio_event(&self, event: AudioEvent) -> Result<SessionSnapshot, TutorialError> {
        let mut session = self.inner.session()?;
        session.audio_event(event);
        debug!(?event, playing = session.audio_playing(), "Audio event recorded");
        Ok(session.snapshot())
    }

    /// Abort the countdown and any pending narration
    pub fn shutdown(&self) {
        match self.inner.tasks() {
            Ok(mut tasks) => tasks.abort_all(),
            Err(e) => warn!(error = %e, "Could not stop player tasks"),
        }
    }
}

enum FollowUp {
    Play(String),
    Pause,
}

async fn run_countdown(player: Weak<PlayerInner>) {
    let mut ticker = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
    loop {
        ticker.tick().await;
        let Some(inner) = player.upgrade() else {
            return;
        };
        let Ok(mut session) = inner.session() else {
            return;
        };
        session.tick();
        if !session.timer_running() {
            return;
        }
    }
}

async fn run_narration(player: Weak<PlayerInner>, index: usize, source: String, delay: Duration) {
    sleep(delay).await;
    let Some(inner) = player.upgrade() else {
        return;
    };

    let current = match inner.session() {
        Ok(session) => session.phase() == TutorialPhase::InProgress && session.current_index() == index,
        Err(_) => false,
    };
    if !current {
        return;
    }

    if let Err(e) = inner.play(&source).await {
        warn!(error = %e, "Narration state not recorded");
    }
}
