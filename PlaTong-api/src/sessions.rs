use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use pla_tong_domain::entities::tutorial::Step;
use pla_tong_domain::services::{AudioOutput, TutorialError, TutorialPlayer};
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Sessions untouched for this long are closed by the sweep
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Session registry errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Tutorial session {0} not found")]
    NotFound(Uuid),

    #[error("Too many tutorial sessions (limit {0})")]
    CapacityExceeded(usize),

    #[error(transparent)]
    Tutorial(#[from] TutorialError),

    #[error("Session registry lock error: {0}")]
    MutexLock(String),
}

struct SessionEntry {
    player: Arc<TutorialPlayer>,
    last_seen: Instant,
}

type Sessions = HashMap<Uuid, SessionEntry>;

/// Live tutorial sessions keyed by id
///
/// Sessions are independent; dropping one aborts its countdown and narration.
/// A visit that never closes its session is reclaimed once it has been idle
/// for the configured timeout (see [`SessionRegistry::start_cleanup_task`]).
#[derive(Clone)]
pub struct SessionRegistry {
    players: Arc<Mutex<Sessions>>,
    steps: Arc<[Step]>,
    audio: Arc<dyn AudioOutput>,
    limit: usize,
    idle_timeout: Duration,
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("live", &self.len())
            .field("limit", &self.limit)
            .field("idle_timeout", &self.idle_timeout)
            .finish()
    }
}

impl SessionRegistry {
    pub fn new(steps: Arc<[Step]>, audio: Arc<dyn AudioOutput>, limit: usize) -> Self {
        Self {
            players: Arc::new(Mutex::new(HashMap::new())),
            steps,
            audio,
            limit,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Open a new session on the intro screen
    pub fn create(&self) -> Result<(Uuid, Arc<TutorialPlayer>), SessionError> {
        let mut players = self.lock()?;
        if players.len() >= self.limit {
            return Err(SessionError::CapacityExceeded(self.limit));
        }

        let player = Arc::new(TutorialPlayer::new(self.steps.clone(), self.audio.clone())?);
        let id = Uuid::new_v4();
        players.insert(
            id,
            SessionEntry {
                player: player.clone(),
                last_seen: Instant::now(),
            },
        );

        info!(session_id = %id, live = players.len(), "Tutorial session created");
        Ok((id, player))
    }

    /// Look a session up and mark it as in use
    pub fn get(&self, id: Uuid) -> Result<Arc<TutorialPlayer>, SessionError> {
        let mut players = self.lock()?;
        let entry = players.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        entry.last_seen = Instant::now();
        Ok(entry.player.clone())
    }

    /// Tear a session down, cancelling its scheduled work
    pub fn remove(&self, id: Uuid) -> Result<(), SessionError> {
        let entry = self.lock()?.remove(&id).ok_or(SessionError::NotFound(id))?;
        // In-flight requests may still hold the player; stop its tasks now
        entry.player.shutdown();
        debug!(session_id = %id, "Tutorial session removed");
        Ok(())
    }

    /// Close every session idle for at least the idle timeout
    ///
    /// Returns how many sessions were closed.
    pub fn sweep_idle(&self) -> Result<usize, SessionError> {
        sweep(&self.players, self.idle_timeout)
    }

    /// Spawn the periodic idle sweep
    ///
    /// The task stops by itself once every clone of the registry is gone.
    pub fn start_cleanup_task(&self, period: Duration) -> JoinHandle<()> {
        let players = Arc::downgrade(&self.players);
        let idle_timeout = self.idle_timeout;

        tokio::spawn(async move {
            let mut interval = time::interval(period);
            loop {
                interval.tick().await;
                if !run_sweep(&players, idle_timeout) {
                    return;
                }
            }
        })
    }

    pub fn len(&self) -> usize {
        self.players.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Sessions>, SessionError> {
        self.players
            .lock()
            .map_err(|e| SessionError::MutexLock(e.to_string()))
    }
}

/// One scheduled sweep; false once the registry has been dropped
fn run_sweep(players: &Weak<Mutex<Sessions>>, idle_timeout: Duration) -> bool {
    let Some(players) = players.upgrade() else {
        return false;
    };
    debug!("Running scheduled tutorial session sweep");
    if let Err(e) = sweep(&players, idle_timeout) {
        warn!(error = %e, "Tutorial session sweep failed");
    }
    true
}

fn sweep(players: &Mutex<Sessions>, idle_timeout: Duration) -> Result<usize, SessionError> {
    let now = Instant::now();
    let mut idle = Vec::new();
    let remaining = {
        let mut players = players
            .lock()
            .map_err(|e| SessionError::MutexLock(e.to_string()))?;
        players.retain(|id, entry| {
            let expired = now.duration_since(entry.last_seen) >= idle_timeout;
            if expired {
                idle.push((*id, entry.player.clone()));
            }
            !expired
        });
        players.len()
    };

    for (id, player) in &idle {
        player.shutdown();
        debug!(session_id = %id, "Idle tutorial session closed");
    }
    if !idle.is_empty() {
        info!(closed = idle.len(), remaining, "Closed idle tutorial sessions");
    }
    Ok(idle.len())
}
