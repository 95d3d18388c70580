use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard, watch};

use crate::adapters::{PronunciationAdapter, SpeakOutcome, SpeechBackend};
use crate::error::SpeechError;

static GLOBAL_SLOT: LazyLock<Arc<PlaybackSlot>> = LazyLock::new(PlaybackSlot::new);

/// The one audio output of the process
///
/// Acquiring never waits: while a [`PlaybackToken`] is alive every other request is refused,
/// so playbacks are neither queued nor interrupted.
pub struct PlaybackSlot {
    lock: Arc<Mutex<()>>,
    busy: watch::Sender<bool>,
}

impl PlaybackSlot {
    pub fn new() -> Arc<Self> {
        let (busy, _) = watch::channel(false);
        Arc::new(Self {
            lock: Arc::new(Mutex::new(())),
            busy,
        })
    }

    /// Process-wide slot shared by pronunciation and recorded audio playback
    pub fn global() -> Arc<Self> {
        GLOBAL_SLOT.clone()
    }

    pub fn try_acquire(&self) -> Option<PlaybackToken> {
        let guard = self.lock.clone().try_lock_owned().ok()?;
        self.busy.send_replace(true);
        Some(PlaybackToken {
            guard: Some(guard),
            busy: self.busy.clone(),
        })
    }

    pub fn is_busy(&self) -> bool {
        *self.busy.borrow()
    }

    /// Follows busy/idle transitions
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.busy.subscribe()
    }
}

/// Ownership of the audio output; released on drop
pub struct PlaybackToken {
    guard: Option<OwnedMutexGuard<()>>,
    busy: watch::Sender<bool>,
}

impl Drop for PlaybackToken {
    fn drop(&mut self) {
        // idle must be published while the slot is still held
        self.busy.send_replace(false);
        drop(self.guard.take());
    }
}

/// [`PronunciationAdapter`] that only reaches the backend while holding the playback slot
pub struct GuardedPronouncer<B> {
    backend: B,
    slot: Arc<PlaybackSlot>,
}

impl<B: SpeechBackend> GuardedPronouncer<B> {
    /// Guarded by the process-wide slot
    pub fn new(backend: B) -> Self {
        Self::with_slot(backend, PlaybackSlot::global())
    }

    pub fn with_slot(backend: B, slot: Arc<PlaybackSlot>) -> Self {
        Self { backend, slot }
    }

    pub fn slot(&self) -> &Arc<PlaybackSlot> {
        &self.slot
    }
}

#[async_trait]
impl<B: SpeechBackend> PronunciationAdapter for GuardedPronouncer<B> {
    async fn speak(&self, text: &str, language_tag: &str) -> Result<SpeakOutcome, SpeechError> {
        let Some(_token) = self.slot.try_acquire() else {
            tracing::debug!("Playback busy, skipping '{}'", text);
            return Ok(SpeakOutcome::Skipped);
        };

        tracing::debug!("Speaking '{}' ({})", text, language_tag);
        self.backend.play(text, language_tag).await?;
        Ok(SpeakOutcome::Played)
    }

    fn is_speaking(&self) -> bool {
        self.slot.is_busy()
    }
}
