//! Merge cooldown.
//!
//! A session may merge again only after the cooldown has passed since its
//! last accepted merge. Time comes from a [`Clock`] so callers decide what
//! "now" is.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::{EzPdfError, Result};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// Reads the monotonic system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Enforces the minimum interval between merges of one session.
#[derive(Debug)]
pub struct MergeThrottle<C: Clock = SystemClock> {
    clock: C,
    cooldown: Duration,
    last_merge: Mutex<Option<Instant>>,
}

impl MergeThrottle<SystemClock> {
    /// Create a throttle on the system clock.
    pub fn new(cooldown: Duration) -> Self {
        Self::with_clock(cooldown, SystemClock)
    }
}

impl<C: Clock> MergeThrottle<C> {
    /// Create a throttle reading time from `clock`.
    pub fn with_clock(cooldown: Duration, clock: C) -> Self {
        Self {
            clock,
            cooldown,
            last_merge: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Instant>> {
        self.last_merge
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn ensure_elapsed(&self, last: Option<Instant>, now: Instant) -> Result<()> {
        let Some(last) = last else {
            return Ok(());
        };

        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.cooldown {
            let retry_after_secs = self.cooldown.as_secs() - elapsed.as_secs();
            debug!(retry_after_secs, "merge throttled");
            return Err(EzPdfError::RateLimited { retry_after_secs });
        }

        Ok(())
    }

    /// Check that a merge may start now.
    ///
    /// # Errors
    ///
    /// Returns [`EzPdfError::RateLimited`] with the whole seconds left while
    /// the cooldown is running.
    pub fn check(&self) -> Result<()> {
        let last = *self.lock();
        self.ensure_elapsed(last, self.clock.now())
    }

    /// Check the cooldown and, if it has passed, restart it from now.
    ///
    /// Both happen under one lock, so of several callers racing on a shared
    /// throttle exactly one gets through.
    ///
    /// # Errors
    ///
    /// Same as [`MergeThrottle::check`]; the cooldown is left untouched.
    pub fn try_start(&self) -> Result<()> {
        let mut last = self.lock();
        let now = self.clock.now();
        self.ensure_elapsed(*last, now)?;
        *last = Some(now);
        Ok(())
    }

    /// Start the cooldown from now.
    pub fn record(&self) {
        let now = self.clock.now();
        *self.lock() = Some(now);
    }
}
