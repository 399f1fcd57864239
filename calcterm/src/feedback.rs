//! Short-lived visual effects.
//!
//! Effects are fire-and-forget: triggering one records when it started, rendering asks whether
//! it is still running. Nothing about the calculator depends on them.

use reckon::Action;
use web_time::{Duration, Instant};

/// A visual effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// A button was pressed
    Press(Action),
    /// An evaluation succeeded
    Pulse,
    /// An evaluation failed
    Shake,
}

impl Effect {
    /// How long the effect is shown
    pub const fn duration(self) -> Duration {
        match self {
            Self::Press(_) => Duration::from_millis(160),
            Self::Pulse => Duration::from_millis(420),
            Self::Shake => Duration::from_millis(550),
        }
    }
}

/// Interval at which a shaking display moves back and forth
const SHAKE_STEP: Duration = Duration::from_millis(55);

/// Currently running effects
#[derive(Debug)]
pub struct Feedback {
    enabled: bool,
    running: Vec<(Effect, Instant)>,
}

impl Feedback {
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            running: Vec::new(),
        }
    }

    /// Start an effect, restarting it if it is already running
    pub fn trigger(&mut self, effect: Effect) {
        self.trigger_at(effect, Instant::now());
    }

    fn trigger_at(&mut self, effect: Effect, now: Instant) {
        if !self.enabled {
            return;
        }

        self.running
            .retain(|(running, started)| *running != effect && !is_expired(*running, *started, now));
        self.running.push((effect, now));
    }

    /// Check if an effect is still running
    pub fn is_active(&self, effect: Effect) -> bool {
        self.is_active_at(effect, Instant::now())
    }

    fn is_active_at(&self, effect: Effect, now: Instant) -> bool {
        self.started(effect)
            .is_some_and(|started| !is_expired(effect, started, now))
    }

    /// Horizontal offset of a shaking display, alternating between 0 and 1
    pub fn shake_offset(&self) -> u16 {
        self.shake_offset_at(Instant::now())
    }

    fn shake_offset_at(&self, now: Instant) -> u16 {
        match self.started(Effect::Shake) {
            Some(started) if !is_expired(Effect::Shake, started, now) => {
                let steps = now.duration_since(started).as_millis() / SHAKE_STEP.as_millis();
                u16::from(steps % 2 == 0)
            }
            _ => 0,
        }
    }

    fn started(&self, effect: Effect) -> Option<Instant> {
        self.running
            .iter()
            .find(|(running, _)| *running == effect)
            .map(|(_, started)| *started)
    }
}

fn is_expired(effect: Effect, started: Instant, now: Instant) -> bool {
    now.saturating_duration_since(started) >= effect.duration()
}
