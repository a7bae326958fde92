//! Settle animation controller
//!
//! Animates the along-axis scroll offset from its current position toward a
//! snap target and reports completion exactly once per settle, so the app can
//! fire color extraction at the moment the carousel comes to rest.

use std::time::{Duration, Instant};

use coverdeck_core::ScrollConfig;

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};

/// Active animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: f32,
    to: f32,
    duration: Duration,
    easing: EasingType,
}

/// Drives the scroll offset toward snap targets
///
/// Call [`SettleAnimator::animate_to`] with the engine's snap target, then
/// [`SettleAnimator::update`] each frame for the interpolated offset and
/// [`SettleAnimator::take_settled`] to learn when the carousel came to rest.
#[derive(Debug, Clone)]
pub struct SettleAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    current: f32,
    settled: Option<f32>,
}

impl SettleAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current: 0.0,
            settled: None,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Current interpolated offset
    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Final offset after any in-flight animation
    pub fn target(&self) -> f32 {
        self.animation.as_ref().map(|a| a.to).unwrap_or(self.current)
    }

    fn is_smooth(&self) -> bool {
        self.config.smooth_enabled && self.config.animation_duration_ms > 0
    }

    /// Set the offset immediately, without a settle
    pub fn set(&mut self, offset: f32) {
        self.animation = None;
        self.settled = None;
        self.current = offset;
    }

    /// Begin animating toward `target`
    ///
    /// With smooth scrolling disabled (or a zero duration) the offset jumps
    /// and settles in the same frame. Re-targeting an in-flight animation
    /// restarts it from the current interpolated position, so rapid key
    /// presses chain smoothly.
    pub fn animate_to(&mut self, target: f32) {
        if !self.is_smooth() || (target - self.current).abs() < f32::EPSILON {
            self.animation = None;
            self.current = target;
            self.settled = Some(target);
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: Instant::now(),
            from: self.current,
            to: target,
            duration: Duration::from_millis(self.config.animation_duration_ms),
            easing: self.config.easing,
        });
    }

    /// Advance the animation and return the current offset
    pub fn update(&mut self) -> f32 {
        if let Some(ref anim) = self.animation {
            if is_complete(anim.start, anim.duration) {
                self.current = anim.to;
                self.settled = Some(anim.to);
                self.animation = None;
            } else {
                let t = progress(anim.start, anim.duration);
                let eased = anim.easing.apply(t);
                self.current = lerp(anim.from, anim.to, eased);
            }
        }
        self.current
    }

    /// One-shot settle notification
    ///
    /// Returns the final offset if a settle completed since the last call.
    pub fn take_settled(&mut self) -> Option<f32> {
        self.settled.take()
    }

    /// Drop any in-flight animation, staying at the current offset
    pub fn cancel(&mut self) {
        self.animation = None;
        self.settled = None;
    }
}
