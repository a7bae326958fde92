//! Smooth settle animation for the carousel
//!
//! A terminal has no inertial drag, so key-driven scroll steps animate the
//! offset toward the layout engine's snap target and "settle" fires when the
//! animation completes. The pieces:
//!
//! - `easing` - pure easing functions over [`coverdeck_core::EasingType`]
//! - `timing` - progress and interpolation helpers
//! - `animation` - the [`SettleAnimator`] combining them

pub mod animation;
pub mod easing;
pub mod timing;

pub use animation::SettleAnimator;
pub use easing::EasingTypeExt;
