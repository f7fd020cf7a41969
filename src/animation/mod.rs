//! Time-based interpolation driven by a shared [`Clock`].

use std::time::Duration;

use keyframe::functions::{EaseOutCubic, EaseOutQuad};
use keyframe::EasingFunction;

mod clock;

pub use self::clock::Clock;

#[derive(Debug, Clone)]
pub struct Animation {
    from: f64,
    to: f64,
    duration: Duration,
    start_time: Duration,
    curve: Curve,
    clock: Clock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Linear,
    EaseOutQuad,
    EaseOutCubic,
    EaseOutExpo,
}

impl Animation {
    pub fn new(clock: Clock, from: f64, to: f64, config: taskview_config::Animation) -> Self {
        // Skip the animation entirely when it's disabled or the clock asks for it.
        let duration = if config.off || clock.should_complete_instantly() {
            Duration::ZERO
        } else {
            Duration::from_millis(u64::from(config.duration_ms))
        };

        Self {
            from,
            to,
            duration,
            start_time: clock.now(),
            curve: Curve::from(config.curve),
            clock,
        }
    }

    pub fn is_done(&self) -> bool {
        self.clock.now() >= self.start_time + self.duration
    }

    pub fn value(&self) -> f64 {
        if self.is_done() {
            return self.to;
        }

        let passed = self.clock.now().saturating_sub(self.start_time);
        let x = passed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.curve.y(x)
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Curve {
    pub fn y(self, x: f64) -> f64 {
        let x = x.clamp(0., 1.);
        match self {
            Curve::Linear => x,
            Curve::EaseOutQuad => EaseOutQuad.y(x),
            Curve::EaseOutCubic => EaseOutCubic.y(x),
            Curve::EaseOutExpo => 1. - 2f64.powf(-10. * x),
        }
    }
}

impl From<taskview_config::Curve> for Curve {
    fn from(value: taskview_config::Curve) -> Self {
        match value {
            taskview_config::Curve::Linear => Curve::Linear,
            taskview_config::Curve::EaseOutQuad => Curve::EaseOutQuad,
            taskview_config::Curve::EaseOutCubic => Curve::EaseOutCubic,
            taskview_config::Curve::EaseOutExpo => Curve::EaseOutExpo,
        }
    }
}
