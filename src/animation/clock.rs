use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Shared animation clock.
///
/// All animations created from clones of the same clock observe the same time, so advancing the
/// clock once per frame keeps every animated value of that frame at one logical timestamp.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    inner: Rc<RefCell<AdjustableClock>>,
}

#[derive(Debug)]
struct AdjustableClock {
    /// Last unadjusted time received from the host.
    last_unadjusted: Option<Duration>,
    /// Current adjusted time.
    current: Duration,
    /// Speed multiplier applied to unadjusted time deltas.
    rate: f64,
    /// Whether animations should complete instantly.
    complete_instantly: bool,
}

impl Default for AdjustableClock {
    fn default() -> Self {
        Self {
            last_unadjusted: None,
            current: Duration::ZERO,
            rate: 1.,
            complete_instantly: false,
        }
    }
}

impl Clock {
    /// Creates a clock that starts at `time`.
    pub fn with_time(time: Duration) -> Self {
        let clock = Self::default();
        clock.set_unadjusted(time);
        clock
    }

    /// Returns the current adjusted time.
    pub fn now(&self) -> Duration {
        self.inner.borrow().current
    }

    /// Advances the clock to the host's monotonic `time`.
    ///
    /// The first call jumps straight to `time`; later calls advance by the delta scaled by the
    /// rate. Time never goes backwards.
    pub fn set_unadjusted(&self, time: Duration) {
        let mut inner = self.inner.borrow_mut();
        match inner.last_unadjusted {
            None => inner.current = time,
            Some(last) => {
                let delta = time.saturating_sub(last);
                let rate = inner.rate;
                inner.current += delta.mul_f64(rate);
            }
        }
        inner.last_unadjusted = Some(time);
    }

    pub fn rate(&self) -> f64 {
        self.inner.borrow().rate
    }

    pub fn set_rate(&self, rate: f64) {
        self.inner.borrow_mut().rate = rate.clamp(0., 1000.);
    }

    pub fn should_complete_instantly(&self) -> bool {
        self.inner.borrow().complete_instantly
    }

    pub fn set_complete_instantly(&self, value: bool) {
        self.inner.borrow_mut().complete_instantly = value;
    }
}

impl PartialEq for Clock {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Clock {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_update_jumps() {
        let clock = Clock::default();
        clock.set_unadjusted(Duration::from_millis(500));
        assert_eq!(clock.now(), Duration::from_millis(500));
    }

    #[test]
    fn rate_scales_deltas() {
        let clock = Clock::with_time(Duration::from_millis(100));
        clock.set_rate(0.5);
        clock.set_unadjusted(Duration::from_millis(300));
        assert_eq!(clock.now(), Duration::from_millis(200));
    }

    #[test]
    fn never_goes_backwards() {
        let clock = Clock::with_time(Duration::from_millis(100));
        clock.set_unadjusted(Duration::from_millis(50));
        assert_eq!(clock.now(), Duration::from_millis(100));
    }

    #[test]
    fn clones_share_time() {
        let clock = Clock::default();
        let other = clock.clone();
        clock.set_unadjusted(Duration::from_secs(1));
        assert_eq!(other.now(), Duration::from_secs(1));
        assert_eq!(clock, other);
        assert_ne!(clock, Clock::default());
    }
}
