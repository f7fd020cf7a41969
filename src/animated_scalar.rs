//! A single animated number with a one-shot completion handler.
//!
//! The handler is an arbitrary value of type `E` rather than a closure: the owner learns which
//! transition finished from [`AnimatedScalar::advance`] and applies it to its own state, so the
//! scalar never needs to borrow its owner.

use crate::animation::{Animation, Clock};

#[derive(Debug)]
pub struct AnimatedScalar<E = ()> {
    state: State,
    /// Fired once the value settles on its target.
    on_complete: Option<E>,
    clock: Clock,
    config: taskview_config::Animation,
}

#[derive(Debug)]
enum State {
    Static(f64),
    Animation(Animation),
}

impl<E> AnimatedScalar<E> {
    pub fn new(clock: Clock, value: f64, config: taskview_config::Animation) -> Self {
        Self {
            state: State::Static(value),
            on_complete: None,
            clock,
            config,
        }
    }

    /// Returns the value at the current clock time.
    pub fn value(&self) -> f64 {
        match &self.state {
            State::Static(value) => *value,
            State::Animation(anim) => anim.value(),
        }
    }

    /// Returns the value this scalar is heading towards.
    pub fn target(&self) -> f64 {
        match &self.state {
            State::Static(value) => *value,
            State::Animation(anim) => anim.to(),
        }
    }

    /// Starts interpolating from the current value towards `target`.
    ///
    /// Retargeting drops any pending completion handler. Returns `false` and leaves everything
    /// untouched when `target` is already the target.
    pub fn set_target(&mut self, target: f64) -> bool {
        if self.target() == target {
            return false;
        }

        let anim = Animation::new(self.clock.clone(), self.value(), target, self.config);
        self.state = State::Animation(anim);
        self.on_complete = None;
        true
    }

    /// Jumps to `value` immediately, cancelling the animation and its handler.
    pub fn warp(&mut self, value: f64) {
        self.state = State::Static(value);
        self.on_complete = None;
    }

    /// Registers the handler returned once the value reaches its target.
    ///
    /// Replaces a previously registered handler.
    pub fn on_complete(&mut self, handler: E) {
        self.on_complete = Some(handler);
    }

    pub fn clear_on_complete(&mut self) {
        self.on_complete = None;
    }

    pub fn has_pending_handler(&self) -> bool {
        self.on_complete.is_some()
    }

    pub fn is_animation_ongoing(&self) -> bool {
        match &self.state {
            State::Static(_) => false,
            State::Animation(anim) => !anim.is_done(),
        }
    }

    /// Settles a finished animation and hands out the completion handler, at most once.
    pub fn advance(&mut self) -> Option<E> {
        if let State::Animation(anim) = &self.state {
            if !anim.is_done() {
                return None;
            }
            let to = anim.to();
            self.state = State::Static(to);
        }

        self.on_complete.take()
    }

    pub fn update_config(&mut self, config: taskview_config::Animation) {
        self.config = config;
    }
}
