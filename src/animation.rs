use keyframe::{AnimationSequence, EasingFunction, Keyframe};
use std::fmt;

// Define our own enum to store easing types uniformly
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EasingType {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl EasingFunction for EasingType {
    fn y(&self, x: f64) -> f64 {
        match self {
            EasingType::Linear => keyframe::functions::Linear.y(x),
            EasingType::EaseIn => keyframe::functions::EaseIn.y(x),
            EasingType::EaseOut => keyframe::functions::EaseOut.y(x),
            EasingType::EaseInOut => keyframe::functions::EaseInOut.y(x),
        }
    }
}

impl EasingType {
    pub fn eval(&self, x: f32) -> f32 {
        self.y(x as f64) as f32
    }
}

pub fn parse_easing(e: &str) -> EasingType {
    match e {
        "linear" => EasingType::Linear,
        "ease_in" => EasingType::EaseIn,
        "ease_out" => EasingType::EaseOut,
        "ease_in_out" => EasingType::EaseInOut,
        _ => EasingType::Linear,
    }
}

/// A keyframed scalar property sampled by absolute time.
#[derive(Clone)]
pub struct Animated<T>
where
    T: Copy + keyframe::CanTween + Default,
{
    raw_keyframes: Vec<(T, f64, EasingType)>,
    pub sequence: AnimationSequence<T>,
    pub current_value: T,
}

impl<T> Animated<T>
where
    T: Copy + keyframe::CanTween + Default,
{
    pub fn new(initial: T) -> Self {
        let raw = vec![(initial, 0.0, EasingType::Linear)];
        let kf = Keyframe::new(initial, 0.0, EasingType::Linear);

        Self {
            sequence: AnimationSequence::from(vec![kf]),
            raw_keyframes: raw,
            current_value: initial,
        }
    }

    pub fn add_keyframe(&mut self, target: T, duration: f64, easing: EasingType) {
        let current_end_time = self.sequence.duration();
        let new_time = current_end_time + duration;

        self.raw_keyframes.push((target, new_time, easing));

        // Rebuild sequence
        let frames: Vec<Keyframe<T>> = self
            .raw_keyframes
            .iter()
            .map(|(val, time, ease_type)| Keyframe::new(*val, *time, *ease_type))
            .collect();

        self.sequence = AnimationSequence::from(frames);
    }

    pub fn duration(&self) -> f64 {
        self.sequence.duration()
    }

    pub fn add_segment(&mut self, start: T, target: T, duration: f64, easing: EasingType) {
        if self.sequence.duration() == 0.0 {
            *self = Self::new(start);
        } else {
            // Jump to 'start' at the current end time, then ease to target
            self.add_keyframe(start, 0.0, EasingType::Linear);
        }
        self.add_keyframe(target, duration, easing);
    }

    pub fn update(&mut self, time: f64) {
        self.sequence.advance_to(time);
        self.current_value = self.sequence.now();
    }
}

impl<T> fmt::Debug for Animated<T>
where
    T: Copy + keyframe::CanTween + Default + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animated")
            .field("current_value", &self.current_value)
            .finish()
    }
}

/// Per-layer breathing delta. The applied offset is
/// `(2 * phase - 1) * (dx, dy)`, so it never exceeds the authored magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drift {
    pub dx: f32,
    pub dy: f32,
}

impl Drift {
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    pub fn offset(&self, phase: f32) -> (f32, f32) {
        let s = phase * 2.0 - 1.0;
        (s * self.dx, s * self.dy)
    }
}

/// The breathing driver: elapsed time -> eased phase in [0, 1].
///
/// Enabled, the phase runs auto-reversing ease-in-out legs of `period`
/// seconds each, anchored at the last enable time (phase 0 is REST, the
/// resting endpoint of the photo stack). Disabling captures the current
/// phase and settles it to REST over `settle` seconds; enabling always
/// restarts the cycle from REST. Pure function of (state, time); nothing
/// accumulates across toggles.
#[derive(Debug, Clone)]
pub struct Breather {
    enabled: bool,
    period: f64,
    settle: f64,
    anchor: f64,
    settle_from: f32,
}

impl Breather {
    pub const DEFAULT_PERIOD: f64 = 3.0;
    pub const DEFAULT_SETTLE: f64 = 0.3;

    pub fn new(period: f64, settle: f64) -> Self {
        Self {
            enabled: false,
            period,
            settle,
            anchor: 0.0,
            settle_from: 0.0,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, on: bool, time: f64) {
        if on == self.enabled {
            return;
        }
        if on {
            self.enabled = true;
            self.anchor = time;
        } else {
            self.settle_from = self.phase(time);
            self.enabled = false;
            self.anchor = time;
        }
    }

    pub fn phase(&self, time: f64) -> f32 {
        if self.enabled {
            let elapsed = (time - self.anchor).max(0.0);
            if self.period <= 0.0 {
                return 0.0;
            }
            let x = elapsed / self.period;
            let leg = x.floor();
            let u = (x - leg) as f32;
            // Auto-reverse: odd legs replay the eased curve backwards
            let t = if (leg as u64) % 2 == 0 { u } else { 1.0 - u };
            EasingType::EaseInOut.eval(t).clamp(0.0, 1.0)
        } else {
            let elapsed = time - self.anchor;
            if elapsed >= self.settle || self.settle <= 0.0 || elapsed < 0.0 {
                0.0
            } else {
                let t = (elapsed / self.settle) as f32;
                self.settle_from * (1.0 - EasingType::EaseOut.eval(t))
            }
        }
    }
}

impl Default for Breather {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PERIOD, Self::DEFAULT_SETTLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_endpoints_hit_rest_and_peak() {
        let mut b = Breather::default();
        b.set_enabled(true, 0.0);
        assert_eq!(b.phase(0.0), 0.0);
        assert!((b.phase(3.0) - 1.0).abs() < 1e-4);
        assert!(b.phase(6.0).abs() < 1e-4);
    }

    #[test]
    fn phase_stays_in_unit_interval() {
        let mut b = Breather::default();
        b.set_enabled(true, 0.5);
        let mut t = 0.0;
        while t < 20.0 {
            let p = b.phase(t);
            assert!((0.0..=1.0).contains(&p), "phase {} at t={}", p, t);
            t += 0.05;
        }
    }

    #[test]
    fn disable_settles_to_rest() {
        let mut b = Breather::default();
        b.set_enabled(true, 0.0);
        b.set_enabled(false, 1.5);
        assert!(b.phase(1.5) > 0.0);
        assert_eq!(b.phase(1.5 + Breather::DEFAULT_SETTLE), 0.0);
        assert_eq!(b.phase(10.0), 0.0);
    }

    #[test]
    fn drift_offset_is_bounded() {
        let d = Drift::new(0.5, -1.0);
        for i in 0..=100 {
            let phase = i as f32 / 100.0;
            let (x, y) = d.offset(phase);
            assert!(x.abs() <= 0.5 + 1e-6);
            assert!(y.abs() <= 1.0 + 1e-6);
        }
        assert_eq!(d.offset(1.0), (0.5, -1.0));
        assert_eq!(d.offset(0.0), (-0.5, 1.0));
    }
}
