use crate::render::{Canvas, RenderSurface};
use crate::simulation::{Frame, Simulation};

/// Ease-out cubic tween from zero up to a target, started once.
///
/// The clock starts at the first frame stepped after activation. Whole-number
/// targets count in whole steps, fractional ones in tenths, and the last
/// frame lands exactly on the target.
#[derive(Clone, Debug, PartialEq)]
pub struct CountUp {
    target: f64,
    duration_ms: f64,
    started: bool,
    start_ms: Option<f64>,
    value: f64,
    done: bool,
}

pub const DEFAULT_DURATION_MS: f64 = 2000.;

pub fn ease_out_cubic(progress: f64) -> f64 {
    1. - (1. - progress).powi(3)
}

impl CountUp {
    pub fn new(target: f64, duration_ms: f64) -> CountUp {
        CountUp {
            target,
            duration_ms,
            started: false,
            start_ms: None,
            value: 0.,
            done: false,
        }
    }

    /// Returns `false` if the count already started.
    pub fn activate(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        true
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    fn shown(&self, current: f64) -> f64 {
        if self.target.fract() == 0. {
            current.floor()
        } else {
            (current * 10.).round() / 10.
        }
    }
}

impl Simulation for CountUp {
    fn step(&mut self, frame: &Frame) {
        if !self.started || self.done {
            return;
        }
        let start = *self.start_ms.get_or_insert(frame.timestamp_ms);
        let progress = if self.duration_ms > 0. {
            ((frame.timestamp_ms - start) / self.duration_ms).clamp(0., 1.)
        } else {
            1.
        };
        if progress >= 1. {
            self.value = self.target;
            self.done = true;
        } else {
            self.value = self.shown(ease_out_cubic(progress) * self.target);
        }
    }

    fn render<C: Canvas>(&self, _surface: &mut RenderSurface<C>) {}

    fn is_active(&self) -> bool {
        self.started && !self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Dimensions;

    fn at(timestamp_ms: f64) -> Frame {
        Frame {
            dimensions: Dimensions::new(0, 0),
            timestamp_ms,
        }
    }

    #[test]
    fn counts_to_integer_target() {
        let mut count = CountUp::new(12., 2000.);
        count.step(&at(0.));
        assert_eq!(count.value(), 0.);
        assert!(count.activate());
        assert!(!count.activate());
        count.step(&at(100.));
        assert_eq!(count.value(), 0.);
        count.step(&at(1100.));
        // 1 - 0.5^3 = 0.875
        assert_eq!(count.value(), 10.);
        count.step(&at(2100.));
        assert_eq!(count.value(), 12.);
        assert!(count.is_done());
        assert!(!count.is_active());
    }

    #[test]
    fn fractional_target_rounds_to_tenths() {
        let mut count = CountUp::new(3.9, 1000.);
        count.activate();
        count.step(&at(0.));
        count.step(&at(500.));
        assert_eq!(count.value(), 3.4);
        count.step(&at(1000.));
        assert_eq!(count.value(), 3.9);
    }
}
