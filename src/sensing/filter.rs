/// Default smoothing factor, equal weight for the new sample and the history
pub const ALPHA: f32 = 0.5;

/// Single pole exponential smoothing over a stream of samples.
/// - `alpha`: Weight of the newest sample. Not bounds checked, values outside [0, 1] are used as is
/// - `value`: Last filtered value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowPassFilter {
    alpha: f32,
    value: f32,
}

/// Blends `sample` into `previous`: `alpha * sample + (1 - alpha) * previous`
pub fn smooth(sample: f32, previous: f32, alpha: f32) -> f32 {
    alpha * sample + (1.0 - alpha) * previous
}

impl LowPassFilter {
    /// Creates a filter seeded with an unfiltered first value
    pub fn new(alpha: f32, initial: f32) -> Self {
        LowPassFilter { alpha, value: initial }
    }

    /// Feeds a new sample, storing and returning the new filtered value
    pub fn update(&mut self, sample: f32) -> f32 {
        self.value = smooth(sample, self.value, self.alpha);
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test0_single_step_matches_formula() {
        assert_eq!(smooth(12.0, 10.0, 0.5), 11.0);
        assert_eq!(smooth(4.0, 8.0, 0.25), 0.25 * 4.0 + 0.75 * 8.0);

        let mut filter = LowPassFilter::new(ALPHA, 10.0);
        assert_eq!(filter.update(12.0), 11.0);
        assert_eq!(filter.value(), 11.0);
    }

    #[test]
    fn test1_constant_input_converges_monotonically() {
        let target = 5.0;
        let mut filter = LowPassFilter::new(ALPHA, 0.0);
        let mut previous_distance = (target - filter.value()).abs();
        for _ in 0..40 {
            let value = filter.update(target);
            let distance = (target - value).abs();
            assert!(distance <= previous_distance);
            assert!(value <= target);
            previous_distance = distance;
        }
        assert!(previous_distance < 1e-5);
    }

    #[test]
    fn test2_converges_from_above() {
        let mut filter = LowPassFilter::new(0.3, 20.0);
        let mut last = filter.value();
        for _ in 0..10 {
            let value = filter.update(2.0);
            assert!(value < last);
            assert!(value >= 2.0);
            last = value;
        }
    }

    #[test]
    fn test3_result_stays_between_history_and_sample() {
        let mut filter = LowPassFilter::new(ALPHA, 3.0);
        for sample in [0.0, 36.3, 12.5, 1.0, 30.0] {
            let previous = filter.value();
            let value = filter.update(sample);
            assert!(value >= previous.min(sample));
            assert!(value <= previous.max(sample));
        }
    }

    #[test]
    fn test4_extreme_alphas() {
        let mut passthrough = LowPassFilter::new(1.0, 7.0);
        assert_eq!(passthrough.update(3.0), 3.0);

        let mut frozen = LowPassFilter::new(0.0, 7.0);
        assert_eq!(frozen.update(3.0), 7.0);
        assert_eq!(frozen.alpha(), 0.0);
    }

    #[test]
    fn test5_alpha_outside_unit_range_is_applied_as_given() {
        let mut overshoot = LowPassFilter::new(1.5, 10.0);
        assert_eq!(overshoot.update(12.0), 13.0);

        let mut negative = LowPassFilter::new(-0.5, 10.0);
        assert_eq!(negative.update(12.0), 9.0);
        assert_eq!(smooth(12.0, 10.0, -0.5), 9.0);
    }
}
