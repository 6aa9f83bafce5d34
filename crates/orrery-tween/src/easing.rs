//! Easing curves for animated transitions.

/// An easing function mapping normalized time `t` in [0, 1] to progress in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Constant-rate interpolation.
    Linear,
    /// Exponential ease-in-out: slow start, fast middle, slow end.
    ExpoInOut,
    /// Quadratic ease-in-out: gentler shaping than exponential.
    Power1InOut,
}

impl Easing {
    /// Evaluate the curve at normalized time `t`. Input is clamped to [0, 1].
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::ExpoInOut => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else if t < 0.5 {
                    0.5 * 2.0_f32.powf(20.0 * t - 10.0)
                } else {
                    1.0 - 0.5 * 2.0_f32.powf(-20.0 * t + 10.0)
                }
            }
            Easing::Power1InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 3] = [Easing::Linear, Easing::ExpoInOut, Easing::Power1InOut];

    #[test]
    fn test_endpoints_are_exact() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at t=0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at t=1");
        }
    }

    #[test]
    fn test_midpoint_is_half() {
        // All three curves are point-symmetric around (0.5, 0.5).
        for easing in ALL {
            assert!(
                (easing.apply(0.5) - 0.5).abs() < 1e-5,
                "{easing:?} at t=0.5 gave {}",
                easing.apply(0.5)
            );
        }
    }

    #[test]
    fn test_monotonically_increasing() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!(v >= prev, "{easing:?} decreased at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_out_of_range_input_clamped() {
        for easing in ALL {
            assert_eq!(easing.apply(-1.0), 0.0);
            assert_eq!(easing.apply(2.0), 1.0);
        }
    }

    #[test]
    fn test_expo_starts_slower_than_linear() {
        assert!(Easing::ExpoInOut.apply(0.25) < Easing::Linear.apply(0.25));
        assert!(Easing::ExpoInOut.apply(0.75) > Easing::Linear.apply(0.75));
    }
}
