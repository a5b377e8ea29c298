use serde::{Deserialize, Serialize};

pub use interpolation::InterpolateFn;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Duration of one quarter turn, in milliseconds.
    pub twist_duration: f64,
    pub twist_interpolation: InterpolateFn,
}
impl Default for AnimationPreferences {
    fn default() -> Self {
        Self {
            twist_duration: 250.0,
            twist_interpolation: InterpolateFn::Lerp,
        }
    }
}

pub mod interpolation {
    //! Interpolation functions.

    use std::f64::consts::PI;

    use serde::{Deserialize, Serialize};

    /// Function that maps a float from the range 0.0 to 1.0 to another float
    /// from 0.0 to 1.0, with `f(0) = 0` and `f(1) = 1`.
    #[derive(
        Serialize,
        Deserialize,
        Debug,
        Default,
        Copy,
        Clone,
        PartialEq,
        Eq,
        Hash,
        strum::VariantArray,
        strum::Display,
        strum::EnumString,
    )]
    #[serde(rename_all = "snake_case")]
    #[strum(serialize_all = "snake_case")]
    pub enum InterpolateFn {
        #[default]
        Lerp,
        Cosine,
        Cubic,
        Circular,
    }

    impl InterpolateFn {
        /// Returns the interpolation value in the range [0, 1] for `t` in the
        /// range [0, 1].
        pub fn interpolate(self, t: f64) -> f64 {
            match self {
                Self::Lerp => t,

                Self::Cosine => (1.0 - (t * PI).cos()) / 2.0,

                Self::Cubic => (3.0 - 2.0 * t) * t * t,

                Self::Circular => {
                    if t < 0.5 {
                        (1.0 - (1.0 - (2.0 * t).powf(2.0)).sqrt()) * 0.5
                    } else {
                        (1.0 + (1.0 - (-2.0 * t + 2.0).powf(2.0)).sqrt()) * 0.5
                    }
                }
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use strum::VariantArray;

        use super::*;

        #[test]
        fn test_interpolation_endpoints() {
            for &f in InterpolateFn::VARIANTS {
                assert_eq!(f.interpolate(0.0), 0.0, "{f}");
                assert_eq!(f.interpolate(1.0), 1.0, "{f}");
                let mut last = 0.0;
                for i in 1..=100 {
                    let x = f.interpolate(i as f64 / 100.0);
                    assert!(x >= last, "{f} is not monotonic");
                    last = x;
                }
            }
            assert_eq!("cosine".parse(), Ok(InterpolateFn::Cosine));
        }
    }
}
