//! Exponential smoothing of the contact force magnitude.

use crate::domain::models::shaping::FORCE_EMA_ALPHA;
use crate::domain::models::Vec3;

/// Force magnitude and its smoothed value after one update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceReading {
    pub magnitude: f64,
    pub ema: f64,
}

/// Fold one force sample into the running average.
///
/// `ema' = (1 - α) · ema + α · |force|` with α fixed at 0.2.
pub fn update(prior_ema: f64, force: &Vec3) -> ForceReading {
    let magnitude = force.norm();
    let ema = (1.0 - FORCE_EMA_ALPHA) * prior_ema + FORCE_EMA_ALPHA * magnitude;
    ForceReading { magnitude, ema }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_update_from_zero() {
        let reading = update(0.0, &Vec3::new(3.0, 0.0, 4.0));
        assert!((reading.magnitude - 5.0).abs() < 1e-12);
        assert!((reading.ema - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_recurrence() {
        let reading = update(2.0, &Vec3::new(0.0, 1.0, 0.0));
        assert!((reading.ema - (0.8 * 2.0 + 0.2 * 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_converges_to_constant_input() {
        let force = Vec3::new(0.0, 0.0, 2.0);
        let mut ema = 0.0;
        for _ in 0..200 {
            ema = update(ema, &force).ema;
        }
        assert!((ema - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_force_decays() {
        let reading = update(1.0, &Vec3::ZERO);
        assert_eq!(reading.magnitude, 0.0);
        assert!((reading.ema - 0.8).abs() < 1e-12);
    }
}
