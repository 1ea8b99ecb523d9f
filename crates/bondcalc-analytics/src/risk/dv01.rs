//! DV01 (dollar value of one basis point).
//!
//! ```text
//! DV01 = Modified Duration × Price × 0.0001
//! ```
//!
//! Prices here are in currency units, so no par scaling applies.

/// One basis point.
pub const BASIS_POINT: f64 = 0.0001;

/// DV01 from modified duration.
pub fn dv01_from_duration(modified: f64, price: f64) -> f64 {
    modified * price * BASIS_POINT
}

/// DV01 from prices at ±1bp.
pub fn dv01_from_prices(price_down: f64, price_up: f64) -> f64 {
    (price_down - price_up) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dv01_from_duration() {
        assert_relative_eq!(dv01_from_duration(7.71784, 950.0), 0.7331948, epsilon = 1e-7);
    }

    #[test]
    fn test_dv01_from_prices() {
        assert_relative_eq!(dv01_from_prices(100.05, 99.95), 0.05, epsilon = 1e-12);
    }
}
