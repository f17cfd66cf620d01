/// Price value in dollars
///
/// Simulated prices compound through many percentage moves, so plain
/// floating point is used throughout the simulation.
pub type Price = f64;

/// Week counter (week 1 is the first playable week)
pub type Week = u32;

/// Lowest price any company stock can reach
pub const PRICE_FLOOR: Price = 0.01;

/// Clamp a price to the stock floor
pub fn floor_price(price: Price) -> Price {
    price.max(PRICE_FLOOR)
}

/// Move a price by a signed percentage (`-15.0` means a 15% drop)
pub fn apply_percent(price: Price, percent: f64) -> Price {
    price * (1.0 + percent / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_floor_price() {
        assert_eq!(floor_price(-3.0), PRICE_FLOOR);
        assert_eq!(floor_price(0.0), PRICE_FLOOR);
        assert_eq!(floor_price(12.5), 12.5);
    }

    #[test]
    fn test_apply_percent() {
        assert_relative_eq!(apply_percent(100.0, -15.0), 85.0);
        assert_relative_eq!(apply_percent(80.0, 25.0), 100.0);
    }
}
