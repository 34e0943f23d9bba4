// ============================================================================
// Price Schedule
// Geometric per-unit cost scaling and batch summation
// ============================================================================

use crate::numeric::Currency;

/// Unit `k` of an item costs `base × growth^k`.
///
/// The multiplier `growth^k` is computed in `f64` and converted through its
/// decimal string, so it is approximate; the multiplication by the base cost
/// and every sum after that is exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSchedule {
    growth_factor: f64,
}

impl PriceSchedule {
    pub fn new(growth_factor: f64) -> Self {
        Self { growth_factor }
    }

    pub fn growth_factor(&self) -> f64 {
        self.growth_factor
    }

    /// Price of one more unit when `existing` are already owned.
    ///
    /// `None` once `growth^existing` leaves the finite `f64` range.
    pub fn unit_price(&self, base_cost: &Currency, existing: u64) -> Option<Currency> {
        let multiplier = Currency::from_f64(self.growth_factor.powf(existing as f64)).ok()?;
        Some(base_cost * multiplier)
    }

    /// Total for `n` more units on top of `existing`.
    ///
    /// Runs one step per unit until the multiplier overflows, so very large
    /// `n` is only cheap for steep growth factors. Prefer
    /// [`batch_price_within`](Self::batch_price_within) when a budget is known.
    pub fn batch_price(&self, base_cost: &Currency, existing: u64, n: u64) -> Currency {
        sum_unit_prices(n, |i| {
            self.unit_price(base_cost, existing.saturating_add(i))
        })
    }

    /// Total for `n` more units, abandoned as soon as it exceeds `budget`.
    ///
    /// `Ok(total)` when the batch fits. `Err(partial)` carries the first
    /// running total above the budget, a lower bound on the full price. With
    /// a positive base cost the loop ends after at most `budget / base_cost + 1`
    /// units whatever `n` is.
    pub fn batch_price_within(
        &self,
        base_cost: &Currency,
        existing: u64,
        n: u64,
        budget: &Currency,
    ) -> Result<Currency, Currency> {
        let mut total = Currency::zero();
        for i in 0..n {
            let Some(price) = self.unit_price(base_cost, existing.saturating_add(i)) else {
                tracing::debug!("Batch price truncated after {} of {} units", i, n);
                break;
            };
            total = total + price;
            if &total > budget {
                return Err(total);
            }
        }
        Ok(total)
    }
}

/// Adds `unit_price(i)` for `i` in `0..n`.
///
/// Stops at the first unit that has no price and returns what was summed so
/// far, so an unpriceable tail truncates the batch instead of failing it.
pub fn sum_unit_prices(n: u64, mut unit_price: impl FnMut(u64) -> Option<Currency>) -> Currency {
    let mut total = Currency::zero();
    for i in 0..n {
        match unit_price(i) {
            Some(price) => total = total + price,
            None => {
                tracing::debug!("Batch price truncated after {} of {} units", i, n);
                break;
            },
        }
    }
    total
}
