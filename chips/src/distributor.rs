use tracing::trace;

use crate::bar::KBar;
use crate::constant::Const;
use crate::grid::PriceGrid;
use crate::utils::to_precision;

/// Folds a bar window into per-level chip mass over a [`PriceGrid`].
pub struct ChipDistributor<'a> {
    grid: &'a PriceGrid,
}

impl<'a> ChipDistributor<'a> {
    pub fn new(grid: &'a PriceGrid) -> Self {
        Self { grid }
    }

    pub fn distribute(&self, window: &[KBar]) -> Vec<f64> {
        let mut chips = vec![0.0; self.grid.factor()];
        for bar in window {
            let rate = bar.turnover_rate();
            decay(&mut chips, rate);
            self.accumulate(&mut chips, bar, rate);
        }
        trace!(bars = window.len(), total = total_chips(&chips), "chips distributed");
        chips
    }

    fn accumulate(&self, chips: &mut [f64], bar: &KBar, rate: f64) {
        let factor = chips.len();
        let avg = bar.avg_price();

        if bar.is_single_price() {
            // point mass carries half the triangle's area
            let peak = factor.saturating_sub(1) as f64;
            if let Some(slot) = level_slot(chips, self.grid.floor_index(avg)) {
                *slot += peak * rate / 2.0;
            }
            return;
        }

        let (low, high) = (bar.low, bar.high);
        let peak = 2.0 / bar.total_range();
        let first = self.grid.ceil_index(low).max(0);
        let last = self.grid.floor_index(high).min(factor as i64 - 1);

        for j in first..=last {
            let price = self.grid.level_price(j as usize);
            let weight = if price <= avg {
                if (avg - low).abs() < Const::FLAT_LEG_EPSILON {
                    1.0
                } else {
                    (price - low) / (avg - low)
                }
            } else if (high - avg).abs() < Const::FLAT_LEG_EPSILON {
                1.0
            } else {
                (high - price) / (high - avg)
            };
            chips[j as usize] += weight * peak * rate;
        }
    }
}

pub fn total_chips(chips: &[f64]) -> f64 {
    chips
        .iter()
        .map(|x| to_precision(*x, Const::CHIP_PRECISION))
        .sum()
}

fn decay(chips: &mut [f64], rate: f64) {
    let keep = 1.0 - rate;
    chips.iter_mut().for_each(|x| *x *= keep);
}

fn level_slot(chips: &mut [f64], index: i64) -> Option<&mut f64> {
    usize::try_from(index).ok().and_then(|i| chips.get_mut(i))
}
