use serde::Serialize;

use crate::bar::KBar;
use crate::constant::Const;
use crate::utils::round_to;

/// Evenly spaced price levels covering a bar window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceGrid {
    pub min_price: f64,
    pub max_price: f64,
    pub accuracy: f64,
    pub prices: Vec<f64>,
}

impl PriceGrid {
    /// Step is floored at 0.01, so a flat window still gets distinct levels.
    pub fn build(window: &[KBar], factor: usize) -> Self {
        let (min_price, max_price) = price_span(window);
        let steps = factor.saturating_sub(1).max(1) as f64;
        let accuracy = Const::MIN_ACCURACY.max((max_price - min_price) / steps);

        let prices = (0..factor)
            .map(|i| round_to(min_price + accuracy * i as f64, Const::PRICE_DECIMALS))
            .collect();

        Self {
            min_price,
            max_price,
            accuracy,
            prices,
        }
    }

    pub fn factor(&self) -> usize {
        self.prices.len()
    }

    pub fn level_price(&self, i: usize) -> f64 {
        self.min_price + self.accuracy * i as f64
    }

    /// First level whose rounded price is at or above `close`.
    pub fn boundary(&self, close: f64) -> Option<usize> {
        self.prices.iter().position(|price| *price >= close)
    }

    pub fn ceil_index(&self, price: f64) -> i64 {
        ((price - self.min_price) / self.accuracy).ceil() as i64
    }

    pub fn floor_index(&self, price: f64) -> i64 {
        ((price - self.min_price) / self.accuracy).floor() as i64
    }
}

fn price_span(window: &[KBar]) -> (f64, f64) {
    window.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), bar| {
        (min.min(bar.low), max.max(bar.high))
    })
}
