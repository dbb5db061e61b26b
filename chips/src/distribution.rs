use chrono::NaiveDate;
use serde::Serialize;

use crate::constant::{ChipError, Const};
use crate::distributor::total_chips;
use crate::grid::PriceGrid;
use crate::utils::{approx_eq_f64, format_price, to_precision};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentChips {
    #[serde(rename = "priceRange")]
    pub price_range: [String; 2],
    pub concentration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentChipsTable {
    #[serde(rename = "90")]
    pub p90: PercentChips,
    #[serde(rename = "70")]
    pub p70: PercentChips,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChipDistribution {
    x: Vec<f64>,
    y: Vec<f64>,
    b: usize,
    d: NaiveDate,
    t: usize,
    #[serde(rename = "benefitPart")]
    benefit_part: f64,
    #[serde(rename = "avgCost")]
    avg_cost: String,
    #[serde(rename = "percentChips")]
    percent_chips: PercentChipsTable,
    #[serde(skip)]
    min_price: f64,
    #[serde(skip)]
    accuracy: f64,
    #[serde(skip)]
    total_chips: f64,
}

impl ChipDistribution {
    pub fn new(
        grid: PriceGrid,
        chips: Vec<f64>,
        date: NaiveDate,
        trading_days: usize,
        close: f64,
    ) -> Self {
        let b = grid.boundary(close).map_or(0, |i| i + 1);
        let mut result = Self {
            total_chips: total_chips(&chips),
            x: chips,
            b,
            d: date,
            t: trading_days,
            min_price: grid.min_price,
            accuracy: grid.accuracy,
            y: grid.prices,
            benefit_part: 0.0,
            avg_cost: String::new(),
            percent_chips: PercentChipsTable {
                p90: PercentChips::default_band(),
                p70: PercentChips::default_band(),
            },
        };
        result.benefit_part = result.benefit_part(close);
        result.avg_cost = format_price(result.cost_by_chip(result.total_chips * 0.5));
        result.percent_chips = PercentChipsTable {
            p90: result.band(0.9),
            p70: result.band(0.7),
        };
        result
    }

    pub fn chips(&self) -> &[f64] {
        &self.x
    }

    pub fn prices(&self) -> &[f64] {
        &self.y
    }

    pub fn factor(&self) -> usize {
        self.x.len()
    }

    /// First level at or above the latest close.
    pub fn boundary(&self) -> Option<usize> {
        self.b.checked_sub(1)
    }

    pub fn date(&self) -> NaiveDate {
        self.d
    }

    pub fn trading_days(&self) -> usize {
        self.t
    }

    pub fn min_price(&self) -> f64 {
        self.min_price
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn total_chips(&self) -> f64 {
        self.total_chips
    }

    pub fn latest_benefit_part(&self) -> f64 {
        self.benefit_part
    }

    pub fn avg_cost(&self) -> &str {
        &self.avg_cost
    }

    pub fn percent_chips_table(&self) -> &PercentChipsTable {
        &self.percent_chips
    }

    /// Price where the cumulative mass from the bottom first exceeds `chip`.
    /// Returns 0 when `chip` is at or beyond the total.
    pub fn cost_by_chip(&self, chip: f64) -> f64 {
        self.try_cost_by_chip(chip).unwrap_or(0.0)
    }

    pub fn try_cost_by_chip(&self, chip: f64) -> Option<f64> {
        let mut sum = 0.0;
        for (i, x) in self.rounded_chips().enumerate() {
            if sum + x > chip {
                return Some(self.level_price(i));
            }
            sum += x;
        }
        None
    }

    pub fn benefit_part(&self, price: f64) -> f64 {
        if self.total_chips == 0.0 {
            return 0.0;
        }
        let below: f64 = self
            .rounded_chips()
            .enumerate()
            .filter(|(i, _)| price >= self.level_price(*i))
            .map(|(_, x)| x)
            .sum();
        below / self.total_chips
    }

    /// Band holding the central `percent` of chips; `percent` must lie in [0, 1].
    pub fn percent_chips(&self, percent: f64) -> Result<PercentChips, ChipError> {
        if !(0.0..=1.0).contains(&percent) {
            return Err(ChipError::PercentOutOfRange(percent));
        }
        Ok(self.band(percent))
    }

    pub fn to_json(&self) -> Result<String, ChipError> {
        Ok(serde_json::to_string(self)?)
    }

    fn band(&self, percent: f64) -> PercentChips {
        let low = self.cost_by_chip(self.total_chips * (1.0 - percent) / 2.0);
        let high = self.cost_by_chip(self.total_chips * (1.0 + percent) / 2.0);
        let concentration = if approx_eq_f64(low + high, 0.0) {
            0.0
        } else {
            (high - low) / (high + low)
        };
        PercentChips {
            price_range: [format_price(low), format_price(high)],
            concentration,
        }
    }

    fn level_price(&self, i: usize) -> f64 {
        self.min_price + i as f64 * self.accuracy
    }

    fn rounded_chips(&self) -> impl Iterator<Item = f64> + '_ {
        self.x.iter().map(|x| to_precision(*x, Const::CHIP_PRECISION))
    }
}

impl PercentChips {
    fn default_band() -> Self {
        Self {
            price_range: [format_price(0.0), format_price(0.0)],
            concentration: 0.0,
        }
    }
}
