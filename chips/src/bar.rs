use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawKBar")]
pub struct KBar {
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
    pub amount: f64,
    pub amplitude: f64,
    pub turnover: f64,
}

impl KBar {
    pub fn avg_price(&self) -> f64 {
        (self.open + self.close + self.high + self.low) / 4.0
    }

    /// Turnover as a fraction capped at 1. NaN counts as 0; negative values pass through.
    pub fn turnover_rate(&self) -> f64 {
        let rate = self.turnover / 100.0;
        if rate.is_nan() { 0.0 } else { rate.min(1.0) }
    }

    pub fn is_single_price(&self) -> bool {
        self.high == self.low
    }

    pub fn total_range(&self) -> f64 {
        self.high - self.low
    }
}

// Field order doubles as the positional K-line row:
// [date, open, close, high, low, volume, amount, amplitude, turnover]
#[derive(Debug, Deserialize)]
struct RawKBar {
    date: NaiveDate,
    open: f64,
    close: f64,
    high: f64,
    low: f64,
    #[serde(default)]
    volume: f64,
    #[serde(default)]
    amount: f64,
    #[serde(default)]
    amplitude: f64,
    #[serde(default, alias = "turnoverRate", alias = "turnover_rate")]
    turnover: Option<f64>,
}

impl From<RawKBar> for KBar {
    fn from(raw: RawKBar) -> Self {
        KBar {
            date: raw.date,
            open: raw.open,
            close: raw.close,
            high: raw.high,
            low: raw.low,
            volume: raw.volume,
            amount: raw.amount,
            amplitude: raw.amplitude,
            turnover: raw.turnover.unwrap_or(0.0),
        }
    }
}
