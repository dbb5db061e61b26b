use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ChipError {
    PercentOutOfRange(f64),
    InvalidAccuracyFactor(usize),
    EmptyWindow { index: i64, start: i64, end: i64 },
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Json(serde_json::Error),
}

pub struct Const;

impl Const {
    pub const DEFAULT_ACCURACY_FACTOR: usize = 150;
    pub const MIN_ACCURACY_FACTOR: usize = 2;
    pub const DEFAULT_TRADING_DAYS: usize = 60;
    pub const MIN_ACCURACY: f64 = 0.01;
    pub const PRICE_DECIMALS: usize = 2;
    pub const CHIP_PRECISION: usize = 12;
    pub const FLAT_LEG_EPSILON: f64 = 1e-8;
}

impl Display for ChipError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PercentOutOfRange(v) => write!(f, "argument \"percent\" out of range: {v}"),
            Self::InvalidAccuracyFactor(v) => {
                write!(f, "accuracy factor must be >= {}, got {v}", Const::MIN_ACCURACY_FACTOR)
            }
            Self::EmptyWindow { index, start, end } => {
                write!(f, "empty bar window for index {index} (start {start}, end {end})")
            }
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Yaml(e) => write!(f, "yaml error: {e}"),
            Self::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl std::error::Error for ChipError {}

impl From<std::io::Error> for ChipError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_yaml::Error> for ChipError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Yaml(value)
    }
}

impl From<serde_json::Error> for ChipError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
