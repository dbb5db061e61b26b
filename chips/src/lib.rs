pub mod bar;
pub mod calculator;
pub mod config;
pub mod constant;
pub mod distribution;
pub mod distributor;
pub mod grid;
pub mod logging;
pub mod utils;
pub mod window;

pub use bar::KBar;
pub use calculator::ChipsCalculator;
pub use config::{ChipConfig, ChipConfigPatch};
pub use constant::{ChipError, Const};
pub use distribution::{ChipDistribution, PercentChips, PercentChipsTable};
pub use distributor::{ChipDistributor, total_chips};
pub use grid::PriceGrid;
pub use logging::{init_logging, init_logging_with_level};
pub use window::{WindowBounds, select_window, window_bounds};
