use tracing::debug;

use crate::bar::KBar;
use crate::config::ChipConfig;
use crate::constant::ChipError;
use crate::distribution::ChipDistribution;
use crate::distributor::ChipDistributor;
use crate::grid::PriceGrid;
use crate::window::select_window;

#[derive(Debug, Clone)]
pub struct ChipsCalculator {
    bars: Vec<KBar>,
    config: ChipConfig,
}

impl ChipsCalculator {
    pub fn new(bars: Vec<KBar>, config: ChipConfig) -> Result<Self, ChipError> {
        config.validate()?;
        Ok(Self { bars, config })
    }

    pub fn bars(&self) -> &[KBar] {
        &self.bars
    }

    pub fn config(&self) -> &ChipConfig {
        &self.config
    }

    pub fn calc(&self, index: i64) -> Result<ChipDistribution, ChipError> {
        let window = select_window(
            &self.bars,
            index,
            self.config.range,
            self.config.trading_days,
        )?;
        // select_window never yields an empty slice
        let last = &window[window.len() - 1];

        let grid = PriceGrid::build(window, self.config.accuracy_factor);
        debug!(
            index,
            bars = window.len(),
            min_price = grid.min_price,
            max_price = grid.max_price,
            accuracy = grid.accuracy,
            "price grid built"
        );

        let chips = ChipDistributor::new(&grid).distribute(window);
        let result = ChipDistribution::new(
            grid,
            chips,
            last.date,
            self.config.trading_days,
            last.close,
        );
        debug!(
            date = %result.date(),
            total_chips = result.total_chips(),
            avg_cost = result.avg_cost(),
            "chip distribution computed"
        );
        Ok(result)
    }

    pub fn calc_latest(&self) -> Result<ChipDistribution, ChipError> {
        self.calc(self.bars.len() as i64 - 1)
    }
}
