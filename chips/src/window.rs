use tracing::trace;

use crate::bar::KBar;
use crate::constant::ChipError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub start: usize,
    pub end: usize,
}

impl WindowBounds {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolves the bar window ending `range` bars before `index`.
///
/// Positions follow slice-from-end addressing: a negative position counts
/// back from the end of history, anything past the end clamps to `len`.
/// When the window end lands exactly on 0 the window runs to the end of
/// history, so `index = range - 1` selects the latest `trading_days` bars.
pub fn window_bounds(len: usize, index: i64, range: usize, trading_days: usize) -> WindowBounds {
    let end = index - range as i64 + 1;
    let start = end - trading_days as i64;

    let start = resolve_position(start, len);
    let end = if end == 0 {
        len
    } else {
        resolve_position(end, len)
    };

    WindowBounds {
        start,
        end: end.max(start),
    }
}

pub fn select_window(
    bars: &[KBar],
    index: i64,
    range: usize,
    trading_days: usize,
) -> Result<&[KBar], ChipError> {
    let bounds = window_bounds(bars.len(), index, range, trading_days);
    trace!(index, start = bounds.start, end = bounds.end, "window selected");
    if bounds.is_empty() {
        let end = index - range as i64 + 1;
        return Err(ChipError::EmptyWindow {
            index,
            start: end - trading_days as i64,
            end,
        });
    }
    Ok(&bars[bounds.start..bounds.end])
}

fn resolve_position(pos: i64, len: usize) -> usize {
    if pos < 0 {
        (len as i64 + pos).max(0) as usize
    } else {
        (pos as usize).min(len)
    }
}
