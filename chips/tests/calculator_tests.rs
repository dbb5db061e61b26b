use chrono::NaiveDate;

use chips::{ChipConfig, ChipError, ChipsCalculator, KBar};

fn bar(day: u32, open: f64, close: f64, high: f64, low: f64, turnover: f64) -> KBar {
    KBar {
        date: NaiveDate::from_ymd_opt(2024, 4, day).expect("valid date"),
        open,
        close,
        high,
        low,
        volume: 500.0,
        amount: 500.0 * close,
        amplitude: 0.0,
        turnover,
    }
}

fn history() -> Vec<KBar> {
    vec![
        bar(1, 10.0, 10.4, 10.6, 9.8, 3.0),
        bar(2, 10.4, 10.9, 11.2, 10.3, 4.5),
        bar(3, 10.9, 10.7, 11.0, 10.5, 2.0),
        bar(4, 10.7, 11.3, 11.5, 10.6, 6.0),
        bar(5, 11.3, 11.1, 11.6, 10.9, 3.5),
        bar(6, 11.1, 11.8, 12.0, 11.0, 7.0),
    ]
}

#[test]
fn calculator_rejects_degenerate_accuracy_factor() {
    let err = ChipsCalculator::new(history(), ChipConfig::new(1, 0, 3)).expect_err("factor < 2");
    assert!(matches!(err, ChipError::InvalidAccuracyFactor(1)));
}

#[test]
fn flat_single_bar_concentrates_all_mass() {
    let bars = vec![bar(1, 10.0, 10.0, 10.0, 10.0, 10.0)];
    let calc = ChipsCalculator::new(bars, ChipConfig::new(3, 0, 1)).expect("valid config");
    let result = calc.calc(0).expect("window should resolve");

    assert_eq!(result.prices(), &[10.0, 10.01, 10.02]);
    assert_eq!(result.chips(), &[0.1, 0.0, 0.0]);
    assert_eq!(result.total_chips(), 0.1);
    assert_eq!(result.boundary(), Some(0));
    assert_eq!(result.avg_cost(), "10.00");
    assert_eq!(result.latest_benefit_part(), 1.0);
}

#[test]
fn full_turnover_day_resets_distribution() {
    let bars = vec![
        bar(1, 9.0, 11.0, 12.0, 8.0, 50.0),
        bar(2, 10.0, 10.0, 10.0, 10.0, 100.0),
    ];
    let calc = ChipsCalculator::new(bars, ChipConfig::default()).expect("valid config");
    let result = calc.calc(1).expect("window should resolve");

    let held: Vec<usize> = result
        .chips()
        .iter()
        .enumerate()
        .filter(|(_, x)| **x != 0.0)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(held.len(), 1);
    assert_eq!(result.chips()[held[0]], 74.5);
    assert_eq!(result.total_chips(), 74.5);
    assert_eq!(result.avg_cost(), "9.99");
}

#[test]
fn calc_uses_trailing_window_before_current_bar() {
    let calc = ChipsCalculator::new(history(), ChipConfig::new(50, 1, 3)).expect("valid config");
    let result = calc.calc(4).expect("window should resolve");

    // bars 2..=4 (days 2, 3, 4)
    assert_eq!(result.date(), NaiveDate::from_ymd_opt(2024, 4, 4).expect("valid date"));
    assert_eq!(result.min_price(), 10.3);
    assert_eq!(result.prices()[49], 11.5);
    assert_eq!(result.trading_days(), 3);
}

#[test]
fn calc_latest_matches_end_of_history_carve_out() {
    let latest = ChipsCalculator::new(history(), ChipConfig::new(80, 0, 4))
        .expect("valid config")
        .calc_latest()
        .expect("window should resolve");

    // index = range - 1 resolves the window end to 0: last 4 bars
    let carved = ChipsCalculator::new(history(), ChipConfig::new(80, 1, 4))
        .expect("valid config")
        .calc(0)
        .expect("window should resolve");

    assert_eq!(latest, carved);
    assert_eq!(latest.date(), NaiveDate::from_ymd_opt(2024, 4, 6).expect("valid date"));
}

#[test]
fn calc_reports_window_past_history() {
    let calc = ChipsCalculator::new(history(), ChipConfig::new(50, 0, 10)).expect("valid config");
    assert!(matches!(
        calc.calc(20),
        Err(ChipError::EmptyWindow {
            index: 20,
            start: 11,
            end: 21
        })
    ));
}

#[test]
fn calc_is_repeatable() {
    chips::init_logging();
    chips::init_logging();

    let calc = ChipsCalculator::new(history(), ChipConfig::default()).expect("valid config");
    let first = calc.calc(5).expect("window should resolve");
    let second = calc.calc(5).expect("window should resolve");
    assert_eq!(first, second);
    assert_eq!(calc.bars().len(), 6);
    assert_eq!(calc.config().accuracy_factor, 150);
}

#[test]
fn calc_rounds_grid_prices_from_exact_value() {
    // level 1 sits at 14.465 (stored as 14.46499...), which rounds down
    let bars = vec![
        bar(1, 14.4, 14.5, 14.53, 14.4, 5.0),
    ];
    let calc = ChipsCalculator::new(bars, ChipConfig::new(3, 0, 1)).expect("valid config");
    let result = calc.calc(0).expect("window should resolve");

    assert_eq!(result.prices(), &[14.4, 14.46, 14.53]);
    assert_eq!(result.boundary(), Some(2));
}
