use fish_forecast::{ForecastError, PeriodKey, ProductionSeries};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn all_months(from_year: i32, years: i32) -> Vec<PeriodKey> {
    (from_year..from_year + years)
        .flat_map(|year| (1..=12).map(move |month| PeriodKey::new(month, year).unwrap()))
        .collect()
}

#[test]
fn test_snapshot_order_ignores_insertion_order() {
    let periods = all_months(2023, 3);
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..20 {
        let mut shuffled = periods.clone();
        shuffled.shuffle(&mut rng);

        let mut series = ProductionSeries::new();
        for (i, period) in shuffled.iter().enumerate() {
            series.append(*period, i as f64).unwrap();
        }

        let snapshot: Vec<PeriodKey> = series.ordered_snapshot().iter().map(|p| p.period).collect();
        assert_eq!(snapshot, periods);
    }
}

#[test]
fn test_snapshot_keeps_values_with_periods() {
    let mut series = ProductionSeries::new();
    series.append(PeriodKey::new(5, 2024).unwrap(), 50.0).unwrap();
    series.append(PeriodKey::new(2, 2024).unwrap(), 20.0).unwrap();
    series.append(PeriodKey::new(11, 2023).unwrap(), 110.0).unwrap();

    for point in series.ordered_snapshot() {
        let expected = match point.period.month() {
            5 => 50.0,
            2 => 20.0,
            11 => 110.0,
            other => panic!("unexpected month {}", other),
        };
        assert_eq!(point.production_kg, expected);
    }
}

#[test]
fn test_failed_appends_leave_series_unchanged() {
    let jan = PeriodKey::parse("January", 2024).unwrap();
    let mut series = ProductionSeries::new();
    series.append(jan, 10.0).unwrap();

    let before = series.ordered_snapshot();

    assert!(matches!(
        series.append(jan, 12.0),
        Err(ForecastError::DuplicatePeriod(_))
    ));
    assert!(matches!(
        series.append(PeriodKey::parse("February", 2024).unwrap(), -0.01),
        Err(ForecastError::NegativeProduction(_))
    ));

    assert_eq!(series.size(), 1);
    assert_eq!(series.ordered_snapshot(), before);
}

#[test]
fn test_series_from_month_year_strings() {
    let mut series = ProductionSeries::new();
    for (key, value) in [("March 2024", 3.0), ("January 2024", 1.0), ("February 2024", 2.0)] {
        series.append(key.parse().unwrap(), value).unwrap();
    }

    let labels: Vec<String> = series
        .ordered_snapshot()
        .iter()
        .map(|p| p.period.to_string())
        .collect();
    assert_eq!(labels, vec!["Jan 2024", "Feb 2024", "Mar 2024"]);
}
