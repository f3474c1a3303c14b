// Unit tests for SwipeHeist

use swipeheist::core::{filter, normalize, search, Estimator, RegistryError, SearchResults, TownRegistry};
use swipeheist::models::{FeeModel, ManualEntry, ManualEntryError, Place, RawPlaceRow, StateCode, TownCandidate};

fn place(population: u64, income: Option<u64>) -> Place {
    Place {
        official_name: "Test CDP, Arizona".to_string(),
        display_name: "Test".to_string(),
        population,
        median_household_income: income,
    }
}

fn candidate(name: &str, state: StateCode, population: u64, income: Option<u64>) -> TownCandidate {
    TownCandidate {
        name: name.to_string(),
        state,
        population,
        median_household_income: income,
        is_manual_entry: false,
    }
}

#[test]
fn test_normalize_sedona_row() {
    let rows = vec![RawPlaceRow::new("Sedona CDP, Arizona", "9684", "75520")];

    let places = normalize(&rows);

    assert_eq!(
        places,
        vec![Place {
            official_name: "Sedona CDP, Arizona".to_string(),
            display_name: "Sedona".to_string(),
            population: 9684,
            median_household_income: Some(75520),
        }]
    );
}

#[test]
fn test_normalize_drops_zero_population() {
    let rows = vec![
        RawPlaceRow::new("Empty CDP, Arizona", "0", "50000"),
        RawPlaceRow::new("Sedona CDP, Arizona", "9684", "75520"),
    ];

    let places = normalize(&rows);

    assert_eq!(places.len(), 1);
    assert_eq!(places[0].display_name, "Sedona");
}

#[test]
fn test_normalize_negative_income_absent() {
    let places = normalize(&[RawPlaceRow::new("Sedona CDP, Arizona", "9684", "-1")]);

    assert_eq!(places[0].median_household_income, None);
}

#[test]
fn test_normalize_is_idempotent() {
    let rows = vec![
        RawPlaceRow::new("Sedona CDP, Arizona", "9684", "75520"),
        RawPlaceRow::new("Page city, Arizona", "7440", "-666666666"),
        RawPlaceRow::new("Nothing CDP, Arizona", "", ""),
    ];

    assert_eq!(normalize(&rows), normalize(&rows));
}

#[test]
fn test_estimate_fallback_spend_for_missing_income() {
    let estimator = Estimator::default();

    for population in [1, 50, 9684, 1_000_000] {
        let estimate = estimator.estimate(&place(population, None));
        assert_eq!(estimate.daily_spend_per_person, 75.0);
    }
}

#[test]
fn test_estimate_spend_formula() {
    let estimator = Estimator::default();

    for income in [1, 25_000, 75_520, 250_000] {
        let estimate = estimator.estimate(&place(1000, Some(income)));
        assert_eq!(estimate.daily_spend_per_person, income as f64 * 0.65 / 2.53 / 365.0);
    }
}

#[test]
fn test_estimate_linear_multipliers() {
    let estimator = Estimator::default();

    for (population, income) in [(1, None), (9684, Some(75_520)), (250_000, Some(48_000))] {
        let estimate = estimator.estimate(&place(population, income));
        assert_eq!(estimate.fees_weekly, estimate.fees_daily * 7.0);
        assert_eq!(estimate.fees_monthly, estimate.fees_daily * 30.0);
        assert_eq!(estimate.fees_yearly, estimate.fees_daily * 365.0);
    }
}

#[test]
fn test_estimate_sedona_figures() {
    let estimate = Estimator::default().estimate(&place(9684, Some(75_520)));

    let spend: f64 = 75_520.0 * 0.65 / 2.53 / 365.0;
    let volume = 9684.0 * spend * 0.72;
    let transactions = (volume / 42.0).round();
    let daily = volume * 0.0275 + transactions * 0.05;

    assert_eq!(estimate.total_card_volume, volume);
    assert_eq!(estimate.estimated_daily_transactions, transactions as u64);
    assert_eq!(estimate.fees_daily, daily);
    assert!((estimate.fees_daily - 10_634.0).abs() < 1.0);
}

#[test]
fn test_estimator_accepts_custom_model() {
    let doubled = FeeModel {
        fee_percent: 0.055,
        fee_fixed: 0.10,
        ..FeeModel::default()
    };
    let base = Estimator::default().estimate(&place(5000, Some(60_000)));
    let custom = Estimator::new(doubled).estimate(&place(5000, Some(60_000)));

    assert!((custom.fees_daily - base.fees_daily * 2.0).abs() < 1e-6);
}

#[test]
fn test_registry_duplicate_any_case() {
    let mut registry = TownRegistry::new();
    registry.add(candidate("Key West", StateCode::FL, 26_000, None)).unwrap();

    let second = registry.add(candidate("KEY WEST", StateCode::FL, 26_000, None));

    assert!(matches!(second, Err(RegistryError::Duplicate { .. })));
    let matching = registry
        .list()
        .iter()
        .filter(|t| t.name.eq_ignore_ascii_case("key west") && t.state == StateCode::FL)
        .count();
    assert_eq!(matching, 1);
}

#[test]
fn test_registry_remove_unknown_is_noop() {
    let mut registry = TownRegistry::new();
    let id = registry.add(candidate("Aspen", StateCode::CO, 7000, None)).unwrap();
    registry.remove(id);

    assert!(registry.remove(id).is_none());
    assert!(registry.is_empty());
}

#[test]
fn test_filter_caps_results() {
    let dataset: Vec<Place> = (0..30).map(|_| place(100, None)).collect();

    assert_eq!(filter(&dataset, "test", 10).len(), 10);
    assert!(filter(&dataset, " \t ", 10).is_empty());
    assert_eq!(search(&dataset, " ", 10), SearchResults::Idle);
}

#[test]
fn test_manual_entry_empty_name_rejected() {
    assert_eq!(ManualEntry::parse("", "1200", Some("50000")), Err(ManualEntryError::MissingName));
}
