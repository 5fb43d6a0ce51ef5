//! End-to-end checks of the reference estimate through the public API

use approx::{assert_abs_diff_eq, assert_relative_eq};
use levy_estimator::input::{load_quantities_from_reader, ConfigOverrides};
use levy_estimator::report::{render_table, EstimateDocument};
use levy_estimator::schedule::penalty_rate;
use levy_estimator::{compute_schedule, BaseMonth, EstimateSession, QuantityMap, ScheduleConfig};

const REFERENCE_CSV: &str = "Period,Quantity\n1,6293\n2,6379\n3,7094\n4,10422\n";

fn reference_quantities() -> QuantityMap {
    load_quantities_from_reader(REFERENCE_CSV.as_bytes()).unwrap()
}

#[test]
fn test_reference_estimate() {
    let base = BaseMonth::parse("2026-01").unwrap();
    let schedule = compute_schedule(base, 4, 0.40, 50.0, &reference_quantities());

    let labels: Vec<&str> = schedule.rows.iter().map(|r| r.month_label.as_str()).collect();
    assert_eq!(labels, ["Jan-26", "Jan-26", "Dec-25", "Nov-25", "Oct-25"]);

    let amounts: Vec<f64> = schedule.rows.iter().map(|r| r.amount).collect();
    assert_eq!(amounts, [0.0, 3147.0, 3572.0, 4449.0, 7321.0]);

    let totals: Vec<f64> = schedule.rows.iter().map(|r| r.total).collect();
    assert_eq!(totals, [0.0, 3197.0, 3622.0, 4499.0, 7371.0]);

    assert_eq!(schedule.total_due(), 18689.0);
    assert_relative_eq!(schedule.totals.penalty, 6413.976608, epsilon = 1e-6);
}

#[test]
fn test_rates_follow_tiers_for_any_quantity() {
    let base = BaseMonth::parse("2023-11").unwrap();
    let quantities: QuantityMap = (0..=24).map(|m| (m, 100.0 + m as f64)).collect();
    let schedule = compute_schedule(base, 24, 1.5, 10.0, &quantities);

    assert_eq!(schedule.rows[0].penalty, 0.0);
    assert_eq!(schedule.rows[1].penalty_rate, 0.25);
    for row in &schedule.rows[2..] {
        let expected = 1.25 * 1.12f64.powf((row.m - 1) as f64) - 1.0;
        assert_abs_diff_eq!(row.penalty_rate, expected, epsilon = 1e-12);
        assert_eq!(row.penalty_rate, penalty_rate(row.m));
        assert!(row.penalty_rate > schedule.rows[row.m as usize - 1].penalty_rate);
    }
}

#[test]
fn test_session_edits_through_count_changes() {
    let mut session = EstimateSession::with_quantities(ScheduleConfig::default(), reference_quantities());
    let before = session.schedule().clone();

    session.set_arrears_count(2);
    assert_eq!(session.schedule().rows.len(), 3);
    session.set_arrears_count(4);

    assert_eq!(session.schedule(), &before);
}

#[test]
fn test_overrides_feed_the_engine() {
    let overrides = ConfigOverrides::from_lookup(|key| match key {
        "LEVY_BASE_MONTH" => Some("2026-03".to_string()),
        "LEVY_ARREARS_COUNT" => Some("1".to_string()),
        "LEVY_UNIT_PRICE" => Some("0".to_string()),
        _ => None,
    })
    .unwrap();

    let mut config = ScheduleConfig::default();
    overrides.apply(&mut config);
    let session = EstimateSession::with_quantities(config, reference_quantities());
    let schedule = session.schedule();

    assert_eq!(schedule.rows.len(), 2);
    assert_eq!(schedule.rows[1].month_label, "Mar-26");
    assert_eq!(schedule.rows[1].levy, 0.0);
    assert_eq!(schedule.rows[1].total, 50.0);
}

#[test]
fn test_outputs_agree_on_grand_total() {
    let session = EstimateSession::seeded();
    let issued = chrono::NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();

    let table = render_table(session.schedule());
    let doc = EstimateDocument::new(session.schedule(), session.signatory(), issued);

    assert!(table.contains("18,689"));
    assert!(doc.render_text().contains("18,689"));
    assert!(doc.render_html().contains("18,689"));
    assert!(doc.render_text().contains("valid till 31 January 2026"));

    let json = serde_json::to_value(session.schedule()).unwrap();
    assert_eq!(json["config"]["base_month"], "2026-01");
    assert_eq!(json["totals"]["total"], 18689.0);
    assert_eq!(json["rows"].as_array().unwrap().len(), 5);
}
