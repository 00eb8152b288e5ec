use std::io::Write;

use capdash::data::metric::{format_days_to_full, scatter_records, Horizon, MetricRow};
use capdash::data::prediction::{PredictionPayload, TimeSeriesRecord};
use capdash::data::scale::LinearScale;
use capdash::{DashboardConfig, DashboardError};

const LISTING: &str = r#"[
  {
    "uuid": "a1",
    "metric_name": "cpu",
    "host_name": "web-1",
    "host_id": "h1",
    "service_id": "s1",
    "service_name": "nginx",
    "days_to_full": 12.5,
    "current_saturation": 0.81,
    "confidence_level": 2,
    "saturation_3_months": {"current_saturation": 0.81, "forecast": 0.9},
    "saturation_6_months": {"current_saturation": 0.81, "forecast": null},
    "saturation_12_months": {"current_saturation": 0.81, "forecast": 1.2}
  },
  {
    "uuid": "b2",
    "metric_name": "disk",
    "days_to_full": null,
    "current_saturation": 0.4
  }
]"#;

#[test]
fn listing_decodes_nulls_and_missing_fields_as_nan() {
    let rows: Vec<MetricRow> = serde_json::from_str(LISTING).unwrap();
    assert_eq!(rows.len(), 2);

    let a = &rows[0];
    assert_eq!(a.service_name, "nginx");
    assert_eq!(a.confidence_level, 2.0);
    assert_eq!(a.saturation(Horizon::ThreeMonths).forecast, 0.9);
    assert!(a.saturation(Horizon::SixMonths).forecast.is_nan());
    assert_eq!(a.saturation(Horizon::TwelveMonths).forecast, 1.2);
    assert_eq!(a.neg_days_to_full(), Some(-12.5));

    let b = &rows[1];
    assert!(b.host_name.is_empty());
    assert!(b.days_to_full.is_nan());
    assert!(b.confidence_level.is_nan());
    assert!(b.saturation(Horizon::ThreeMonths).current_saturation.is_nan());
    assert_eq!(b.neg_days_to_full(), None);
    assert_eq!(format_days_to_full(b.days_to_full), "+300");
}

#[test]
fn only_plottable_rows_reach_the_scatterplot() {
    let mut rows: Vec<MetricRow> = serde_json::from_str(LISTING).unwrap();
    let mut far = MetricRow::new("c3");
    far.days_to_full = 5000.0;
    far.current_saturation = 0.2;
    rows.push(far);

    let records = scatter_records(&rows);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].row, 0);
    assert_eq!(records[0].neg_days_to_full, -12.5);
}

#[test]
fn already_full_metrics_stay_on_the_scatterplot() {
    let mut full = MetricRow::new("full");
    full.days_to_full = 0.0;
    full.current_saturation = 0.995;
    let mut never = MetricRow::new("never");
    never.days_to_full = 1000.0;
    never.current_saturation = 0.1;

    let records = scatter_records(&[full, never]);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].row, 0);
    assert_eq!(records[0].neg_days_to_full, 0.0);
}

#[test]
fn prediction_payload_becomes_time_series() {
    let payload: PredictionPayload = serde_json::from_str(
        r#"{
            "data_scaled": [0.1, 0.2],
            "data_dates": ["1970-01-01", "1970-01-02T00:00:00Z"],
            "forecast": [0.3],
            "forecast_dates": ["1970-01-03T00:00:00"]
        }"#,
    )
    .unwrap();
    let rec = TimeSeriesRecord::try_from(payload).unwrap();
    assert_eq!(rec.history, vec![[0.0, 0.1], [86_400.0, 0.2]]);
    assert_eq!(rec.forecast, vec![[172_800.0, 0.3]]);
    assert_eq!(rec.date_extent(), Some((0.0, 172_800.0)));
    assert_eq!(rec.value_extent(), (0.1, 0.3));
    assert_eq!(rec.all_points().count(), 3);
}

#[test]
fn mismatched_lengths_are_rejected() {
    let payload = PredictionPayload {
        data_scaled: vec![0.1, 0.2, 0.3],
        data_dates: vec!["2024-01-01".into(), "2024-01-02".into()],
        ..Default::default()
    };
    match TimeSeriesRecord::try_from(payload) {
        Err(DashboardError::LengthMismatch { left, right, .. }) => assert_eq!((left, right), (3, 2)),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn bad_dates_are_rejected() {
    let payload = PredictionPayload {
        data_scaled: vec![0.1],
        data_dates: vec!["not a date".into()],
        ..Default::default()
    };
    assert!(matches!(
        TimeSeriesRecord::try_from(payload),
        Err(DashboardError::InvalidDate(_))
    ));
}

#[test]
fn config_file_overrides_only_given_fields() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "api_url: http://capacity.internal:9000\n\
         organization: acme\n\
         leave_delay_ms: 500\n\
         default_horizon: twelve_months\n\
         scatterplot:\n  click_radius: 30.0\n"
    )
    .unwrap();

    let cfg = DashboardConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(cfg.api_url, "http://capacity.internal:9000");
    assert_eq!(cfg.organization, "acme");
    assert_eq!(cfg.default_horizon, Horizon::TwelveMonths);
    assert_eq!(cfg.scatterplot.click_radius, 30.0);
    assert_eq!(cfg.scatterplot.hover_radius, 100.0);
    assert_eq!(cfg.time_series.hover_radius, 200.0);
    assert_eq!(cfg.request_timeout_secs, 30);

    let scatter = cfg.scatter_resolver();
    assert_eq!(scatter.click_radius, Some(30.0));
    assert!((scatter.leave_delay_secs - 0.5).abs() < 1e-12);
    assert_eq!(cfg.time_series_resolver().click_radius, None);
}

#[test]
fn invalid_config_is_reported() {
    let err = DashboardConfig::from_yaml_str("leave_delay_ms: soon").err().unwrap();
    assert!(matches!(err, DashboardError::Config(_)));

    let missing = DashboardConfig::from_yaml_file("/nonexistent/capdash.yaml").err().unwrap();
    assert!(matches!(missing, DashboardError::Io(_)));
}

#[test]
fn nice_scale_with_clamping() {
    let x = LinearScale::new((-87.0, -3.0), (0.0, 600.0)).nice(10).with_clamp(true);
    assert_eq!(x.domain, (-90.0, 0.0));
    assert_eq!(x.map(-90.0), 0.0);
    assert_eq!(x.map(0.0), 600.0);
    assert_eq!(x.map(-200.0), 0.0);
    assert_eq!(x.map(15.0), 600.0);
    assert!((x.invert(300.0) + 45.0).abs() < 1e-9);
}
