use chrono::{TimeZone, Utc};
use inventory_runway::RunwayError;
use inventory_runway::api::{
    normalize_doi_payload, normalize_forecast_payload, normalize_weekly_points,
    parse_forecast_payload,
};
use inventory_runway::core::DoiSettings;
use serde_json::json;

#[test]
fn provider_aliases_map_to_canonical_fields() {
    let payload = json!({
        "doi_fba": "12.5",
        "totalDays": 40,
        "runoutDate": "2024-06-10",
        "unitsToMake": 133,
        "forecastAdjustment": "-5",
        "currentDate": "2024-06-03T00:00:00Z"
    });

    let params = normalize_forecast_payload(&payload);

    assert_eq!(params.fba_available_days, Some(12.5));
    assert_eq!(params.total_days, Some(40.0));
    assert_eq!(params.units_to_make, Some(133.0));
    assert_eq!(params.forecast_adjustment, Some(-5.0));
    assert_eq!(
        params.runout_date,
        Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).single()
    );
    assert_eq!(
        params.current_date,
        Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).single()
    );
    assert_eq!(params.total_runout_date, None);
}

#[test]
fn canonical_name_wins_and_nulls_fall_through() {
    let params = normalize_forecast_payload(&json!({
        "fba_available_days": 3,
        "fba_days": 9,
        "total_days": null,
        "doi_total": 21
    }));

    assert_eq!(params.fba_available_days, Some(3.0));
    assert_eq!(params.total_days, Some(21.0));
}

#[test]
fn unparseable_values_are_dropped() {
    let params = normalize_forecast_payload(&json!({
        "fba_available_days": "soon",
        "total_days": true,
        "runout_date": "next tuesday",
        "units_to_make": 50
    }));

    assert_eq!(params.fba_available_days, None);
    assert_eq!(params.total_days, None);
    assert_eq!(params.runout_date, None);
    assert_eq!(params.units_to_make, Some(50.0));
}

#[test]
fn dates_accept_rfc3339_and_epoch_millis() {
    let params = normalize_forecast_payload(&json!({
        "runout_date": "2024-06-10T12:00:00+02:00",
        "total_runout_date": 1_718_409_600_000_i64
    }));

    assert_eq!(
        params.runout_date,
        Utc.with_ymd_and_hms(2024, 6, 10, 10, 0, 0).single()
    );
    assert_eq!(
        params.total_runout_date,
        Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).single()
    );
}

#[test]
fn parse_rejects_malformed_json_and_non_objects() {
    let err = parse_forecast_payload("{not json").expect_err("malformed json");
    assert!(matches!(err, RunwayError::InvalidData(_)));

    let err = parse_forecast_payload("[1, 2, 3]").expect_err("array payload");
    assert!(matches!(err, RunwayError::InvalidData(_)));

    let params = parse_forecast_payload(r#"{"fbaDays": 7}"#).expect("valid payload");
    assert_eq!(params.fba_available_days, Some(7.0));
}

#[test]
fn non_object_payload_yields_empty_parameters() {
    let params = normalize_forecast_payload(&json!("nope"));
    assert_eq!(params, Default::default());
}

#[test]
fn doi_payload_fills_missing_components_with_zero() {
    let doi = normalize_doi_payload(&json!({
        "amazonDoiGoal": 90,
        "inbound_lead_time": "20"
    }));

    assert_eq!(doi, Some(DoiSettings::new(90.0, 20.0, 0.0)));
    assert_eq!(normalize_doi_payload(&json!({ "other": 1 })), None);
    assert_eq!(normalize_doi_payload(&json!(null)), None);
}

#[test]
fn weekly_rows_without_dates_are_skipped() {
    let rows = json!([
        { "week_end_date": "2024-05-26", "units_sold": 40, "units_sold_smoothed": "38.5" },
        { "units_sold": 12 },
        "garbage",
        { "weekEndDate": "2024-06-09", "forecastAdjusted": 55, "isForecast": true }
    ]);

    let points = normalize_weekly_points(&rows, false);

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].units_sold, Some(40.0));
    assert_eq!(points[0].units_sold_smoothed, Some(38.5));
    assert!(!points[0].is_forecast);
    assert_eq!(points[1].forecast_adjusted, Some(55.0));
    assert!(points[1].is_forecast);
    assert_eq!(
        points[1].week_end_date,
        Utc.with_ymd_and_hms(2024, 6, 9, 0, 0, 0)
            .single()
            .expect("valid date")
    );
}

#[test]
fn weekly_rows_inherit_default_forecast_flag() {
    let rows = json!([{ "date": "2024-06-16", "forecast": 70 }]);

    let points = normalize_weekly_points(&rows, true);

    assert_eq!(points.len(), 1);
    assert!(points[0].is_forecast);
    assert_eq!(points[0].forecast_base, Some(70.0));
    assert!(normalize_weekly_points(&json!({ "rows": [] }), true).is_empty());
}
