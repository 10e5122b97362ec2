use chrono::{DateTime, TimeZone, Utc};
use inventory_runway::api::{
    FORECAST_DEFAULTS_KEY, ForecastDefaults, ForecastDefaultsStore, ForecastInputs,
    KeyValueDefaultsStore,
};
use inventory_runway::core::{DoiSettings, ForecastParameters};
use inventory_runway::render::NullSurface;
use inventory_runway::{RunwayEngine, RunwayEngineConfig, RunwayError};

fn today() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0)
        .single()
        .expect("valid date")
}

fn engine_with(inputs: ForecastInputs) -> RunwayEngine<NullSurface> {
    RunwayEngine::new(NullSurface::default(), RunwayEngineConfig::default(), inputs)
        .expect("engine init")
}

#[test]
fn empty_store_loads_nothing() {
    let store = KeyValueDefaultsStore::new();
    assert!(store.is_empty());
    assert_eq!(store.load().expect("load"), None);

    let mut engine = engine_with(ForecastInputs::new(today()));
    assert!(!engine.apply_defaults(&store).expect("apply"));
    assert_eq!(engine.inputs().doi, None);
}

#[test]
fn saved_defaults_round_trip_through_the_store() {
    let mut store = KeyValueDefaultsStore::new();
    let defaults = ForecastDefaults {
        doi: DoiSettings::new(100.0, 20.0, 5.0),
        forecast_adjustment: 12.5,
        view_window_weeks: Some(12),
    };

    store.save(&defaults).expect("save");

    assert_eq!(store.len(), 1);
    assert!(store.get_raw(FORECAST_DEFAULTS_KEY).is_some());
    assert_eq!(store.load().expect("load"), Some(defaults));
}

#[test]
fn engine_saves_and_reapplies_defaults() {
    let mut store = KeyValueDefaultsStore::new();
    let source = engine_with(
        ForecastInputs::new(today())
            .with_doi(DoiSettings::new(100.0, 20.0, 5.0))
            .with_forecast(ForecastParameters {
                forecast_adjustment: Some(10.0),
                ..ForecastParameters::default()
            }),
    );

    let saved = source.save_defaults(&mut store).expect("save");
    assert_eq!(saved.doi, DoiSettings::new(100.0, 20.0, 5.0));
    assert_eq!(saved.forecast_adjustment, 10.0);
    assert_eq!(saved.view_window_weeks, Some(26));

    let mut target = engine_with(ForecastInputs::new(today()));
    assert!(target.apply_defaults(&store).expect("apply"));

    assert_eq!(target.inputs().doi, Some(DoiSettings::new(100.0, 20.0, 5.0)));
    assert_eq!(target.timeline().forecast_adjustment, 10.0);
    assert_eq!(target.timeline().total_days, 125.0);
    assert_eq!(target.timeline().fba_available_days, 100.0);
}

#[test]
fn applied_window_updates_engine_config() {
    let mut store = KeyValueDefaultsStore::new();
    store
        .save(&ForecastDefaults {
            view_window_weeks: Some(8),
            ..ForecastDefaults::default()
        })
        .expect("save");

    let mut engine = engine_with(ForecastInputs::new(today()));
    engine.apply_defaults(&store).expect("apply");

    assert_eq!(engine.config().view_window_weeks, 8);
    assert_eq!(engine.inputs().doi, Some(DoiSettings::default()));
}

#[test]
fn corrupt_entry_is_reported_as_invalid_data() {
    let mut store = KeyValueDefaultsStore::new();
    store.set_raw(FORECAST_DEFAULTS_KEY, "{broken");

    let err = store.load().expect_err("corrupt defaults");
    assert!(matches!(err, RunwayError::InvalidData(_)));

    let mut engine = engine_with(ForecastInputs::new(today()));
    assert!(engine.apply_defaults(&store).is_err());
}

#[test]
fn zero_window_in_stored_defaults_is_rejected() {
    let mut store = KeyValueDefaultsStore::new();
    store.set_raw(
        FORECAST_DEFAULTS_KEY,
        r#"{"doi":{"amazon_doi_goal":1.0,"inbound_lead_time":2.0,"manufacture_lead_time":3.0},"view_window_weeks":0}"#,
    );

    let mut engine = engine_with(ForecastInputs::new(today()));
    let err = engine.apply_defaults(&store).expect_err("zero window");
    assert!(matches!(err, RunwayError::InvalidConfig(_)));
    assert_eq!(engine.config().view_window_weeks, 26);
}

#[test]
fn removing_the_entry_clears_defaults() {
    let mut store = KeyValueDefaultsStore::new();
    store.save(&ForecastDefaults::default()).expect("save");

    assert!(store.remove(FORECAST_DEFAULTS_KEY).is_some());
    assert_eq!(store.load().expect("load"), None);
}
