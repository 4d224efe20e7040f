//! Parsing tests for air-pollution history responses.

use air_backfill::error::AppError;
use air_backfill::openweather::{AirPollutionResponse, PollutionEntry};
use chrono::{TimeZone, Utc};
use serde_json::json;

const HISTORY_BODY: &str = r#"{
  "coord": { "lon": -123.028, "lat": 44.9369 },
  "list": [
    {
      "main": { "aqi": 2 },
      "components": {
        "co": 201.94, "no": 0, "no2": 0.77, "o3": 68.66,
        "so2": 0.64, "pm2_5": 0.5, "pm10": 0.54, "nh3": 0.12
      },
      "dt": 1743645600
    },
    {
      "main": { "aqi": 1 },
      "components": {
        "co": 198.6, "no": 0, "no2": 0.6, "o3": 65.8,
        "so2": 0.5, "pm2_5": 0.5, "pm10": 0.55, "nh3": 0.1
      },
      "dt": 1743649200
    }
  ]
}"#;

#[test]
fn parses_history_response() {
    let response: AirPollutionResponse = serde_json::from_str(HISTORY_BODY).unwrap();

    let coord = response.coord.unwrap();
    assert_eq!(coord.lat, 44.9369);
    assert_eq!(coord.lon, -123.028);
    assert_eq!(response.entries().len(), 2);

    let entry = PollutionEntry::from_raw(&response.entries()[0]).unwrap();
    assert_eq!(entry.main.aqi, 2);
    assert_eq!(entry.components.len(), 8);
    assert_eq!(entry.components["co"], 201.94);
    assert_eq!(entry.components["no"], 0.0);
    assert_eq!(
        entry.timestamp().unwrap(),
        Utc.with_ymd_and_hms(2025, 4, 3, 2, 0, 0).unwrap()
    );
}

#[test]
fn missing_list_means_no_entries() {
    let response: AirPollutionResponse =
        serde_json::from_str(r#"{"coord": {"lon": 1.0, "lat": 2.0}}"#).unwrap();
    assert!(response.list.is_none());
    assert!(response.entries().is_empty());
}

#[test]
fn fractional_aqi_is_truncated() {
    let entry = PollutionEntry::from_raw(&json!({
        "main": { "aqi": 3.0 },
        "components": {},
        "dt": 1743645600
    }))
    .unwrap();
    assert_eq!(entry.main.aqi, 3);
    assert!(entry.components.is_empty());
}

#[test]
fn entries_missing_required_fields_are_rejected() {
    let cases = [
        json!({ "components": { "co": 1.0 }, "dt": 1743645600 }),
        json!({ "main": {}, "components": { "co": 1.0 }, "dt": 1743645600 }),
        json!({ "main": { "aqi": 1 }, "dt": 1743645600 }),
        json!({ "main": { "aqi": 1 }, "components": { "co": 1.0 } }),
        json!({ "main": { "aqi": 1 }, "components": { "co": "high" }, "dt": 1743645600 }),
    ];

    for raw in cases {
        let err = PollutionEntry::from_raw(&raw).unwrap_err();
        assert!(matches!(err, AppError::InvalidEntry(_)), "{raw}: {err}");
    }
}

#[test]
fn rejection_names_the_entry_timestamp() {
    let err = PollutionEntry::from_raw(&json!({ "dt": 1743645600 })).unwrap_err();
    assert!(err.to_string().contains("dt=1743645600"), "{err}");
}

#[test]
fn out_of_range_timestamp_is_rejected() {
    let entry = PollutionEntry::from_raw(&json!({
        "main": { "aqi": 1 },
        "components": {},
        "dt": i64::MAX
    }))
    .unwrap();
    assert!(matches!(entry.timestamp(), Err(AppError::InvalidEntry(_))));
}

#[test]
fn aqi_outside_integer_range_is_rejected() {
    for aqi in [json!(1e20), json!(-3e10)] {
        let err = PollutionEntry::from_raw(&json!({
            "main": { "aqi": aqi },
            "components": { "co": 1.0 },
            "dt": 1743645600
        }))
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidEntry(_)), "{err}");
        assert!(err.to_string().contains("aqi out of range"), "{err}");
    }
}
