// Shared test helpers
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use air_backfill::backfill::Window;
use air_backfill::config::Config;
use air_backfill::error::{AppError, AppResult};
use air_backfill::openweather::{AirPollutionResponse, AirPollutionSource, Coordinates};
use chrono::{DateTime, TimeZone, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use serde_json::{Value, json};

/// 2025-04-03 at the given UTC hour.
pub fn hour(h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 3, h, 0, 0).unwrap()
}

pub fn config_with(vars: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned()).expect("valid test config")
}

pub fn backfill_config(start: DateTime<Utc>, end: DateTime<Utc>) -> Config {
    config_with(&[
        ("DB_URL", "sqlite::memory:"),
        ("BACKFILL_START", &start.to_rfc3339()),
        ("BACKFILL_END", &end.to_rfc3339()),
    ])
}

/// Fresh in-memory database with the full schema applied.
pub async fn setup_db() -> DatabaseConnection {
    // A second pooled connection would see a different in-memory database
    let mut options = config_with(&[("DB_URL", "sqlite::memory:")]).connect_options();
    options.sqlx_logging(false);
    let db = Database::connect(options).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("apply migrations");
    db
}

/// A `list` entry shaped like the real API's, with all eight components.
pub fn entry(dt: DateTime<Utc>, aqi: i64) -> Value {
    json!({
        "main": { "aqi": aqi },
        "components": {
            "co": 201.94,
            "no": 0.0,
            "no2": 0.77,
            "o3": 68.66,
            "so2": 0.64,
            "pm2_5": 0.5,
            "pm10": 0.54,
            "nh3": 0.12
        },
        "dt": dt.timestamp()
    })
}

pub fn response(entries: Vec<Value>) -> AirPollutionResponse {
    AirPollutionResponse {
        coord: Some(Coordinates {
            lat: 44.9369,
            lon: -123.028,
        }),
        list: Some(entries),
    }
}

/// Canned source keyed by window start. Unlisted windows get an empty response.
#[derive(Default)]
pub struct StubSource {
    responses: HashMap<DateTime<Utc>, Result<AirPollutionResponse, String>>,
    calls: Mutex<Vec<Window>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, start: DateTime<Utc>, response: AirPollutionResponse) -> Self {
        self.responses.insert(start, Ok(response));
        self
    }

    pub fn fail(mut self, start: DateTime<Utc>, message: &str) -> Self {
        self.responses.insert(start, Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<Window> {
        self.calls.lock().unwrap().clone()
    }
}

impl AirPollutionSource for StubSource {
    async fn fetch_history(&self, window: &Window) -> AppResult<AirPollutionResponse> {
        self.calls.lock().unwrap().push(*window);
        match self.responses.get(&window.start) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(message)) => Err(AppError::AirPollutionApi(message.clone())),
            None => Ok(AirPollutionResponse::default()),
        }
    }
}
