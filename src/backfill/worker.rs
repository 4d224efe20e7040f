use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set, TryInsertResult};
use std::collections::{BTreeMap, HashMap};

use crate::config::{Config, Coordinate};
use crate::entity::{air_quality_readings, components, locations, raw_air_data, reading_components};
use crate::error::{AppError, AppResult};
use crate::openweather::{AirPollutionResponse, PollutionEntry};

/// Identifiers resolved once at startup and reused for every window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceData {
    pub location_id: i32,
    /// Component name -> `component_id`
    pub component_ids: HashMap<String, i32>,
}

impl ReferenceData {
    /// # Errors
    ///
    /// Returns `AppError::UnknownComponent` if `name` has no row in `components`.
    pub fn component_id(&self, name: &str) -> AppResult<i32> {
        self.component_ids
            .get(name)
            .copied()
            .ok_or_else(|| AppError::UnknownComponent(name.to_string()))
    }
}

/// Rows written by one successfully processed window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowCounts {
    pub entries: usize,
    pub readings_inserted: usize,
    pub values_inserted: usize,
}

/// Result of one hourly window, after commit or rollback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowOutcome {
    Committed(WindowCounts),
    Failed { reason: String },
}

/// Ensure the configured location and the component names exist, then load
/// the identifiers the backfill needs.
///
/// Safe to run repeatedly: both inserts ignore conflicts.
///
/// # Errors
///
/// Returns an error if any database operation fails.
pub async fn seed_reference_data<C: ConnectionTrait>(
    conn: &C,
    config: &Config,
) -> AppResult<ReferenceData> {
    let location_id = upsert_location(conn, &config.location).await?;
    seed_components(conn, &config.components).await?;

    let component_ids: HashMap<String, i32> = components::Entity::find()
        .all(conn)
        .await?
        .into_iter()
        .map(|c| (c.name, c.component_id))
        .collect();

    tracing::info!(
        location_id,
        latitude = config.location.latitude,
        longitude = config.location.longitude,
        components = component_ids.len(),
        "Reference data ready"
    );

    Ok(ReferenceData {
        location_id,
        component_ids,
    })
}

async fn upsert_location<C: ConnectionTrait>(conn: &C, location: &Coordinate) -> AppResult<i32> {
    let model = locations::ActiveModel {
        location_id: NotSet,
        latitude: Set(location.latitude),
        longitude: Set(location.longitude),
    };

    let result = locations::Entity::insert(model)
        .on_conflict(
            OnConflict::columns([locations::Column::Latitude, locations::Column::Longitude])
                .do_nothing()
                .to_owned(),
        )
        .do_nothing()
        .exec(conn)
        .await?;

    if let TryInsertResult::Inserted(inserted) = result {
        tracing::debug!(location_id = inserted.last_insert_id, "Created location");
        return Ok(inserted.last_insert_id);
    }

    locations::Entity::find()
        .filter(locations::Column::Latitude.eq(location.latitude))
        .filter(locations::Column::Longitude.eq(location.longitude))
        .one(conn)
        .await?
        .map(|l| l.location_id)
        .ok_or(AppError::LocationNotFound)
}

async fn seed_components<C: ConnectionTrait>(conn: &C, names: &[String]) -> AppResult<()> {
    if names.is_empty() {
        return Ok(());
    }

    let models = names.iter().map(|name| components::ActiveModel {
        component_id: NotSet,
        name: Set(name.clone()),
    });

    let created = components::Entity::insert_many(models)
        .on_conflict(
            OnConflict::column(components::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    tracing::debug!(created, "Seeded components");
    Ok(())
}

/// Write every entry of one window's response.
///
/// For each entry the raw JSON is archived unconditionally, then the reading
/// is inserted unless one already exists for `(location, datetime)`. Component
/// values are written only alongside a newly created reading, so a reading
/// first seen with an incomplete payload keeps it on later passes.
///
/// # Errors
///
/// Returns an error on a malformed entry, an unknown component name, or any
/// database failure. The caller is expected to roll back.
pub async fn process_window<C: ConnectionTrait>(
    conn: &C,
    reference: &ReferenceData,
    location: &Coordinate,
    response: &AirPollutionResponse,
) -> AppResult<WindowCounts> {
    let mut counts = WindowCounts::default();
    let location_json = serde_json::json!({
        "lat": location.latitude,
        "lon": location.longitude,
    });

    for raw in response.entries() {
        let entry = PollutionEntry::from_raw(raw)?;
        let time = entry.timestamp()?;

        archive_raw_entry(conn, &location_json, raw).await?;
        counts.entries += 1;

        let Some(reading_id) =
            insert_reading(conn, reference.location_id, time, entry.main.aqi).await?
        else {
            tracing::debug!(time = %time, "Reading already stored, component values left as-is");
            continue;
        };
        counts.readings_inserted += 1;

        counts.values_inserted +=
            insert_component_values(conn, reference, reading_id, &entry.components).await?;
    }

    Ok(counts)
}

async fn archive_raw_entry<C: ConnectionTrait>(
    conn: &C,
    location: &serde_json::Value,
    entry: &serde_json::Value,
) -> AppResult<()> {
    let model = raw_air_data::ActiveModel {
        raw_id: NotSet,
        location: Set(location.clone()),
        air_data: Set(entry.clone()),
    };

    raw_air_data::Entity::insert(model)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

/// Returns the new `reading_id`, or `None` if the reading already existed.
async fn insert_reading<C: ConnectionTrait>(
    conn: &C,
    location_id: i32,
    time: DateTime<Utc>,
    aqi: i32,
) -> AppResult<Option<i32>> {
    let model = air_quality_readings::ActiveModel {
        reading_id: NotSet,
        location_id: Set(location_id),
        datetime: Set(time.into()),
        aqi: Set(aqi),
    };

    let result = air_quality_readings::Entity::insert(model)
        .on_conflict(
            OnConflict::columns([
                air_quality_readings::Column::LocationId,
                air_quality_readings::Column::Datetime,
            ])
            .do_nothing()
            .to_owned(),
        )
        .do_nothing()
        .exec(conn)
        .await?;

    Ok(match result {
        TryInsertResult::Inserted(inserted) => Some(inserted.last_insert_id),
        TryInsertResult::Conflicted | TryInsertResult::Empty => None,
    })
}

async fn insert_component_values<C: ConnectionTrait>(
    conn: &C,
    reference: &ReferenceData,
    reading_id: i32,
    values: &BTreeMap<String, f64>,
) -> AppResult<usize> {
    let models = values
        .iter()
        .map(|(name, value)| {
            Ok(reading_components::ActiveModel {
                reading_id: Set(reading_id),
                component_id: Set(reference.component_id(name)?),
                value: Set(*value),
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    if models.is_empty() {
        return Ok(0);
    }

    let count = models.len();
    reading_components::Entity::insert_many(models)
        .exec_without_returning(conn)
        .await?;
    Ok(count)
}
