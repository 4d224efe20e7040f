use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========== LOCATIONS ==========
        manager
            .create_table(
                Table::create()
                    .table(Locations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Locations::LocationId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Locations::Latitude).double().not_null())
                    .col(ColumnDef::new(Locations::Longitude).double().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_locations_lat_lon")
                    .table(Locations::Table)
                    .col(Locations::Latitude)
                    .col(Locations::Longitude)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ========== COMPONENTS ==========
        manager
            .create_table(
                Table::create()
                    .table(Components::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Components::ComponentId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Components::Name).string_len(32).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_components_name")
                    .table(Components::Table)
                    .col(Components::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ========== AIR QUALITY READINGS ==========
        manager
            .create_table(
                Table::create()
                    .table(AirQualityReadings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AirQualityReadings::ReadingId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AirQualityReadings::LocationId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AirQualityReadings::Datetime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AirQualityReadings::Aqi).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_readings_location")
                            .from(AirQualityReadings::Table, AirQualityReadings::LocationId)
                            .to(Locations::Table, Locations::LocationId),
                    )
                    .to_owned(),
            )
            .await?;

        // Conflict target for the hourly backfill
        manager
            .create_index(
                Index::create()
                    .name("idx_readings_location_datetime")
                    .table(AirQualityReadings::Table)
                    .col(AirQualityReadings::LocationId)
                    .col(AirQualityReadings::Datetime)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ========== READING COMPONENTS ==========
        manager
            .create_table(
                Table::create()
                    .table(ReadingComponents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReadingComponents::ReadingId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReadingComponents::ComponentId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ReadingComponents::Value).double().not_null())
                    .primary_key(
                        Index::create()
                            .col(ReadingComponents::ReadingId)
                            .col(ReadingComponents::ComponentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reading_components_reading")
                            .from(ReadingComponents::Table, ReadingComponents::ReadingId)
                            .to(AirQualityReadings::Table, AirQualityReadings::ReadingId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reading_components_component")
                            .from(ReadingComponents::Table, ReadingComponents::ComponentId)
                            .to(Components::Table, Components::ComponentId),
                    )
                    .to_owned(),
            )
            .await?;

        // ========== RAW AIR DATA ==========
        // Append-only audit copy of every API entry. The surrogate key exists
        // for the ORM only; the backfill never writes or reads it.
        manager
            .create_table(
                Table::create()
                    .table(RawAirData::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RawAirData::RawId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RawAirData::Location).json_binary().not_null())
                    .col(ColumnDef::new(RawAirData::AirData).json_binary().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RawAirData::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(ReadingComponents::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(AirQualityReadings::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Components::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Locations::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Locations {
    Table,
    LocationId,
    Latitude,
    Longitude,
}

#[derive(DeriveIden)]
enum Components {
    Table,
    ComponentId,
    Name,
}

#[derive(DeriveIden)]
enum AirQualityReadings {
    Table,
    ReadingId,
    LocationId,
    Datetime,
    Aqi,
}

#[derive(DeriveIden)]
enum ReadingComponents {
    Table,
    ReadingId,
    ComponentId,
    Value,
}

#[derive(DeriveIden)]
enum RawAirData {
    Table,
    RawId,
    Location,
    AirData,
}
