use crate::domain::LocationId;
use crate::entities::{prelude::*, weathers};
use crate::models::ForecastDay;
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

pub struct ForecastRepository {
    conn: DatabaseConnection,
}

impl ForecastRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All forecast rows for a location, in insertion order.
    pub async fn list_for_location(&self, location_id: LocationId) -> Result<Vec<ForecastDay>> {
        let rows = Weathers::find()
            .filter(weathers::Column::LocationId.eq(location_id.value()))
            .order_by_asc(weathers::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(ForecastDay::from).collect())
    }

    /// Appends a forecast row. There is no uniqueness constraint on
    /// `(location_id, time)`, so repeated misses add repeated rows.
    pub async fn insert(&self, day: &ForecastDay, location_id: LocationId) -> Result<()> {
        let active_model = weathers::ActiveModel {
            forecast: Set(day.forecast.clone()),
            time: Set(day.time.clone()),
            location_id: Set(location_id.value()),
            ..Default::default()
        };

        Weathers::insert(active_model).exec(&self.conn).await?;

        Ok(())
    }

    pub async fn count_for_location(&self, location_id: LocationId) -> Result<u64> {
        let count = Weathers::find()
            .filter(weathers::Column::LocationId.eq(location_id.value()))
            .count(&self.conn)
            .await?;
        Ok(count)
    }
}

impl From<weathers::Model> for ForecastDay {
    fn from(model: weathers::Model) -> Self {
        Self {
            forecast: model.forecast,
            time: model.time,
            location_id: Some(LocationId::new(model.location_id)),
        }
    }
}
