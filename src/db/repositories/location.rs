use crate::domain::LocationId;
use crate::entities::{locations, prelude::*};
use crate::models::Location;
use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

pub struct LocationRepository {
    conn: DatabaseConnection,
}

impl LocationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Returns the earliest stored row for `search_query`, if any.
    pub async fn find_by_search_query(&self, search_query: &str) -> Result<Option<Location>> {
        let row = Locations::find()
            .filter(locations::Column::SearchQuery.eq(search_query))
            .order_by_asc(locations::Column::Id)
            .one(&self.conn)
            .await?;

        Ok(row.map(Location::from))
    }

    /// Inserts a location, ignoring a duplicate `search_query`.
    ///
    /// Returns `None` when another row already owns the key.
    pub async fn insert(&self, location: &Location) -> Result<Option<LocationId>> {
        let active_model = locations::ActiveModel {
            search_query: Set(location.search_query.clone()),
            formatted_query: Set(location.formatted_query.clone()),
            latitude: Set(location.latitude),
            longitude: Set(location.longitude),
            ..Default::default()
        };

        let result = Locations::insert(active_model)
            .on_conflict(
                OnConflict::column(locations::Column::SearchQuery)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.conn)
            .await;

        match result {
            Ok(res) => Ok(Some(LocationId::new(res.last_insert_id))),
            Err(DbErr::RecordNotInserted) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn exists(&self, id: LocationId) -> Result<bool> {
        let count = Locations::find_by_id(i32::from(id))
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }

    pub async fn count_by_search_query(&self, search_query: &str) -> Result<u64> {
        let count = Locations::find()
            .filter(locations::Column::SearchQuery.eq(search_query))
            .count(&self.conn)
            .await?;
        Ok(count)
    }
}

impl From<locations::Model> for Location {
    fn from(model: locations::Model) -> Self {
        Self {
            search_query: model.search_query,
            formatted_query: model.formatted_query,
            latitude: model.latitude,
            longitude: model.longitude,
            id: Some(LocationId::new(model.id)),
        }
    }
}
