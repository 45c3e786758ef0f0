//! Roster repository for database operations.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::category::{Category, CategoryParams};

/// Repository providing database operations for roster entries.
pub struct CategoryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets every roster entry ordered by department, then office.
    pub async fn get_all(&self) -> Result<Vec<Category>, DbErr> {
        let entities = entity::prelude::Category::find()
            .order_by_asc(entity::category::Column::Department)
            .order_by_asc(entity::category::Column::Office)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Category::from_entity).collect())
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Category>, DbErr> {
        let entity = entity::prelude::Category::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Category::from_entity))
    }

    /// Finds a roster entry by its ID number, used for office login.
    pub async fn find_by_id_number(&self, id_number: &str) -> Result<Option<Category>, DbErr> {
        let entity = entity::prelude::Category::find()
            .filter(entity::category::Column::IdNumber.eq(id_number.trim()))
            .one(self.db)
            .await?;

        Ok(entity.map(Category::from_entity))
    }

    /// Checks whether another entry already uses the ID number.
    ///
    /// # Arguments
    /// - `id_number` - ID number to look up
    /// - `exclude_id` - Entry to ignore, used when updating that entry
    pub async fn id_number_taken(
        &self,
        id_number: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query = entity::prelude::Category::find()
            .filter(entity::category::Column::IdNumber.eq(id_number));
        if let Some(exclude_id) = exclude_id {
            query = query.filter(entity::category::Column::Id.ne(exclude_id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    pub async fn create(&self, params: CategoryParams) -> Result<Category, DbErr> {
        let entity = entity::category::ActiveModel {
            id: ActiveValue::NotSet,
            id_number: ActiveValue::Set(params.id_number),
            office: ActiveValue::Set(params.office),
            email: ActiveValue::Set(params.email),
            department: ActiveValue::Set(params.department),
        }
        .insert(self.db)
        .await?;

        Ok(Category::from_entity(entity))
    }

    /// Replaces every field of a roster entry.
    ///
    /// # Returns
    /// - `Ok(Some(Category))` - Updated entry
    /// - `Ok(None)` - No entry with that ID
    pub async fn update(
        &self,
        id: i32,
        params: CategoryParams,
    ) -> Result<Option<Category>, DbErr> {
        let Some(existing) = entity::prelude::Category::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::category::ActiveModel = existing.into();
        active.id_number = ActiveValue::Set(params.id_number);
        active.office = ActiveValue::Set(params.office);
        active.email = ActiveValue::Set(params.email);
        active.department = ActiveValue::Set(params.department);

        let entity = active.update(self.db).await?;

        Ok(Some(Category::from_entity(entity)))
    }

    /// Deletes a roster entry. Events that list the office keep their copy of the label.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Category::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets the distinct department tags used by the roster, in alphabetical order.
    pub async fn get_distinct_departments(&self) -> Result<Vec<String>, DbErr> {
        entity::prelude::Category::find()
            .select_only()
            .column(entity::category::Column::Department)
            .distinct()
            .order_by_asc(entity::category::Column::Department)
            .into_tuple::<String>()
            .all(self.db)
            .await
    }
}
