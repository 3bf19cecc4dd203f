use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::entity::chemical;

/// Largest row offset or limit the SQL backends accept (signed 64-bit).
const MAX_ROWS: u64 = i64::MAX as u64;

/// One page of chemicals plus the totals needed to render pagination.
#[derive(Debug, Clone)]
pub struct ChemicalPage {
    pub items: Vec<chemical::Model>,
    pub total_pages: u64,
    pub total_elements: u64,
}

/// Record store for the `chemicals` table.
///
/// Works on any connection, so callers may run it inside a transaction.
pub struct ChemicalStore<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ChemicalStore<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Fetch a zero-based page ordered by ascending id.
    ///
    /// A page whose offset does not fit in a SQL offset lies past the end
    /// of any table and comes back empty, with the real totals.
    pub async fn list_page(&self, page: u64, size: u64) -> Result<ChemicalPage, DbErr> {
        let size = size.clamp(1, MAX_ROWS);
        let paginator = chemical::Entity::find()
            .order_by_asc(chemical::Column::Id)
            .paginate(self.conn, size);

        let totals = paginator.num_items_and_pages().await?;
        let items = match page.checked_mul(size) {
            Some(offset) if offset <= MAX_ROWS => paginator.fetch_page(page).await?,
            _ => Vec::new(),
        };

        Ok(ChemicalPage {
            items,
            total_pages: totals.number_of_pages,
            total_elements: totals.number_of_items,
        })
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<chemical::Model>, DbErr> {
        chemical::Entity::find_by_id(id).one(self.conn).await
    }

    /// First chemical (lowest id) whose CAS number, name or English name
    /// equals `token` exactly.
    pub async fn find_by_any_identifier(
        &self,
        token: &str,
    ) -> Result<Option<chemical::Model>, DbErr> {
        chemical::Entity::find()
            .filter(
                Condition::any()
                    .add(chemical::Column::CasNumber.eq(token))
                    .add(chemical::Column::Name.eq(token))
                    .add(chemical::Column::EnglishName.eq(token)),
            )
            .order_by_asc(chemical::Column::Id)
            .one(self.conn)
            .await
    }

    /// Largest id currently stored, if any.
    pub async fn highest_id(&self) -> Result<Option<i32>, DbErr> {
        let last = chemical::Entity::find()
            .order_by_desc(chemical::Column::Id)
            .one(self.conn)
            .await?;
        Ok(last.map(|m| m.id))
    }

    pub async fn insert(&self, model: chemical::ActiveModel) -> Result<chemical::Model, DbErr> {
        model.insert(self.conn).await
    }

    /// Point the stored image reference of `model` at `structure_image`.
    pub async fn set_structure_image(
        &self,
        model: chemical::Model,
        structure_image: String,
    ) -> Result<chemical::Model, DbErr> {
        let mut active: chemical::ActiveModel = model.into();
        active.structure_image = Set(structure_image);
        active.update(self.conn).await
    }

    /// Returns `false` when no row had this id.
    pub async fn delete_by_id(&self, id: i32) -> Result<bool, DbErr> {
        let result = chemical::Entity::delete_by_id(id).exec(self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    #[cfg(test)]
    pub async fn count(&self) -> Result<u64, DbErr> {
        chemical::Entity::find().count(self.conn).await
    }
}
