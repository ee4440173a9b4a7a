//! Beneficiary repository, including the identifier sequence query.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbBackend,
    EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::entities::beneficiary::{self, ActiveModel, Entity as BeneficiaryEntity};
use crate::domain::beneficiary::{identifier_sequence, same_name};
use crate::domain::{Beneficiary, BeneficiaryInput, NewBeneficiary};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BeneficiaryRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Beneficiary>>;

    /// Look up by the external identifier, e.g. `JD001`
    async fn find_by_identifier(&self, beneficiary_id: &str) -> AppResult<Option<Beneficiary>>;

    /// Newest first, optionally filtered by a name or identifier substring
    async fn list(&self, search: Option<String>) -> AppResult<Vec<Beneficiary>>;

    /// Whether another beneficiary has this first and last name under `same_name`
    async fn name_exists(
        &self,
        first_name: &str,
        last_name: &str,
        exclude_id: Option<i32>,
    ) -> AppResult<bool>;

    /// Largest numeric suffix among stored identifiers, `None` when empty
    async fn max_sequence(&self) -> AppResult<Option<u64>>;

    async fn create(&self, beneficiary: NewBeneficiary) -> AppResult<Beneficiary>;

    /// Overwrite editable fields; `picture` replaces the photo when `Some`
    async fn update(
        &self,
        id: i32,
        details: BeneficiaryInput,
        picture: Option<String>,
    ) -> AppResult<Beneficiary>;
}

pub struct BeneficiaryStore {
    db: DatabaseConnection,
}

impl BeneficiaryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Numeric value of the identifier after its two-letter prefix
fn sequence_expr(backend: DbBackend) -> &'static str {
    match backend {
        DbBackend::MySql => "CAST(SUBSTRING(beneficiary_id, 3) AS UNSIGNED)",
        DbBackend::Postgres => "CAST(SUBSTRING(beneficiary_id FROM 3) AS BIGINT)",
        DbBackend::Sqlite => "CAST(SUBSTR(beneficiary_id, 3) AS INTEGER)",
    }
}

fn apply_details(active: &mut ActiveModel, details: BeneficiaryInput) {
    active.first_name = Set(details.first_name);
    active.middle_name = Set(details.middle_name);
    active.last_name = Set(details.last_name);
    active.name_extension = Set(details.name_extension);
    active.gender = Set(details.gender.to_string());
    active.birth_date = Set(details.birth_date);
    active.phone = Set(details.phone);
    active.province = Set(details.province);
    active.municipality = Set(details.municipality);
    active.barangay = Set(details.barangay);
    active.street = Set(details.street);
}

#[async_trait]
impl BeneficiaryRepository for BeneficiaryStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Beneficiary>> {
        let result = BeneficiaryEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Beneficiary::from))
    }

    async fn find_by_identifier(&self, beneficiary_id: &str) -> AppResult<Option<Beneficiary>> {
        let result = BeneficiaryEntity::find()
            .filter(beneficiary::Column::BeneficiaryId.eq(beneficiary_id))
            .one(&self.db)
            .await?;

        Ok(result.map(Beneficiary::from))
    }

    async fn list(&self, search: Option<String>) -> AppResult<Vec<Beneficiary>> {
        let mut query = BeneficiaryEntity::find();

        if let Some(term) = search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(beneficiary::Column::BeneficiaryId.contains(term))
                    .add(beneficiary::Column::FirstName.contains(term))
                    .add(beneficiary::Column::MiddleName.contains(term))
                    .add(beneficiary::Column::LastName.contains(term)),
            );
        }

        let models = query
            .order_by_desc(beneficiary::Column::CreatedAt)
            .order_by_desc(beneficiary::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Beneficiary::from).collect())
    }

    async fn name_exists(
        &self,
        first_name: &str,
        last_name: &str,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        // SQL LOWER() is ASCII-only on SQLite, so fold names here instead
        let mut query = BeneficiaryEntity::find().select_only().columns([
            beneficiary::Column::FirstName,
            beneficiary::Column::LastName,
        ]);
        if let Some(id) = exclude_id {
            query = query.filter(beneficiary::Column::Id.ne(id));
        }

        let names: Vec<(String, String)> = query.into_tuple().all(&self.db).await?;
        Ok(names
            .iter()
            .any(|(first, last)| same_name(first, last, first_name, last_name)))
    }

    async fn max_sequence(&self) -> AppResult<Option<u64>> {
        let backend = self.db.get_database_backend();
        let top: Option<String> = BeneficiaryEntity::find()
            .select_only()
            .column(beneficiary::Column::BeneficiaryId)
            .order_by(Expr::cust(sequence_expr(backend)), Order::Desc)
            .limit(1)
            .into_tuple()
            .one(&self.db)
            .await?;

        Ok(top.map(|id| identifier_sequence(&id)))
    }

    async fn create(&self, beneficiary: NewBeneficiary) -> AppResult<Beneficiary> {
        let now = chrono::Utc::now();
        let mut active = ActiveModel {
            beneficiary_id: Set(beneficiary.beneficiary_id),
            picture: Set(beneficiary.picture),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        apply_details(&mut active, beneficiary.details);

        let model = active.insert(&self.db).await.map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::conflict("Beneficiary ID"),
            other => other,
        })?;
        Ok(Beneficiary::from(model))
    }

    async fn update(
        &self,
        id: i32,
        details: BeneficiaryInput,
        picture: Option<String>,
    ) -> AppResult<Beneficiary> {
        let existing = BeneficiaryEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Beneficiary"))?;

        let mut active: ActiveModel = existing.into();
        apply_details(&mut active, details);
        if let Some(picture) = picture {
            active.picture = Set(Some(picture));
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Beneficiary::from(model))
    }
}
