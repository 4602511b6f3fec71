//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entity::account::{Account, Billing};
use crate::domain::entity::outfit::Outfit;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_id::AccountId, display_name::DisplayName, email::Email, language::Language, plan::Plan,
    style::StyleCategory, theme::Theme,
};
use crate::error::{AccountError, AccountResult};

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Remap a write-time unique violation on the email index to the same
/// user-visible conflict the pre-check produces.
fn map_unique_violation(err: sqlx::Error) -> AccountError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return AccountError::EmailTaken;
        }
    }
    AccountError::Database(err)
}

impl AccountRepository for PgAccountRepository {
    async fn create(&self, account: &Account) -> AccountResult<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                name,
                email,
                password_hash,
                plan,
                style_preference,
                theme,
                language,
                consent,
                consent_date,
                favorites,
                outfits,
                billing,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.name.as_str())
        .bind(account.email.as_str())
        .bind(account.password_hash.as_str())
        .bind(account.plan.as_str())
        .bind(account.style_preference.as_str())
        .bind(account.theme.as_str())
        .bind(account.language.as_str())
        .bind(account.consent)
        .bind(account.consent_date)
        .bind(Json(&account.favorites))
        .bind(Json(&account.outfits))
        .bind(account.billing.as_ref().map(Json))
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id, name, email, password_hash, plan,
                style_preference, theme, language, consent, consent_date,
                favorites, outfits, billing, created_at, updated_at
            FROM accounts
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id, name, email, password_hash, plan,
                style_preference, theme, language, consent, consent_date,
                favorites, outfits, billing, created_at, updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn exists_by_email_excluding(
        &self,
        email: &Email,
        exclude: &AccountId,
    ) -> AccountResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1 AND account_id <> $2)",
        )
        .bind(email.as_str())
        .bind(exclude.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, account: &Account) -> AccountResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE accounts SET
                name = $2,
                email = $3,
                password_hash = $4,
                plan = $5,
                style_preference = $6,
                theme = $7,
                language = $8,
                consent = $9,
                consent_date = $10,
                favorites = $11,
                outfits = $12,
                billing = $13,
                updated_at = $14
            WHERE account_id = $1
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.name.as_str())
        .bind(account.email.as_str())
        .bind(account.password_hash.as_str())
        .bind(account.plan.as_str())
        .bind(account.style_preference.as_str())
        .bind(account.theme.as_str())
        .bind(account.language.as_str())
        .bind(account.consent)
        .bind(account.consent_date)
        .bind(Json(&account.favorites))
        .bind(Json(&account.outfits))
        .bind(account.billing.as_ref().map(Json))
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(AccountError::AccountNotFound);
        }

        Ok(())
    }
}

// ============================================================================
// Row mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    plan: String,
    style_preference: String,
    theme: String,
    language: String,
    consent: bool,
    consent_date: Option<DateTime<Utc>>,
    favorites: Json<Vec<String>>,
    outfits: Json<Vec<Outfit>>,
    billing: Option<Json<Billing>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AccountResult<Account> {
        // Stored values were validated on the way in; a failure here
        // means the row was mutated outside this service.
        let corrupt =
            |field: &str| AccountError::Internal(format!("Corrupt stored account: {field}"));

        Ok(Account {
            account_id: AccountId::from_uuid(self.account_id),
            name: DisplayName::new(self.name).map_err(|_| corrupt("name"))?,
            email: Email::new(self.email).map_err(|_| corrupt("email"))?,
            password_hash: platform::password::HashedPassword::from_phc(self.password_hash),
            plan: Plan::parse(&self.plan).map_err(|_| corrupt("plan"))?,
            style_preference: StyleCategory::parse(&self.style_preference)
                .map_err(|_| corrupt("style_preference"))?,
            theme: Theme::parse(&self.theme).map_err(|_| corrupt("theme"))?,
            language: Language::parse(&self.language).map_err(|_| corrupt("language"))?,
            consent: self.consent,
            consent_date: self.consent_date,
            favorites: self.favorites.0,
            outfits: self.outfits.0,
            billing: self.billing.map(|b| b.0),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
