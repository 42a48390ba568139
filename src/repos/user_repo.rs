/*
 * Responsibility
 * - users / addresses テーブル向け SQLx 操作
 * - UserRepo trait を境界にして、resolver は PgPool を直接触らない
 * - DB エラーは RepoError (Db / Conflict) に変換して返す
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::repos::error::RepoError;
use crate::services::pagination::PageRequest;

#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[sqlx(rename = "password")]
    pub password_hash: String,
    pub birth_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    pub addresses: Vec<AddressRecord>,
}

#[derive(Debug, Clone, FromRow)]
pub struct AddressRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub label: Option<String>,
    pub cep: String,
    pub street: String,
    pub street_number: i32,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub birth_date: DateTime<Utc>,
    pub addresses: Vec<NewAddress>,
}

#[derive(Debug, Clone)]
pub struct NewAddress {
    pub label: Option<String>,
    pub cep: String,
    pub street: String,
    pub street_number: i32,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepoError>;

    /// Users ordered by name, plus the total number of users.
    async fn list(&self, page: PageRequest) -> Result<(Vec<UserRecord>, i64), RepoError>;

    /// `RepoError::Conflict` when the email is already taken.
    async fn create(&self, new_user: NewUser) -> Result<UserRecord, RepoError>;

    /// Remove every user (addresses cascade). Returns the number of users removed.
    async fn delete_all(&self) -> Result<u64, RepoError>;
}

const USER_COLUMNS: &str = "id, name, email, password, birth_date, created_at, updated_at";
const ADDRESS_COLUMNS: &str =
    "id, user_id, label, cep, street, street_number, complement, neighborhood, city, state";

#[derive(Clone, Debug)]
pub struct PgUserRepo {
    db: PgPool,
}

impl PgUserRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn attach_addresses(&self, users: &mut [UserRecord]) -> Result<(), RepoError> {
        if users.is_empty() {
            return Ok(());
        }
        let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();

        let rows = sqlx::query_as::<_, AddressRecord>(&format!(
            r#"
            SELECT {ADDRESS_COLUMNS}
            FROM addresses
            WHERE user_id = ANY($1)
            ORDER BY city, street, street_number
            "#
        ))
        .bind(ids)
        .fetch_all(&self.db)
        .await?;

        for row in rows {
            if let Some(user) = users.iter_mut().find(|u| u.id == row.user_id) {
                user.addresses.push(row);
            }
        }

        Ok(())
    }

    async fn insert_address(
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
        address: NewAddress,
    ) -> Result<AddressRecord, RepoError> {
        let row = sqlx::query_as::<_, AddressRecord>(&format!(
            r#"
            INSERT INTO addresses
                (id, user_id, label, cep, street, street_number, complement, neighborhood, city, state)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {ADDRESS_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(address.label)
        .bind(address.cep)
        .bind(address.street)
        .bind(address.street_number)
        .bind(address.complement)
        .bind(address.neighborhood)
        .bind(address.city)
        .bind(address.state)
        .fetch_one(&mut **tx)
        .await?;

        Ok(row)
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepoError> {
        let row = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        let Some(user) = row else {
            return Ok(None);
        };
        let mut users = [user];
        self.attach_addresses(&mut users).await?;
        let [user] = users;

        Ok(Some(user))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepoError> {
        let row = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE email = $1
            "#
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        let Some(user) = row else {
            return Ok(None);
        };
        let mut users = [user];
        self.attach_addresses(&mut users).await?;
        let [user] = users;

        Ok(Some(user))
    }

    async fn list(&self, page: PageRequest) -> Result<(Vec<UserRecord>, i64), RepoError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.db)
            .await?;

        // LIMIT NULL = no limit
        let mut users = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            ORDER BY name ASC, id ASC
            OFFSET $1
            LIMIT $2
            "#
        ))
        .bind(page.offset)
        .bind(page.limit)
        .fetch_all(&self.db)
        .await?;

        self.attach_addresses(&mut users).await?;

        Ok((users, count))
    }

    async fn create(&self, new_user: NewUser) -> Result<UserRecord, RepoError> {
        let mut tx = self.db.begin().await?;

        let mut user = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            INSERT INTO users (id, name, email, password, birth_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.birth_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(RepoError::from_sqlx)?;

        for address in new_user.addresses {
            let row = Self::insert_address(&mut tx, user.id, address).await?;
            user.addresses.push(row);
        }

        tx.commit().await?;

        Ok(user)
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let result = sqlx::query("DELETE FROM users").execute(&self.db).await?;

        Ok(result.rows_affected())
    }
}
