use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A recorded loan payment obligation.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Credit {
    pub id: i64,
    pub user_id: i64,
    pub bank_name: String,
    pub loan_amount: f64,
    pub due_date: NaiveDate,
    pub created_at: String,
}

/// A fully validated credit that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCredit {
    pub user_id: i64,
    pub bank_name: String,
    pub loan_amount: f64,
    pub due_date: NaiveDate,
}

const CREDIT_COLUMNS: &str = "id, user_id, bank_name, loan_amount, due_date, created_at";

impl Credit {
    pub async fn create(pool: &sqlx::SqlitePool, new: NewCredit) -> Result<Self, sqlx::Error> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO credits (user_id, bank_name, loan_amount, due_date, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(new.user_id)
        .bind(&new.bank_name)
        .bind(new.loan_amount)
        .bind(new.due_date)
        .bind(&now)
        .execute(pool)
        .await?;

        Ok(Credit {
            id: result.last_insert_rowid(),
            user_id: new.user_id,
            bank_name: new.bank_name,
            loan_amount: new.loan_amount,
            due_date: new.due_date,
            created_at: now,
        })
    }

    /// All credits of one user, earliest due date first.
    ///
    /// The deletion flow resolves ordinals against this exact ordering, so the
    /// tie-break on `id` must stay.
    pub async fn find_by_user(
        pool: &sqlx::SqlitePool,
        user_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!(
            "SELECT {CREDIT_COLUMNS} FROM credits WHERE user_id = ? ORDER BY due_date ASC, id ASC"
        );
        sqlx::query_as::<_, Credit>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_due_on(
        pool: &sqlx::SqlitePool,
        due_date: NaiveDate,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!(
            "SELECT {CREDIT_COLUMNS} FROM credits WHERE due_date = ? ORDER BY user_id, id"
        );
        sqlx::query_as::<_, Credit>(&query)
            .bind(due_date)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &sqlx::SqlitePool,
        credit_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {CREDIT_COLUMNS} FROM credits WHERE id = ?");
        sqlx::query_as::<_, Credit>(&query)
            .bind(credit_id)
            .fetch_optional(pool)
            .await
    }

    /// Deletes by id. Returns the number of removed rows, 0 when the id was unknown.
    pub async fn delete(pool: &sqlx::SqlitePool, credit_id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM credits WHERE id = ?")
            .bind(credit_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count(pool: &sqlx::SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM credits")
            .fetch_one(pool)
            .await
    }
}
