//! The Storage Gateway: the only way the bot and the notifier touch persistence.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::database::connection::DatabaseManager;
use crate::database::models::{Credit, NewCredit, User};
use crate::error::StorageError;
use crate::utils::logging::{log_database_error, log_database_operation};

#[async_trait]
pub trait CreditStore: Send + Sync {
    /// Fails with [`StorageError::NotFound`] when the user was never seen.
    async fn get_user(&self, user_id: i64) -> Result<User, StorageError>;

    /// Idempotent get-or-create.
    async fn create_user_if_absent(&self, user_id: i64) -> Result<User, StorageError>;

    async fn insert_credit(&self, credit: NewCredit) -> Result<Credit, StorageError>;

    /// Ordered by due date ascending. Listing and deletion both rely on this order.
    async fn credits_by_user(&self, user_id: i64) -> Result<Vec<Credit>, StorageError>;

    async fn credits_due_on(&self, date: NaiveDate) -> Result<Vec<Credit>, StorageError>;

    /// Deleting an unknown id is not an error.
    async fn delete_credit(&self, credit_id: i64) -> Result<(), StorageError>;
}

#[async_trait]
impl CreditStore for DatabaseManager {
    async fn get_user(&self, user_id: i64) -> Result<User, StorageError> {
        log_database_operation("select", "users", Some(&format!("id={user_id}")));
        User::find_by_id(&self.pool, user_id)
            .await?
            .ok_or(StorageError::NotFound { entity: "user", id: user_id })
    }

    async fn create_user_if_absent(&self, user_id: i64) -> Result<User, StorageError> {
        log_database_operation("upsert", "users", Some(&format!("id={user_id}")));
        User::create_if_absent(&self.pool, user_id).await.map_err(|e| {
            log_database_error("upsert", "users", &e.to_string(), None);
            e.into()
        })
    }

    async fn insert_credit(&self, credit: NewCredit) -> Result<Credit, StorageError> {
        log_database_operation("insert", "credits", Some(&format!("user_id={}", credit.user_id)));
        Credit::create(&self.pool, credit).await.map_err(|e| {
            log_database_error("insert", "credits", &e.to_string(), None);
            e.into()
        })
    }

    async fn credits_by_user(&self, user_id: i64) -> Result<Vec<Credit>, StorageError> {
        let credits = Credit::find_by_user(&self.pool, user_id).await?;
        log_database_operation(
            "select",
            "credits",
            Some(&format!("user_id={user_id} found={}", credits.len())),
        );
        Ok(credits)
    }

    async fn credits_due_on(&self, date: NaiveDate) -> Result<Vec<Credit>, StorageError> {
        log_database_operation("select", "credits", Some(&format!("due_date={date}")));
        Ok(Credit::find_due_on(&self.pool, date).await?)
    }

    async fn delete_credit(&self, credit_id: i64) -> Result<(), StorageError> {
        let removed = Credit::delete(&self.pool, credit_id).await.map_err(|e| {
            log_database_error("delete", "credits", &e.to_string(), Some(&format!("id={credit_id}")));
            StorageError::from(e)
        })?;
        log_database_operation("delete", "credits", Some(&format!("id={credit_id} removed={removed}")));
        Ok(())
    }
}

#[async_trait]
impl<T: CreditStore + ?Sized> CreditStore for Arc<T> {
    async fn get_user(&self, user_id: i64) -> Result<User, StorageError> {
        (**self).get_user(user_id).await
    }

    async fn create_user_if_absent(&self, user_id: i64) -> Result<User, StorageError> {
        (**self).create_user_if_absent(user_id).await
    }

    async fn insert_credit(&self, credit: NewCredit) -> Result<Credit, StorageError> {
        (**self).insert_credit(credit).await
    }

    async fn credits_by_user(&self, user_id: i64) -> Result<Vec<Credit>, StorageError> {
        (**self).credits_by_user(user_id).await
    }

    async fn credits_due_on(&self, date: NaiveDate) -> Result<Vec<Credit>, StorageError> {
        (**self).credits_due_on(date).await
    }

    async fn delete_credit(&self, credit_id: i64) -> Result<(), StorageError> {
        (**self).delete_credit(credit_id).await
    }
}
