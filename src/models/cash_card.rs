use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use super::page::PageRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CashCard {
    pub id: i64,
    pub amount: f64,
    pub owner: String,
}

/// Request body for create and update. `id` and `owner` are accepted so a
/// full card can be posted back, but the server ignores both.
#[derive(Debug, Clone, Deserialize)]
pub struct CashCardPayload {
    #[serde(default)]
    pub id: Option<i64>,
    pub amount: f64,
    #[serde(default)]
    pub owner: Option<String>,
}

impl CashCard {
    /// Creates a new cash card owned by `owner`
    pub async fn create(pool: &SqlitePool, amount: f64, owner: &str) -> Result<Self, sqlx::Error> {
        let card = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO cash_card (amount, owner)
            VALUES (?, ?)
            RETURNING id, amount, owner
            "#,
        )
        .bind(amount)
        .bind(owner)
        .fetch_one(pool)
        .await?;

        Ok(card)
    }

    /// Finds a card by id, only if it belongs to `owner`
    pub async fn find_by_id_and_owner(
        pool: &SqlitePool,
        id: i64,
        owner: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let card = sqlx::query_as::<_, Self>(
            r#"
            SELECT id, amount, owner FROM cash_card WHERE id = ? AND owner = ?
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(pool)
        .await?;

        Ok(card)
    }

    /// Lists one page of the cards belonging to `owner`
    pub async fn list_by_owner(
        pool: &SqlitePool,
        owner: &str,
        page: &PageRequest,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!(
            "SELECT id, amount, owner FROM cash_card WHERE owner = ? ORDER BY {} LIMIT ? OFFSET ?",
            page.order_by_clause()
        );

        let cards = sqlx::query_as::<_, Self>(&sql)
            .bind(owner)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(cards)
    }

    /// Replaces the amount of a card belonging to `owner`.
    /// Returns false when no such card exists.
    pub async fn update_amount(
        pool: &SqlitePool,
        id: i64,
        owner: &str,
        amount: f64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE cash_card SET amount = ? WHERE id = ? AND owner = ?
            "#,
        )
        .bind(amount)
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a card belonging to `owner`.
    /// Returns false when no such card exists.
    pub async fn delete(pool: &SqlitePool, id: i64, owner: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM cash_card WHERE id = ? AND owner = ?
            "#,
        )
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
