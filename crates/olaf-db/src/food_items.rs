//! Inventory record persistence.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::debug;

use olaf_core::{Error, FoodItem, FoodItemRepository, NewFoodItem, Result};

/// PostgreSQL food-item repository.
pub struct PgFoodItemRepository {
    pool: PgPool,
}

impl PgFoodItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch one record by id. Test/inspection helper; the pipeline never
    /// reads records back.
    pub async fn get(&self, id: i64) -> Result<Option<FoodItem>> {
        let row = sqlx::query(
            "SELECT id, user_id, food_name, quantity, quantity_value, quantity_unit,
                    location, consumed, message_id, parsed_by, created_at
             FROM user_food_items WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(|r| FoodItem {
            id: r.get("id"),
            user_id: r.get("user_id"),
            food_name: r.get("food_name"),
            quantity_text: r.get("quantity"),
            quantity_value: r.get("quantity_value"),
            quantity_unit: r.get("quantity_unit"),
            location: r.get("location"),
            consumed: r.get("consumed"),
            message_id: r.get("message_id"),
            parsed_by: r.get("parsed_by"),
            created_at: r.get("created_at"),
        }))
    }
}

#[async_trait]
impl FoodItemRepository for PgFoodItemRepository {
    /// Insert one inventory record.
    ///
    /// Stores the raw quantity text for display next to the normalized
    /// value/unit pair, plus the originating message id and parse
    /// provenance. `consumed` is always false at creation.
    async fn insert(&self, item: &NewFoodItem) -> Result<i64> {
        let row = sqlx::query(
            "INSERT INTO user_food_items
               (user_id, food_name, quantity, quantity_value, quantity_unit,
                location, consumed, message_id, parsed_by)
             VALUES ($1, $2, $3, $4, $5, $6, false, $7, $8)
             RETURNING id",
        )
        .bind(item.user_id)
        .bind(&item.food_name)
        .bind(&item.quantity_text)
        .bind(item.quantity_value)
        .bind(&item.quantity_unit)
        .bind(&item.location)
        .bind(&item.message_id)
        .bind(item.parsed_by.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        let item_id: i64 = row.get("id");
        debug!(
            subsystem = "db",
            component = "food_items",
            op = "insert",
            item_id,
            user_id = item.user_id,
            source = item.parsed_by.as_str(),
            "Inventory record created"
        );
        Ok(item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::test_pool;
    use olaf_core::{ParseResult, ParseSource, UserRepository};

    async fn test_user(pool: &PgPool) -> i64 {
        let phone = format!("385{}", &uuid::Uuid::new_v4().simple().to_string()[..12]);
        crate::users::PgUserRepository::new(pool.clone())
            .resolve(&phone, Some("Test"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_read_back() {
        let pool = test_pool().await;
        let repo = PgFoodItemRepository::new(pool.clone());
        let user_id = test_user(&pool).await;

        let parse = ParseResult::add(
            Some("mlijeka".to_string()),
            Some("2".to_string()),
            Some("hladnjak".to_string()),
            0.9,
            ParseSource::Rules,
        );
        let item = NewFoodItem::from_parse(user_id, "wamid.insert-test", &parse);
        let id = repo.insert(&item).await.unwrap();

        let stored = repo.get(id).await.unwrap().expect("item should exist");
        assert_eq!(stored.user_id, user_id);
        assert_eq!(stored.food_name, "mlijeka");
        assert_eq!(stored.quantity_text, "2");
        assert_eq!(stored.quantity_value, Some(2.0));
        assert_eq!(stored.quantity_unit, None);
        assert_eq!(stored.location, "hladnjak");
        assert!(!stored.consumed);
        assert_eq!(stored.message_id.as_deref(), Some("wamid.insert-test"));
        assert_eq!(stored.parsed_by, "rules");
    }

    #[tokio::test]
    async fn test_insert_llm_provenance_and_unit() {
        let pool = test_pool().await;
        let repo = PgFoodItemRepository::new(pool.clone());
        let user_id = test_user(&pool).await;

        let parse = ParseResult::add(
            Some("brašno".to_string()),
            Some("2,5 kg".to_string()),
            Some("ostava".to_string()),
            1.0,
            ParseSource::Llm,
        );
        let item = NewFoodItem::from_parse(user_id, "wamid.llm-test", &parse);
        let id = repo.insert(&item).await.unwrap();

        let stored = repo.get(id).await.unwrap().unwrap();
        assert_eq!(stored.quantity_value, Some(2.5));
        assert_eq!(stored.quantity_unit.as_deref(), Some("kg"));
        assert_eq!(stored.parsed_by, "llm");
    }
}
