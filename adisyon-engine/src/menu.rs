use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::info;
use uuid::Uuid;

use adisyon_core::{money::round2, MenuItem};

use crate::error::{EngineError, EngineResult};
use crate::OrderEngine;

#[derive(FromRow)]
struct MenuItemRow {
    id: Uuid,
    name: String,
    category: String,
    price: f64,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        MenuItem {
            id: row.id,
            name: row.name,
            category: row.category,
            price: row.price,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

impl OrderEngine {
    /// Active menu items grouped for display, by category then name.
    pub async fn list_menu_items(&self) -> EngineResult<Vec<MenuItem>> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(
            "SELECT id, name, category, price, is_active, created_at \
             FROM menu_items \
             WHERE is_active = 1 \
             ORDER BY category, name",
        )
        .fetch_all(&self.db.pool)
        .await?;
        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    /// Add a menu item. A blank category falls back to "Diğer" so the menu
    /// screen always has a bucket to show it under.
    pub async fn create_menu_item(
        &self,
        name: &str,
        category: &str,
        price: f64,
    ) -> EngineResult<MenuItem> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidArgument(
                "menu item name is required".to_string(),
            ));
        }
        let category = match category.trim() {
            "" => "Diğer",
            trimmed => trimmed,
        };
        if !price.is_finite() || price < 0.0 {
            return Err(EngineError::InvalidArgument(
                "price must be a non-negative number".to_string(),
            ));
        }
        let price = round2(price);

        let id = Uuid::new_v4();
        let created_at = Utc::now();
        sqlx::query(
            "INSERT INTO menu_items (id, name, category, price, is_active, created_at) \
             VALUES (?, ?, ?, ?, 1, ?)",
        )
        .bind(id)
        .bind(name)
        .bind(category)
        .bind(price)
        .bind(created_at)
        .execute(&self.db.pool)
        .await?;

        info!(%id, name, "menu item created");
        Ok(MenuItem {
            id,
            name: name.to_string(),
            category: category.to_string(),
            price,
            is_active: true,
            created_at,
        })
    }

    /// Toggle availability. Deactivated items stay referenced by historical
    /// order lines but can no longer be added to orders.
    pub async fn set_menu_item_active(&self, id: Uuid, is_active: bool) -> EngineResult<()> {
        let result = sqlx::query("UPDATE menu_items SET is_active = ? WHERE id = ?")
            .bind(is_active)
            .bind(id)
            .execute(&self.db.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(EngineError::NotFound("menu item"));
        }
        info!(%id, is_active, "menu item availability changed");
        Ok(())
    }
}
