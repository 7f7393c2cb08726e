use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::Db;

const DEMO_TABLE_COUNT: u32 = 12;

const DEMO_MENU: &[(&str, &str, f64)] = &[
    ("Adana Kebap", "Ana Yemek", 320.0),
    ("Lahmacun", "Ana Yemek", 140.0),
    ("Köfte", "Ana Yemek", 280.0),
    ("Mercimek Çorbası", "Çorba", 95.0),
    ("Ayran", "İçecek", 45.0),
    ("Kola", "İçecek", 70.0),
    ("Su", "İçecek", 20.0),
    ("Künefe", "Tatlı", 130.0),
    ("Baklava", "Tatlı", 155.0),
];

/// Insert a dining table. Tables have no lifecycle beyond creation, so this
/// is their only write path (startup seeding and test setup).
pub async fn insert_table(db: &Db, name: &str) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO tables (id, name) VALUES (?, ?)")
        .bind(id)
        .bind(name)
        .execute(&db.pool)
        .await?;
    Ok(id)
}

async fn insert_menu_item(
    db: &Db,
    name: &str,
    category: &str,
    price: f64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO menu_items (id, name, category, price, is_active, created_at) \
         VALUES (?, ?, ?, ?, 1, ?)",
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(category)
    .bind(price)
    .bind(Utc::now())
    .execute(&db.pool)
    .await?;
    Ok(())
}

/// First-run demo data: 12 tables and a small menu, only when the respective
/// tables are empty.
pub async fn ensure_demo_data(db: &Db) -> Result<(), sqlx::Error> {
    let (tables,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tables")
        .fetch_one(&db.pool)
        .await?;
    if tables == 0 {
        for i in 1..=DEMO_TABLE_COUNT {
            insert_table(db, &format!("Masa {i}")).await?;
        }
        info!("Seeded {} dining tables", DEMO_TABLE_COUNT);
    }

    let (items,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM menu_items")
        .fetch_one(&db.pool)
        .await?;
    if items == 0 {
        for (name, category, price) in DEMO_MENU {
            insert_menu_item(db, name, category, *price).await?;
        }
        info!("Seeded {} menu items", DEMO_MENU.len());
    }

    Ok(())
}
