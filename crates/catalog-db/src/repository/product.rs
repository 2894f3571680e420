//! # Product Repository
//!
//! Database operations for products and their stock quantities.
//!
//! ## Key Operations
//! - Reads joining `products` with `productquantity`
//! - Multi-id lookup with a dynamically sized `IN (...)` clause
//! - Two-table writes grouped in one transaction
//!
//! ## Write Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create_product / update_product                      │
//! │                                                                         │
//! │  pool.begin() ──► tx                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  statement 1: products          ──✗──┐                                 │
//! │       │                              │                                  │
//! │       ▼                              │  any `?` returns early,          │
//! │  statement 2: productquantity   ──✗──┤  tx is dropped,                  │
//! │       │                              │  SQLite rolls back both          │
//! │       ▼                              │                                  │
//! │  tx.commit()                    ──✗──┘                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  both rows visible                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use catalog_core::{CreateProductPayload, Product};

/// Number of columns every product SELECT returns, in mapper order.
const PRODUCT_COLUMNS: usize = 7;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let id = repo.create_product(&payload).await?;
/// let product = repo.get_product_by_id(id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Product found
    /// * `Err(DbError::NotFound)` - No product has this ID
    pub async fn get_product_by_id(&self, id: i64) -> DbResult<Product> {
        self.find_product_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Looks up a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn find_product_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        debug!(id = %id, "Fetching product");

        let row = sqlx::query(
            r#"
            SELECT
                p.id,
                p.name,
                p.description,
                p.image,
                p.price,
                pq.quantity,
                p.createdat
            FROM products p
            INNER JOIN productquantity pq ON p.id = pq.id
            WHERE p.id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_product_row).transpose()
    }

    /// Gets every product whose ID appears in `ids`, ordered by ID.
    ///
    /// The `IN (...)` clause gets one bound placeholder per input ID.
    /// IDs with no matching product are skipped, and a repeated ID yields
    /// its product once. An empty slice returns an empty list without
    /// querying.
    ///
    /// ## Example
    /// ```rust,ignore
    /// // SELECT ... WHERE p.id IN (?, ?, ?) ORDER BY p.id
    /// let products = repo.get_products_by_id(&[3, 1, 2]).await?;
    /// ```
    pub async fn get_products_by_id(&self, ids: &[i64]) -> DbResult<Vec<Product>> {
        if ids.is_empty() {
            debug!("No product ids given, skipping query");
            return Ok(Vec::new());
        }

        debug!(count = ids.len(), "Fetching products by id");

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"
            SELECT
                p.id,
                p.name,
                p.description,
                p.image,
                p.price,
                pq.quantity,
                p.createdat
            FROM products p
            INNER JOIN productquantity pq ON p.id = pq.id
            WHERE p.id IN ("#,
        );

        let mut placeholders = builder.separated(", ");
        for id in ids {
            placeholders.push_bind(*id);
        }
        placeholders.push_unseparated(") ORDER BY p.id");

        let rows = builder.build().fetch_all(&self.pool).await?;
        let products = rows.iter().map(map_product_row).collect::<DbResult<Vec<_>>>()?;

        debug!(count = products.len(), "Products found");
        Ok(products)
    }

    /// Lists all products, ordered by ID.
    pub async fn get_products(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT
                p.id,
                p.name,
                p.description,
                p.image,
                p.price,
                pq.quantity,
                p.createdat
            FROM products p
            INNER JOIN productquantity pq ON p.id = pq.id
            ORDER BY p.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_product_row).collect()
    }

    /// Creates a product and its quantity row in one transaction.
    ///
    /// ## Returns
    /// * `Ok(id)` - Identifier generated by storage
    /// * `Err(DbError::CheckViolation)` - Negative quantity; nothing was written
    pub async fn create_product(&self, payload: &CreateProductPayload) -> DbResult<i64> {
        debug!(name = %payload.name, "Creating product");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, price, image, description)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&payload.name)
        .bind(payload.price)
        .bind(&payload.image)
        .bind(&payload.description)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();

        sqlx::query("INSERT INTO productquantity (id, quantity) VALUES (?1, ?2)")
            .bind(id)
            .bind(payload.quantity)
            .execute(&mut *tx)
            .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(id = %id, "Product created");
        Ok(id)
    }

    /// Updates name, price, image, description and quantity in one transaction.
    ///
    /// ## Returns
    /// * `Ok(())` - Both rows updated
    /// * `Err(DbError::NotFound)` - Product doesn't exist; nothing was written
    pub async fn update_product(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                price = ?3,
                image = ?4,
                description = ?5
            WHERE id = ?1
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.image)
        .bind(&product.description)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            warn!(id = %product.id, "Product missing, rolling back update");
            return Err(DbError::not_found("Product", product.id));
        }

        let result = sqlx::query("UPDATE productquantity SET quantity = ?2 WHERE id = ?1")
            .bind(product.id)
            .bind(product.quantity)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            warn!(id = %product.id, "Quantity row missing, rolling back update");
            return Err(DbError::not_found("ProductQuantity", product.id));
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    /// Sets the stock quantity of a product. Other fields are untouched.
    ///
    /// Runs in its own transaction like the other writes.
    pub async fn update_product_quantity(&self, id: i64, quantity: i64) -> DbResult<()> {
        debug!(id = %id, quantity = %quantity, "Updating product quantity");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE productquantity SET quantity = ?2 WHERE id = ?1")
            .bind(id)
            .bind(quantity)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Maps one joined row into a [`Product`].
///
/// Column order: id, name, description, image, price, quantity, createdat.
fn map_product_row(row: &SqliteRow) -> DbResult<Product> {
    if row.len() != PRODUCT_COLUMNS {
        return Err(DbError::RowMapping(format!(
            "expected {} columns, got {}",
            PRODUCT_COLUMNS,
            row.len()
        )));
    }

    Ok(Product {
        id: row.try_get(0)?,
        name: row.try_get(1)?,
        description: row.try_get(2)?,
        image: row.try_get(3)?,
        price: row.try_get(4)?,
        quantity: row.try_get(5)?,
        created_at: row.try_get(6)?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;

    async fn setup() -> ProductRepository {
        Database::new(DbConfig::in_memory())
            .await
            .unwrap()
            .products()
    }

    fn payload(name: &str, price: f64, quantity: i64) -> CreateProductPayload {
        CreateProductPayload {
            name: name.to_string(),
            price,
            image: format!("{}.png", name.to_lowercase()),
            description: format!("A {}", name.to_lowercase()),
            quantity,
        }
    }

    async fn install_trigger(repo: &ProductRepository, table: &str) {
        let sql = format!(
            "CREATE TRIGGER reject_{table}_update BEFORE UPDATE ON {table} \
             BEGIN SELECT RAISE(ABORT, '{table} write rejected'); END"
        );
        sqlx::query(&sql).execute(&repo.pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_then_get_mug() {
        let repo = setup().await;

        let id = repo.create_product(&payload("Mug", 9.99, 10)).await.unwrap();
        let product = repo.get_product_by_id(id).await.unwrap();

        assert_eq!(product.id, id);
        assert_eq!(product.name, "Mug");
        assert_eq!(product.description, "A mug");
        assert_eq!(product.image, "mug.png");
        assert_eq!(product.price, 9.99);
        assert_eq!(product.quantity, 10);
        assert!((Utc::now() - product.created_at).num_seconds().abs() < 60);

        repo.update_product_quantity(id, 5).await.unwrap();

        let refetched = repo.get_product_by_id(id).await.unwrap();
        assert_eq!(refetched.quantity, 5);
        assert_eq!(refetched.price, 9.99);
    }

    #[tokio::test]
    async fn test_generated_ids_are_distinct() {
        let repo = setup().await;

        let first = repo.create_product(&payload("Mug", 9.99, 1)).await.unwrap();
        let second = repo.create_product(&payload("Cup", 4.5, 1)).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let repo = setup().await;

        let err = repo.get_product_by_id(404).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Product not found: 404");

        assert!(repo.find_product_by_id(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_products_by_id_returns_intersection() {
        let repo = setup().await;
        let mug = repo.create_product(&payload("Mug", 9.99, 10)).await.unwrap();
        let cup = repo.create_product(&payload("Cup", 4.5, 3)).await.unwrap();
        let bowl = repo.create_product(&payload("Bowl", 7.25, 0)).await.unwrap();

        let products = repo
            .get_products_by_id(&[bowl, mug, 9_999, mug])
            .await
            .unwrap();

        let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![mug, bowl]);
        assert!(!ids.contains(&cup));
        assert_eq!(products[1].quantity, 0);
    }

    #[tokio::test]
    async fn test_get_products_by_id_single_and_empty() {
        let repo = setup().await;
        let mug = repo.create_product(&payload("Mug", 9.99, 10)).await.unwrap();

        let products = repo.get_products_by_id(&[mug]).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Mug");

        assert!(repo.get_products_by_id(&[]).await.unwrap().is_empty());
        assert!(repo.get_products_by_id(&[41, 42]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_products_lists_everything() {
        let repo = setup().await;
        assert!(repo.get_products().await.unwrap().is_empty());

        for (name, qty) in [("Mug", 10), ("Cup", 3), ("Bowl", 0)] {
            repo.create_product(&payload(name, 1.0, qty)).await.unwrap();
        }

        let names: Vec<String> = repo
            .get_products()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Mug", "Cup", "Bowl"]);
    }

    #[tokio::test]
    async fn test_create_rolls_back_product_row_when_quantity_insert_fails() {
        let repo = setup().await;

        let err = repo
            .create_product(&payload("Mug", 9.99, -1))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::CheckViolation { .. }));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_product_writes_both_tables() {
        let repo = setup().await;
        let id = repo.create_product(&payload("Mug", 9.99, 10)).await.unwrap();

        let mut product = repo.get_product_by_id(id).await.unwrap();
        product.name = "Travel Mug".to_string();
        product.price = 14.0;
        product.image = "travel-mug.png".to_string();
        product.description = "Keeps coffee hot".to_string();
        product.quantity = 2;
        repo.update_product(&product).await.unwrap();

        let updated = repo.get_product_by_id(id).await.unwrap();
        assert_eq!(updated, product);
    }

    #[tokio::test]
    async fn test_update_product_rolls_back_when_quantity_write_fails() {
        let repo = setup().await;
        let id = repo.create_product(&payload("Mug", 9.99, 10)).await.unwrap();
        install_trigger(&repo, "productquantity").await;

        let mut product = repo.get_product_by_id(id).await.unwrap();
        product.name = "Renamed".to_string();
        product.quantity = 1;

        let err = repo.update_product(&product).await.unwrap_err();
        assert!(matches!(err, DbError::QueryFailed(_)));

        let stored = repo.get_product_by_id(id).await.unwrap();
        assert_eq!(stored.name, "Mug");
        assert_eq!(stored.quantity, 10);
    }

    #[tokio::test]
    async fn test_update_product_rolls_back_on_negative_quantity() {
        let repo = setup().await;
        let id = repo.create_product(&payload("Mug", 9.99, 10)).await.unwrap();

        let mut product = repo.get_product_by_id(id).await.unwrap();
        product.price = 1.0;
        product.quantity = -5;

        let err = repo.update_product(&product).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));

        let stored = repo.get_product_by_id(id).await.unwrap();
        assert_eq!(stored.price, 9.99);
        assert_eq!(stored.quantity, 10);
    }

    #[tokio::test]
    async fn test_update_product_leaves_quantity_when_product_write_fails() {
        let repo = setup().await;
        let id = repo.create_product(&payload("Mug", 9.99, 10)).await.unwrap();
        install_trigger(&repo, "products").await;

        let mut product = repo.get_product_by_id(id).await.unwrap();
        product.quantity = 99;

        assert!(repo.update_product(&product).await.is_err());

        let stored = repo.get_product_by_id(id).await.unwrap();
        assert_eq!(stored.quantity, 10);
    }

    #[tokio::test]
    async fn test_update_quantity_changes_only_quantity() {
        let repo = setup().await;
        let id = repo.create_product(&payload("Mug", 9.99, 10)).await.unwrap();
        let before = repo.get_product_by_id(id).await.unwrap();

        repo.update_product_quantity(id, 0).await.unwrap();

        let after = repo.get_product_by_id(id).await.unwrap();
        assert_eq!(after.quantity, 0);
        assert_eq!(after.name, before.name);
        assert_eq!(after.price, before.price);
        assert_eq!(after.image, before.image);
        assert_eq!(after.description, before.description);
        assert_eq!(after.created_at, before.created_at);
    }

    #[tokio::test]
    async fn test_updates_of_missing_product_are_not_found() {
        let repo = setup().await;
        let id = repo.create_product(&payload("Mug", 9.99, 10)).await.unwrap();

        let mut ghost = repo.get_product_by_id(id).await.unwrap();
        ghost.id = id + 100;

        assert!(repo.update_product(&ghost).await.unwrap_err().is_not_found());
        assert!(repo
            .update_product_quantity(ghost.id, 3)
            .await
            .unwrap_err()
            .is_not_found());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_row_mapping_rejects_wrong_column_count() {
        let repo = setup().await;

        let row = sqlx::query("SELECT 1, 'Mug', 'A mug', 'mug.png', 9.99, 10")
            .fetch_one(&repo.pool)
            .await
            .unwrap();

        let err = map_product_row(&row).unwrap_err();
        assert!(matches!(err, DbError::RowMapping(_)));
    }

    #[tokio::test]
    async fn test_unparsable_timestamp_aborts_read() {
        let repo = setup().await;

        sqlx::query(
            "INSERT INTO products (id, name, description, image, price, createdat) \
             VALUES (1, 'Mug', 'A mug', 'mug.png', 9.99, 'yesterday-ish')",
        )
        .execute(&repo.pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO productquantity (id, quantity) VALUES (1, 10)")
            .execute(&repo.pool)
            .await
            .unwrap();

        let err = repo.get_product_by_id(1).await.unwrap_err();
        assert!(matches!(err, DbError::RowMapping(_)));
        assert!(matches!(
            repo.get_products().await.unwrap_err(),
            DbError::RowMapping(_)
        ));
    }
}
