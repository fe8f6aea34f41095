use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

pub async fn get_all_categories(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, name
FROM categories
ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> sqlx::Result<Category> {
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, name FROM categories WHERE categories.id = ?1
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn update_category(pool: &SqlitePool, category: Category) -> sqlx::Result<()> {
    sqlx::query(
        r#"
UPDATE categories SET name=?1 WHERE categories.id = ?2
        "#,
    )
    .bind(category.name)
    .bind(category.id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_category(pool: &SqlitePool, id: i64) -> sqlx::Result<()> {
    get_category(pool, id).await?;
    sqlx::query(
        r#"
DELETE FROM categories WHERE categories.id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

// full reset: rows missing from the new set are deleted (their questions
// cascade), existing rows are updated in place, new rows keep their ids
pub async fn import_categories(pool: &SqlitePool, categories: Vec<Category>) -> sqlx::Result<()> {
    let existing = get_all_categories(pool).await?;
    let existing_ids: HashSet<i64> = existing.iter().map(|c| c.id).collect();
    let new_ids: HashSet<i64> = categories.iter().map(|c| c.id).collect();
    for id in existing_ids.difference(&new_ids) {
        delete_category(pool, *id).await?;
    }
    for category in categories {
        if existing_ids.contains(&category.id) {
            update_category(pool, category).await?;
        } else {
            sqlx::query(
                r#"
INSERT INTO categories (id, name) VALUES (?1, ?2)
                "#,
            )
            .bind(category.id)
            .bind(category.name)
            .execute(pool)
            .await?;
        }
    }
    Ok(())
}
