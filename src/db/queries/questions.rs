use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT * FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_question_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Question> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT * FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT * FROM questions WHERE questions.category = ?1 ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

// instr is a byte search, so unlike LIKE it stays case-sensitive
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT * FROM questions WHERE instr(questions.question, ?1) > 0 ORDER BY id
        "#,
    )
    .bind(term)
    .fetch_all(pool)
    .await
}

pub async fn create_question(
    pool: &SqlitePool,
    question: &str,
    answer: &str,
    category: i64,
    difficulty: i64,
) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(question)
    .bind(answer)
    .bind(category)
    .bind(difficulty)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn update_question(pool: &SqlitePool, question: Question) -> sqlx::Result<()> {
    sqlx::query(
        r#"
UPDATE questions SET question=?1, answer=?2, category=?3, difficulty=?4 WHERE questions.id = ?5
        "#,
    )
    .bind(question.question)
    .bind(question.answer)
    .bind(question.category)
    .bind(question.difficulty)
    .bind(question.id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<()> {
    get_question_by_id(pool, id).await?;
    sqlx::query(
        r#"
DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> sqlx::Result<()> {
    let existing = get_all_questions(pool).await?;
    let existing_ids: HashSet<i64> = existing.iter().map(|q| q.id).collect();
    let new_ids: HashSet<i64> = questions.iter().map(|q| q.id).collect();
    for id in existing_ids.difference(&new_ids) {
        delete_question(pool, *id).await?;
    }
    for question in questions {
        if existing_ids.contains(&question.id) {
            update_question(pool, question).await?;
        } else {
            sqlx::query(
                r#"
INSERT INTO questions (id, question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(question.id)
            .bind(question.question)
            .bind(question.answer)
            .bind(question.category)
            .bind(question.difficulty)
            .execute(pool)
            .await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    // every :memory: connection is a separate database, keep the pool at one
    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::run_migrations(&pool).await.unwrap();
        pool
    }

    async fn seed(pool: &SqlitePool) -> Vec<i64> {
        let mut ids = Vec::new();
        for (question, answer, category, difficulty) in [
            ("What boxer's original name is Cassius Clay?", "Muhammad Ali", 4, 1),
            ("What movie earned Tom Hanks his third Oscar nomination, in 1994?", "Apollo 13", 5, 4),
            ("What is the heaviest organ in the human body?", "The Liver", 1, 4),
            ("La Giaconda is better known as what?", "Mona Lisa", 2, 3),
        ] {
            ids.push(
                create_question(pool, question, answer, category, difficulty)
                    .await
                    .unwrap(),
            );
        }
        ids
    }

    #[tokio::test]
    async fn created_questions_come_back_in_id_order() {
        let pool = test_pool().await;
        let ids = seed(&pool).await;
        let questions = get_all_questions(&pool).await.unwrap();
        assert_eq!(questions.len(), 4);
        let listed: Vec<i64> = questions.iter().map(|q| q.id).collect();
        assert_eq!(listed, ids);
    }

    #[tokio::test]
    async fn category_filter_matches_on_id() {
        let pool = test_pool().await;
        seed(&pool).await;
        let questions = get_questions_for_category(&pool, 4).await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].answer, "Muhammad Ali");

        let none = get_questions_for_category(&pool, 3).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn search_matches_substrings_case_sensitively() {
        let pool = test_pool().await;
        seed(&pool).await;
        let questions = search_questions(&pool, "organ").await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].answer, "The Liver");

        let shouting = search_questions(&pool, "ORGAN").await.unwrap();
        assert!(shouting.is_empty());
    }

    #[tokio::test]
    async fn deleting_twice_reports_row_not_found() {
        let pool = test_pool().await;
        let ids = seed(&pool).await;
        delete_question(&pool, ids[0]).await.unwrap();
        let err = delete_question(&pool, ids[0]).await.unwrap_err();
        assert!(matches!(err, sqlx::Error::RowNotFound));
    }

    #[tokio::test]
    async fn create_rejects_unknown_category_reference() {
        let pool = test_pool().await;
        let result = create_question(&pool, "Up?", "Down", 999, 1).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn import_preserves_exported_ids() {
        let pool = test_pool().await;
        seed(&pool).await;
        import_questions(
            &pool,
            vec![Question {
                id: 42,
                question: "Which country won the first ever soccer World Cup in 1930?".to_string(),
                answer: "Uruguay".to_string(),
                category: 6,
                difficulty: 4,
            }],
        )
        .await
        .unwrap();

        let questions = get_all_questions(&pool).await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, 42);
        assert_eq!(questions[0].answer, "Uruguay");
    }
}
