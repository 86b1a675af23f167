use sqlx::{PgPool, Result};
use super::dto::{NewTask, TaskChanges};
use super::model::Task;

pub async fn create_task(pool: &PgPool, task: &NewTask) -> Result<Task> {
    let rec = sqlx::query_as::<_, Task>(
        r#"
        INSERT INTO tasks (title)
        VALUES ($1)
        RETURNING id, title, completed, created_at
        "#,
    )
    .bind(&task.title)
    .fetch_one(pool)
    .await?;

    Ok(rec)
}

pub async fn list_tasks(pool: &PgPool) -> Result<Vec<Task>> {
    let rec = sqlx::query_as::<_, Task>(
        r#"
        SELECT id, title, completed, created_at
        FROM tasks
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rec)
}

/// One fixed statement per combination of supplied fields.
pub async fn update_task(pool: &PgPool, id: i32, changes: &TaskChanges) -> Result<Option<Task>> {
    let query = match (&changes.title, changes.completed) {
        (Some(title), Some(completed)) => sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $1, completed = $2
            WHERE id = $3
            RETURNING id, title, completed, created_at
            "#,
        )
        .bind(title)
        .bind(completed),
        (Some(title), None) => sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $1
            WHERE id = $2
            RETURNING id, title, completed, created_at
            "#,
        )
        .bind(title),
        (None, Some(completed)) => sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET completed = $1
            WHERE id = $2
            RETURNING id, title, completed, created_at
            "#,
        )
        .bind(completed),
        // TaskChanges never reaches here empty; reading the row keeps this total.
        (None, None) => sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, completed, created_at
            FROM tasks
            WHERE id = $1
            "#,
        ),
    };

    let rec = query.bind(id).fetch_optional(pool).await?;

    Ok(rec)
}

/// Returns whether a row was actually removed.
pub async fn delete_task(pool: &PgPool, id: i32) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM tasks
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn ping(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;

    Ok(())
}
