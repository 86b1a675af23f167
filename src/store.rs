use async_trait::async_trait;
use sqlx::PgPool;

use crate::routes::tasks::dto::{NewTask, TaskChanges};
use crate::routes::tasks::model::Task;
use crate::routes::tasks::queries;

/// Storage operations the handlers depend on. Each call is one statement.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn ping(&self) -> Result<(), sqlx::Error>;

    async fn list(&self) -> Result<Vec<Task>, sqlx::Error>;

    async fn create(&self, task: &NewTask) -> Result<Task, sqlx::Error>;

    /// `None` when no task has this id.
    async fn update(
        &self,
        id: i32,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, sqlx::Error>;

    /// `false` when no task has this id.
    async fn delete(&self, id: i32) -> Result<bool, sqlx::Error>;
}

pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        queries::ping(&self.pool).await
    }

    async fn list(&self) -> Result<Vec<Task>, sqlx::Error> {
        queries::list_tasks(&self.pool).await
    }

    async fn create(&self, task: &NewTask) -> Result<Task, sqlx::Error> {
        queries::create_task(&self.pool, task).await
    }

    async fn update(
        &self,
        id: i32,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, sqlx::Error> {
        queries::update_task(&self.pool, id, changes).await
    }

    async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
        queries::delete_task(&self.pool, id).await
    }
}

#[cfg(test)]
pub mod memory {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// In-process stand-in for Postgres with the same id and ordering rules.
    #[derive(Default)]
    pub struct MemoryTaskStore {
        rows: Mutex<Vec<Task>>,
        next_id: Mutex<i32>,
        broken: AtomicBool,
    }

    impl MemoryTaskStore {
        /// Every subsequent call fails like a lost connection.
        pub fn break_connection(&self) {
            self.broken.store(true, Ordering::SeqCst);
        }

        pub fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }

        fn check(&self) -> Result<(), sqlx::Error> {
            if self.broken.load(Ordering::SeqCst) {
                return Err(sqlx::Error::PoolClosed);
            }
            Ok(())
        }
    }

    #[async_trait]
    impl TaskStore for MemoryTaskStore {
        async fn ping(&self) -> Result<(), sqlx::Error> {
            self.check()
        }

        async fn list(&self) -> Result<Vec<Task>, sqlx::Error> {
            self.check()?;
            let mut rows = self.rows.lock().unwrap().clone();
            rows.sort_by(|a, b| b.id.cmp(&a.id));
            Ok(rows)
        }

        async fn create(&self, task: &NewTask) -> Result<Task, sqlx::Error> {
            self.check()?;
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let row = Task {
                id: *next_id,
                title: task.title.clone(),
                completed: false,
                created_at: Utc::now(),
            };
            self.rows.lock().unwrap().push(row.clone());
            Ok(row)
        }

        async fn update(
            &self,
            id: i32,
            changes: &TaskChanges,
        ) -> Result<Option<Task>, sqlx::Error> {
            self.check()?;
            let mut rows = self.rows.lock().unwrap();
            let Some(row) = rows.iter_mut().find(|t| t.id == id) else {
                return Ok(None);
            };
            if let Some(title) = &changes.title {
                row.title = title.clone();
            }
            if let Some(completed) = changes.completed {
                row.completed = completed;
            }
            Ok(Some(row.clone()))
        }

        async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
            self.check()?;
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|t| t.id != id);
            Ok(rows.len() != before)
        }
    }
}
