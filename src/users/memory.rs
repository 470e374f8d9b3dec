use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::users::{
    repo::{RepoError, UserRepository},
    repo_types::{User, UserFields},
};

/// In-process stand-in for the users table.
#[derive(Default)]
pub struct MemoryUserRepository {
    rows: Mutex<BTreeMap<i64, User>>,
    next_id: Mutex<i64>,
    failing: AtomicBool,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following call fail with a storage error.
    pub fn fail_storage(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), RepoError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepoError::Storage(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

fn row(id: i64, fields: &UserFields, created_at: OffsetDateTime) -> User {
    User {
        id,
        name: fields.name.clone(),
        age: fields.age,
        phone: Some(fields.phone.clone()),
        is_hidden: fields.is_hidden,
        rating: fields.rating,
        created_at,
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn get_by_id(&self, id: i64) -> Result<User, RepoError> {
        self.check()?;
        self.rows
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(RepoError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<User>, RepoError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn create(&self, fields: &UserFields) -> Result<i64, RepoError> {
        self.check()?;
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            *next
        };
        self.rows
            .lock()
            .unwrap()
            .insert(id, row(id, fields, OffsetDateTime::now_utc()));
        Ok(id)
    }

    async fn update(&self, id: i64, fields: &UserFields) -> Result<i64, RepoError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let existing = rows.get_mut(&id).ok_or(RepoError::NotFound(id))?;
        *existing = row(id, fields, existing.created_at);
        Ok(id)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.check()?;
        self.rows
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound(id))
    }
}
