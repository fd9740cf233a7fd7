use async_trait::async_trait;
use sea_orm::prelude::Date;
use sea_orm::DatabaseConnection;

use models::contact::{self, BirthdayWindow, ContactBase, ContactUpdate, SearchCriteria};

use crate::db::contact_queries;
use crate::errors::ServiceError;

/// Data-access contract for contacts.
///
/// Lookups by id return `Ok(None)` when no contact matches; writes are
/// committed individually before returning.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<contact::Model>, ServiceError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<contact::Model>, ServiceError>;
    async fn create(&self, body: ContactBase) -> Result<contact::Model, ServiceError>;
    async fn update(&self, id: i32, body: ContactUpdate) -> Result<Option<contact::Model>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<Option<contact::Model>, ServiceError>;
    async fn birthdays_in_next_window(&self, today: Date) -> Result<Vec<contact::Model>, ServiceError>;
    async fn search(&self, criteria: SearchCriteria) -> Result<Vec<contact::Model>, ServiceError>;
}

/// SeaORM-backed repository over a caller-owned connection.
pub struct SeaOrmContactRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmContactRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ContactRepository for SeaOrmContactRepository {
    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<contact::Model>, ServiceError> {
        contact_queries::list_contacts(&self.db, skip, limit).await
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<contact::Model>, ServiceError> {
        contact_queries::get_contact(&self.db, id).await
    }

    async fn create(&self, body: ContactBase) -> Result<contact::Model, ServiceError> {
        contact_queries::create_contact(&self.db, body).await
    }

    async fn update(&self, id: i32, body: ContactUpdate) -> Result<Option<contact::Model>, ServiceError> {
        contact_queries::update_contact(&self.db, id, body).await
    }

    async fn delete(&self, id: i32) -> Result<Option<contact::Model>, ServiceError> {
        contact_queries::delete_contact(&self.db, id).await
    }

    async fn birthdays_in_next_window(&self, today: Date) -> Result<Vec<contact::Model>, ServiceError> {
        contact_queries::list_birthdays_in(&self.db, BirthdayWindow::starting(today)).await
    }

    async fn search(&self, criteria: SearchCriteria) -> Result<Vec<contact::Model>, ServiceError> {
        contact_queries::search_contacts(&self.db, criteria).await
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use sea_orm::{ActiveValue, IntoActiveModel, TryIntoModel};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockContactRepository {
        rows: Mutex<Vec<contact::Model>>, // kept sorted by id
        next_id: Mutex<i32>,
    }

    #[async_trait]
    impl ContactRepository for MockContactRepository {
        async fn list(&self, skip: u64, limit: u64) -> Result<Vec<contact::Model>, ServiceError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().skip(skip as usize).take(limit as usize).cloned().collect())
        }

        async fn get_by_id(&self, id: i32) -> Result<Option<contact::Model>, ServiceError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|c| c.id == id).cloned())
        }

        async fn create(&self, body: ContactBase) -> Result<contact::Model, ServiceError> {
            body.validate()?;
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|c| c.email == body.email) {
                return Err(ServiceError::Db(sea_orm::DbErr::Custom(format!("duplicate email {}", body.email))));
            }
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let mut am = body.into_active_model(Utc::now().into());
            am.id = ActiveValue::Set(*next_id);
            let created = am.try_into_model()?;
            rows.push(created.clone());
            Ok(created)
        }

        async fn update(&self, id: i32, body: ContactUpdate) -> Result<Option<contact::Model>, ServiceError> {
            body.validate()?;
            let mut rows = self.rows.lock().unwrap();
            let Some(slot) = rows.iter_mut().find(|c| c.id == id) else { return Ok(None) };
            let mut am = slot.clone().into_active_model();
            body.apply(&mut am);
            am.updated_at = ActiveValue::Set(Some(Utc::now().into()));
            *slot = am.try_into_model()?;
            Ok(Some(slot.clone()))
        }

        async fn delete(&self, id: i32) -> Result<Option<contact::Model>, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            let pos = rows.iter().position(|c| c.id == id);
            Ok(pos.map(|i| rows.remove(i)))
        }

        async fn birthdays_in_next_window(&self, today: Date) -> Result<Vec<contact::Model>, ServiceError> {
            let window = BirthdayWindow::starting(today);
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .filter(|c| c.birth_date.is_some_and(|d| window.contains(d)))
                .cloned()
                .collect())
        }

        async fn search(&self, criteria: SearchCriteria) -> Result<Vec<contact::Model>, ServiceError> {
            let criteria = criteria.normalized();
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().filter(|c| criteria.matches(c)).cloned().collect())
        }
    }
}
