use std::sync::Arc;

use chrono::Utc;
use sea_orm::prelude::Date;
use sea_orm::DatabaseConnection;

use models::contact::{self, ContactBase, ContactUpdate, SearchCriteria};
use crate::contact::repository::{ContactRepository, SeaOrmContactRepository};
use crate::errors::ServiceError;

/// Caller-facing contact operations; every call is forwarded to the repository.
pub struct ContactService<R: ContactRepository> {
    repo: Arc<R>,
}

impl ContactService<SeaOrmContactRepository> {
    /// Service over a SeaORM repository bound to `db`.
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self::new(Arc::new(SeaOrmContactRepository::new(db)))
    }
}

impl<R: ContactRepository> ContactService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create a contact.
    ///
    /// # Examples
    /// ```
    /// use service::contact::{service::ContactService, repository::mock::MockContactRepository};
    /// use models::contact::ContactBase;
    /// use std::sync::Arc;
    /// let svc = ContactService::new(Arc::new(MockContactRepository::default()));
    /// let body = ContactBase {
    ///     first_name: "Anna".into(),
    ///     last_name: "Kovalenko".into(),
    ///     email: "anna@example.com".into(),
    ///     phone_number: "+380501234567".into(),
    ///     birth_date: None,
    ///     additional_info: None,
    /// };
    /// let created = tokio_test::block_on(svc.create(body)).unwrap();
    /// assert_eq!(created.first_name, "Anna");
    /// ```
    pub async fn create(&self, body: ContactBase) -> Result<contact::Model, ServiceError> {
        self.repo.create(body).await
    }

    pub async fn list(&self, skip: u64, limit: u64) -> Result<Vec<contact::Model>, ServiceError> {
        self.repo.list(skip, limit).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<contact::Model>, ServiceError> { self.repo.get_by_id(id).await }

    pub async fn update(&self, id: i32, body: ContactUpdate) -> Result<Option<contact::Model>, ServiceError> {
        self.repo.update(id, body).await
    }

    pub async fn delete(&self, id: i32) -> Result<Option<contact::Model>, ServiceError> { self.repo.delete(id).await }

    pub async fn birthdays_in_next_window(&self, today: Date) -> Result<Vec<contact::Model>, ServiceError> {
        self.repo.birthdays_in_next_window(today).await
    }

    /// Birthdays in the window starting at the current UTC date.
    pub async fn upcoming_birthdays(&self) -> Result<Vec<contact::Model>, ServiceError> {
        self.repo.birthdays_in_next_window(Utc::now().date_naive()).await
    }

    pub async fn search(&self, criteria: SearchCriteria) -> Result<Vec<contact::Model>, ServiceError> {
        self.repo.search(criteria).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Days, NaiveDate};

    use crate::contact::repository::mock::MockContactRepository;
    use crate::test_support::{memory_db, sample};

    #[tokio::test]
    async fn forwards_crud_to_repository() -> anyhow::Result<()> {
        let repo = Arc::new(MockContactRepository::default());
        let svc = ContactService::new(repo.clone());

        let created = svc.create(sample("Anna", "K", "anna@example.com")).await?;
        assert_eq!(repo.get_by_id(created.id).await?, Some(created.clone()));
        assert_eq!(svc.get_by_id(created.id).await?, Some(created.clone()));

        let patch = ContactUpdate::from(sample("Anna", "Kovalenko", "anna.k@example.com"));
        let updated = svc.update(created.id, patch).await?.expect("contact exists");
        assert_eq!(updated.last_name, "Kovalenko");
        assert_eq!(updated.email, "anna.k@example.com");
        assert_eq!(svc.list(0, 10).await?, vec![updated.clone()]);

        assert_eq!(svc.delete(created.id).await?, Some(updated));
        assert_eq!(svc.delete(created.id).await?, None);
        assert!(svc.list(0, 10).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn forwards_errors_unchanged() -> anyhow::Result<()> {
        let svc = ContactService::new(Arc::new(MockContactRepository::default()));
        let err = svc.create(sample("Anna", "K", "anna@")).await.unwrap_err();
        match err {
            ServiceError::Model(e) => assert_eq!(e.field(), "email"),
            other => panic!("unexpected error: {other}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn upcoming_birthdays_start_today() -> anyhow::Result<()> {
        let svc = ContactService::new(Arc::new(MockContactRepository::default()));
        let today = Utc::now().date_naive();
        let in_window = today.checked_add_days(Days::new(3)).unwrap();
        let outside = today.checked_add_days(Days::new(30)).unwrap();

        for (i, date) in [in_window, outside].into_iter().enumerate() {
            let mut body = sample(&format!("P{i}"), "L", &format!("p{i}@example.com"));
            // 2000 is a leap year, so every month/day has a counterpart
            body.birth_date = NaiveDate::from_ymd_opt(2000, date.month(), date.day());
            svc.create(body).await?;
        }

        let found = svc.upcoming_birthdays().await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first_name, "P0");
        assert_eq!(found, svc.birthdays_in_next_window(today).await?);
        Ok(())
    }

    #[tokio::test]
    async fn from_connection_uses_database() -> anyhow::Result<()> {
        let svc = ContactService::from_connection(memory_db().await?);
        let anna = svc.create(sample("Anna", "Smith", "anna@example.com")).await?;
        svc.create(sample("Bob", "Brown", "bob@example.com")).await?;

        let found = svc.search(SearchCriteria::new(Some("AN"), None, None)).await?;
        assert_eq!(found, vec![anna]);
        assert_eq!(svc.search(SearchCriteria::default()).await?.len(), 2);
        Ok(())
    }
}
