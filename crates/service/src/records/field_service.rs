use std::sync::Arc;

use models::field;
use tracing::{info, instrument};

use crate::errors::{require_name, ServiceError};
use crate::records::repository::RecordStore;

/// Fields of study. No foreign keys; plain CRUD.
pub struct FieldService {
    store: Arc<dyn RecordStore>,
}

impl FieldService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<field::Model>, ServiceError> {
        self.store.list_fields().await
    }

    /// Create a field.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::records::{FieldService, repository::mock::InMemoryRecordStore};
    /// let svc = FieldService::new(Arc::new(InMemoryRecordStore::new()));
    /// let f = tokio_test::block_on(svc.create("Engineering")).unwrap();
    /// assert_eq!(f.name, "Engineering");
    /// assert!(tokio_test::block_on(svc.create("  ")).is_err());
    /// ```
    #[instrument(skip(self))]
    pub async fn create(&self, name: &str) -> Result<field::Model, ServiceError> {
        require_name("field", name)?;
        let created = self.store.create_field(name).await?;
        info!(field_id = created.id, "field_created");
        Ok(created)
    }

    pub async fn get(&self, id: i32) -> Result<Option<field::Model>, ServiceError> {
        self.store.find_field(id).await
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: i32, name: &str) -> Result<field::Model, ServiceError> {
        require_name("field", name)?;
        self.store.update_field(id, name).await
    }

    /// Courses pointing at the field keep their `fieldId`.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.store.delete_field(id).await? {
            return Err(ServiceError::not_found("field"));
        }
        info!(field_id = id, "field_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::repository::mock::InMemoryRecordStore;

    fn service() -> FieldService {
        FieldService::new(Arc::new(InMemoryRecordStore::new()))
    }

    #[tokio::test]
    async fn field_crud_service() -> Result<(), anyhow::Error> {
        let svc = service();

        let f = svc.create("Humanities").await?;
        assert_eq!(svc.list().await?.len(), 1);

        let found = svc.get(f.id).await?.unwrap();
        assert_eq!(found.name, "Humanities");

        let renamed = svc.update(f.id, "Social Sciences").await?;
        assert_eq!(renamed.name, "Social Sciences");

        svc.delete(f.id).await?;
        assert!(svc.get(f.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn name_required_on_create_and_update() -> Result<(), anyhow::Error> {
        let svc = service();
        assert!(matches!(svc.create("").await, Err(ServiceError::Validation(_))));

        let f = svc.create("Arts").await?;
        assert!(matches!(svc.update(f.id, " ").await, Err(ServiceError::Validation(_))));
        assert_eq!(svc.get(f.id).await?.unwrap().name, "Arts");
        Ok(())
    }

    #[tokio::test]
    async fn missing_field_is_soft_on_get_hard_on_write() -> Result<(), anyhow::Error> {
        let svc = service();
        assert!(svc.get(999).await?.is_none());
        assert!(matches!(svc.update(999, "x").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(999).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
