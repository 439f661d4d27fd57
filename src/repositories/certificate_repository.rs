use crate::entities::certificate;
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

pub struct CertificateRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CertificateRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts the whole batch or nothing.
    pub async fn insert_batch(&self, certificates: Vec<certificate::ActiveModel>) -> Result<()> {
        if certificates.is_empty() {
            return Ok(());
        }

        let txn = self.db.begin().await?;
        for certificate in certificates {
            certificate::Entity::insert(certificate)
                .exec_without_returning(&txn)
                .await?;
        }
        txn.commit().await?;
        Ok(())
    }

    pub async fn find_all(&self) -> Result<Vec<certificate::Model>> {
        let certificates = certificate::Entity::find()
            .order_by_desc(certificate::Column::CreatedAt)
            .all(self.db)
            .await?;
        Ok(certificates)
    }

    pub async fn find_by_student(&self, student_id: Uuid) -> Result<Vec<certificate::Model>> {
        let certificates = certificate::Entity::find()
            .filter(certificate::Column::StudentId.eq(student_id))
            .order_by_desc(certificate::Column::CreatedAt)
            .all(self.db)
            .await?;
        Ok(certificates)
    }

    pub async fn find_by_id(&self, certificate_id: Uuid) -> Result<Option<certificate::Model>> {
        let certificate = certificate::Entity::find_by_id(certificate_id)
            .one(self.db)
            .await?;
        Ok(certificate)
    }
}
