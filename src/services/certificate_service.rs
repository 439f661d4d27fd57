use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use uuid::Uuid;

use crate::entities::{certificate, sea_orm_active_enums::RoleEnum, student};
use crate::error::{AppError, AppResult};
use crate::extractor::Identity;
use crate::middleware::permission::{Action, require};
use crate::repositories::{CertificateRepository, StudentRepository};
use crate::utils::roster::{RosterRow, parse_roster};
use crate::utils::upload::{ArtifactStore, CertificateUpload, UploadedFile};

const CERTIFICATE_NOT_FOUND: &str = "Certificate not found";

pub struct CertificateService<'a> {
    db: &'a DatabaseConnection,
    store: ArtifactStore,
}

impl<'a> CertificateService<'a> {
    pub fn new(db: &'a DatabaseConnection, store: ArtifactStore) -> Self {
        Self { db, store }
    }

    fn certificates(&self) -> CertificateRepository<'a> {
        CertificateRepository::new(self.db)
    }

    /// Students see their own certificates, staff see all of them.
    pub async fn list(&self, caller: Identity) -> AppResult<Vec<certificate::Model>> {
        require(caller.role, Action::ReadCertificates)?;

        let certificates = match caller.role {
            RoleEnum::Student => self.certificates().find_by_student(caller.principal_id).await?,
            RoleEnum::Faculty | RoleEnum::Admin => self.certificates().find_all().await?,
        };
        Ok(certificates)
    }

    pub async fn get(&self, caller: Identity, certificate_id: Uuid) -> AppResult<certificate::Model> {
        require(caller.role, Action::ReadCertificates)?;

        self.certificates()
            .find_by_id(certificate_id)
            .await?
            .filter(|c| caller.role != RoleEnum::Student || c.student_id == caller.principal_id)
            .ok_or_else(|| AppError::not_found(CERTIFICATE_NOT_FOUND))
    }

    /// Returns the certificate together with its stored artifact bytes.
    pub async fn artifact(
        &self,
        caller: Identity,
        certificate_id: Uuid,
    ) -> AppResult<(certificate::Model, Vec<u8>)> {
        let certificate = self.get(caller, certificate_id).await?;
        let bytes = self.store.read(&certificate.artifact_path).await?;
        Ok((certificate, bytes))
    }

    /// All-or-nothing bulk issuance. Every roster row must name a known
    /// student and have a matching artifact; nothing is written otherwise.
    pub async fn issue(
        &self,
        caller: Identity,
        upload: CertificateUpload,
    ) -> AppResult<Vec<certificate::Model>> {
        require(caller.role, Action::IssueCertificates)?;

        let roster = parse_roster(&upload.roster.file_name, &upload.roster.bytes)?;
        let artifacts = index_artifacts(upload.artifacts)?;

        let mut rnos: Vec<String> = roster.iter().map(|row| row.student_id.clone()).collect();
        rnos.sort_unstable();
        rnos.dedup();

        let students: HashMap<String, _> = StudentRepository::new(self.db)
            .find_by_rnos(&rnos)
            .await?
            .into_iter()
            .map(|s| (s.rno.clone(), s))
            .collect();

        let mut planned: Vec<(&RosterRow, &UploadedFile)> = Vec::with_capacity(roster.len());
        for row in &roster {
            if !students.contains_key(&row.student_id) {
                return Err(AppError::validation(format!(
                    "Row {}: unknown student id '{}'",
                    row.line, row.student_id
                )));
            }
            let artifact = artifacts.get(row.student_id.as_str()).ok_or_else(|| {
                AppError::validation(format!(
                    "Row {}: no certificate file uploaded for '{}'",
                    row.line, row.student_id
                ))
            })?;
            planned.push((row, artifact));
        }

        let mut stored_paths = Vec::with_capacity(planned.len());
        let result = self
            .write_batch(caller, &planned, &students, &mut stored_paths)
            .await;

        match result {
            Ok(models) => {
                tracing::info!(issued = models.len(), issued_by = %caller.principal_id, "certificates issued");
                Ok(models)
            }
            Err(e) => {
                self.store.remove_all(&stored_paths).await;
                Err(e)
            }
        }
    }

    async fn write_batch(
        &self,
        caller: Identity,
        planned: &[(&RosterRow, &UploadedFile)],
        students: &HashMap<String, student::Model>,
        stored_paths: &mut Vec<String>,
    ) -> AppResult<Vec<certificate::Model>> {
        let now = Utc::now().naive_utc();
        let mut models = Vec::with_capacity(planned.len());

        for (row, artifact) in planned {
            let student = students
                .get(&row.student_id)
                .ok_or_else(|| anyhow::anyhow!("student {} vanished during issuance", row.student_id))?;

            let artifact_path = self.store.save(artifact).await?;
            stored_paths.push(artifact_path.clone());

            models.push(certificate::Model {
                certificate_id: Uuid::new_v4(),
                student_id: student.student_id,
                title: row.certificate_type.title().to_string(),
                event_name: row.event.clone(),
                issue_date: now.date(),
                certificate_type: row.certificate_type,
                student_name: row.name.clone(),
                email: row.email.clone(),
                department: student.department.clone(),
                registration_number: student.regno.to_string(),
                artifact_path,
                issued_by: caller.principal_id,
                created_at: now,
            });
        }

        let active_models = models
            .iter()
            .cloned()
            .map(|m| certificate::ActiveModel {
                certificate_id: Set(m.certificate_id),
                student_id: Set(m.student_id),
                title: Set(m.title),
                event_name: Set(m.event_name),
                issue_date: Set(m.issue_date),
                certificate_type: Set(m.certificate_type),
                student_name: Set(m.student_name),
                email: Set(m.email),
                department: Set(m.department),
                registration_number: Set(m.registration_number),
                artifact_path: Set(m.artifact_path),
                issued_by: Set(m.issued_by),
                created_at: Set(m.created_at),
            })
            .collect();

        self.certificates().insert_batch(active_models).await?;
        Ok(models)
    }
}

/// Artifacts keyed by file stem. Two files for the same stem are ambiguous.
fn index_artifacts(artifacts: Vec<UploadedFile>) -> AppResult<HashMap<String, UploadedFile>> {
    let mut by_stem = HashMap::with_capacity(artifacts.len());
    for artifact in artifacts {
        let stem = artifact
            .stem()
            .map(str::to_string)
            .ok_or_else(|| AppError::validation(format!("Invalid certificate file name '{}'", artifact.file_name)))?;
        if by_stem.insert(stem.clone(), artifact).is_some() {
            return Err(AppError::validation(format!(
                "More than one certificate file uploaded for '{}'",
                stem
            )));
        }
    }
    Ok(by_stem)
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    fn file(name: &str) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            bytes: Bytes::from_static(b"pdf"),
        }
    }

    #[test]
    fn test_index_artifacts_by_stem() {
        let index = index_artifacts(vec![file("STU004.pdf"), file("STU005.png")]).unwrap();
        assert!(index.contains_key("STU004"));
        assert!(index.contains_key("STU005"));
    }

    #[test]
    fn test_duplicate_stem_is_rejected() {
        let err = index_artifacts(vec![file("STU004.pdf"), file("STU004.png")]).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("STU004")));
    }
}
