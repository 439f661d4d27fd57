//! Login: turns a (identifier, secret) pair into a role-tagged identity.

use std::sync::Arc;

use anyhow::Context;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::config::PasswordScheme;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::{AppError, AppResult};
use crate::repositories::{FacultyRepository, StudentRepository};

/// Which principal collection a login targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrincipalKind {
    Student,
    Faculty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedPrincipal {
    pub principal_id: Uuid,
    pub role: RoleEnum,
    pub username: String,
    pub name: String,
}

/// How faculty passwords are stored and checked.
#[derive(Clone)]
pub struct PasswordPolicy {
    scheme: PasswordScheme,
    cost: u32,
    // Verified against when the identifier is unknown. Same cost as stored
    // hashes, so both failure paths do the same bcrypt work.
    dummy_hash: Arc<str>,
}

impl std::fmt::Debug for PasswordPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordPolicy")
            .field("scheme", &self.scheme)
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}

impl PasswordPolicy {
    pub fn new(scheme: PasswordScheme, cost: u32) -> anyhow::Result<Self> {
        let dummy_hash = bcrypt::hash("campus-event-dummy-secret", cost)
            .with_context(|| format!("Invalid bcrypt cost {}", cost))?;
        Ok(Self {
            scheme,
            cost,
            dummy_hash: dummy_hash.into(),
        })
    }

    /// Value to store for a new faculty password.
    pub fn protect(&self, password: &str) -> anyhow::Result<String> {
        match self.scheme {
            PasswordScheme::Bcrypt => {
                bcrypt::hash(password, self.cost).context("Failed to hash password")
            }
            PasswordScheme::Plain => Ok(password.to_string()),
        }
    }

    fn matches(&self, password: &str, stored: &str) -> bool {
        match self.scheme {
            // An unparsable stored hash counts as a mismatch.
            PasswordScheme::Bcrypt => bcrypt::verify(password, stored).unwrap_or(false),
            PasswordScheme::Plain => stored == password,
        }
    }

    fn burn(&self, password: &str) {
        if self.scheme == PasswordScheme::Bcrypt {
            let _ = bcrypt::verify(password, &self.dummy_hash);
        }
    }
}

pub struct CredentialService<'a> {
    db: &'a DatabaseConnection,
    policy: &'a PasswordPolicy,
}

impl<'a> CredentialService<'a> {
    pub fn new(db: &'a DatabaseConnection, policy: &'a PasswordPolicy) -> Self {
        Self { db, policy }
    }

    pub async fn verify(
        &self,
        identifier: &str,
        secret: &str,
        kind: PrincipalKind,
    ) -> AppResult<VerifiedPrincipal> {
        if identifier.trim().is_empty() || secret.is_empty() {
            return Err(AppError::validation("Please provide username and password"));
        }

        let verified = match kind {
            PrincipalKind::Student => self.verify_student(identifier, secret).await?,
            PrincipalKind::Faculty => self.verify_faculty(identifier, secret).await?,
        };

        match verified {
            Some(principal) => {
                tracing::info!(principal_id = %principal.principal_id, role = %principal.role, "login succeeded");
                Ok(principal)
            }
            None => {
                tracing::warn!(?kind, "login rejected");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    /// Students sign in with roll number and birthdate, compared verbatim.
    async fn verify_student(
        &self,
        rno: &str,
        bdate: &str,
    ) -> AppResult<Option<VerifiedPrincipal>> {
        let student = StudentRepository::new(self.db).find_by_rno(rno).await?;

        Ok(student
            .filter(|s| s.bdate == bdate)
            .map(|s| VerifiedPrincipal {
                principal_id: s.student_id,
                role: RoleEnum::Student,
                username: s.rno,
                name: s.name,
            }))
    }

    async fn verify_faculty(
        &self,
        faculty_code: &str,
        password: &str,
    ) -> AppResult<Option<VerifiedPrincipal>> {
        let faculty = FacultyRepository::new(self.db)
            .find_by_code(faculty_code)
            .await?;

        let Some(faculty) = faculty else {
            self.policy.burn(password);
            return Ok(None);
        };

        let matches = self.policy.matches(password, &faculty.password);

        Ok(matches.then(|| VerifiedPrincipal {
            principal_id: faculty.faculty_id,
            role: faculty.role,
            username: faculty.faculty_code,
            name: faculty.name,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::NewFaculty;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};
    use std::time::{Duration, Instant};

    const COST: u32 = 10;

    fn cost_of(hash: &str) -> &str {
        hash.split('$').nth(2).unwrap_or_default()
    }

    async fn faculty_db(policy: &PasswordPolicy) -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        FacultyRepository::new(&db)
            .create(NewFaculty {
                faculty_code: "FAC1".to_string(),
                name: "Dr. Rao".to_string(),
                department: "CSE".to_string(),
                email: "fac1@campus.edu".to_string(),
                phone: String::new(),
                designation: "Professor".to_string(),
                password: policy.protect("correct-horse").unwrap(),
                role: RoleEnum::Faculty,
            })
            .await
            .unwrap();
        db
    }

    async fn timed(service: &CredentialService<'_>, id: &str) -> Duration {
        let started = Instant::now();
        let err = service
            .verify(id, "wrong", PrincipalKind::Faculty)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
        started.elapsed()
    }

    #[test]
    fn test_dummy_hash_uses_configured_cost() {
        let policy = PasswordPolicy::new(PasswordScheme::Bcrypt, COST).unwrap();
        assert_eq!(cost_of(&policy.dummy_hash), "10");
        assert_eq!(cost_of(&policy.protect("secret").unwrap()), "10");
        assert!(PasswordPolicy::new(PasswordScheme::Bcrypt, 99).is_err());
    }

    #[test]
    fn test_plain_scheme_stores_verbatim() {
        let policy = PasswordPolicy::new(PasswordScheme::Plain, 4).unwrap();
        assert_eq!(policy.protect("secret").unwrap(), "secret");
        assert!(policy.matches("secret", "secret"));
        assert!(!policy.matches("Secret", "secret"));
    }

    #[tokio::test]
    async fn test_unknown_id_and_wrong_secret_cost_the_same() {
        let policy = PasswordPolicy::new(PasswordScheme::Bcrypt, COST).unwrap();
        let db = faculty_db(&policy).await;
        let service = CredentialService::new(&db, &policy);

        let unknown = timed(&service, "NOPE").await;
        let wrong_secret = timed(&service, "FAC1").await;

        // A cost mismatch of even one step doubles the work.
        let (fast, slow) = if unknown < wrong_secret {
            (unknown, wrong_secret)
        } else {
            (wrong_secret, unknown)
        };
        assert!(slow < fast * 2, "unknown id {unknown:?} vs wrong secret {wrong_secret:?}");

        let principal = service
            .verify("FAC1", "correct-horse", PrincipalKind::Faculty)
            .await
            .unwrap();
        assert_eq!(principal.role, RoleEnum::Faculty);
    }
}
