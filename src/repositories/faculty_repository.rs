use crate::entities::{faculty, sea_orm_active_enums::RoleEnum};
use anyhow::Result;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

pub struct FacultyRepository<'a> {
    db: &'a DatabaseConnection,
}

pub struct NewFaculty {
    pub faculty_code: String,
    pub name: String,
    pub department: String,
    pub email: String,
    pub phone: String,
    pub designation: String,
    /// Stored as given; callers hash it first when the bcrypt scheme is in use.
    pub password: String,
    pub role: RoleEnum,
}

impl<'a> FacultyRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, faculty_id: Uuid) -> Result<Option<faculty::Model>> {
        let faculty = faculty::Entity::find_by_id(faculty_id).one(self.db).await?;
        Ok(faculty)
    }

    /// Lookup by faculty ID, the staff login identifier.
    pub async fn find_by_code(&self, faculty_code: &str) -> Result<Option<faculty::Model>> {
        let faculty = faculty::Entity::find()
            .filter(faculty::Column::FacultyCode.eq(faculty_code))
            .one(self.db)
            .await?;
        Ok(faculty)
    }

    pub async fn find_by_ids(&self, faculty_ids: &[Uuid]) -> Result<Vec<faculty::Model>> {
        if faculty_ids.is_empty() {
            return Ok(Vec::new());
        }
        let faculty = faculty::Entity::find()
            .filter(faculty::Column::FacultyId.is_in(faculty_ids.iter().copied()))
            .all(self.db)
            .await?;
        Ok(faculty)
    }

    pub async fn create(&self, new_faculty: NewFaculty) -> Result<faculty::Model> {
        if new_faculty.role == RoleEnum::Student {
            anyhow::bail!("faculty records cannot carry the student role");
        }

        let faculty = faculty::ActiveModel {
            faculty_id: Set(Uuid::new_v4()),
            faculty_code: Set(new_faculty.faculty_code),
            name: Set(new_faculty.name),
            department: Set(new_faculty.department),
            email: Set(new_faculty.email),
            phone: Set(new_faculty.phone),
            designation: Set(new_faculty.designation),
            password: Set(new_faculty.password),
            role: Set(new_faculty.role),
        };

        let result = faculty.insert(self.db).await?;
        Ok(result)
    }
}
