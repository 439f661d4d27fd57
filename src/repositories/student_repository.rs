use crate::entities::student;
use anyhow::Result;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

pub struct StudentRepository<'a> {
    db: &'a DatabaseConnection,
}

pub struct NewStudent {
    pub regno: i64,
    pub rno: String,
    pub name: String,
    pub bdate: String,
    pub phone: String,
    pub email: String,
    pub nationality: String,
    pub department: String,
}

impl<'a> StudentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, student_id: Uuid) -> Result<Option<student::Model>> {
        let student = student::Entity::find_by_id(student_id).one(self.db).await?;
        Ok(student)
    }

    /// Lookup by roll number, the student login identifier.
    pub async fn find_by_rno(&self, rno: &str) -> Result<Option<student::Model>> {
        let student = student::Entity::find()
            .filter(student::Column::Rno.eq(rno))
            .one(self.db)
            .await?;
        Ok(student)
    }

    pub async fn find_by_rnos(&self, rnos: &[String]) -> Result<Vec<student::Model>> {
        if rnos.is_empty() {
            return Ok(Vec::new());
        }
        let students = student::Entity::find()
            .filter(student::Column::Rno.is_in(rnos.iter().cloned()))
            .all(self.db)
            .await?;
        Ok(students)
    }

    pub async fn find_by_ids(&self, student_ids: &[Uuid]) -> Result<Vec<student::Model>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }
        let students = student::Entity::find()
            .filter(student::Column::StudentId.is_in(student_ids.iter().copied()))
            .all(self.db)
            .await?;
        Ok(students)
    }

    pub async fn create(&self, new_student: NewStudent) -> Result<student::Model> {
        let student = student::ActiveModel {
            student_id: Set(Uuid::new_v4()),
            regno: Set(new_student.regno),
            rno: Set(new_student.rno),
            name: Set(new_student.name),
            bdate: Set(new_student.bdate),
            phone: Set(new_student.phone),
            email: Set(new_student.email),
            nationality: Set(new_student.nationality),
            department: Set(new_student.department),
        };

        let result = student.insert(self.db).await?;
        Ok(result)
    }
}
