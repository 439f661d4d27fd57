#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use campus_event_service::app::{HttpOptions, create_app};
use campus_event_service::config::PasswordScheme;
use campus_event_service::services::PasswordPolicy;
use campus_event_service::entities::sea_orm_active_enums::RoleEnum;
use campus_event_service::jwt::JwtManager;
use campus_event_service::repositories::{
    FacultyRepository, NewFaculty, NewStudent, StudentRepository,
};
use campus_event_service::state::AppState;

pub const JWT_SECRET: &str = "test-secret";
pub const FACULTY_PASSWORD: &str = "faculty-pass";
pub const ADMIN_PASSWORD: &str = "admin-pass";
/// Lowest bcrypt cost, so seeding stays fast.
pub const TEST_BCRYPT_COST: u32 = 4;

#[derive(Debug, Clone)]
pub struct Principal {
    pub id: Uuid,
    pub login: String,
    pub token: String,
}

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    pub upload_dir: TempDir,
    /// Holds the SQLite file for the lifetime of the app.
    pub db_dir: TempDir,
    pub jwt: JwtManager,
    /// CSE student, roll number STU004, birthdate 2003-05-14.
    pub student_a: Principal,
    /// CSE student, roll number STU005.
    pub student_b: Principal,
    /// ECE student, roll number STU010.
    pub student_ece: Principal,
    pub faculty_cse: Principal,
    pub faculty_cse_2: Principal,
    pub faculty_ece: Principal,
    pub admin: Principal,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
    pub raw: Vec<u8>,
}

impl TestResponse {
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

// File-backed so the pool can hold several connections and concurrent
// requests really race in the store.
async fn connect(dir: &Path) -> DatabaseConnection {
    let url = format!("sqlite://{}?mode=rwc", dir.join("campus.db").display());
    let mut options = ConnectOptions::new(url);
    options
        .max_connections(4)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

async fn seed_student(
    db: &DatabaseConnection,
    jwt: &JwtManager,
    regno: i64,
    rno: &str,
    name: &str,
    department: &str,
) -> Principal {
    let student = StudentRepository::new(db)
        .create(NewStudent {
            regno,
            rno: rno.to_string(),
            name: name.to_string(),
            bdate: "2003-05-14".to_string(),
            phone: "9000000000".to_string(),
            email: format!("{}@student.edu", rno.to_lowercase()),
            nationality: "Indian".to_string(),
            department: department.to_string(),
        })
        .await
        .unwrap();

    Principal {
        id: student.student_id,
        login: student.rno,
        token: jwt.issue(student.student_id, RoleEnum::Student).unwrap(),
    }
}

async fn seed_faculty(
    db: &DatabaseConnection,
    jwt: &JwtManager,
    code: &str,
    name: &str,
    department: &str,
    role: RoleEnum,
    policy: &PasswordPolicy,
    password: &str,
) -> Principal {
    let faculty = FacultyRepository::new(db)
        .create(NewFaculty {
            faculty_code: code.to_string(),
            name: name.to_string(),
            department: department.to_string(),
            email: format!("{}@campus.edu", code.to_lowercase()),
            phone: "8000000000".to_string(),
            designation: "Professor".to_string(),
            password: policy.protect(password).unwrap(),
            role,
        })
        .await
        .unwrap();

    Principal {
        id: faculty.faculty_id,
        login: faculty.faculty_code,
        token: jwt.issue(faculty.faculty_id, role).unwrap(),
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db_dir = tempfile::tempdir().unwrap();
        let db = connect(db_dir.path()).await;
        let jwt = JwtManager::new(JWT_SECRET, 3600);
        let upload_dir = tempfile::tempdir().unwrap();
        let policy = PasswordPolicy::new(PasswordScheme::Bcrypt, TEST_BCRYPT_COST).unwrap();

        let student_a = seed_student(&db, &jwt, 21001, "STU004", "Alice Johnson", "CSE").await;
        let student_b = seed_student(&db, &jwt, 21002, "STU005", "Bob Williams", "CSE").await;
        let student_ece = seed_student(&db, &jwt, 21003, "STU010", "Carol Davis", "ECE").await;

        let faculty_cse = seed_faculty(
            &db, &jwt, "FAC001", "Dr. Rao", "CSE", RoleEnum::Faculty, &policy,
            FACULTY_PASSWORD,
        )
        .await;
        let faculty_cse_2 = seed_faculty(
            &db, &jwt, "FAC002", "Dr. Mehta", "CSE", RoleEnum::Faculty, &policy,
            FACULTY_PASSWORD,
        )
        .await;
        let faculty_ece = seed_faculty(
            &db, &jwt, "FAC003", "Dr. Iyer", "ECE", RoleEnum::Faculty, &policy,
            FACULTY_PASSWORD,
        )
        .await;
        let admin = seed_faculty(
            &db, &jwt, "ADM001", "Admin", "Administration", RoleEnum::Admin, &policy,
            ADMIN_PASSWORD,
        )
        .await;

        let state = AppState::new(
            db.clone(),
            JwtManager::new(JWT_SECRET, 3600),
            upload_dir.path(),
            policy,
        );
        let router = create_app(state, &HttpOptions::default());

        Self {
            router,
            db,
            upload_dir,
            db_dir,
            jwt,
            student_a,
            student_b,
            student_ece,
            faculty_cse,
            faculty_cse_2,
            faculty_ece,
            admin,
        }
    }

    pub async fn send_request(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let raw = response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec();
        let body = if raw.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&raw).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
            raw,
        }
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send_request(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.call(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.call(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Option<Value>) -> TestResponse {
        self.call(Method::PUT, uri, token, body).await
    }

    /// Creates an event as `creator` and returns its id.
    pub async fn create_event(&self, creator: &Principal, title: &str, registration_open: bool) -> String {
        let res = self
            .post(
                "/api/events",
                Some(&creator.token),
                serde_json::json!({
                    "title": title,
                    "description": "Annual technical festival",
                    "date": "2025-03-14",
                    "time": "10:00",
                    "venue": "Main Auditorium",
                    "organizer": "CSE Department",
                    "type": "technical",
                    "registrationOpen": registration_open,
                }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.body);
        res.body["id"].as_str().unwrap().to_string()
    }

    /// Files an on-duty request as `student` and returns its id.
    pub async fn create_on_duty_request(&self, student: &Principal) -> String {
        let res = self
            .post(
                "/api/on-duty-requests",
                Some(&student.token),
                serde_json::json!({
                    "reason": "Competition",
                    "eventName": "National Hackathon",
                    "fromDate": "2025-03-14",
                    "toDate": "2025-03-15",
                    "fromTime": "09:00",
                    "toTime": "17:00",
                    "description": "Representing the college",
                }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.body);
        res.body["id"].as_str().unwrap().to_string()
    }
}

/// One part of a hand-built multipart body.
pub struct Part<'a> {
    pub name: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub data: &'a [u8],
}

pub const BOUNDARY: &str = "campus-test-boundary";

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                part.name, part.file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", part.content_type).as_bytes());
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(uri: &str, token: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}
