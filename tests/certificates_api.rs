mod common;

use axum::http::{StatusCode, header};
use common::{Part, TestApp, multipart_request};

const ROSTER: &str = "id,name,email,event,type\n\
STU004,Alice Johnson,alice@student.edu,Tech Symposium 2025,participation\n\
STU005,Bob Williams,bob@student.edu,Tech Symposium 2025,achievement\n";

fn roster(data: &str) -> Part<'_> {
    Part {
        name: "roster",
        file_name: "roster.csv",
        content_type: "text/csv",
        data: data.as_bytes(),
    }
}

fn artifact<'a>(file_name: &'a str, data: &'a [u8]) -> Part<'a> {
    Part {
        name: "certificate",
        file_name,
        content_type: "application/pdf",
        data,
    }
}

fn stored_artifacts(app: &TestApp) -> usize {
    std::fs::read_dir(app.upload_dir.path().join("certificates"))
        .map(|entries| entries.count())
        .unwrap_or(0)
}

#[tokio::test]
async fn bulk_issue_creates_one_certificate_per_row() {
    let app = TestApp::spawn().await;

    let request = multipart_request(
        "/api/certificates",
        &app.faculty_cse.token,
        &[
            roster(ROSTER),
            artifact("STU004.pdf", b"%PDF alice"),
            artifact("STU005.pdf", b"%PDF bob"),
        ],
    );
    let res = app.send_request(request).await;

    assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.body);
    assert_eq!(res.body["issued"], 2);
    let certificates = res.body["certificates"].as_array().unwrap();
    assert_eq!(certificates[0]["title"], "Certificate of Participation");
    assert_eq!(certificates[0]["studentId"], app.student_a.id.to_string());
    assert_eq!(certificates[0]["department"], "CSE");
    assert_eq!(certificates[0]["registrationNumber"], "21001");
    assert_eq!(certificates[1]["type"], "achievement");
    assert_eq!(certificates[1]["title"], "Certificate of Achievement");
    assert!(certificates[0].get("artifactPath").is_none());
    assert_eq!(stored_artifacts(&app), 2);
}

#[tokio::test]
async fn missing_artifact_fails_without_writing_anything() {
    let app = TestApp::spawn().await;

    let request = multipart_request(
        "/api/certificates",
        &app.faculty_cse.token,
        &[roster(ROSTER), artifact("STU004.pdf", b"%PDF alice")],
    );
    let res = app.send_request(request).await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), "Row 3: no certificate file uploaded for 'STU005'");

    let res = app.get("/api/certificates", Some(&app.admin.token)).await;
    assert_eq!(res.body.as_array().unwrap().len(), 0);
    assert_eq!(stored_artifacts(&app), 0);
}

#[tokio::test]
async fn inconsistent_rosters_are_rejected_whole() {
    let app = TestApp::spawn().await;

    let unknown = "id,name,email,event,type\nSTU004,Alice,a@x.edu,Fest,participation\nSTU404,Ghost,g@x.edu,Fest,participation\n";
    let request = multipart_request(
        "/api/certificates",
        &app.admin.token,
        &[
            roster(unknown),
            artifact("STU004.pdf", b"a"),
            artifact("STU404.pdf", b"g"),
        ],
    );
    let res = app.send_request(request).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), "Row 3: unknown student id 'STU404'");

    let no_email = "id,name,event,type\nSTU004,Alice,Fest,participation\n";
    let request = multipart_request(
        "/api/certificates",
        &app.admin.token,
        &[roster(no_email), artifact("STU004.pdf", b"a")],
    );
    let res = app.send_request(request).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), "Roster is missing required column(s): email");

    let request = multipart_request(
        "/api/certificates",
        &app.admin.token,
        &[artifact("STU004.pdf", b"a")],
    );
    let res = app.send_request(request).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), "Roster file is required");

    let res = app.get("/api/certificates", Some(&app.admin.token)).await;
    assert_eq!(res.body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn students_cannot_issue() {
    let app = TestApp::spawn().await;

    let request = multipart_request(
        "/api/certificates",
        &app.student_a.token,
        &[roster(ROSTER), artifact("STU004.pdf", b"a"), artifact("STU005.pdf", b"b")],
    );
    let res = app.send_request(request).await;

    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.message(), "Only faculty or admin can issue certificates");
}

#[tokio::test]
async fn students_read_only_their_own_certificates() {
    let app = TestApp::spawn().await;
    let request = multipart_request(
        "/api/certificates",
        &app.faculty_cse.token,
        &[
            roster(ROSTER),
            artifact("STU004.pdf", b"%PDF alice"),
            artifact("STU005.pdf", b"%PDF bob"),
        ],
    );
    let issued = app.send_request(request).await;
    let certificates = issued.body["certificates"].as_array().unwrap();
    let alice_cert = certificates[0]["id"].as_str().unwrap().to_string();
    let bob_cert = certificates[1]["id"].as_str().unwrap().to_string();

    let res = app.get("/api/certificates", Some(&app.student_a.token)).await;
    let own = res.body.as_array().unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0]["id"], alice_cert);

    let res = app.get("/api/certificates", Some(&app.student_ece.token)).await;
    assert!(res.body.as_array().unwrap().is_empty());

    let res = app.get("/api/certificates", Some(&app.faculty_ece.token)).await;
    assert_eq!(res.body.as_array().unwrap().len(), 2);

    let res = app
        .get(&format!("/api/certificates/{alice_cert}/artifact"), Some(&app.student_a.token))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.raw, b"%PDF alice");
    assert_eq!(res.headers[header::CONTENT_TYPE], "application/pdf");

    let res = app
        .get(&format!("/api/certificates/{bob_cert}/artifact"), Some(&app.student_a.token))
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app
        .get(&format!("/api/certificates/{bob_cert}/artifact"), Some(&app.admin.token))
        .await;
    assert_eq!(res.raw, b"%PDF bob");
}
