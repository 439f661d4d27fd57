mod common;

use axum::http::StatusCode;
use common::TestApp;
use futures::future::join_all;
use serde_json::json;

#[tokio::test]
async fn department_scoped_approval_scenario() {
    let app = TestApp::spawn().await;
    let request_id = app.create_on_duty_request(&app.student_a).await;

    let res = app
        .put(&format!("/api/on-duty-requests/{request_id}/approve"), Some(&app.faculty_ece.token), None)
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.message(), "Not authorized to resolve requests from another department");

    let res = app
        .put(&format!("/api/on-duty-requests/{request_id}/approve"), Some(&app.faculty_cse.token), None)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["request"]["status"], "approved");
    assert_eq!(res.body["request"]["resolvedByName"], "Dr. Rao");
    assert_eq!(res.body["request"]["resolvedBy"], app.faculty_cse.id.to_string());
    assert!(res.body["request"]["resolvedAt"].is_string());

    let res = app
        .put(&format!("/api/on-duty-requests/{request_id}/reject"), Some(&app.faculty_cse.token), None)
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), "Request has already been approved");

    let res = app
        .get(&format!("/api/on-duty-requests/{request_id}"), Some(&app.student_a.token))
        .await;
    assert_eq!(res.body["status"], "approved");
}

#[tokio::test]
async fn admin_resolves_any_department_and_students_resolve_none() {
    let app = TestApp::spawn().await;
    let request_id = app.create_on_duty_request(&app.student_ece).await;

    let res = app
        .put(&format!("/api/on-duty-requests/{request_id}/approve"), Some(&app.student_ece.token), None)
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.message(), "Only faculty or admin can resolve on-duty requests");

    let res = app
        .put(&format!("/api/on-duty-requests/{request_id}/reject"), Some(&app.admin.token), None)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["request"]["status"], "rejected");

    let res = app
        .put(&format!("/api/on-duty-requests/{request_id}/approve"), Some(&app.admin.token), None)
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), "Request has already been rejected");
}

#[tokio::test]
async fn submission_snapshots_student_and_starts_pending() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            "/api/on-duty-requests",
            Some(&app.student_a.token),
            json!({
                "reason": "Event Participation",
                "eventName": "Inter-college Fest",
                "fromDate": "2025-04-01",
                "toDate": "2025-04-02",
                "fromTime": "08:30",
                "toTime": "16:00",
                "description": "Dance competition",
                "attachmentUrl": "https://example.edu/invite.pdf",
            }),
        )
        .await;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["status"], "pending");
    assert_eq!(res.body["studentName"], "Alice Johnson");
    assert_eq!(res.body["department"], "CSE");
    assert_eq!(res.body["registrationNumber"], "21001");
    assert_eq!(res.body["reason"], "Event Participation");
    assert_eq!(res.body["fromTime"], "08:30");
    assert!(res.body["resolvedBy"].is_null());
}

#[tokio::test]
async fn invalid_submissions_are_rejected() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            "/api/on-duty-requests",
            Some(&app.student_a.token),
            json!({
                "reason": "Internship",
                "eventName": "Summer internship",
                "fromDate": "2025-06-30",
                "toDate": "2025-06-01",
                "fromTime": "09:00",
                "toTime": "17:00",
                "description": "Backwards dates",
            }),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), "fromDate must not be after toDate");

    let res = app
        .post(
            "/api/on-duty-requests",
            Some(&app.student_a.token),
            json!({ "reason": "Holiday" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .post(
            "/api/on-duty-requests",
            Some(&app.faculty_cse.token),
            json!({ "reason": "Other" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn visibility_follows_role() {
    let app = TestApp::spawn().await;
    let a_request = app.create_on_duty_request(&app.student_a).await;
    let b_request = app.create_on_duty_request(&app.student_b).await;
    let ece_request = app.create_on_duty_request(&app.student_ece).await;

    let ids = |res: &common::TestResponse| -> Vec<String> {
        res.body
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_str().unwrap().to_string())
            .collect()
    };

    let res = app.get("/api/on-duty-requests", Some(&app.student_a.token)).await;
    assert_eq!(ids(&res), vec![a_request.clone()]);

    let res = app.get("/api/on-duty-requests", Some(&app.faculty_cse.token)).await;
    let visible = ids(&res);
    assert_eq!(visible.len(), 2);
    assert!(visible.contains(&a_request) && visible.contains(&b_request));

    let res = app.get("/api/on-duty-requests", Some(&app.admin.token)).await;
    assert_eq!(ids(&res).len(), 3);

    let res = app
        .get(&format!("/api/on-duty-requests/{ece_request}"), Some(&app.faculty_cse.token))
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app
        .get(&format!("/api/on-duty-requests/{b_request}"), Some(&app.student_a.token))
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_filter_narrows_the_visible_set() {
    let app = TestApp::spawn().await;
    let approved = app.create_on_duty_request(&app.student_a).await;
    let pending = app.create_on_duty_request(&app.student_a).await;
    app.put(&format!("/api/on-duty-requests/{approved}/approve"), Some(&app.faculty_cse.token), None)
        .await;

    let res = app
        .get("/api/on-duty-requests?status=pending", Some(&app.student_a.token))
        .await;
    let listed = res.body.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], pending);

    let res = app
        .get("/api/on-duty-requests?status=approved", Some(&app.faculty_cse.token))
        .await;
    assert_eq!(res.body[0]["id"], approved);

    let res = app
        .get("/api/on-duty-requests?status=archived", Some(&app.faculty_cse.token))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn concurrent_resolutions_have_one_winner() {
    let app = TestApp::spawn().await;
    let request_id = app.create_on_duty_request(&app.student_a).await;
    let approve = format!("/api/on-duty-requests/{request_id}/approve");
    let reject = format!("/api/on-duty-requests/{request_id}/reject");

    let attempts = (0..6).map(|i| {
        let (uri, resolver) = if i % 2 == 0 {
            (&approve, &app.faculty_cse)
        } else {
            (&reject, &app.faculty_cse_2)
        };
        app.put(uri, Some(&resolver.token), None)
    });
    let results = join_all(attempts).await;

    let winners: Vec<_> = results.iter().filter(|r| r.status == StatusCode::OK).collect();
    assert_eq!(winners.len(), 1);
    assert!(
        results
            .iter()
            .filter(|r| r.status != StatusCode::OK)
            .all(|r| r.status == StatusCode::BAD_REQUEST && r.message().starts_with("Request has already been"))
    );

    let final_status = winners[0].body["request"]["status"].clone();
    let res = app
        .get(&format!("/api/on-duty-requests/{request_id}"), Some(&app.admin.token))
        .await;
    assert_eq!(res.body["status"], final_status);
}

#[tokio::test]
async fn resolving_unknown_request_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app
        .put("/api/on-duty-requests/12345/approve", Some(&app.admin.token), None)
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.message(), "On-duty request not found");
}
