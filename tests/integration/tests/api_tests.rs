//! API Integration Tests
//!
//! Each test spawns its own server on an ephemeral port with in-memory
//! storage, so no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, fixtures::*, TestServer};
use reqwest::StatusCode;

async fn teacher_session(server: &TestServer) -> LoginResponse {
    server
        .sign_up(&RegisterRequest::teacher())
        .await
        .expect("Failed to sign up teacher")
}

async fn create_class(server: &TestServer, token: &str) -> ClassResponse {
    let response = server
        .post_auth("/classes", token, &CreateClassRequest::math101())
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert!(response.headers().contains_key("x-request-id"));
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_account() {
    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest::teacher();

    let response = server.post("/auth/register", &request).await.unwrap();
    let account: AccountResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(account.username, request.username);
    assert_eq!(account.role, "teacher");
    assert!(account.active);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest::teacher();

    server.post("/auth/register", &request).await.unwrap();
    let response = server.post("/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_admin_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let mut request = RegisterRequest::teacher();
    request.role = "admin".to_string();

    let response = server.post("/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_register_unknown_field_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let body = serde_json::json!({
        "username": "someone",
        "email": "someone@school.test",
        "password": "TestPass123",
        "full_name": "Some One",
        "role": "teacher",
        "is_admin": true
    });

    let response = server.post("/auth/register", &body).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_with_email() {
    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest::teacher();
    server.post("/auth/register", &request).await.unwrap();

    let session = server.login(&request.email, &request.password).await.unwrap();
    assert_eq!(session.account.username, request.username);
    assert!(!session.token.is_empty());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest::teacher();
    server.post("/auth/register", &request).await.unwrap();

    let response = server
        .post("/auth/login", &LoginRequest::new(&request.username, "WrongPass999"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .post("/auth/login", &LoginRequest::new("nobody", "TestPass123"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_current_account() {
    let server = TestServer::start().await.unwrap();
    let session = teacher_session(&server).await;

    let response = server.get_auth("/accounts/@me", &session.token).await.unwrap();
    let account: AccountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(account.id, session.account.id);
}

#[tokio::test]
async fn test_logout_revokes_session() {
    let server = TestServer::start().await.unwrap();
    let session = teacher_session(&server).await;

    let response = server
        .post_auth("/auth/logout", &session.token, &serde_json::json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth("/accounts/@me", &session.token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_missing_token() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/classes").await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.error.code, "MISSING_AUTHORIZATION");
}

// ============================================================================
// Class Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_list_classes() {
    let server = TestServer::start().await.unwrap();
    let session = teacher_session(&server).await;
    let class = create_class(&server, &session.token).await;

    assert_eq!(class.name, "Math101");
    assert_eq!(class.created_by, session.account.id);
    assert_eq!(class.teacher_ids, vec![session.account.id.clone()]);
    assert!(!class.class_code.is_empty());

    let response = server.get_auth("/classes", &session.token).await.unwrap();
    let classes: Vec<ClassResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].id, class.id);
}

#[tokio::test]
async fn test_student_account_cannot_create_class() {
    let server = TestServer::start().await.unwrap();
    let session = server.sign_up(&RegisterRequest::student()).await.unwrap();

    let response = server
        .post_auth("/classes", &session.token, &CreateClassRequest::math101())
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_outsider_sees_not_found() {
    let server = TestServer::start().await.unwrap();
    let owner = teacher_session(&server).await;
    let outsider = teacher_session(&server).await;
    let class = create_class(&server, &owner.token).await;

    let response = server
        .get_auth(&format!("/classes/{}", class.id), &outsider.token)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "NOT_FOUND");

    let response = server
        .get_auth(&format!("/classes/{}/report", class.id), &outsider.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get_auth("/classes", &outsider.token).await.unwrap();
    let classes: Vec<ClassResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(classes.is_empty());
}

#[tokio::test]
async fn test_join_class_by_code() {
    let server = TestServer::start().await.unwrap();
    let owner = teacher_session(&server).await;
    let colleague = teacher_session(&server).await;
    let class = create_class(&server, &owner.token).await;

    let join = JoinClassRequest {
        code: class.class_code.to_lowercase(),
    };
    let response = server
        .post_auth("/classes/join", &colleague.token, &join)
        .await
        .unwrap();
    let joined: JoinClassResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!joined.already_member);
    assert_eq!(joined.class.teacher_ids.len(), 2);

    let response = server
        .post_auth("/classes/join", &colleague.token, &join)
        .await
        .unwrap();
    let again: JoinClassResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(again.already_member);
    assert!(again.warning.is_some());

    let response = server
        .get_auth(&format!("/classes/{}", class.id), &colleague.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_join_unknown_code() {
    let server = TestServer::start().await.unwrap();
    let session = teacher_session(&server).await;
    let join = JoinClassRequest {
        code: "ZZZZZZ".to_string(),
    };
    let response = server
        .post_auth("/classes/join", &session.token, &join)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_update_class() {
    let server = TestServer::start().await.unwrap();
    let session = teacher_session(&server).await;
    let class = create_class(&server, &session.token).await;

    let response = server
        .patch_auth(
            &format!("/classes/{}", class.id),
            &session.token,
            &serde_json::json!({ "name": "Math102" }),
        )
        .await
        .unwrap();
    let updated: ClassResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.name, "Math102");
    assert_eq!(updated.class_code, class.class_code);
}

#[tokio::test]
async fn test_invalid_class_id() {
    let server = TestServer::start().await.unwrap();
    let session = teacher_session(&server).await;
    let response = server
        .get_auth("/classes/not-a-number", &session.token)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_PATH_PARAMETER");
}

// ============================================================================
// Roster Tests
// ============================================================================

#[tokio::test]
async fn test_add_and_list_students() {
    let server = TestServer::start().await.unwrap();
    let session = teacher_session(&server).await;
    let class = create_class(&server, &session.token).await;
    let path = format!("/classes/{}/students", class.id);

    let mut asha = AddStudentRequest::new("Asha", " R1 ");
    asha.email = Some("Asha@School.Test".to_string());
    let response = server.post_auth(&path, &session.token, &asha).await.unwrap();
    let student: StudentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(student.roll_no, "R1");
    assert_eq!(student.email.as_deref(), Some("asha@school.test"));
    assert_eq!(student.class_id, class.id);

    let response = server.post_auth(&path, &session.token, &asha).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server.get_auth(&path, &session.token).await.unwrap();
    let roster: Vec<StudentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(roster.len(), 1);
}

#[tokio::test]
async fn test_bulk_add_counts_duplicates() {
    let server = TestServer::start().await.unwrap();
    let session = teacher_session(&server).await;
    let class = create_class(&server, &session.token).await;

    server
        .post_auth(
            &format!("/classes/{}/students", class.id),
            &session.token,
            &AddStudentRequest::new("Asha", "R1"),
        )
        .await
        .unwrap();

    let bulk = BulkAddStudentsRequest {
        students: vec![
            AddStudentRequest::new("Chen", "R3"),
            AddStudentRequest::new("Asha", "R1"),
        ],
    };
    let response = server
        .post_auth(
            &format!("/classes/{}/students/bulk", class.id),
            &session.token,
            &bulk,
        )
        .await
        .unwrap();
    let report: BulkAddResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(report.added, 1);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.errors, 0);
    assert_eq!(report.rows[1].outcome, "duplicate");
}

#[tokio::test]
async fn test_bulk_add_partial_failure() {
    let server = TestServer::start().await.unwrap();
    let session = teacher_session(&server).await;
    let class = create_class(&server, &session.token).await;

    let bulk = BulkAddStudentsRequest {
        students: vec![
            AddStudentRequest::new("Asha", "R1"),
            AddStudentRequest::new("   ", "R2"),
        ],
    };
    let response = server
        .post_auth(
            &format!("/classes/{}/students/bulk", class.id),
            &session.token,
            &bulk,
        )
        .await
        .unwrap();
    let report: BulkAddResponse = assert_json(response, StatusCode::MULTI_STATUS).await.unwrap();
    assert_eq!(report.added, 1);
    assert_eq!(report.errors, 1);
    assert_eq!(report.rows[1].index, 1);
    assert_eq!(report.rows[1].roll_no, "R2");
    assert!(report.rows[1].error.is_some());
}

#[tokio::test]
async fn test_self_registration() {
    let server = TestServer::start().await.unwrap();
    let session = teacher_session(&server).await;
    let class = create_class(&server, &session.token).await;

    let response = server
        .post(
            &format!("/classes/{}/register", class.id),
            &serde_json::json!({ "name": "Dev", "roll_no": "R4" }),
        )
        .await
        .unwrap();
    let student: StudentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(student.roll_no, "R4");

    let response = server
        .post(
            "/classes/123/register",
            &serde_json::json!({ "name": "Dev", "roll_no": "R4" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_remove_student() {
    let server = TestServer::start().await.unwrap();
    let session = teacher_session(&server).await;
    let class = create_class(&server, &session.token).await;
    let path = format!("/classes/{}/students", class.id);

    let response = server
        .post_auth(&path, &session.token, &AddStudentRequest::new("Asha", "R1"))
        .await
        .unwrap();
    let student: StudentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .delete_auth(&format!("{path}/{}", student.id), &session.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .delete_auth(&format!("{path}/{}", student.id), &session.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get_auth(&path, &session.token).await.unwrap();
    let roster: Vec<StudentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(roster.is_empty());
}

// ============================================================================
// Attendance Tests
// ============================================================================

#[tokio::test]
async fn test_mark_attendance_defaults_to_absent() {
    let server = TestServer::start().await.unwrap();
    let session = teacher_session(&server).await;
    let class = create_class(&server, &session.token).await;
    let students = format!("/classes/{}/students", class.id);
    for (name, roll) in [("Asha", "R1"), ("Bo", "R2")] {
        server
            .post_auth(&students, &session.token, &AddStudentRequest::new(name, roll))
            .await
            .unwrap();
    }

    let day = format!("/classes/{}/attendance/2024-01-10", class.id);
    let response = server
        .put_auth(&day, &session.token, &MarkAttendanceRequest::present(2, &["R1"]))
        .await
        .unwrap();
    let marked: AttendanceDayResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(marked.date, "2024-01-10");
    assert_eq!((marked.present, marked.absent), (1, 1));
    let r2 = marked.entries.iter().find(|e| e.roll_no == "R2").unwrap();
    assert_eq!(r2.status, "absent");
    assert_eq!(r2.lectures, 2);

    let response = server.get_auth(&day, &session.token).await.unwrap();
    let fetched: AttendanceDayResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.entries.len(), 2);

    let response = server
        .get_auth(&format!("/classes/{}/attendance", class.id), &session.token)
        .await
        .unwrap();
    let dates: Vec<String> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(dates, vec!["2024-01-10".to_string()]);
}

#[tokio::test]
async fn test_mark_attendance_rejects_bad_input() {
    let server = TestServer::start().await.unwrap();
    let session = teacher_session(&server).await;
    let class = create_class(&server, &session.token).await;
    server
        .post_auth(
            &format!("/classes/{}/students", class.id),
            &session.token,
            &AddStudentRequest::new("Asha", "R1"),
        )
        .await
        .unwrap();
    let day = format!("/classes/{}/attendance/2024-01-10", class.id);

    let response = server
        .put_auth(&day, &session.token, &MarkAttendanceRequest::present(1, &["R9"]))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(error.error.message.contains("R9"));

    let response = server
        .put_auth(&day, &session.token, &MarkAttendanceRequest::present(13, &[]))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .put_auth(
            &format!("/classes/{}/attendance/2024-13-45", class.id),
            &session.token,
            &MarkAttendanceRequest::present(1, &[]),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Nothing was written by the rejected requests
    let response = server
        .get_auth(&format!("/classes/{}/attendance", class.id), &session.token)
        .await
        .unwrap();
    let dates: Vec<String> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(dates.is_empty());
}

// ============================================================================
// Report Tests
// ============================================================================

#[tokio::test]
async fn test_class_report_csv() {
    let server = TestServer::start().await.unwrap();
    let session = teacher_session(&server).await;
    let class = create_class(&server, &session.token).await;
    let students = format!("/classes/{}/students", class.id);
    for (name, roll) in [("Asha", "R1"), ("Bo", "R2")] {
        server
            .post_auth(&students, &session.token, &AddStudentRequest::new(name, roll))
            .await
            .unwrap();
    }
    server
        .put_auth(
            &format!("/classes/{}/attendance/2024-01-10", class.id),
            &session.token,
            &MarkAttendanceRequest::present(1, &["R1"]),
        )
        .await
        .unwrap();

    let response = server
        .get_auth(&format!("/classes/{}/report/csv", class.id), &session.token)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/csv; charset=utf-8"
    );
    assert!(response.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .contains(&format!("attendance-{}.csv", class.id)));

    let body = response.text().await.unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(
        lines[0],
        "roll,name,email,present,total,percentage,status,isDefaulter"
    );
    assert_eq!(lines[1], "R1,Asha,,1,1,100.00,good,false");
    assert_eq!(lines[2], "R2,Bo,,0,1,0.00,danger,true");
    assert_eq!(lines[3], "Defaulters");
    assert_eq!(lines[5], "R2,Bo,0.00");
}
