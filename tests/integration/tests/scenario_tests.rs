//! End-to-end scenarios spanning several endpoints
//!
//! Run with: cargo test -p integration-tests --test scenario_tests

use integration_tests::{
    assert_json, assert_status, fixtures::*, TestServer, ADMIN_PASSWORD, ADMIN_USERNAME,
};
use reqwest::StatusCode;

struct Classroom {
    token: String,
    class_id: String,
}

impl Classroom {
    async fn open(server: &TestServer, name: &str) -> Self {
        let session = server.sign_up(&RegisterRequest::teacher()).await.unwrap();
        let request = CreateClassRequest {
            name: name.to_string(),
            ..CreateClassRequest::math101()
        };
        let response = server
            .post_auth("/classes", &session.token, &request)
            .await
            .unwrap();
        let class: ClassResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
        Self {
            token: session.token,
            class_id: class.id,
        }
    }

    fn path(&self, suffix: &str) -> String {
        format!("/classes/{}{suffix}", self.class_id)
    }

    async fn enroll(&self, server: &TestServer, name: &str, roll_no: &str) {
        let response = server
            .post_auth(
                &self.path("/students"),
                &self.token,
                &AddStudentRequest::new(name, roll_no),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    async fn mark(&self, server: &TestServer, date: &str, lectures: i32, present: &[&str]) {
        let response = server
            .put_auth(
                &self.path(&format!("/attendance/{date}")),
                &self.token,
                &MarkAttendanceRequest::present(lectures, present),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    async fn report(&self, server: &TestServer) -> ClassReportResponse {
        let response = server
            .get_auth(&self.path("/report"), &self.token)
            .await
            .unwrap();
        assert_json(response, StatusCode::OK).await.unwrap()
    }
}

async fn lookup(server: &TestServer, roll_no: &str) -> StudentSummaryResponse {
    let response = server.get(&format!("/lookup/{roll_no}")).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Attendance lifecycle
// ============================================================================

#[tokio::test]
async fn test_math101_lifecycle() {
    let server = TestServer::start().await.unwrap();
    let math = Classroom::open(&server, "Math101").await;

    math.enroll(&server, "Asha", "R1").await;
    math.mark(&server, "2024-01-10", 1, &["R1"]).await;

    let summary = lookup(&server, "R1").await;
    assert_eq!(summary.name.as_deref(), Some("Asha"));
    assert_eq!(summary.classes.len(), 1);
    assert_eq!(summary.classes[0].class_name, "Math101");
    assert_eq!((summary.classes[0].present, summary.classes[0].total), (1, 1));
    assert!((summary.classes[0].percentage - 100.0).abs() < f64::EPSILON);
    assert_eq!(summary.classes[0].band, "good");

    // A student enrolled after the only marked day has nothing attended
    math.enroll(&server, "Bo", "R2").await;
    let report = math.report(&server).await;
    assert_eq!(report.defaulters, vec!["R2".to_string()]);
    let r2 = report.students.iter().find(|s| s.roll_no == "R2").unwrap();
    assert!(r2.is_defaulter);
    assert_eq!(r2.total, 0);

    let bulk = BulkAddStudentsRequest {
        students: vec![
            AddStudentRequest::new("Chen", "R3"),
            AddStudentRequest::new("Asha", "R1"),
        ],
    };
    let response = server
        .post_auth(&math.path("/students/bulk"), &math.token, &bulk)
        .await
        .unwrap();
    let added: BulkAddResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!((added.added, added.duplicates), (1, 1));

    let response = server
        .delete_auth(&math.path(""), &math.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth("/classes", &math.token).await.unwrap();
    let classes: Vec<ClassResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(classes.is_empty());

    let summary = lookup(&server, "R1").await;
    assert!(summary.classes.is_empty());
}

#[tokio::test]
async fn test_remark_replaces_day() {
    let server = TestServer::start().await.unwrap();
    let math = Classroom::open(&server, "Math101").await;
    math.enroll(&server, "Asha", "R1").await;
    math.enroll(&server, "Bo", "R2").await;

    math.mark(&server, "2024-01-10", 2, &["R1", "R2"]).await;
    math.mark(&server, "2024-01-10", 1, &["R2"]).await;

    let report = math.report(&server).await;
    assert_eq!(report.lectures_held, 1);
    let r1 = report.students.iter().find(|s| s.roll_no == "R1").unwrap();
    assert_eq!((r1.present, r1.total), (0, 1));
    let r2 = report.students.iter().find(|s| s.roll_no == "R2").unwrap();
    assert_eq!((r2.present, r2.total), (1, 1));
    assert!((report.average_percentage - 50.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_roll_number_across_classes() {
    let server = TestServer::start().await.unwrap();
    let math = Classroom::open(&server, "Math101").await;
    let physics = Classroom::open(&server, "Physics101").await;

    math.enroll(&server, "Asha", "R1").await;
    physics.enroll(&server, "Asha", "R1").await;
    math.mark(&server, "2024-01-10", 3, &["R1"]).await;
    physics.mark(&server, "2024-01-10", 1, &[]).await;

    let summary = lookup(&server, "R1").await;
    assert_eq!(summary.classes.len(), 2);
    assert!((summary.overall_percentage - 75.0).abs() < f64::EPSILON);
    assert_eq!(summary.band, "good");

    // Removing one class leaves the other intact
    let response = server
        .delete_auth(&physics.path(""), &physics.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let summary = lookup(&server, "R1").await;
    assert_eq!(summary.classes.len(), 1);
    assert_eq!(summary.classes[0].class_name, "Math101");
    assert!((summary.overall_percentage - 100.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_lookup_unknown_roll_is_empty() {
    let server = TestServer::start().await.unwrap();
    let summary = lookup(&server, "R404").await;
    assert_eq!(summary.roll_no, "R404");
    assert!(summary.classes.is_empty());
    assert!(summary.name.is_none());
}

#[tokio::test]
async fn test_concurrent_marks_keep_one_record_per_student() {
    let server = TestServer::start().await.unwrap();
    let math = Classroom::open(&server, "Math101").await;
    for (name, roll) in [("Asha", "R1"), ("Bo", "R2"), ("Chen", "R3")] {
        math.enroll(&server, name, roll).await;
    }

    let day = math.path("/attendance/2024-01-10");
    let first = MarkAttendanceRequest::present(1, &["R1"]);
    let second = MarkAttendanceRequest::present(1, &["R2", "R3"]);
    let (a, b) = tokio::join!(
        server.put_auth(&day, &math.token, &first),
        server.put_auth(&day, &math.token, &second),
    );
    assert_eq!(a.unwrap().status(), StatusCode::OK);
    assert_eq!(b.unwrap().status(), StatusCode::OK);

    let response = server.get_auth(&day, &math.token).await.unwrap();
    let marked: AttendanceDayResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(marked.entries.len(), 3);
    assert_eq!(marked.present + marked.absent, 3);

    let report = math.report(&server).await;
    assert!(report.students.iter().all(|s| s.total == 1));
}

#[tokio::test]
async fn test_csv_and_json_reports_agree() {
    let server = TestServer::start().await.unwrap();
    let math = Classroom::open(&server, "Math101").await;
    for (name, roll) in [("Asha", "R1"), ("Bo", "R2"), ("Chen", "R3")] {
        math.enroll(&server, name, roll).await;
    }
    math.mark(&server, "2024-01-10", 2, &["R1", "R2"]).await;
    math.mark(&server, "2024-01-11", 1, &["R1"]).await;

    let report = math.report(&server).await;
    let response = server
        .get_auth(&math.path("/report/csv"), &math.token)
        .await
        .unwrap();
    let csv = response.text().await.unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    for (line, row) in lines[1..=report.students.len()].iter().zip(&report.students) {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields[0], row.roll_no);
        assert_eq!(fields[3], row.present.to_string());
        assert_eq!(fields[4], row.total.to_string());
        assert_eq!(fields[5], format!("{:.2}", row.percentage));
        assert_eq!(fields[6], row.band);
        assert_eq!(fields[7], row.is_defaulter.to_string());
    }

    let defaulter_rows: Vec<&str> = lines[report.students.len() + 3..]
        .iter()
        .map(|line| line.split(',').next().unwrap_or_default())
        .collect();
    assert_eq!(defaulter_rows, report.defaulters);
}

// ============================================================================
// Account administration
// ============================================================================

#[tokio::test]
async fn test_deactivated_account_loses_access() {
    let server = TestServer::start_with_admin().await.unwrap();
    let admin = server.admin_token().await.unwrap();
    let request = RegisterRequest::teacher();
    let teacher = server.sign_up(&request).await.unwrap();

    let response = server
        .post_auth(
            &format!("/admin/accounts/{}/deactivate", teacher.account.id),
            &admin,
            &serde_json::json!({}),
        )
        .await
        .unwrap();
    let account: AccountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!account.active);

    let response = server.get_auth("/classes", &teacher.token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .post(
            "/auth/login",
            &LoginRequest::new(&request.username, &request.password),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/admin/accounts/{}/reactivate", teacher.account.id),
            &admin,
            &serde_json::json!({}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    assert!(server
        .login(&request.username, &request.password)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_admin_endpoints_require_admin() {
    let server = TestServer::start_with_admin().await.unwrap();
    let teacher = server.sign_up(&RegisterRequest::teacher()).await.unwrap();

    let response = server
        .get_auth("/admin/accounts", &teacher.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let admin = server.admin_token().await.unwrap();
    let response = server.get_auth("/admin/accounts", &admin).await.unwrap();
    let accounts: Vec<AccountResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(accounts.len(), 2);
    assert!(accounts.iter().any(|a| a.role == "admin"));
}

#[tokio::test]
async fn test_admin_provisions_accounts() {
    let server = TestServer::start_with_admin().await.unwrap();
    let admin = server.admin_token().await.unwrap();

    let mut request = RegisterRequest::teacher();
    request.role = "admin".to_string();
    let response = server
        .post_auth("/admin/accounts", &admin, &request)
        .await
        .unwrap();
    let account: AccountResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(account.role, "admin");

    let me = server
        .login(ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .unwrap();
    let response = server
        .post_auth(
            &format!("/admin/accounts/{}/deactivate", me.account.id),
            &admin,
            &serde_json::json!({}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_admin_reads_any_class() {
    let server = TestServer::start_with_admin().await.unwrap();
    let math = Classroom::open(&server, "Math101").await;
    math.enroll(&server, "Asha", "R1").await;
    let admin = server.admin_token().await.unwrap();

    let response = server.get_auth(&math.path("/report"), &admin).await.unwrap();
    let report: ClassReportResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(report.class_name, "Math101");

    let response = server.get_auth("/classes", &admin).await.unwrap();
    let classes: Vec<ClassResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(classes.len(), 1);
}

#[tokio::test]
async fn test_only_creator_or_admin_toggles_active() {
    let server = TestServer::start_with_admin().await.unwrap();
    let math = Classroom::open(&server, "Math101").await;
    let colleague = server.sign_up(&RegisterRequest::teacher()).await.unwrap();
    let admin = server.admin_token().await.unwrap();

    let response = server.get_auth(&math.path(""), &math.token).await.unwrap();
    let class: ClassResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let join = JoinClassRequest {
        code: class.class_code,
    };
    let response = server
        .post_auth("/classes/join", &colleague.token, &join)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let deactivate = serde_json::json!({ "active": false });
    let response = server
        .patch_auth(&math.path(""), &colleague.token, &deactivate)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error.code, "ACCESS_DENIED");

    let response = server.get_auth(&math.path(""), &math.token).await.unwrap();
    let class: ClassResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(class.active);

    // Creator hides the class, after which only an admin can bring it back
    let response = server
        .patch_auth(&math.path(""), &math.token, &deactivate)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let reactivate = serde_json::json!({ "active": true });
    let response = server
        .patch_auth(&math.path(""), &math.token, &reactivate)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .patch_auth(&math.path(""), &admin, &reactivate)
        .await
        .unwrap();
    let class: ClassResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(class.active);

    let response = server.get_auth(&math.path(""), &math.token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}
