//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{
    accounts, admin, attendance, auth, classes, health, lookup, reports, students,
};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(account_routes())
        .merge(admin_routes())
        .merge(class_routes())
        .merge(public_routes())
}

/// Liveness and readiness probes
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
}

fn account_routes() -> Router<AppState> {
    Router::new().route("/accounts/@me", get(accounts::get_current_account))
}

/// Admin-only account management
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/accounts",
            get(admin::list_accounts).post(admin::provision_account),
        )
        .route("/admin/accounts/:id/deactivate", post(admin::deactivate_account))
        .route("/admin/accounts/:id/reactivate", post(admin::reactivate_account))
}

/// Class, roster, attendance, and report routes
fn class_routes() -> Router<AppState> {
    Router::new()
        // Class CRUD
        .route("/classes", get(classes::list_classes).post(classes::create_class))
        .route("/classes/join", post(classes::join_class))
        .route(
            "/classes/:id",
            get(classes::get_class)
                .patch(classes::update_class)
                .delete(classes::delete_class),
        )
        // Roster
        .route(
            "/classes/:id/students",
            get(students::list_students).post(students::add_student),
        )
        .route("/classes/:id/students/bulk", post(students::add_students_bulk))
        .route(
            "/classes/:id/students/:student_id",
            delete(students::remove_student),
        )
        // Attendance
        .route("/classes/:id/attendance", get(attendance::list_dates))
        .route(
            "/classes/:id/attendance/:date",
            get(attendance::get_day).put(attendance::mark_day),
        )
        .route(
            "/classes/:id/students/:student_id/attendance",
            get(attendance::student_records),
        )
        // Reports
        .route("/classes/:id/report", get(reports::class_report))
        .route("/classes/:id/report/csv", get(reports::class_report_csv))
}

/// Routes that need no session
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/classes/:id/register", post(students::self_register))
        .route("/lookup/:roll_no", get(lookup::student_summary))
}
