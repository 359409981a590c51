//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; `rollcall-db` provides Postgres and
//! in-memory implementations, `rollcall-cache` provides session stores.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::entities::{Account, AttendanceRecord, ClassRecord, EnrollmentRecord, Session};
use crate::error::DomainError;
use crate::value_objects::{JoinCode, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Account Repository
// ============================================================================

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find account by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Account>>;

    /// Find account by exact username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<Account>>;

    /// Find account by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>>;

    /// List every account, oldest first
    async fn list(&self) -> RepoResult<Vec<Account>>;

    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new account.
    ///
    /// Fails with `DuplicateIdentity` when the username or email is taken.
    async fn create(&self, account: &Account, password_hash: &str) -> RepoResult<()>;

    /// Set the active flag
    async fn set_active(&self, id: Snowflake, active: bool) -> RepoResult<()>;

    /// Record a successful login
    async fn touch_last_login(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;
}

// ============================================================================
// Class Repository
// ============================================================================

#[async_trait]
pub trait ClassRepository: Send + Sync {
    /// Find class by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<ClassRecord>>;

    /// Find class by join code
    async fn find_by_code(&self, code: &JoinCode) -> RepoResult<Option<ClassRecord>>;

    async fn code_exists(&self, code: &JoinCode) -> RepoResult<bool>;

    /// List all classes, newest first
    async fn list(&self) -> RepoResult<Vec<ClassRecord>>;

    /// List classes whose teacher set contains the account, newest first
    async fn list_by_teacher(&self, teacher_id: Snowflake) -> RepoResult<Vec<ClassRecord>>;

    /// Create a new class.
    ///
    /// Fails with `JoinCodeExists` when the code collides.
    async fn create(&self, class: &ClassRecord) -> RepoResult<()>;

    /// Update mutable details (name, room, subject, description, active)
    async fn update(&self, class: &ClassRecord) -> RepoResult<()>;

    /// Append a teacher to the teacher set; returns `false` if already present
    async fn add_teacher(&self, class_id: Snowflake, teacher_id: Snowflake) -> RepoResult<bool>;

    /// Hard delete the class row
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Enrollment Repository
// ============================================================================

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Find enrollment by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<EnrollmentRecord>>;

    /// Find the enrollment for a roll number in a class
    async fn find_by_class_and_roll(
        &self,
        class_id: Snowflake,
        roll_no: &str,
    ) -> RepoResult<Option<EnrollmentRecord>>;

    /// List a class roster ordered by roll number
    async fn list_by_class(&self, class_id: Snowflake) -> RepoResult<Vec<EnrollmentRecord>>;

    /// List every enrollment row sharing a roll number
    async fn list_by_roll(&self, roll_no: &str) -> RepoResult<Vec<EnrollmentRecord>>;

    /// Create a new enrollment.
    ///
    /// Fails with `DuplicateEnrollment` when (roll_no, class_id) exists.
    async fn create(&self, enrollment: &EnrollmentRecord) -> RepoResult<()>;

    /// Add `class_id` to the membership set of every row with this roll number
    async fn add_membership(&self, roll_no: &str, class_id: Snowflake) -> RepoResult<u64>;

    /// Remove `class_id` from the membership set of every row with this roll number
    async fn remove_membership(&self, roll_no: &str, class_id: Snowflake) -> RepoResult<u64>;

    /// Remove `class_id` from every membership set
    async fn strip_class(&self, class_id: Snowflake) -> RepoResult<u64>;

    /// Delete one enrollment row
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Delete all rows whose primary class is `class_id`
    async fn delete_by_class(&self, class_id: Snowflake) -> RepoResult<u64>;
}

// ============================================================================
// Attendance Repository
// ============================================================================

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Insert records, replacing any existing record with the same
    /// (enrollment, class, date) key
    async fn upsert_many(&self, records: &[AttendanceRecord]) -> RepoResult<()>;

    /// Delete every record of a class on a date
    async fn delete_by_class_and_date(&self, class_id: Snowflake, date: NaiveDate)
        -> RepoResult<u64>;

    /// Delete one student's records in a class
    async fn delete_by_enrollment(
        &self,
        enrollment_id: Snowflake,
        class_id: Snowflake,
    ) -> RepoResult<u64>;

    /// Delete every record of a class
    async fn delete_by_class(&self, class_id: Snowflake) -> RepoResult<u64>;

    async fn list_by_class_and_date(
        &self,
        class_id: Snowflake,
        date: NaiveDate,
    ) -> RepoResult<Vec<AttendanceRecord>>;

    /// List a student's records, oldest date first
    async fn list_by_enrollment(&self, enrollment_id: Snowflake)
        -> RepoResult<Vec<AttendanceRecord>>;

    /// List every record of a class
    async fn list_by_class(&self, class_id: Snowflake) -> RepoResult<Vec<AttendanceRecord>>;

    /// Distinct marked dates of a class, newest first
    async fn list_dates(&self, class_id: Snowflake) -> RepoResult<Vec<NaiveDate>>;
}

// ============================================================================
// Session Store
// ============================================================================

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a session until its expiry
    async fn put(&self, session: &Session) -> RepoResult<()>;

    /// Look up a live session by token
    async fn get(&self, token: &str) -> RepoResult<Option<Session>>;

    /// Revoke one session
    async fn revoke(&self, token: &str) -> RepoResult<()>;

    /// Revoke every session of an account, returning how many were removed
    async fn revoke_all(&self, account_id: Snowflake) -> RepoResult<u64>;
}
