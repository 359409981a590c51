//! Enrollment service
//!
//! Roster management. A learner enrolled in several classes has one row per
//! class sharing a roll number; every row carries the full membership set.

use rollcall_core::entities::{ClassRecord, EnrollmentRecord};
use rollcall_core::{normalize_roll_no, Actions, Actor, DomainError, Snowflake};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{
    AddStudentRequest, BulkAddResponse, BulkAddStudentsRequest, BulkOutcome, BulkRowResult,
    SelfRegisterRequest, StudentResponse,
};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Enrollment service
pub struct EnrollmentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EnrollmentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Enroll one student in a class
    #[instrument(skip(self, actor, request), fields(roll_no = %request.roll_no))]
    pub async fn add_student(
        &self,
        actor: &Actor,
        class_id: Snowflake,
        request: AddStudentRequest,
    ) -> ServiceResult<StudentResponse> {
        let class = AccessService::new(self.ctx)
            .class_for(actor, class_id, Actions::UPDATE_ROSTER)
            .await?;
        let student = self.enroll(&class, request).await?;
        Ok(StudentResponse::from(student))
    }

    /// Enroll many students; each row succeeds or fails on its own
    #[instrument(skip(self, actor, request), fields(rows = request.students.len()))]
    pub async fn add_bulk(
        &self,
        actor: &Actor,
        class_id: Snowflake,
        request: BulkAddStudentsRequest,
    ) -> ServiceResult<BulkAddResponse> {
        request.validate()?;
        let class = AccessService::new(self.ctx)
            .class_for(actor, class_id, Actions::UPDATE_ROSTER)
            .await?;

        let mut report = BulkAddResponse::default();
        for (index, row) in request.students.into_iter().enumerate() {
            let roll_no = row.roll_no.trim().to_string();
            let result = match self.enroll(&class, row).await {
                Ok(student) => BulkRowResult {
                    index,
                    roll_no,
                    outcome: BulkOutcome::Added,
                    student: Some(StudentResponse::from(student)),
                    error: None,
                },
                Err(ServiceError::Domain(DomainError::DuplicateEnrollment)) => BulkRowResult {
                    index,
                    roll_no,
                    outcome: BulkOutcome::Duplicate,
                    student: None,
                    error: None,
                },
                Err(e) => {
                    warn!(index, error = %e, "Bulk row failed");
                    BulkRowResult {
                        index,
                        roll_no,
                        outcome: BulkOutcome::Error,
                        student: None,
                        error: Some(if e.status_code() >= 500 {
                            "Internal server error".to_string()
                        } else {
                            e.to_string()
                        }),
                    }
                }
            };
            report.push(result);
        }

        info!(
            class_id = %class_id,
            added = report.added,
            duplicates = report.duplicates,
            errors = report.errors,
            "Bulk add finished"
        );
        Ok(report)
    }

    /// Anonymous self-registration into an active class
    #[instrument(skip(self, request), fields(roll_no = %request.roll_no))]
    pub async fn self_register(
        &self,
        class_id: Snowflake,
        request: SelfRegisterRequest,
    ) -> ServiceResult<StudentResponse> {
        let class = AccessService::new(self.ctx)
            .class_for(&Actor::Anonymous, class_id, Actions::SELF_ENROLL)
            .await?;
        let student = self.enroll(&class, request.into()).await?;
        Ok(StudentResponse::from(student))
    }

    /// Remove a student and their attendance in this class
    #[instrument(skip(self, actor))]
    pub async fn remove_student(
        &self,
        actor: &Actor,
        class_id: Snowflake,
        student_id: Snowflake,
    ) -> ServiceResult<()> {
        let class = AccessService::new(self.ctx)
            .class_for(actor, class_id, Actions::DELETE_STUDENTS)
            .await?;
        let student = self.student_in(&class, student_id).await?;

        let repo = self.ctx.enrollment_repo();
        let records = self
            .ctx
            .attendance_repo()
            .delete_by_enrollment(student.id, class.id)
            .await?;
        repo.remove_membership(&student.roll_no, class.id).await?;
        repo.delete(student.id).await?;

        info!(class_id = %class.id, student_id = %student.id, records, "Student removed");
        Ok(())
    }

    /// Class roster ordered by roll number
    #[instrument(skip(self, actor))]
    pub async fn list_students(
        &self,
        actor: &Actor,
        class_id: Snowflake,
    ) -> ServiceResult<Vec<StudentResponse>> {
        let class = AccessService::new(self.ctx)
            .class_for(actor, class_id, Actions::READ)
            .await?;
        let students = self.ctx.enrollment_repo().list_by_class(class.id).await?;
        Ok(students.into_iter().map(StudentResponse::from).collect())
    }

    /// Enrollment row of this class, `NotFound` for rows of other classes
    pub(crate) async fn student_in(
        &self,
        class: &ClassRecord,
        student_id: Snowflake,
    ) -> ServiceResult<EnrollmentRecord> {
        self.ctx
            .enrollment_repo()
            .find_by_id(student_id)
            .await?
            .filter(|s| s.class_id == class.id)
            .ok_or_else(|| ServiceError::not_found("Student"))
    }

    async fn enroll(
        &self,
        class: &ClassRecord,
        request: AddStudentRequest,
    ) -> ServiceResult<EnrollmentRecord> {
        request.validate()?;
        let roll_no = normalize_roll_no(&request.roll_no)?;
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(ServiceError::validation("name is required"));
        }

        let repo = self.ctx.enrollment_repo();
        if repo.find_by_class_and_roll(class.id, &roll_no).await?.is_some() {
            return Err(DomainError::DuplicateEnrollment.into());
        }

        let siblings = repo.list_by_roll(&roll_no).await?;
        let mut student = EnrollmentRecord::new(self.ctx.generate_id(), name, roll_no, class.id)
            .with_contact(
                request.email.map(|e| e.trim().to_lowercase()),
                request.phone.map(|p| p.trim().to_string()),
            );
        student.merge_memberships(siblings.into_iter().flat_map(|s| s.class_ids));

        repo.create(&student).await?;
        repo.add_membership(&student.roll_no, class.id).await?;

        info!(
            class_id = %class.id,
            student_id = %student.id,
            classes = student.class_ids.len(),
            "Student enrolled"
        );
        Ok(student)
    }
}
