//! Attendance ledger service
//!
//! A day is always written whole: marking deletes every record of the class
//! on that date and writes one record per enrolled student.

use std::collections::HashMap;

use chrono::NaiveDate;
use rollcall_core::entities::{AttendanceRecord, ClassRecord, EnrollmentRecord};
use rollcall_core::{Actions, Actor, AttendanceStatus, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    AttendanceDayResponse, AttendanceEntry, AttendanceRecordResponse, MarkAttendanceRequest,
};

use super::access::AccessService;
use super::context::ServiceContext;
use super::enrollment::EnrollmentService;
use super::error::{ServiceError, ServiceResult};

/// Attendance ledger service
pub struct AttendanceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AttendanceService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Replace the attendance of a class on `date`.
    ///
    /// Students missing from `statuses` are marked absent. Roll numbers that
    /// are not enrolled reject the whole request before anything is deleted.
    #[instrument(skip(self, actor, request), fields(lectures = request.lectures))]
    pub async fn mark_bulk(
        &self,
        actor: &Actor,
        class_id: Snowflake,
        date: NaiveDate,
        request: MarkAttendanceRequest,
    ) -> ServiceResult<AttendanceDayResponse> {
        request.validate()?;
        let class = AccessService::new(self.ctx)
            .class_for(actor, class_id, Actions::MARK_ATTENDANCE)
            .await?;
        let roster = self.ctx.enrollment_repo().list_by_class(class.id).await?;

        let statuses: HashMap<String, AttendanceStatus> = request
            .statuses
            .into_iter()
            .map(|(roll_no, status)| (roll_no.trim().to_string(), status))
            .collect();
        let mut unknown: Vec<&str> = statuses
            .keys()
            .filter(|roll_no| !roster.iter().any(|s| &s.roll_no == *roll_no))
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            unknown.sort_unstable();
            return Err(ServiceError::validation(format!(
                "not enrolled in this class: {}",
                unknown.join(", ")
            )));
        }

        let records: Vec<AttendanceRecord> = roster
            .iter()
            .map(|student| {
                AttendanceRecord::new(
                    self.ctx.generate_id(),
                    student.id,
                    class.id,
                    date,
                    statuses.get(&student.roll_no).copied().unwrap_or_default(),
                    request.lectures,
                )
            })
            .collect();

        let repo = self.ctx.attendance_repo();
        let replaced = repo.delete_by_class_and_date(class.id, date).await?;
        repo.upsert_many(&records).await?;

        let day = self.day_of(&class, date, &roster).await?;
        info!(
            class_id = %class.id,
            %date,
            replaced,
            present = day.present,
            absent = day.absent,
            "Attendance marked"
        );
        Ok(day)
    }

    /// Attendance sheet of a class on one date
    #[instrument(skip(self, actor))]
    pub async fn day(
        &self,
        actor: &Actor,
        class_id: Snowflake,
        date: NaiveDate,
    ) -> ServiceResult<AttendanceDayResponse> {
        let class = AccessService::new(self.ctx)
            .class_for(actor, class_id, Actions::READ)
            .await?;
        let roster = self.ctx.enrollment_repo().list_by_class(class.id).await?;
        self.day_of(&class, date, &roster).await
    }

    /// One student's records in a class, oldest first
    #[instrument(skip(self, actor))]
    pub async fn student_records(
        &self,
        actor: &Actor,
        class_id: Snowflake,
        student_id: Snowflake,
    ) -> ServiceResult<Vec<AttendanceRecordResponse>> {
        let class = AccessService::new(self.ctx)
            .class_for(actor, class_id, Actions::READ)
            .await?;
        let student = EnrollmentService::new(self.ctx)
            .student_in(&class, student_id)
            .await?;

        let records = self
            .ctx
            .attendance_repo()
            .list_by_enrollment(student.id)
            .await?;
        Ok(records
            .iter()
            .filter(|r| r.class_id == class.id)
            .map(AttendanceRecordResponse::from)
            .collect())
    }

    /// Dates with attendance, newest first
    #[instrument(skip(self, actor))]
    pub async fn dates(&self, actor: &Actor, class_id: Snowflake) -> ServiceResult<Vec<NaiveDate>> {
        let class = AccessService::new(self.ctx)
            .class_for(actor, class_id, Actions::READ)
            .await?;
        Ok(self.ctx.attendance_repo().list_dates(class.id).await?)
    }

    async fn day_of(
        &self,
        class: &ClassRecord,
        date: NaiveDate,
        roster: &[EnrollmentRecord],
    ) -> ServiceResult<AttendanceDayResponse> {
        let records = self
            .ctx
            .attendance_repo()
            .list_by_class_and_date(class.id, date)
            .await?;
        let by_student: HashMap<Snowflake, &AttendanceRecord> =
            records.iter().map(|r| (r.enrollment_id, r)).collect();

        // Roster order; records of students removed since are not shown
        let entries: Vec<AttendanceEntry> = roster
            .iter()
            .filter_map(|student| {
                by_student.get(&student.id).map(|record| AttendanceEntry {
                    record_id: record.id,
                    student_id: student.id,
                    roll_no: student.roll_no.clone(),
                    name: student.name.clone(),
                    status: record.status,
                    lectures: record.lectures,
                })
            })
            .collect();

        let present = entries.iter().filter(|e| e.status.is_present()).count();
        Ok(AttendanceDayResponse {
            class_id: class.id,
            date,
            present,
            absent: entries.len() - present,
            entries,
        })
    }
}
