//! Reporting aggregator
//!
//! Attendance is lecture-weighted: `present` sums the lectures of present
//! records and `total` sums all lectures. Day counts ride alongside.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, Utc};
use rollcall_core::entities::AttendanceRecord;
use rollcall_core::value_objects::is_defaulter;
use rollcall_core::{attendance_percentage, Actions, Actor, AttendanceBand, Snowflake};
use tracing::{debug, instrument};

use crate::dto::{ClassAttendance, ClassReportResponse, StudentReportRow, StudentSummaryResponse};

use super::access::{AccessService, Resource};
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Present and held counts over a set of records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub present: i64,
    pub total: i64,
    pub days_present: i64,
    pub days_total: i64,
}

impl Tally {
    pub fn of<'r>(records: impl IntoIterator<Item = &'r AttendanceRecord>) -> Self {
        records.into_iter().fold(Self::default(), |mut tally, record| {
            tally.present += record.attended_lectures();
            tally.total += i64::from(record.lectures);
            tally.days_total += 1;
            if record.status.is_present() {
                tally.days_present += 1;
            }
            tally
        })
    }

    pub fn percentage(&self) -> f64 {
        attendance_percentage(self.present, self.total)
    }
}

/// Reporting service
pub struct ReportService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReportService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Attendance of one roll number across every active class it is in.
    ///
    /// An unknown roll number yields an empty summary.
    #[instrument(skip(self, actor))]
    pub async fn student_summary(
        &self,
        actor: &Actor,
        roll_no: &str,
    ) -> ServiceResult<StudentSummaryResponse> {
        let roll_no = roll_no.trim();
        AccessService::enforce(actor, Resource::Roll(roll_no), Actions::READ_OWN_ATTENDANCE)?;

        let enrollments = self.ctx.enrollment_repo().list_by_roll(roll_no).await?;
        let name = enrollments.first().map(|e| e.name.clone());

        let mut classes = Vec::with_capacity(enrollments.len());
        let mut overall = Tally::default();
        for enrollment in &enrollments {
            let class = match self.ctx.class_repo().find_by_id(enrollment.class_id).await? {
                Some(class) if class.active => class,
                _ => {
                    debug!(class_id = %enrollment.class_id, "Skipping unavailable class");
                    continue;
                }
            };

            let records = self
                .ctx
                .attendance_repo()
                .list_by_enrollment(enrollment.id)
                .await?;
            let tally = Tally::of(records.iter().filter(|r| r.class_id == class.id));
            overall.present += tally.present;
            overall.total += tally.total;

            let percentage = tally.percentage();
            classes.push(ClassAttendance {
                class_id: class.id,
                class_name: class.name,
                subject: class.subject,
                present: tally.present,
                total: tally.total,
                days_present: tally.days_present,
                days_total: tally.days_total,
                percentage,
                band: AttendanceBand::from_percentage(percentage),
            });
        }

        let overall_percentage = overall.percentage();
        Ok(StudentSummaryResponse {
            roll_no: roll_no.to_string(),
            name,
            classes,
            overall_present: overall.present,
            overall_total: overall.total,
            overall_percentage,
            band: AttendanceBand::from_percentage(overall_percentage),
        })
    }

    /// Per-student percentages and defaulters of a class
    #[instrument(skip(self, actor))]
    pub async fn class_summary(
        &self,
        actor: &Actor,
        class_id: Snowflake,
    ) -> ServiceResult<ClassReportResponse> {
        let class = AccessService::new(self.ctx)
            .class_for(actor, class_id, Actions::READ)
            .await?;
        let roster = self.ctx.enrollment_repo().list_by_class(class.id).await?;
        let records = self.ctx.attendance_repo().list_by_class(class.id).await?;

        // Lectures held on a date is the count entered for it
        let mut held: BTreeMap<NaiveDate, i32> = BTreeMap::new();
        let mut by_student: HashMap<Snowflake, Vec<&AttendanceRecord>> = HashMap::new();
        for record in &records {
            let lectures = held.entry(record.date).or_default();
            *lectures = (*lectures).max(record.lectures);
            by_student.entry(record.enrollment_id).or_default().push(record);
        }

        let students: Vec<StudentReportRow> = roster
            .into_iter()
            .map(|student| {
                let tally = by_student
                    .get(&student.id)
                    .map(|records| Tally::of(records.iter().copied()))
                    .unwrap_or_default();
                let percentage = tally.percentage();
                StudentReportRow {
                    student_id: student.id,
                    roll_no: student.roll_no,
                    name: student.name,
                    email: student.email,
                    present: tally.present,
                    total: tally.total,
                    days_present: tally.days_present,
                    days_total: tally.days_total,
                    percentage,
                    band: AttendanceBand::from_percentage(percentage),
                    is_defaulter: is_defaulter(percentage),
                }
            })
            .collect();

        let average_percentage = if students.is_empty() {
            0.0
        } else {
            students.iter().map(|s| s.percentage).sum::<f64>() / students.len() as f64
        };
        let defaulters = students
            .iter()
            .filter(|s| s.is_defaulter)
            .map(|s| s.roll_no.clone())
            .collect();

        Ok(ClassReportResponse {
            class_id: class.id,
            class_name: class.name,
            subject: class.subject,
            lectures_held: held.values().map(|&l| i64::from(l)).sum(),
            days_held: held.len() as i64,
            average_percentage,
            students,
            defaulters,
            generated_at: Utc::now(),
        })
    }
}
