//! Conversions from domain entities to response DTOs

use rollcall_core::entities::{Account, AttendanceRecord, ClassRecord, EnrollmentRecord};

use super::responses::{AccountResponse, AttendanceRecordResponse, ClassResponse, StudentResponse};

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            full_name: account.full_name.clone(),
            role: account.role,
            active: account.active,
            last_login: account.last_login,
            created_at: account.created_at,
        }
    }
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self::from(&account)
    }
}

impl From<&ClassRecord> for ClassResponse {
    fn from(class: &ClassRecord) -> Self {
        Self {
            id: class.id,
            name: class.name.clone(),
            room: class.room.clone(),
            subject: class.subject.clone(),
            description: class.description.clone(),
            created_by: class.created_by,
            teacher_ids: class.teacher_ids.clone(),
            class_code: class.class_code.to_string(),
            active: class.active,
            created_at: class.created_at,
            updated_at: class.updated_at,
        }
    }
}

impl From<ClassRecord> for ClassResponse {
    fn from(class: ClassRecord) -> Self {
        Self::from(&class)
    }
}

impl From<EnrollmentRecord> for StudentResponse {
    fn from(student: EnrollmentRecord) -> Self {
        Self {
            id: student.id,
            name: student.name,
            roll_no: student.roll_no,
            email: student.email,
            phone: student.phone,
            class_id: student.class_id,
            class_ids: student.class_ids,
            created_at: student.created_at,
        }
    }
}

impl From<&AttendanceRecord> for AttendanceRecordResponse {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            id: record.id,
            enrollment_id: record.enrollment_id,
            class_id: record.class_id,
            date: record.date,
            status: record.status,
            lectures: record.lectures,
        }
    }
}
