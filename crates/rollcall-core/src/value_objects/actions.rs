//! Action flags checked by the access policy

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Operations an actor may request against a resource
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Actions: u32 {
        /// View a class, its roster, attendance, and reports
        const READ                = 1 << 0;
        /// Edit class details
        const UPDATE_CLASS        = 1 << 1;
        /// Add students to the roster
        const UPDATE_ROSTER       = 1 << 2;
        /// Bulk-mark attendance for a date
        const MARK_ATTENDANCE     = 1 << 3;
        /// Remove students from the roster
        const DELETE_STUDENTS     = 1 << 4;
        /// Delete the class or toggle its active flag
        const DELETE_CLASS        = 1 << 5;
        /// Attach oneself to a class as co-teacher
        const JOIN_CLASS          = 1 << 6;
        /// Enroll oneself through the public registration form
        const SELF_ENROLL         = 1 << 7;
        /// Read one's own attendance by roll number
        const READ_OWN_ATTENDANCE = 1 << 8;
        /// Create a new class
        const CREATE_CLASS        = 1 << 9;
        /// Provision, list, and deactivate accounts
        const MANAGE_ACCOUNTS     = 1 << 10;

        /// Everything a member of a class's teacher set may do
        const CLASS_TEACHER = Self::READ.bits()
            | Self::UPDATE_CLASS.bits()
            | Self::UPDATE_ROSTER.bits()
            | Self::MARK_ATTENDANCE.bits()
            | Self::DELETE_STUDENTS.bits();
    }
}

impl Actions {
    /// Names of the individual flags that are set
    pub fn list(&self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }
}

impl Default for Actions {
    fn default() -> Self {
        Actions::empty()
    }
}

impl fmt::Display for Actions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.list().join("|"))
    }
}
