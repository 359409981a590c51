//! Access policy
//!
//! [`decide`] is a pure function of (actor, resource, action). Services call
//! it through [`AccessService`], which loads the class first so that a missing
//! class and a class the actor may not see produce the same `NotFound`.

use rollcall_core::entities::ClassRecord;
use rollcall_core::{Actions, Actor, DomainError, Role, Snowflake};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// What an action is performed on
#[derive(Debug, Clone, Copy)]
pub enum Resource<'r> {
    /// Account management and class creation
    System,
    Class(&'r ClassRecord),
    /// Attendance of every enrollment sharing a roll number
    Roll(&'r str),
}

impl Resource<'_> {
    fn name(&self) -> &'static str {
        match self {
            Self::System => "Resource",
            Self::Class(_) => "Class",
            Self::Roll(_) => "Student",
        }
    }
}

/// Why an action was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// Hide the resource entirely
    NotFound,
    /// The caller already knows the resource exists
    AccessDenied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Denial),
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Map a denial onto the error returned to the caller
    pub fn into_result(self, resource: &Resource<'_>) -> Result<(), DomainError> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(Denial::NotFound) => Err(DomainError::NotFound(resource.name())),
            Self::Deny(Denial::AccessDenied) => Err(DomainError::AccessDenied),
        }
    }
}

/// Classes an actor can list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessScope {
    All,
    /// Active classes whose teacher set contains this account
    TeacherOf(Snowflake),
    None,
}

impl AccessScope {
    pub fn for_actor(actor: &Actor) -> Self {
        match actor {
            Actor::Account { role: Role::Admin, .. } => Self::All,
            Actor::Account { id, role: Role::Teacher } => Self::TeacherOf(*id),
            _ => Self::None,
        }
    }
}

/// System-level actions each role may perform
fn system_actions(role: Role) -> Actions {
    match role {
        Role::Admin => Actions::all(),
        Role::Teacher => Actions::CREATE_CLASS,
        Role::Student => Actions::empty(),
    }
}

/// Decide whether `actor` may perform every action in `action` on `resource`
pub fn decide(actor: &Actor, resource: Resource<'_>, action: Actions) -> Decision {
    use Decision::{Allow, Deny};

    if actor.is_admin() {
        return Allow;
    }

    match resource {
        Resource::System => match actor.role() {
            Some(role) if system_actions(role).contains(action) => Allow,
            _ => Deny(Denial::AccessDenied),
        },

        Resource::Class(class) => {
            if !class.active {
                return Deny(Denial::NotFound);
            }
            if action == Actions::SELF_ENROLL {
                return Allow;
            }
            let Actor::Account { id, role } = actor else {
                return Deny(Denial::NotFound);
            };
            if action == Actions::JOIN_CLASS && role.can_teach() {
                return Allow;
            }
            if *role != Role::Teacher || !class.has_teacher(*id) {
                return Deny(Denial::NotFound);
            }

            let mut granted = Actions::CLASS_TEACHER;
            if class.is_creator(*id) {
                granted |= Actions::DELETE_CLASS;
            }
            if granted.contains(action) {
                Allow
            } else {
                Deny(Denial::AccessDenied)
            }
        }

        Resource::Roll(roll_no) => match actor {
            Actor::RollNumber(own) if own == roll_no && action == Actions::READ_OWN_ATTENDANCE => {
                Allow
            }
            _ => Deny(Denial::NotFound),
        },
    }
}

/// Enforces [`decide`] against stored records
pub struct AccessService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccessService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Fail unless the decision allows the action
    pub fn enforce(actor: &Actor, resource: Resource<'_>, action: Actions) -> ServiceResult<()> {
        let decision = decide(actor, resource, action);
        if !decision.is_allowed() {
            debug!(?actor, %action, ?decision, "Access refused");
        }
        decision.into_result(&resource).map_err(ServiceError::from)
    }

    /// Load a class the actor may perform `action` on
    #[instrument(skip(self, actor))]
    pub async fn class_for(
        &self,
        actor: &Actor,
        class_id: Snowflake,
        action: Actions,
    ) -> ServiceResult<ClassRecord> {
        let class = self
            .ctx
            .class_repo()
            .find_by_id(class_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Class"))?;

        Self::enforce(actor, Resource::Class(&class), action)?;
        Ok(class)
    }
}
