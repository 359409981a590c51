//! Class registry service
//!
//! Class creation with unique join codes, joining by code, listing, updates,
//! and cascading deletion.

use chrono::Utc;
use rollcall_core::entities::ClassRecord;
use rollcall_core::{Actions, Actor, DomainError, JoinCode, Snowflake};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{
    ClassResponse, CreateClassRequest, JoinClassRequest, JoinClassResponse, UpdateClassRequest,
};

use super::access::{AccessScope, AccessService, Resource};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Attempts at drawing an unused join code before giving up
const MAX_CODE_ATTEMPTS: usize = 16;

/// Trim a required text field, rejecting blanks
fn required(field: &str, value: &str) -> ServiceResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ServiceError::validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

/// Class registry service
pub struct ClassService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ClassService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a class; the creator joins its teacher set
    #[instrument(skip(self, actor, request), fields(name = %request.name))]
    pub async fn create_class(
        &self,
        actor: &Actor,
        request: CreateClassRequest,
    ) -> ServiceResult<ClassResponse> {
        AccessService::enforce(actor, Resource::System, Actions::CREATE_CLASS)?;
        let creator = actor.account_id().ok_or(DomainError::Unauthenticated)?;
        request.validate()?;

        let name = required("name", &request.name)?;
        let room = required("room", &request.room)?;
        let subject = required("subject", &request.subject)?;
        let description = request
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let repo = self.ctx.class_repo();
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = JoinCode::generate();
            if repo.code_exists(&code).await? {
                continue;
            }

            let class = ClassRecord::new(
                self.ctx.generate_id(),
                name.clone(),
                room.clone(),
                subject.clone(),
                creator,
                code,
            )
            .with_description(description.clone());

            match repo.create(&class).await {
                Ok(()) => {
                    info!(class_id = %class.id, code = %class.class_code, "Class created");
                    return Ok(ClassResponse::from(&class));
                }
                // Lost a race for the code
                Err(DomainError::JoinCodeExists) => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(ServiceError::internal("could not allocate a unique class code"))
    }

    /// Add the calling teacher to a class by its join code.
    ///
    /// Unknown, malformed, and inactive codes are all `NotFound`. Joining a
    /// class twice succeeds with a warning.
    #[instrument(skip(self, actor, request))]
    pub async fn join_by_code(
        &self,
        actor: &Actor,
        request: JoinClassRequest,
    ) -> ServiceResult<JoinClassResponse> {
        let teacher_id = actor.account_id().ok_or(DomainError::Unauthenticated)?;
        let code = JoinCode::parse(&request.code).map_err(|_| ServiceError::not_found("Class"))?;

        let repo = self.ctx.class_repo();
        let mut class = repo
            .find_by_code(&code)
            .await?
            .ok_or_else(|| ServiceError::not_found("Class"))?;
        AccessService::enforce(actor, Resource::Class(&class), Actions::JOIN_CLASS)?;

        if class.has_teacher(teacher_id) {
            warn!(class_id = %class.id, teacher_id = %teacher_id, "Teacher already in class");
            return Ok(JoinClassResponse {
                class: ClassResponse::from(&class),
                already_member: true,
                warning: Some("You are already a teacher of this class".to_string()),
            });
        }

        repo.add_teacher(class.id, teacher_id).await?;
        class.add_teacher(teacher_id);
        info!(class_id = %class.id, teacher_id = %teacher_id, "Teacher joined class");

        Ok(JoinClassResponse {
            class: ClassResponse::from(&class),
            already_member: false,
            warning: None,
        })
    }

    /// Classes visible to the actor, newest first
    #[instrument(skip(self, actor))]
    pub async fn list_classes(&self, actor: &Actor) -> ServiceResult<Vec<ClassResponse>> {
        let repo = self.ctx.class_repo();
        let classes = match AccessScope::for_actor(actor) {
            AccessScope::All => repo.list().await?,
            AccessScope::TeacherOf(id) => repo
                .list_by_teacher(id)
                .await?
                .into_iter()
                .filter(|c| c.active)
                .collect(),
            AccessScope::None => Vec::new(),
        };
        Ok(classes.iter().map(ClassResponse::from).collect())
    }

    #[instrument(skip(self, actor))]
    pub async fn get_class(
        &self,
        actor: &Actor,
        class_id: Snowflake,
    ) -> ServiceResult<ClassResponse> {
        let class = AccessService::new(self.ctx)
            .class_for(actor, class_id, Actions::READ)
            .await?;
        Ok(ClassResponse::from(class))
    }

    /// Update details; the join code and creator never change.
    ///
    /// Toggling `active` hides the class like a delete, so it needs the
    /// creator or an admin.
    #[instrument(skip(self, actor, request))]
    pub async fn update_class(
        &self,
        actor: &Actor,
        class_id: Snowflake,
        request: UpdateClassRequest,
    ) -> ServiceResult<ClassResponse> {
        request.validate()?;
        let mut required_actions = Actions::UPDATE_CLASS;
        if request.active.is_some() {
            required_actions |= Actions::DELETE_CLASS;
        }
        let mut class = AccessService::new(self.ctx)
            .class_for(actor, class_id, required_actions)
            .await?;

        let mut changed = false;
        if let Some(name) = request.name {
            class.name = required("name", &name)?;
            changed = true;
        }
        if let Some(room) = request.room {
            class.room = required("room", &room)?;
            changed = true;
        }
        if let Some(subject) = request.subject {
            class.subject = required("subject", &subject)?;
            changed = true;
        }
        if let Some(description) = request.description {
            let description = description.trim().to_string();
            class.description = (!description.is_empty()).then_some(description);
            changed = true;
        }
        if let Some(active) = request.active {
            class.active = active;
            changed = true;
        }

        if changed {
            class.updated_at = Utc::now();
            self.ctx.class_repo().update(&class).await?;
            info!(class_id = %class_id, "Class updated");
        }

        Ok(ClassResponse::from(class))
    }

    /// Delete a class with its attendance and enrollments
    #[instrument(skip(self, actor))]
    pub async fn delete_class(&self, actor: &Actor, class_id: Snowflake) -> ServiceResult<()> {
        let class = AccessService::new(self.ctx)
            .class_for(actor, class_id, Actions::DELETE_CLASS)
            .await?;

        let attendance = self.ctx.attendance_repo().delete_by_class(class.id).await?;
        let enrollments = self.ctx.enrollment_repo().delete_by_class(class.id).await?;
        let stripped = self.ctx.enrollment_repo().strip_class(class.id).await?;
        self.ctx.class_repo().delete(class.id).await?;

        info!(
            class_id = %class.id,
            attendance,
            enrollments,
            stripped,
            "Class deleted"
        );
        Ok(())
    }
}
