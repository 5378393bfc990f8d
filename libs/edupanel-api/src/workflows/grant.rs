use chrono::NaiveDateTime;
use tracing::{info, warn};

use edupanel_shared::Lang;
use edupanel_shared::models::{Course, CoursePermission, NewCoursePermission, Tariff};
use edupanel_shared::permission::{self, GrantInput, GrantRejection};
use edupanel_shared::{ListQuery, Page};

use crate::error::ApiError;
use crate::messages::{Alert, recognize_backend_message};
use crate::services::PermissionService;

#[derive(Debug, thiserror::Error)]
pub enum GrantError {
    #[error(transparent)]
    Rejected(#[from] GrantRejection),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl GrantError {
    pub fn alert(&self) -> Option<Alert> {
        match self {
            GrantError::Rejected(rejection) => Some(match rejection {
                GrantRejection::CourseNotFound(_) => Alert::CourseNotFound,
                GrantRejection::TariffNotFound(_) => Alert::TariffNotFound,
                GrantRejection::NoMatchingPriceOption { .. } => Alert::NoPriceOption,
                GrantRejection::InvalidDuration(_) => Alert::InvalidDuration,
                GrantRejection::AlreadyActive { .. } => Alert::AlreadyActive,
            }),
            GrantError::Api(ApiError::Unauthorized) => Some(Alert::SessionExpired),
            GrantError::Api(e) => e.backend_message().and_then(recognize_backend_message),
        }
    }

    /// Text shown to the operator: a translated alert when the failure is
    /// known, otherwise the raw backend message.
    pub fn localized(&self, lang: Lang) -> String {
        match (self.alert(), self) {
            (Some(alert), _) => alert.text(lang).to_string(),
            (None, GrantError::Api(e)) => e.backend_message().map(str::to_string).unwrap_or_else(|| e.to_string()),
            (None, e) => e.to_string(),
        }
    }
}

/// What the operator currently has loaded on the permissions screen.
#[derive(Debug, Clone, Copy)]
pub struct GrantContext<'a> {
    pub courses: &'a [Course],
    pub tariffs: &'a [Tariff],
    pub loaded: &'a [CoursePermission],
    pub page_limit: u32,
}

#[derive(Debug)]
pub struct GrantOutcome {
    pub request: NewCoursePermission,
    pub permission: CoursePermission,
    /// First page of permissions after the grant; `None` if the reload failed.
    pub reloaded: Option<Page<CoursePermission>>,
}

#[derive(Clone, Debug)]
pub struct GrantWorkflow {
    permissions: PermissionService,
}

impl GrantWorkflow {
    pub fn new(permissions: PermissionService) -> Self {
        Self { permissions }
    }

    pub async fn run(
        &self,
        ctx: GrantContext<'_>,
        input: GrantInput,
        now: NaiveDateTime,
    ) -> Result<GrantOutcome, GrantError> {
        permission::resolve(ctx.courses, ctx.tariffs, input)?;
        permission::ensure_not_active(ctx.loaded, input, now)?;

        // The loaded page may not contain the user's older grants.
        let existing = self.permissions.for_user(input.user_id).await?;
        let request = permission::plan_grant(ctx.courses, ctx.tariffs, &existing, input, now)?;

        info!(
            "Granting course #{} to user #{} via tariff #{} ({} .. {})",
            request.course_id, request.user_id, request.tariff_id, request.started_at, request.ended_at
        );
        let permission = self.permissions.grant(&request).await?;

        let reloaded = match self.permissions.list(&ListQuery::new(1, ctx.page_limit)).await {
            Ok(page) => Some(page),
            Err(e) => {
                warn!("Failed to reload permissions after grant: {}", e);
                None
            }
        };

        Ok(GrantOutcome {
            request,
            permission,
            reloaded,
        })
    }
}
