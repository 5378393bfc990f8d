use anyhow::{Context, Result};
use chrono::Local;
use console::style;
use tracing::debug;

use edupanel_api::messages::Alert;
use edupanel_api::workflows::grant::{GrantContext, GrantWorkflow};
use edupanel_shared::ListQuery;
use edupanel_shared::models::{Course, CoursePermission, Id, Tariff};
use edupanel_shared::permission::GrantInput;

use super::crud::{confirm, print_page};
use super::{Console, Screen};
use crate::ui::alert;
use crate::ui::filter::ListState;
use crate::ui::modal::PageState;
use crate::ui::table::{Column, or_dash};

/// Page size used to pull the full course and tariff catalogs.
const CATALOG_LIMIT: u32 = 100;

fn access_status(p: &CoursePermission) -> String {
    if p.is_active_at(Local::now().naive_local()) {
        style("active").green().to_string()
    } else {
        style("expired").dim().to_string()
    }
}

impl Screen for CoursePermission {
    const TITLE: &'static str = "Course permissions";

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", |p: &CoursePermission, _| p.id.to_string()),
            Column::new("User", |p: &CoursePermission, _| p.user_id.to_string()),
            Column::new("Course", |p: &CoursePermission, _| p.course_id.to_string()),
            Column::new("Tariff", |p: &CoursePermission, _| or_dash(p.tariff_id)),
            Column::new("Starts", |p: &CoursePermission, _| p.started_at.to_string()),
            Column::new("Ends", |p: &CoursePermission, _| p.ended_at.to_string()),
            Column::new("Access", |p: &CoursePermission, _| access_status(p)),
        ]
    }
}

pub async fn list(
    console: &Console,
    user_id: Option<Id>,
    course_id: Option<Id>,
    page: u32,
    limit: Option<u32>,
) -> Result<()> {
    let mut state = ListState::new(limit.unwrap_or(console.config.page_size));
    if let Some(user_id) = user_id {
        state.set_filter("user_id", &user_id.to_string());
    }
    if let Some(course_id) = course_id {
        state.set_filter("course_id", &course_id.to_string());
    }
    state.go_to(page);

    let page = console
        .services
        .permissions
        .list(&state.query())
        .await
        .context("Failed to load course permissions")?;
    print_page(&page, console);
    Ok(())
}

pub async fn grant(console: &Console, input: GrantInput) -> Result<()> {
    let catalog = ListQuery::new(1, CATALOG_LIMIT);
    let courses = console
        .services
        .resource::<Course>()
        .list_all(&catalog)
        .await
        .context("Failed to load courses")?;
    let tariffs = console
        .services
        .resource::<Tariff>()
        .list_all(&catalog)
        .await
        .context("Failed to load tariffs")?;
    let loaded = console
        .services
        .permissions
        .list(&ListQuery::new(1, console.config.page_size))
        .await
        .context("Failed to load course permissions")?;
    debug!(
        "Grant context: {} courses, {} tariffs, {} loaded permissions",
        courses.len(),
        tariffs.len(),
        loaded.data.len()
    );

    let ctx = GrantContext {
        courses: &courses,
        tariffs: &tariffs,
        loaded: &loaded.data,
        page_limit: console.config.page_size,
    };
    let workflow = GrantWorkflow::new(console.services.permissions.clone());
    let outcome = workflow.run(ctx, input, Local::now().naive_local()).await?;

    alert::notify(Alert::PermissionGranted, console.lang);
    alert::info(&format!(
        "user #{} → course #{}: {} .. {}",
        outcome.request.user_id, outcome.request.course_id, outcome.request.started_at, outcome.request.ended_at
    ));
    if let Some(page) = outcome.reloaded {
        print_page(&page, console);
    }
    Ok(())
}

pub async fn revoke(console: &Console, id: Id, yes: bool) -> Result<()> {
    let state = PageState::Idle.request_delete(id)?;
    let confirmed = yes || confirm(&format!("Revoke course permission #{}?", id))?;
    let outcome = if confirmed {
        Some(console.services.permissions.revoke(id).await)
    } else {
        None
    };
    state.resolve_delete()?;

    match outcome {
        None => alert::info("Nothing revoked"),
        Some(result) => {
            result.with_context(|| format!("Failed to revoke course permission #{}", id))?;
            alert::notify(Alert::Deleted, console.lang);
            super::crud::reload::<CoursePermission>(console).await;
        }
    }
    Ok(())
}
