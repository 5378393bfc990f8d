//! Generic list/show/create/update/delete flows shared by every resource
//! screen.

use anyhow::{Context, Result, bail};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use serde_json::Value;
use tracing::{debug, warn};

use edupanel_api::messages::Alert;
use edupanel_shared::models::Id;
use edupanel_shared::{ListQuery, Page, Paginator};

use super::{Console, Screen};
use crate::cli::{FormArgs, ListArgs};
use crate::ui::filter::{ListState, parse_key_value};
use crate::ui::form::{self, FormValues};
use crate::ui::localized_input::prompt_localized;
use crate::ui::modal::{FormMode, PageState};
use crate::ui::{alert, paginator, table};

pub fn print_page<S: Screen>(page: &Page<S>, console: &Console) {
    alert::heading(S::TITLE);
    println!("{}", table::render(&page.data, &S::columns(), console.lang));
    println!("{}", paginator::render(&page.paginator()));
}

pub async fn list<S: Screen>(console: &Console, args: &ListArgs) -> Result<()> {
    let mut state = ListState::new(args.limit.unwrap_or(console.config.page_size));
    for (key, value) in &args.filters {
        state.set_filter(key, value);
    }
    if let Some(search) = &args.search {
        state.set_search(search);
    }
    state.go_to(args.page);

    let service = console.services.resource::<S>();
    loop {
        debug!("Loading {} page {}", S::TITLE, state.page());
        let page = service
            .list(&state.query())
            .await
            .with_context(|| format!("Failed to load {}", S::TITLE))?;
        print_page(&page, console);

        if !args.browse {
            return Ok(());
        }
        if !browse_step(&mut state, &page.paginator())? {
            return Ok(());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BrowseAction {
    Next,
    Previous,
    Jump,
    Filter,
    Search,
    ClearFilters,
    Quit,
}

impl BrowseAction {
    fn label(self) -> &'static str {
        match self {
            BrowseAction::Next => "Next page",
            BrowseAction::Previous => "Previous page",
            BrowseAction::Jump => "Go to page…",
            BrowseAction::Filter => "Add filter (key=value)…",
            BrowseAction::Search => "Search…",
            BrowseAction::ClearFilters => "Clear filters",
            BrowseAction::Quit => "Quit",
        }
    }
}

/// Only actions that make sense for the current page are offered.
fn browse_actions(p: &Paginator, state: &ListState) -> Vec<BrowseAction> {
    let mut actions = Vec::new();
    if p.has_next() {
        actions.push(BrowseAction::Next);
    }
    if p.has_previous() {
        actions.push(BrowseAction::Previous);
    }
    if p.total_pages() > 1 {
        actions.push(BrowseAction::Jump);
    }
    actions.push(BrowseAction::Filter);
    actions.push(BrowseAction::Search);
    if !state.filters().is_empty() {
        actions.push(BrowseAction::ClearFilters);
    }
    actions.push(BrowseAction::Quit);
    actions
}

/// Applies one operator choice to `state`; `false` means quit.
fn browse_step(state: &mut ListState, p: &Paginator) -> Result<bool> {
    let theme = ColorfulTheme::default();
    let actions = browse_actions(p, state);
    let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
    let picked = Select::with_theme(&theme).items(&labels).default(0).interact()?;

    match actions[picked] {
        BrowseAction::Next => state.go_to(p.current_page() + 1),
        BrowseAction::Previous => state.go_to(p.current_page().saturating_sub(1)),
        BrowseAction::Jump => {
            let last = p.total_pages();
            let page: u32 = Input::with_theme(&theme)
                .with_prompt(format!("Page (1-{})", last))
                .validate_with(|n: &u32| -> Result<(), String> {
                    if (1..=last).contains(n) {
                        Ok(())
                    } else {
                        Err(format!("pick a page between 1 and {}", last))
                    }
                })
                .interact_text()?;
            state.go_to(page);
        }
        BrowseAction::Filter => {
            let raw: String = Input::with_theme(&theme)
                .with_prompt("Filter (empty value removes it)")
                .validate_with(|raw: &String| parse_key_value(raw).map(|_| ()))
                .interact_text()?;
            let (key, value) = parse_key_value(&raw).map_err(anyhow::Error::msg)?;
            state.set_filter(&key, &value);
        }
        BrowseAction::Search => {
            let current = state.filters().get("search").cloned().unwrap_or_default();
            let text: String = Input::with_theme(&theme)
                .with_prompt("Search")
                .with_initial_text(current)
                .allow_empty(true)
                .interact_text()?;
            state.set_search(&text);
        }
        BrowseAction::ClearFilters => state.clear_filters(),
        BrowseAction::Quit => return Ok(false),
    }
    Ok(true)
}

pub async fn show<S: Screen>(console: &Console, id: Id) -> Result<()> {
    let item = console
        .services
        .resource::<S>()
        .get(id)
        .await
        .with_context(|| format!("Failed to load {} #{}", S::TITLE, id))?;
    println!("{}", serde_json::to_string_pretty(&item)?);
    Ok(())
}

pub async fn create<S: Screen>(console: &Console, args: &FormArgs) -> Result<()> {
    let saved = submit::<S>(console, FormMode::Create, args).await?;
    alert::success(&format!("{} #{}", Alert::Saved.text(console.lang), saved.id()));
    reload::<S>(console).await;
    Ok(())
}

pub async fn update<S: Screen>(console: &Console, id: Id, args: &FormArgs) -> Result<()> {
    let saved = submit::<S>(console, FormMode::Edit(id), args).await?;
    alert::success(&format!("{} #{}", Alert::Saved.text(console.lang), saved.id()));
    reload::<S>(console).await;
    Ok(())
}

pub async fn delete<S: Screen>(console: &Console, id: Id, yes: bool) -> Result<()> {
    let state = PageState::Idle.request_delete(id)?;
    let confirmed = yes || confirm(&format!("Delete {} #{}?", S::TITLE, id))?;
    let outcome = if confirmed {
        Some(console.services.resource::<S>().delete(id).await)
    } else {
        None
    };
    let state = state.resolve_delete()?;
    debug!("{} screen is {}", S::TITLE, state);

    match outcome {
        None => alert::info("Nothing deleted"),
        Some(result) => {
            result.with_context(|| format!("Failed to delete {} #{}", S::TITLE, id))?;
            alert::notify(Alert::Deleted, console.lang);
            reload::<S>(console).await;
        }
    }
    Ok(())
}

pub fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

/// Opens the form, validates it and sends it. Validation failures close the
/// form without sending anything.
async fn submit<S: Screen>(console: &Console, mode: FormMode, args: &FormArgs) -> Result<S> {
    let state = PageState::Idle.open(mode)?;
    let values = match collect_form::<S>(console, mode, args).await {
        Ok(values) => values,
        Err(e) => {
            state.close()?;
            return Err(e);
        }
    };

    let state = state.submit()?;
    let body = Value::Object(values);
    let service = console.services.resource::<S>();
    let result = match mode {
        FormMode::Create => service.create(&body).await,
        FormMode::Edit(id) => service.update(id, &body).await,
    };
    let state = state.finish()?;
    debug!("{} screen is {}", S::TITLE, state);

    result.with_context(|| match mode {
        FormMode::Create => format!("Failed to create {}", S::TITLE),
        FormMode::Edit(id) => format!("Failed to update {} #{}", S::TITLE, id),
    })
}

async fn collect_form<S: Screen>(console: &Console, mode: FormMode, args: &FormArgs) -> Result<FormValues> {
    let mut values = match &args.file {
        Some(path) => form::load_file(path)?,
        None => FormValues::new(),
    };
    for (key, raw) in &args.set {
        form::set_field(&mut values, key, raw, S::TYPED_FIELDS)?;
    }
    for (key, raw) in &args.set_json {
        form::set_json(&mut values, key, raw)?;
    }

    if args.interactive {
        let current = match mode {
            FormMode::Edit(id) => {
                let item = console.services.resource::<S>().get(id).await?;
                serde_json::to_value(&item)?.as_object().cloned().unwrap_or_default()
            }
            FormMode::Create => FormValues::new(),
        };
        for field in S::LOCALIZED_FIELDS {
            let seed = if values.contains_key(*field) {
                form::localized(&values, field)
            } else {
                form::localized(&current, field)
            };
            let value = prompt_localized(field, &seed)?;
            form::set_localized(&mut values, field, &value)?;
        }
    }

    let creating = mode == FormMode::Create;
    if !creating && values.is_empty() {
        bail!("nothing to update: pass --file, --set, --set-json or --interactive");
    }
    form::check_localized(&values, S::LOCALIZED_FIELDS, creating)?;
    S::validate_form(&values, creating)?;
    Ok(values)
}

/// Shows the first page again after a change. Failures are only logged.
pub async fn reload<S: Screen>(console: &Console) {
    let query = ListQuery::new(1, console.config.page_size);
    match console.services.resource::<S>().list(&query).await {
        Ok(page) => print_page(&page, console),
        Err(e) => warn!("Failed to reload {}: {}", S::TITLE, e),
    }
}
