use anyhow::Result;
use clap::Parser;
use std::process::exit;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

use edupanel_api::messages::Alert;
use edupanel_api::workflows::GrantError;
use edupanel_api::{ApiClient, ApiError, Services, SessionStore};
use edupanel_shared::Lang;
use edupanel_shared::permission::GrantInput;

mod cli;
mod config;
mod screens;
mod ui;

use cli::{Cli, Command, OrderCommand, PermissionCommand, PromoCommand};
use config::ConsoleConfig;
use screens::{Console, crud, with_screen};

const DEFAULT_LOG_FILTER: &str = "edupanel=info,edupanel_api=info";

/// Logs go to stderr so tables on stdout stay clean. With `log_dir` set, a
/// daily file gets a copy; the returned guard must outlive the program.
fn init_tracing(config: &ConsoleConfig) -> Option<WorkerGuard> {
    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into())
    };
    let stderr = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter());

    match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "edupanel.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter());
            tracing_subscriber::registry().with(stderr).with(file).init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(stderr).init();
            None
        }
    }
}

async fn run(cli: Cli, console: &Console) -> Result<()> {
    match cli.command {
        Command::Login { login, password } => screens::auth::login(console, login, password).await,
        Command::Logout => screens::auth::logout(console).await,
        Command::List { resource, args } => with_screen!(resource, S => crud::list::<S>(console, &args).await),
        Command::Show { resource, id } => with_screen!(resource, S => crud::show::<S>(console, id).await),
        Command::Create { resource, form } => with_screen!(resource, S => crud::create::<S>(console, &form).await),
        Command::Update { resource, id, form } => {
            with_screen!(resource, S => crud::update::<S>(console, id, &form).await)
        }
        Command::Delete { resource, id, yes } => with_screen!(resource, S => crud::delete::<S>(console, id, yes).await),
        Command::Upload { path } => screens::upload::upload(console, &path).await,
        Command::Permissions { command } => match command {
            PermissionCommand::List {
                user_id,
                course_id,
                page,
                limit,
            } => screens::permissions::list(console, user_id, course_id, page, limit).await,
            PermissionCommand::Grant {
                user_id,
                course_id,
                tariff_id,
            } => {
                let input = GrantInput {
                    user_id,
                    course_id,
                    tariff_id,
                };
                screens::permissions::grant(console, input).await
            }
            PermissionCommand::Revoke { id, yes } => screens::permissions::revoke(console, id, yes).await,
        },
        Command::Dashboard(args) => screens::dashboard::show(console, &args).await,
        Command::Promo {
            command: PromoCommand::Check { code },
        } => screens::sales::check(console, &code).await,
        Command::Orders {
            command: OrderCommand::Quote {
                course_id,
                tariff_id,
                promocode,
            },
        } => screens::sales::quote(console, course_id, tariff_id, promocode.as_deref()).await,
    }
}

fn is_unauthorized(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(cause.downcast_ref::<ApiError>(), Some(ApiError::Unauthorized))
            || matches!(cause.downcast_ref::<GrantError>(), Some(GrantError::Api(ApiError::Unauthorized)))
    })
}

fn report(err: &anyhow::Error, lang: Lang) {
    if is_unauthorized(err) {
        ui::alert::notify(Alert::SessionExpired, lang);
        eprintln!("Run `edupanel login` to sign in again.");
        return;
    }
    if let Some(grant) = err.downcast_ref::<GrantError>() {
        ui::alert::error(&grant.localized(lang));
        return;
    }
    ui::alert::error(&format!("{:#}", err));
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match ConsoleConfig::load() {
        Ok(config) => config,
        Err(e) => {
            ui::alert::error(&format!("Failed to load configuration: {:#}", e));
            exit(1);
        }
    };
    if let Some(api_url) = &cli.api_url {
        config.api_url = api_url.clone();
    }
    if let Some(lang) = cli.lang {
        config.language = lang;
    }

    let _log_guard = init_tracing(&config);
    tracing::debug!("Configuration loaded from {}", config.source);
    tracing::debug!("API: {}", config.api_url);

    let session = SessionStore::open(&config.session_path).await;
    let services = Services::new(ApiClient::new(config.api_url.clone(), session));
    let lang = config.language;
    let console = Console { services, config, lang };

    if let Err(e) = run(cli, &console).await {
        report(&e, lang);
        exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edupanel_shared::permission::GrantRejection;

    #[test]
    fn unauthorized_is_found_through_context() {
        let err = anyhow::Error::from(ApiError::Unauthorized).context("Failed to load Courses");
        assert!(is_unauthorized(&err));

        let err = anyhow::Error::from(GrantError::Api(ApiError::Unauthorized));
        assert!(is_unauthorized(&err));

        let err = anyhow::Error::from(GrantError::Rejected(GrantRejection::CourseNotFound(3)));
        assert!(!is_unauthorized(&err));
    }
}
