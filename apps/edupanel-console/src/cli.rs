use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use edupanel_shared::Lang;
use edupanel_shared::dashboard::TimeWindow;
use edupanel_shared::models::{Id, day};

use crate::screens::ResourceKind;
use crate::ui::filter::parse_key_value;

#[derive(Parser, Debug)]
#[command(name = "edupanel")]
#[command(about = "Admin console for the e-learning platform", long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides the config file)
    #[arg(long, global = true, env = "EDUPANEL_API_URL")]
    pub api_url: Option<String>,
    /// Interface language: uz, ru or en
    #[arg(long, global = true, value_parser = parse_lang)]
    pub lang: Option<Lang>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in as an administrator
    Login {
        #[arg(long)]
        login: Option<String>,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// List records of a resource
    List {
        resource: ResourceKind,
        #[command(flatten)]
        args: ListArgs,
    },
    /// Print one record as JSON
    Show { resource: ResourceKind, id: Id },
    /// Create a record
    Create {
        resource: ResourceKind,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Update a record
    Update {
        resource: ResourceKind,
        id: Id,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Delete a record
    Delete {
        resource: ResourceKind,
        id: Id,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Upload a file and print its URL
    Upload { path: PathBuf },
    /// Course access of users
    Permissions {
        #[command(subcommand)]
        command: PermissionCommand,
    },
    /// Aggregate statistics for a time window
    Dashboard(DashboardArgs),
    /// Promocode tools
    Promo {
        #[command(subcommand)]
        command: PromoCommand,
    },
    /// Order tools
    Orders {
        #[command(subcommand)]
        command: OrderCommand,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Page size (defaults to the configured page_size)
    #[arg(long)]
    pub limit: Option<u32>,
    /// Filter as key=value; repeatable
    #[arg(long = "filter", value_parser = parse_key_value)]
    pub filters: Vec<(String, String)>,
    #[arg(long)]
    pub search: Option<String>,
    /// Page through results interactively
    #[arg(long)]
    pub browse: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FormArgs {
    /// JSON object with the record fields
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Field assignment such as name.uz=Fizika or duration=3; repeatable
    #[arg(long = "set", value_parser = parse_key_value)]
    pub set: Vec<(String, String)>,
    /// Field assignment whose value is raw JSON, e.g. price='[{"duration":1,"price":90000}]'
    #[arg(long = "set-json", value_parser = parse_key_value)]
    pub set_json: Vec<(String, String)>,
    /// Prompt for multilingual fields
    #[arg(long, short)]
    pub interactive: bool,
}

#[derive(Subcommand, Debug)]
pub enum PermissionCommand {
    /// List granted permissions
    List {
        #[arg(long)]
        user_id: Option<Id>,
        #[arg(long)]
        course_id: Option<Id>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Give a user access to a course for a tariff's duration
    Grant {
        #[arg(long)]
        user_id: Id,
        #[arg(long)]
        course_id: Id,
        #[arg(long)]
        tariff_id: Id,
    },
    /// Remove a permission
    Revoke {
        id: Id,
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct DashboardArgs {
    /// day, week, month, year, range or all
    #[arg(long, default_value = "month", value_parser = parse_window)]
    pub window: TimeWindow,
    /// Day the window ends on (defaults to today)
    #[arg(long, value_parser = parse_day)]
    pub day: Option<NaiveDate>,
    /// Range start, for --window range
    #[arg(long, value_parser = parse_day)]
    pub from: Option<NaiveDate>,
    /// Range end, for --window range
    #[arg(long, value_parser = parse_day)]
    pub to: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum PromoCommand {
    /// Show whether a promocode can be used today
    Check { code: String },
}

#[derive(Subcommand, Debug)]
pub enum OrderCommand {
    /// Price a course purchase, optionally with a promocode
    Quote {
        #[arg(long)]
        course_id: Id,
        #[arg(long)]
        tariff_id: Id,
        #[arg(long)]
        promocode: Option<String>,
    },
}

fn parse_lang(raw: &str) -> Result<Lang, String> {
    raw.parse().map_err(|e: edupanel_shared::localized::LocalizedError| e.to_string())
}

fn parse_window(raw: &str) -> Result<TimeWindow, String> {
    raw.parse().map_err(|e: edupanel_shared::dashboard::WindowError| e.to_string())
}

fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    day::parse(raw).ok_or_else(|| format!("expected a date like 2026-01-31, got '{}'", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_list_with_filters() {
        let cli = Cli::try_parse_from([
            "edupanel", "list", "course", "--filter", "subject_id=2", "--search", "fizika", "--page", "3", "--lang", "ru",
        ])
        .unwrap();
        assert_eq!(cli.lang, Some(Lang::Ru));
        match cli.command {
            Command::List { resource, args } => {
                assert_eq!(resource, ResourceKind::Course);
                assert_eq!(args.filters, vec![("subject_id".to_string(), "2".to_string())]);
                assert_eq!(args.search.as_deref(), Some("fizika"));
                assert_eq!(args.page, 3);
                assert!(!args.browse);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn parses_text_and_json_assignments() {
        let cli = Cli::try_parse_from([
            "edupanel", "create", "promocode", "--set", "code=2026", "--set-json", "max_uses=50",
        ])
        .unwrap();
        match cli.command {
            Command::Create { resource, form } => {
                assert_eq!(resource, ResourceKind::Promocode);
                assert_eq!(form.set, vec![("code".to_string(), "2026".to_string())]);
                assert_eq!(form.set_json, vec![("max_uses".to_string(), "50".to_string())]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn parses_grant() {
        let cli = Cli::try_parse_from([
            "edupanel", "permissions", "grant", "--user-id", "7", "--course-id", "3", "--tariff-id", "2",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Permissions {
                command: PermissionCommand::Grant { user_id: 7, course_id: 3, tariff_id: 2 }
            }
        ));
    }

    #[test]
    fn parses_dashboard_window() {
        let cli = Cli::try_parse_from(["edupanel", "dashboard", "--window", "range", "--from", "2026-01-01", "--to", "2026-01-31"])
            .unwrap();
        let Command::Dashboard(args) = cli.command else {
            panic!("expected dashboard");
        };
        assert_eq!(args.window, TimeWindow::Range);
        assert_eq!(args.from, NaiveDate::from_ymd_opt(2026, 1, 1));

        assert!(Cli::try_parse_from(["edupanel", "dashboard", "--window", "decade"]).is_err());
        assert!(Cli::try_parse_from(["edupanel", "dashboard", "--day", "31/01/2026"]).is_err());
    }

    #[test]
    fn promocode_resource_name() {
        let cli = Cli::try_parse_from(["edupanel", "delete", "promocode", "4", "--yes"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Delete { resource: ResourceKind::Promocode, id: 4, yes: true }
        ));
    }
}
