//! Command-line interface for the portal.
//!
//! This module provides the CLI structure for the `portalctl` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AlbumArg, CategoryArg, CityNewsCommand, CityStatusCommand, ConfigCommand, LoginCommand,
    MetroNetworkCommand, NewsCommand, OutputFormat, PeopleCommand, PhotosAction, PhotosCommand,
    ProjectsCommand, RequestsCommand, SettingsCommand, ShowCommand, StoreCommand, UnitsCommand,
};

/// portalctl - Manage the ЦК КПСС state portal
///
/// Reads and edits the portal's persisted content: people, news, role
/// requests, construction, the army, the metro and the city of Lubertsy.
#[derive(Debug, Parser)]
#[command(name = "portalctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a page inside the site frame
    Show(ShowCommand),

    /// Log in as administrator
    Login(LoginCommand),

    /// End the administrator session
    Logout,

    /// Show whether an administrator is logged in
    Whoami,

    /// Manage people
    #[command(subcommand)]
    People(PeopleCommand),

    /// Manage state news
    #[command(subcommand)]
    News(NewsCommand),

    /// Submit and decide role requests
    #[command(subcommand)]
    Requests(RequestsCommand),

    /// Manage construction projects
    #[command(subcommand)]
    Projects(ProjectsCommand),

    /// Manage army units
    #[command(subcommand)]
    Units(UnitsCommand),

    /// Manage Lubertsy city news
    #[command(subcommand)]
    CityNews(CityNewsCommand),

    /// Set Lubertsy construction status, progress and start date
    CityStatus(CityStatusCommand),

    /// Set metro stations and lines
    MetroNetwork(MetroNetworkCommand),

    /// Manage photo albums
    Photos(PhotosCommand),

    /// Read or change scalar settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Seed, reset, export, import or inspect the store
    #[command(subcommand)]
    Store(StoreCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Whoami,
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "portalctl");
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(3, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_show_defaults_to_home() {
        let cli = Cli::try_parse_from(["portalctl", "show"]).unwrap();
        match cli.command {
            Command::Show(show) => {
                assert_eq!(show.path, "/");
                assert!(show.category.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_show_news_with_category() {
        let cli =
            Cli::try_parse_from(["portalctl", "show", "/news", "--category", "culture"]).unwrap();
        match cli.command {
            Command::Show(show) => {
                assert_eq!(show.path, "/news");
                assert_eq!(show.category, Some(CategoryArg::Culture));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_login() {
        let cli = Cli::try_parse_from(["portalctl", "login", "admin", "cpsu1922"]).unwrap();
        match cli.command {
            Command::Login(login) => {
                assert_eq!(login.username, "admin");
                assert_eq!(login.password, "cpsu1922");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_people_add() {
        let cli = Cli::try_parse_from([
            "portalctl",
            "people",
            "add",
            "Пётр",
            "Гражданин",
            "-d",
            "Новый гражданин",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::People(PeopleCommand::Add { ref name, ref description, .. })
                if name == "Пётр" && description == "Новый гражданин"
        ));
    }

    #[test]
    fn test_parse_news_add_default_category() {
        let cli = Cli::try_parse_from(["portalctl", "news", "add", "Заголовок", "Текст"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::News(NewsCommand::Add {
                category: CategoryArg::Politics,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_photos_requires_album() {
        assert!(Cli::try_parse_from(["portalctl", "photos", "list"]).is_err());

        let cli = Cli::try_parse_from([
            "portalctl",
            "photos",
            "--album",
            "metro",
            "add",
            "https://img.example/a.png",
        ])
        .unwrap();
        match cli.command {
            Command::Photos(photos) => {
                assert_eq!(photos.album, AlbumArg::Metro);
                assert!(matches!(photos.action, PhotosAction::Add { .. }));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_projects_progress() {
        let cli = Cli::try_parse_from(["portalctl", "projects", "add", "Школа", "-p", "40"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Command::Projects(ProjectsCommand::Add { progress: 40, .. })
        ));
        assert!(Cli::try_parse_from(["portalctl", "projects", "add", "Школа", "-p", "400"]).is_err());
    }

    #[test]
    fn test_parse_city_news_kebab_case() {
        let cli = Cli::try_parse_from(["portalctl", "city-news", "list"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::CityNews(CityNewsCommand::List { .. })
        ));
    }

    #[test]
    fn test_parse_city_status() {
        let cli = Cli::try_parse_from(["portalctl", "city-status", "завершено", "100", "2025-02-01"])
            .unwrap();
        match cli.command {
            Command::CityStatus(cmd) => {
                assert_eq!(cmd.status, "завершено");
                assert_eq!(cmd.progress, 100);
                assert_eq!(cmd.start_date, "2025-02-01");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_metro_network_and_army_stats() {
        let cli =
            Cli::try_parse_from(["portalctl", "metro-network", "Люберцы, Котельники", "Красная"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Command::MetroNetwork(MetroNetworkCommand { ref stations, .. })
                if stations == "Люберцы, Котельники"
        ));

        let cli = Cli::try_parse_from(["portalctl", "units", "stats", "40", "5"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Units(UnitsCommand::Stats {
                soldiers: 40,
                units: 5
            })
        ));
    }

    #[test]
    fn test_parse_store_import() {
        let cli = Cli::try_parse_from(["portalctl", "store", "import", "dump.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Store(StoreCommand::Import { ref file }) if file == &PathBuf::from("dump.json")
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let args = vec!["portalctl", "-c", "/custom/config.toml", "whoami"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose_after_subcommand() {
        let cli = Cli::try_parse_from(["portalctl", "whoami", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_with_quiet() {
        let args = vec!["portalctl", "-q", "whoami"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.quiet);
    }
}
