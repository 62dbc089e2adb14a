//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::models::{NewsCategory, PhotoAlbum};

/// Render a page.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Page path, e.g. `/news` or `/request-role`
    #[arg(default_value = "/")]
    pub path: String,

    /// Only show news in this category (news page only)
    #[arg(long, value_enum)]
    pub category: Option<CategoryArg>,
}

/// Log in as administrator.
#[derive(Debug, Args)]
pub struct LoginCommand {
    /// Administrator login
    pub username: String,

    /// Administrator password
    pub password: String,
}

/// People on the structure page.
#[derive(Debug, Subcommand)]
pub enum PeopleCommand {
    /// List everyone, grouped by category
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: OutputFormat,
    },

    /// Add a person
    Add {
        /// Display name
        name: String,

        /// Position, e.g. "НарКом Армии"
        role: String,

        /// Short biography
        #[arg(short, long, default_value = "")]
        description: String,

        /// Avatar image URL
        #[arg(long)]
        avatar: Option<String>,
    },

    /// Change a person's details
    Update {
        /// Record id
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        role: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        avatar: Option<String>,
    },

    /// Remove a person
    Delete {
        /// Record id
        id: String,
    },
}

/// State news.
#[derive(Debug, Subcommand)]
pub enum NewsCommand {
    /// List news, newest first
    List {
        /// Only this category
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: OutputFormat,
    },

    /// Publish a news item
    Add {
        title: String,

        content: String,

        #[arg(long, value_enum, default_value = "politics")]
        category: CategoryArg,
    },

    /// Remove a news item
    Delete {
        /// Record id
        id: String,
    },
}

/// Role requests.
#[derive(Debug, Subcommand)]
pub enum RequestsCommand {
    /// List requests by status
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: OutputFormat,
    },

    /// File a request (no login needed)
    Submit {
        /// Your name
        name: String,

        /// The role you want
        role: String,

        /// Why you want it
        motivation: String,
    },

    /// Approve a pending request
    Approve {
        /// Record id
        id: String,
    },

    /// Reject a pending request
    Reject {
        /// Record id
        id: String,
    },
}

/// Construction projects.
#[derive(Debug, Subcommand)]
pub enum ProjectsCommand {
    /// List projects with overall progress
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: OutputFormat,
    },

    /// Add a project
    Add {
        name: String,

        /// Percent complete (0-100)
        #[arg(short, long, default_value_t = 0)]
        progress: u8,

        #[arg(short, long, default_value = "В работе")]
        status: String,

        /// Icon name
        #[arg(long, default_value = "Building2")]
        icon: String,
    },

    /// Change a project
    Update {
        /// Record id
        id: String,

        #[arg(long)]
        name: Option<String>,

        /// Percent complete (0-100)
        #[arg(short, long)]
        progress: Option<u8>,

        #[arg(short, long)]
        status: Option<String>,

        #[arg(long)]
        icon: Option<String>,
    },

    /// Remove a project
    Delete {
        /// Record id
        id: String,
    },
}

/// Army units.
#[derive(Debug, Subcommand)]
pub enum UnitsCommand {
    /// List units
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: OutputFormat,
    },

    /// Add a unit
    Add {
        name: String,

        #[arg(long, default_value = "Shield")]
        icon: String,

        #[arg(short, long, default_value = "Активны")]
        status: String,
    },

    /// Change a unit
    Update {
        /// Record id
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        icon: Option<String>,

        #[arg(short, long)]
        status: Option<String>,
    },

    /// Remove a unit
    Delete {
        /// Record id
        id: String,
    },

    /// Set the army headcount figures
    Stats {
        /// Number of soldiers
        soldiers: u32,

        /// Number of units
        units: u32,
    },
}

/// Set the Lubertsy construction status block.
#[derive(Debug, Args)]
pub struct CityStatusCommand {
    /// Status text, e.g. "активно"
    pub status: String,

    /// City construction progress (0-100)
    pub progress: u8,

    /// Start date as shown on the page, e.g. 2025-01-15
    pub start_date: String,
}

/// Set the metro network summary.
#[derive(Debug, Args)]
pub struct MetroNetworkCommand {
    /// Station list
    pub stations: String,

    /// Line list
    pub lines: String,
}

/// Lubertsy city news.
#[derive(Debug, Subcommand)]
pub enum CityNewsCommand {
    /// List city news, newest first
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: OutputFormat,
    },

    /// Post city news
    Add { title: String, content: String },

    /// Remove city news
    Delete {
        /// Record id
        id: String,
    },
}

/// Photo albums.
#[derive(Debug, Args)]
pub struct PhotosCommand {
    /// Which album
    #[arg(short, long, value_enum)]
    pub album: AlbumArg,

    #[command(subcommand)]
    pub action: PhotosAction,
}

/// What to do with an album.
#[derive(Debug, Subcommand)]
pub enum PhotosAction {
    /// List photos
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: OutputFormat,
    },

    /// Add a photo by URL
    Add {
        url: String,

        /// Caption
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Remove a photo
    Delete {
        /// Record id
        id: String,
    },
}

/// Scalar settings.
#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Print one setting, or all of them
    Get {
        /// Setting key, e.g. serverIP
        name: Option<String>,
    },

    /// Change a setting
    Set {
        /// Setting key, e.g. serverIP
        name: String,

        /// New value (JSON for armyStats)
        value: String,
    },
}

/// Store maintenance.
#[derive(Debug, Subcommand)]
pub enum StoreCommand {
    /// Seed any missing keys
    Init,

    /// Delete all content and restore defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Write every key as one JSON document
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load a JSON document produced by export or a browser storage dump
    Import {
        /// JSON file to load
        file: PathBuf,
    },

    /// Show collection sizes and database statistics
    Stats {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// News category argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Politics,
    Transport,
    Personnel,
    Construction,
    Culture,
    Technology,
}

impl From<CategoryArg> for NewsCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Politics => Self::Politics,
            CategoryArg::Transport => Self::Transport,
            CategoryArg::Personnel => Self::Personnel,
            CategoryArg::Construction => Self::Construction,
            CategoryArg::Culture => Self::Culture,
            CategoryArg::Technology => Self::Technology,
        }
    }
}

/// Photo album argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlbumArg {
    City,
    Construction,
    Metro,
}

impl From<AlbumArg> for PhotoAlbum {
    fn from(arg: AlbumArg) -> Self {
        match arg {
            AlbumArg::City => Self::City,
            AlbumArg::Construction => Self::Construction,
            AlbumArg::Metro => Self::Metro,
        }
    }
}

/// Output format for list commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Rendered page section
    #[default]
    Plain,
    /// JSON records as stored
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_arg_conversion() {
        assert_eq!(
            NewsCategory::from(CategoryArg::Politics),
            NewsCategory::Politics
        );
        assert_eq!(
            NewsCategory::from(CategoryArg::Technology),
            NewsCategory::Technology
        );
        assert_eq!(
            NewsCategory::from(CategoryArg::Personnel),
            NewsCategory::Personnel
        );
    }

    #[test]
    fn test_album_arg_conversion() {
        assert_eq!(PhotoAlbum::from(AlbumArg::City), PhotoAlbum::City);
        assert_eq!(
            PhotoAlbum::from(AlbumArg::Construction),
            PhotoAlbum::Construction
        );
        assert_eq!(PhotoAlbum::from(AlbumArg::Metro), PhotoAlbum::Metro);
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }

    #[test]
    fn test_people_update_debug() {
        let cmd = PeopleCommand::Update {
            id: "3".to_string(),
            name: None,
            role: Some("Глава города Люберцы".to_string()),
            description: None,
            avatar: None,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Update"));
        assert!(debug_str.contains("role"));
    }

    #[test]
    fn test_city_status_debug() {
        let cmd = CityStatusCommand {
            status: "активно".to_string(),
            progress: 40,
            start_date: "2025-01-15".to_string(),
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("progress: 40"));
    }
}
