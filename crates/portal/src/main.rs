//! `portalctl` - CLI for the portal
//!
//! This binary renders the portal's pages as text and exposes every
//! administrator edit as a subcommand.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::fs;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::debug;

use portal::cli::{
    CityNewsCommand, Cli, Command, ConfigCommand, NewsCommand, OutputFormat, PeopleCommand,
    PhotosAction, PhotosCommand, ProjectsCommand, RequestsCommand, SettingsCommand, ShowCommand,
    StoreCommand, UnitsCommand,
};
use portal::models::{
    ArmyStats, NewArmyUnit, NewCityNews, NewNews, NewPerson, NewPhoto, NewProject, NewRoleRequest,
    PhotoAlbum,
};
use portal::shell;
use portal::store::collection;
use portal::views::army::ArmyPage;
use portal::views::construction::ConstructionPage;
use portal::views::gallery::Gallery;
use portal::views::lubertsy::LubertsyPage;
use portal::views::news::NewsPage;
use portal::views::request_role::RequestRolePage;
use portal::views::structure::StructurePage;
use portal::views::EditState;
use portal::{
    init_logging, Config, Credentials, KeyValueBackend, MemoryBackend, Portal, PortalStore,
    Route, SessionGate, Setting, Storage,
};

type CliPortal = Portal<Box<dyn KeyValueBackend>>;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Configuration commands never touch the store
    match cli.command {
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
        command => run(&config, command),
    }
}

fn run(config: &Config, command: Command) -> Result<()> {
    let mut portal = open_portal(config)?;
    match command {
        Command::Show(show_cmd) => handle_show(&portal, &show_cmd),
        Command::Login(login_cmd) => {
            let credentials = Credentials::new(login_cmd.username, login_cmd.password);
            if !portal.login(&credentials)? {
                bail!("invalid login or password");
            }
            println!("Logged in as administrator.");
            Ok(())
        }
        Command::Logout => {
            portal.logout()?;
            println!("Logged out.");
            Ok(())
        }
        Command::Whoami => {
            if portal.is_admin()? {
                println!("administrator");
            } else {
                println!("guest");
            }
            Ok(())
        }
        Command::People(people_cmd) => handle_people(&mut portal, people_cmd),
        Command::News(news_cmd) => handle_news(&mut portal, news_cmd),
        Command::Requests(requests_cmd) => handle_requests(&mut portal, requests_cmd),
        Command::Projects(projects_cmd) => handle_projects(&mut portal, projects_cmd),
        Command::Units(units_cmd) => handle_units(&mut portal, units_cmd),
        Command::CityNews(city_cmd) => handle_city_news(&mut portal, city_cmd),
        Command::CityStatus(status_cmd) => {
            portal.update_city_status(
                &status_cmd.status,
                status_cmd.progress,
                &status_cmd.start_date,
            )?;
            println!("City status updated.");
            Ok(())
        }
        Command::MetroNetwork(metro_cmd) => {
            portal.update_metro_network(&metro_cmd.stations, &metro_cmd.lines)?;
            println!("Metro network updated.");
            Ok(())
        }
        Command::Photos(photos_cmd) => handle_photos(&mut portal, photos_cmd),
        Command::Settings(settings_cmd) => handle_settings(&mut portal, settings_cmd),
        Command::Store(store_cmd) => handle_store(&mut portal, config, store_cmd),
        Command::Config(config_cmd) => handle_config(config, config_cmd),
    }
}

fn open_portal(config: &Config) -> Result<CliPortal> {
    let backend: Box<dyn KeyValueBackend> = if config.storage.in_memory {
        debug!("Using in-memory store");
        Box::new(MemoryBackend::new())
    } else {
        let path = config.database_path();
        let storage = Storage::open(&path)
            .with_context(|| format!("failed to open store at {}", path.display()))?;
        Box::new(storage)
    };
    let store = PortalStore::open(backend)?;
    Ok(Portal::new(store, SessionGate::from_config(&config.auth)))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report_delete(deleted: bool, id: &str) {
    if deleted {
        println!("Deleted {id}.");
    } else {
        println!("No record with id {id}; nothing changed.");
    }
}

/// Open `current` for editing, apply the command-line changes to the draft,
/// then save through `persist`.
fn edit_record<T>(
    current: Option<T>,
    id: &str,
    apply: impl FnOnce(&mut T),
    persist: impl FnOnce(&T) -> portal::Result<bool>,
) -> Result<()> {
    let Some(current) = current else {
        bail!("no record with id {id}");
    };

    let mut edit = EditState::default();
    edit.begin_edit(current);
    if let Some(draft) = edit.draft_mut() {
        apply(draft);
    }

    match edit.save(persist)? {
        Some(true) => println!("Updated {id}."),
        _ => println!("No record with id {id}; nothing changed."),
    }
    Ok(())
}

fn handle_show(portal: &CliPortal, cmd: &ShowCommand) -> Result<()> {
    let route = Route::parse(&cmd.path);
    let text = match (&route, cmd.category) {
        (Route::News, Some(category)) => {
            let admin = portal.is_admin()?;
            let page = NewsPage::load(portal.store(), admin, Some(category.into()))?;
            shell::render(&route, &page.to_string(), admin)
        }
        _ => portal.render(&route)?,
    };
    print!("{text}");
    Ok(())
}

fn handle_people(portal: &mut CliPortal, cmd: PeopleCommand) -> Result<()> {
    match cmd {
        PeopleCommand::List { format } => match format {
            OutputFormat::Plain => {
                print!("{}", StructurePage::load(portal.store(), portal.is_admin()?)?);
            }
            OutputFormat::Json => print_json(&portal.store().all(collection::PEOPLE)?)?,
        },
        PeopleCommand::Add {
            name,
            role,
            description,
            avatar,
        } => {
            let person = portal.add_person(NewPerson {
                name,
                role,
                description,
                avatar,
            })?;
            println!("Added {} ({}).", person.name, person.id);
        }
        PeopleCommand::Update {
            id,
            name,
            role,
            description,
            avatar,
        } => {
            let current = portal.store().find(collection::PEOPLE, &id)?;
            edit_record(
                current,
                &id,
                |person| {
                    if let Some(name) = name {
                        person.name = name;
                    }
                    if let Some(role) = role {
                        person.role = role;
                    }
                    if let Some(description) = description {
                        person.description = description;
                    }
                    if avatar.is_some() {
                        person.avatar = avatar;
                    }
                },
                |person| portal.update_person(person.clone()),
            )?;
        }
        PeopleCommand::Delete { id } => report_delete(portal.delete_person(&id)?, &id),
    }
    Ok(())
}

fn handle_news(portal: &mut CliPortal, cmd: NewsCommand) -> Result<()> {
    match cmd {
        NewsCommand::List { category, format } => {
            let page = NewsPage::load(
                portal.store(),
                portal.is_admin()?,
                category.map(Into::into),
            )?;
            match format {
                OutputFormat::Plain => print!("{page}"),
                OutputFormat::Json => print_json(&page.items)?,
            }
        }
        NewsCommand::Add {
            title,
            content,
            category,
        } => {
            let item = portal.publish_news(NewNews {
                title,
                content,
                category: category.into(),
            })?;
            println!("Published {} ({}).", item.title, item.id);
        }
        NewsCommand::Delete { id } => report_delete(portal.delete_news(&id)?, &id),
    }
    Ok(())
}

fn handle_requests(portal: &mut CliPortal, cmd: RequestsCommand) -> Result<()> {
    match cmd {
        RequestsCommand::List { format } => match format {
            OutputFormat::Plain => {
                print!("{}", RequestRolePage::load(portal.store(), portal.is_admin()?)?);
            }
            OutputFormat::Json => print_json(&portal.store().all(collection::ROLE_REQUESTS)?)?,
        },
        RequestsCommand::Submit {
            name,
            role,
            motivation,
        } => {
            let request = portal.submit_request(NewRoleRequest {
                name,
                desired_role: role,
                motivation,
            })?;
            println!(
                "Request {} submitted and awaiting review.",
                request.id
            );
        }
        RequestsCommand::Approve { id } => {
            if portal.approve_request(&id)? {
                println!("Approved {id}.");
            } else {
                println!("No request with id {id}; nothing changed.");
            }
        }
        RequestsCommand::Reject { id } => {
            if portal.reject_request(&id)? {
                println!("Rejected {id}.");
            } else {
                println!("No request with id {id}; nothing changed.");
            }
        }
    }
    Ok(())
}

fn handle_projects(portal: &mut CliPortal, cmd: ProjectsCommand) -> Result<()> {
    match cmd {
        ProjectsCommand::List { format } => {
            let page = ConstructionPage::load(portal.store(), portal.is_admin()?)?;
            match format {
                OutputFormat::Plain => print!("{page}"),
                OutputFormat::Json => print_json(&serde_json::json!({
                    "overall": page.overall,
                    "projects": page.projects,
                }))?,
            }
        }
        ProjectsCommand::Add {
            name,
            progress,
            status,
            icon,
        } => {
            let project = portal.add_project(NewProject {
                name,
                progress,
                status,
                icon,
            })?;
            println!("Added {} ({}).", project.name, project.id);
        }
        ProjectsCommand::Update {
            id,
            name,
            progress,
            status,
            icon,
        } => {
            let current = portal
                .store()
                .find(collection::CONSTRUCTION_PROJECTS, &id)?;
            edit_record(
                current,
                &id,
                |project| {
                    if let Some(name) = name {
                        project.name = name;
                    }
                    if let Some(progress) = progress {
                        project.progress = progress;
                    }
                    if let Some(status) = status {
                        project.status = status;
                    }
                    if let Some(icon) = icon {
                        project.icon = icon;
                    }
                },
                |project| portal.update_project(project.clone()),
            )?;
        }
        ProjectsCommand::Delete { id } => report_delete(portal.delete_project(&id)?, &id),
    }
    Ok(())
}

fn handle_units(portal: &mut CliPortal, cmd: UnitsCommand) -> Result<()> {
    match cmd {
        UnitsCommand::List { format } => match format {
            OutputFormat::Plain => print!("{}", ArmyPage::load(portal.store(), portal.is_admin()?)?),
            OutputFormat::Json => print_json(&portal.store().all(collection::ARMY_UNITS)?)?,
        },
        UnitsCommand::Add { name, icon, status } => {
            let unit = portal.add_unit(NewArmyUnit { name, icon, status })?;
            println!("Added {} ({}).", unit.name, unit.id);
        }
        UnitsCommand::Update {
            id,
            name,
            icon,
            status,
        } => {
            let current = portal.store().find(collection::ARMY_UNITS, &id)?;
            edit_record(
                current,
                &id,
                |unit| {
                    if let Some(name) = name {
                        unit.name = name;
                    }
                    if let Some(icon) = icon {
                        unit.icon = icon;
                    }
                    if let Some(status) = status {
                        unit.status = status;
                    }
                },
                |unit| portal.update_unit(unit.clone()),
            )?;
        }
        UnitsCommand::Delete { id } => report_delete(portal.delete_unit(&id)?, &id),
        UnitsCommand::Stats { soldiers, units } => {
            portal.update_army_stats(ArmyStats { soldiers, units })?;
            println!("Army stats updated: {soldiers} soldiers, {units} units.");
        }
    }
    Ok(())
}

fn handle_city_news(portal: &mut CliPortal, cmd: CityNewsCommand) -> Result<()> {
    match cmd {
        CityNewsCommand::List { format } => match format {
            OutputFormat::Plain => {
                print!("{}", LubertsyPage::load(portal.store(), portal.is_admin()?)?);
            }
            OutputFormat::Json => print_json(&portal.store().all(collection::CITY_NEWS)?)?,
        },
        CityNewsCommand::Add { title, content } => {
            let item = portal.add_city_news(NewCityNews { title, content })?;
            println!("Posted {} ({}).", item.title, item.id);
        }
        CityNewsCommand::Delete { id } => report_delete(portal.delete_city_news(&id)?, &id),
    }
    Ok(())
}

fn handle_photos(portal: &mut CliPortal, cmd: PhotosCommand) -> Result<()> {
    let album = PhotoAlbum::from(cmd.album);
    match cmd.action {
        PhotosAction::List { format } => {
            let gallery = Gallery::load(portal.store(), album, portal.is_admin()?)?;
            match format {
                OutputFormat::Plain => print!("{gallery}"),
                OutputFormat::Json => print_json(&gallery.photos)?,
            }
        }
        PhotosAction::Add { url, title } => {
            let photo = portal.add_photo(album, NewPhoto { url, title })?;
            println!("Added photo {} to {}.", photo.id, album.as_str());
        }
        PhotosAction::Delete { id } => report_delete(portal.delete_photo(album, &id)?, &id),
    }
    Ok(())
}

fn handle_settings(portal: &mut CliPortal, cmd: SettingsCommand) -> Result<()> {
    match cmd {
        SettingsCommand::Get { name: Some(name) } => {
            let setting: Setting = name.parse()?;
            println!("{}", portal.store().setting(setting)?);
        }
        SettingsCommand::Get { name: None } => {
            for setting in Setting::ALL {
                println!("{setting}: {}", portal.store().setting(setting)?);
            }
        }
        SettingsCommand::Set { name, value } => {
            let setting: Setting = name.parse()?;
            portal.update_setting(setting, &value)?;
            println!("{setting} updated.");
        }
    }
    Ok(())
}

fn handle_store(portal: &mut CliPortal, config: &Config, cmd: StoreCommand) -> Result<()> {
    match cmd {
        StoreCommand::Init => {
            let seeded = portal.store_mut().initialize()?;
            println!("Seeded {seeded} missing keys.");
        }
        StoreCommand::Reset { yes } => {
            if !yes {
                println!("This will delete all portal content and restore the defaults.");
                println!("Use --yes to confirm.");
                return Ok(());
            }
            portal.admin()?;
            let seeded = portal.store_mut().reset()?;
            println!("Store reset; {seeded} keys restored to defaults.");
        }
        StoreCommand::Export { output } => {
            let snapshot = serde_json::to_string_pretty(&portal.store().export()?)?;
            match output {
                Some(path) => {
                    fs::write(&path, snapshot)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Exported to {}.", path.display());
                }
                None => println!("{snapshot}"),
            }
        }
        StoreCommand::Import { file } => {
            portal.admin()?;
            let text = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let snapshot: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("{} is not valid JSON", file.display()))?;
            let written = portal.store_mut().import(&snapshot)?;
            println!("Imported {written} keys from {}.", file.display());
        }
        StoreCommand::Stats { json } => handle_stats(portal, config, json)?,
    }
    Ok(())
}

fn handle_stats(portal: &CliPortal, config: &Config, json: bool) -> Result<()> {
    let stats = portal.store().stats()?;

    // Per-key write times come from a second connection to the same file
    let mut updated = Vec::with_capacity(stats.collections.len());
    let database = if config.storage.in_memory {
        None
    } else {
        let storage = Storage::open(config.database_path())?;
        for (key, _) in &stats.collections {
            updated.push(storage.updated_at(key)?);
        }
        Some(storage.stats()?)
    };
    updated.resize(stats.collections.len(), None);

    if json {
        let collections: serde_json::Map<String, serde_json::Value> = stats
            .collections
            .iter()
            .zip(&updated)
            .map(|((key, count), updated_at)| {
                (
                    (*key).to_string(),
                    serde_json::json!({ "records": count, "updated_at": updated_at }),
                )
            })
            .collect();
        let status = serde_json::json!({
            "collections": collections,
            "keys_present": stats.keys_present,
            "keys_known": stats.keys_known,
            "unknown_keys": stats.unknown_keys,
            "in_memory": config.storage.in_memory,
            "database_path": config.database_path(),
            "total_entries": database.as_ref().map(|db| db.total_entries),
            "last_write": database.as_ref().and_then(|db| db.last_write.clone()),
            "db_size_bytes": database.as_ref().map(|db| db.db_size_bytes),
        });
        print_json(&status)?;
    } else {
        println!("portalctl store");
        println!("---------------");
        for ((key, count), updated_at) in stats.collections.iter().zip(&updated) {
            match updated_at {
                Some(at) => println!("{key:<22} {count:>4}  (written {at})"),
                None => println!("{key:<22} {count:>4}"),
            }
        }
        println!();
        println!(
            "Keys present:  {}/{}",
            stats.keys_present, stats.keys_known
        );
        if !stats.unknown_keys.is_empty() {
            println!("Unknown keys:  {}", stats.unknown_keys.join(", "));
        }
        match database {
            Some(db) => {
                println!("Database:      {}", config.database_path().display());
                println!("Entries:       {}", db.total_entries);
                println!("Size:          {} bytes", db.db_size_bytes);
                println!(
                    "Last write:    {}",
                    db.last_write.as_deref().unwrap_or("never")
                );
            }
            None => println!("Database:      in memory"),
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                let mut shown = config.clone();
                shown.auth.password = "***".to_string();
                print_json(&shown)?;
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  In memory:          {}", config.storage.in_memory);
                println!();
                println!("[Auth]");
                println!("  Username:           {}", config.auth.username);
                println!("  Password:           ***");
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
