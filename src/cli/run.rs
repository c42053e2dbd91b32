//! CLI dispatch: translate commands into store and catalog calls.
//!
//! This is the boundary adapter: it constructs and validates runs from
//! arguments, extracts keys/criteria, invokes the store, and maps outcomes
//! to rendered output. Protocol decisions (how to present an empty result,
//! which failures mean which exit status) live here, not in the store.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::info;

use super::command::{Cli, Commands, FindCommand, RunArgs, RunCommand, UserCommand};
use super::output;
use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::core::db::{create_pool, run_migrations};
use crate::core::domain::{Location, Run, RunId};
use crate::core::store::{RunStore, SqliteRunStore};
use crate::error::{Error, Result};

/// Execute a parsed CLI invocation end to end.
///
/// # Errors
/// Propagates config, store, and catalog failures to the caller, which maps
/// them to an exit status.
pub async fn execute(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(cli.config.as_deref())?;
    config.init_logging();

    match cli.command {
        Commands::Users(command) => users(&config, command, cli.json).await,
        Commands::Run(command) => {
            let pool = create_pool(&config.database.url)?;
            run_migrations(&pool)?;
            let store = SqliteRunStore::new(pool);
            runs(&store, command, cli.json).await
        }
    }
}

async fn runs(store: &SqliteRunStore, command: RunCommand, json: bool) -> Result<()> {
    match command {
        RunCommand::List => output::print_runs(&store.find_all().await?, json),

        RunCommand::Get { id } => {
            let run = store.find_by_id(RunId::new(id)).await?;
            output::print_run(&run, json)
        }

        RunCommand::Add(args) => {
            let run = to_run(&args)?;
            let created = store.create(&run).await?;
            info!(id = %created.id.unwrap_or(RunId::new(0)), "Created run");
            output::print_run(&created, json)
        }

        RunCommand::Update {
            id,
            version,
            fields,
        } => {
            let mut run = to_run(&fields)?;
            run.version = version;
            let updated = store.update(RunId::new(id), &run).await?;
            info!(id = %id, version = updated.version, "Updated run");
            output::print_run(&updated, json)
        }

        RunCommand::Delete { id } => {
            store.delete(RunId::new(id)).await?;
            info!(id = %id, "Deleted run");
            if json {
                println!("{}", serde_json::json!({ "deleted": id }));
            } else {
                println!("deleted run {id}");
            }
            Ok(())
        }

        RunCommand::Count => {
            let count = store.count().await?;
            if json {
                println!("{}", serde_json::json!({ "count": count }));
            } else {
                println!("{count}");
            }
            Ok(())
        }

        RunCommand::Import { file } => {
            let content = std::fs::read_to_string(&file)?;
            let payloads: Vec<RunPayload> = serde_json::from_str(&content)?;
            let incoming: Vec<Run> = payloads
                .into_iter()
                .map(RunPayload::into_run)
                .collect::<Result<_>>()?;
            let created = store.create_all(&incoming).await?;
            info!(count = created.len(), "Imported runs");
            output::print_runs(&created, json)
        }

        RunCommand::Find(find) => {
            let matched = match find {
                FindCommand::Location { location } => {
                    let location: Location = location.parse()?;
                    store.find_by_location(location).await?
                }
                FindCommand::Title { title } => store.find_by_title(&title).await?,
                FindCommand::Miles { miles } => store.find_by_miles(miles).await?,
                FindCommand::Contains { substring } => {
                    store.find_by_title_containing(&substring).await?
                }
                FindCommand::Pattern { pattern } => store.find_by_pattern(&pattern).await?,
            };
            output::print_runs(&matched, json)
        }
    }
}

async fn users(config: &Config, command: UserCommand, json: bool) -> Result<()> {
    let client = CatalogClient::new(config.catalog.base_url.clone())?;
    match command {
        UserCommand::List => output::print_users(&client.find_all().await?, json),
        UserCommand::Get { id } => output::print_user(&client.find_by_id(id).await?, json),
    }
}

/// One element of an imported JSON array, in the wire shape the boundary
/// accepts: flat object, location as its name string.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunPayload {
    title: String,
    started_on: String,
    completed_on: String,
    miles: i32,
    location: String,
}

impl RunPayload {
    /// Decode the wire shape without validating invariants: the store
    /// validates before each write, so a bad element fails exactly where
    /// `create_all`'s per-element, non-atomic semantics say it does.
    fn into_run(self) -> Result<Run> {
        Ok(Run {
            id: None,
            location: self.location.parse()?,
            started_on: parse_timestamp("startedOn", &self.started_on)?,
            completed_on: parse_timestamp("completedOn", &self.completed_on)?,
            title: self.title,
            miles: self.miles,
            version: 0,
        })
    }
}

fn to_run(args: &RunArgs) -> Result<Run> {
    let location: Location = args.location.parse()?;
    let run = Run::new(
        args.title.clone(),
        parse_timestamp("--started-on", &args.started_on)?,
        parse_timestamp("--completed-on", &args.completed_on)?,
        args.miles,
        location,
    )?;
    Ok(run)
}

/// Accept RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS` read as UTC.
fn parse_timestamp(what: &'static str, raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| Error::InvalidArgument {
            what,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_accept_rfc3339_and_naive_utc() {
        let expected = Utc.with_ymd_and_hms(2026, 8, 1, 6, 0, 0).unwrap();
        assert_eq!(
            parse_timestamp("t", "2026-08-01T06:00:00Z").unwrap(),
            expected
        );
        assert_eq!(
            parse_timestamp("t", "2026-08-01T06:00:00+00:00").unwrap(),
            expected
        );
        assert_eq!(
            parse_timestamp("t", "2026-08-01T06:00:00").unwrap(),
            expected
        );
        assert!(parse_timestamp("t", "yesterday").is_err());
    }

    #[test]
    fn payload_decoding_rejects_malformed_wire_values() {
        let payload = RunPayload {
            title: "Morning loop".into(),
            started_on: "2026-08-01T06:00:00Z".into(),
            completed_on: "2026-08-01T07:00:00Z".into(),
            miles: 4,
            location: "TRACK".into(),
        };
        assert!(payload.into_run().is_err(), "unknown location");

        let payload = RunPayload {
            title: "Morning loop".into(),
            started_on: "not a timestamp".into(),
            completed_on: "2026-08-01T07:00:00Z".into(),
            miles: 4,
            location: "OUTDOOR".into(),
        };
        assert!(payload.into_run().is_err(), "malformed timestamp");
    }

    #[test]
    fn payload_decoding_defers_invariants_to_the_store() {
        let payload = RunPayload {
            title: String::new(),
            started_on: "2026-08-01T06:00:00Z".into(),
            completed_on: "2026-08-01T07:00:00Z".into(),
            miles: 4,
            location: "OUTDOOR".into(),
        };
        let run = payload.into_run().unwrap();
        assert!(run.validate().is_err(), "store-side validation still rejects");
    }
}
