//! Table and JSON rendering for CLI results.

use tabled::{Table, Tabled};

use crate::catalog::User;
use crate::core::domain::Run;
use crate::error::Result;

#[derive(Tabled)]
struct RunRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Started")]
    started_on: String,
    #[tabled(rename = "Completed")]
    completed_on: String,
    #[tabled(rename = "Miles")]
    miles: i32,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Version")]
    version: i32,
}

impl From<&Run> for RunRow {
    fn from(run: &Run) -> Self {
        Self {
            id: run.id.map(|id| id.to_string()).unwrap_or_default(),
            title: run.title.clone(),
            started_on: run.started_on.to_rfc3339(),
            completed_on: run.completed_on.to_rfc3339(),
            miles: run.miles,
            location: run.location.to_string(),
            version: run.version,
        }
    }
}

/// Print a sequence of runs as a table, or JSON in scripting mode.
///
/// An empty criteria result is a protocol-level message here, not a store
/// error.
pub fn print_runs(runs: &[Run], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(runs)?);
        return Ok(());
    }
    if runs.is_empty() {
        println!("no runs matched");
        return Ok(());
    }
    let rows: Vec<RunRow> = runs.iter().map(RunRow::from).collect();
    println!("{}", Table::new(rows));
    Ok(())
}

/// Print a single run.
pub fn print_run(run: &Run, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(run)?);
        return Ok(());
    }
    println!("{}", Table::new([RunRow::from(run)]));
    Ok(())
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "City")]
    city: String,
    #[tabled(rename = "Company")]
    company: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            city: user.address.city.clone(),
            company: user.company.name.clone(),
        }
    }
}

/// Print a sequence of catalog users.
pub fn print_users(users: &[User], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(users)?);
        return Ok(());
    }
    if users.is_empty() {
        println!("no users found");
        return Ok(());
    }
    let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
    println!("{}", Table::new(rows));
    Ok(())
}

/// Print a single catalog user.
pub fn print_user(user: &User, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(user)?);
        return Ok(());
    }
    println!("{}", Table::new([UserRow::from(user)]));
    Ok(())
}
