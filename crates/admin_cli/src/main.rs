use std::{error::Error, io::Write};

use chrono::{DateTime, TimeZone, Utc};
use clap::{Args, Parser, Subcommand};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};
use engine::Engine;
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection, EntityTrait, Set};

mod users {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub username: String,
        pub password: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

#[derive(Parser, Debug)]
#[command(name = "luxen_admin")]
#[command(about = "Admin utilities for Luxen (bootstrap users, seed demo data)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:./luxen.db?mode=rwc")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    Seed(Seed),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    username: String,
}

#[derive(Args, Debug)]
struct Seed {
    #[command(subcommand)]
    command: SeedCommand,
}

#[derive(Subcommand, Debug)]
enum SeedCommand {
    /// Insert a small demo dataset so reports have something to show.
    Demo,
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self, Box<dyn Error + Send + Sync>> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn prompt_password(prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    let _raw = RawModeGuard::enter()?;

    let mut out = std::io::stderr();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(prompt)
    )?;
    out.flush()?;

    let mut buf = String::new();
    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };

        match code {
            KeyCode::Enter => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                break;
            }
            KeyCode::Backspace => {
                if buf.pop().is_some() {
                    execute!(out, cursor::MoveLeft(1), Print(" "), cursor::MoveLeft(1))?;
                    out.flush()?;
                }
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                return Err("interrupted".into());
            }
            KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => {
                buf.push(ch);
                execute!(out, Print("*"))?;
                out.flush()?;
            }
            _ => {}
        }
    }

    Ok(buf)
}

fn prompt_password_twice() -> Result<String, Box<dyn Error + Send + Sync>> {
    let mut out = std::io::stderr();
    for _ in 0..3 {
        let p1 = prompt_password("Password: ")?;
        if p1.is_empty() {
            execute!(
                out,
                cursor::MoveToColumn(0),
                terminal::Clear(ClearType::CurrentLine),
                Print("Password must not be empty.\r\n")
            )?;
            continue;
        }

        let p2 = prompt_password("Confirm password: ")?;
        if p1 == p2 {
            return Ok(p1);
        }

        execute!(
            out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            Print("Passwords do not match. Try again.\r\n")
        )?;
    }

    Err("too many attempts".into())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

async fn seed_demo(engine: &Engine) -> Result<(), Box<dyn Error + Send + Sync>> {
    engine
        .add_owner("Ayesha Khan", Some("ayesha@example.com"), Some(60_000.0))
        .await?;
    engine.add_owner("Omar Farooq", None, Some(40_000.0)).await?;

    engine
        .record_production(Some("LX-200 tube light"), Some(400), Some(9_200.0))
        .await?;
    engine
        .record_production(Some("LX-400 LED panel"), Some(150), Some(12_500.0))
        .await?;

    engine
        .record_sale(Some("Bilal Traders"), Some(18_000.0), day(2026, 6, 3))
        .await?;
    engine
        .record_sale(Some("Noor Electric"), Some(11_400.0), day(2026, 7, 12))
        .await?;

    // Three months of expenses so the forecast starts with high confidence.
    engine
        .record_expense(Some("Electricity"), None, Some(1_800.0), day(2026, 5, 9))
        .await?;
    engine
        .record_expense(Some("Rent"), Some("Workshop"), Some(2_500.0), day(2026, 5, 1))
        .await?;
    engine
        .record_expense(Some("Electricity"), None, Some(2_100.0), day(2026, 6, 9))
        .await?;
    engine
        .record_expense(Some("Rent"), Some("Workshop"), Some(2_500.0), day(2026, 6, 1))
        .await?;
    engine
        .record_expense(Some("Electricity"), None, Some(2_350.0), day(2026, 7, 9))
        .await?;
    engine
        .record_expense(Some("Rent"), Some("Workshop"), Some(2_500.0), day(2026, 7, 1))
        .await?;

    engine
        .open_warranty_claim(Some("Bilal Traders"), Some("LX-200 tube light"))
        .await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => {
            let password = prompt_password_twice()?;

            if users::Entity::find_by_id(args.username.clone())
                .one(&db)
                .await?
                .is_some()
            {
                eprintln!("user already exists: {}", args.username);
                std::process::exit(1);
            }

            let user = users::ActiveModel {
                username: Set(args.username.clone()),
                password: Set(password),
            };
            users::Entity::insert(user).exec(&db).await?;

            println!("created user: {}", args.username);
        }
        Command::Seed(Seed {
            command: SeedCommand::Demo,
        }) => {
            let engine = Engine::builder().database(db).build();
            seed_demo(&engine).await?;
            println!("seeded demo data");
        }
    }

    Ok(())
}
