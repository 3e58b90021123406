//! Operator CLI for the organization directory.
//!
//! # Responsibility
//! - Verify `orgdir_core` linkage (`ping`, `version`).
//! - Create or upgrade a database file (`migrate`) and load demo data (`seed`).

use orgdir_core::db::open_db;
use orgdir_core::{core_version, init_logging, ping, seed_demo_data};
use std::process::ExitCode;

const USAGE: &str = "usage: orgdir_cli <ping | version | migrate <db_path> | seed <db_path>>";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let result = match args.as_slice() {
        ["ping"] => {
            println!("orgdir_core ping={}", ping());
            Ok(())
        }
        ["version"] => {
            println!("orgdir_core version={}", core_version());
            Ok(())
        }
        ["migrate", db_path] => migrate(db_path),
        ["seed", db_path] => seed(db_path),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("orgdir_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn migrate(db_path: &str) -> Result<(), String> {
    init_logging("info", None)?;
    open_db(db_path).map_err(|err| err.to_string())?;
    println!("migrated {db_path}");
    Ok(())
}

fn seed(db_path: &str) -> Result<(), String> {
    init_logging("info", None)?;
    let conn = open_db(db_path).map_err(|err| err.to_string())?;
    let summary = seed_demo_data(&conn).map_err(|err| err.to_string())?;
    println!(
        "seeded {db_path}: buildings={} activities={} organizations={} phones={}",
        summary.buildings, summary.activities, summary.organizations, summary.phones
    );
    Ok(())
}
