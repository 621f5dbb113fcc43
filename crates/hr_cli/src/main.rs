//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `hr_core` linkage with the configured database and logging.
//! - Print stored reviews in a deterministic, line-oriented form.

use hr_core::{init_from_config, CoreConfig, ReviewRepository, Session, SqliteReviewRepository};
use log::info;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("hr_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = CoreConfig::from_env()?;
    init_from_config(&config)?;

    println!("hr_core version={}", hr_core::core_version());

    let session = Session::from_config(&config)?;
    let reviews = {
        let repo = SqliteReviewRepository::new(&session);
        repo.create_table()?;
        repo.get_all()?
    };

    println!("reviews count={}", reviews.len());
    for review in &reviews {
        println!("{}", review.borrow());
    }
    info!("event=cli_list module=cli status=ok count={}", reviews.len());

    drop(reviews);
    session.close()?;
    Ok(())
}
