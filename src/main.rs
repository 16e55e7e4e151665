use clap::Parser;
use hospital_finance::args::{Args, Command};
use hospital_finance::{commands, Config, Mode, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().hfin_home().path();

    // When HFIN_IN_TEST_MODE is set and non-empty, an in-memory backend saved in the hfin home
    // stands in for the HTTP server.
    let mode = Mode::from_env();

    let _: () = match args.command() {
        Command::Init(a) => commands::init(home, a.clone()).await?.print(),
        Command::Login(a) => commands::login(Config::load(home).await?, mode, a.clone())
            .await?
            .print(),
        Command::Logout => commands::logout(Config::load(home).await?).await?.print(),
        Command::Whoami => commands::whoami(Config::load(home).await?, mode)
            .await?
            .print(),
        Command::Register(a) => commands::register(Config::load(home).await?, mode, a.clone())
            .await?
            .print(),
        Command::List(a) => commands::list(Config::load(home).await?, mode, a.clone())
            .await?
            .print(),
        Command::Show(a) => commands::show(Config::load(home).await?, mode, a.clone())
            .await?
            .print(),
        Command::Insert(a) => commands::insert(Config::load(home).await?, mode, a.clone())
            .await?
            .print(),
        Command::Update(a) => commands::update(Config::load(home).await?, mode, a.clone())
            .await?
            .print(),
        Command::Delete(a) => commands::delete(Config::load(home).await?, mode, a.clone())
            .await?
            .print(),
        Command::Report(a) => commands::report(Config::load(home).await?, mode, a.clone())
            .await?
            .print(),
        Command::Import(a) => commands::import(Config::load(home).await?, mode, a.clone())
            .await?
            .print(),
        Command::Template(a) => commands::template(Config::load(home).await?, mode, a.clone())
            .await?
            .print(),
        Command::Export(a) => commands::export(Config::load(home).await?, mode, a.clone())
            .await?
            .print(),
        Command::Menu(a) => commands::menu(Config::load(home).await?, a.clone())
            .await?
            .print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        // RUST_LOG wins when it is set.
        Some(_) => EnvFilter::from_default_env(),
        // Otherwise only this crate logs, at `level`.
        None => EnvFilter::new(format!(
            "{}={level},hospital_finance={level}",
            env!("CARGO_CRATE_NAME")
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
