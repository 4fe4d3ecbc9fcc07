use super::print::{print_messages, print_notes, ConsoleReporter};
use super::setup::{Cli, Commands};
use calcvault::commands::{create, evaluate, list};
use calcvault::error::{Result, VaultError};
use calcvault::init::{initialize, resolve_data_dir, VaultContext};
use calcvault::model::Credential;
use calcvault::session::{LoadStatus, Session};
use calcvault::store::fs::FileBlobStore;
use clap::Parser;
use log::debug;

const USERNAME_ENV: &str = "CALCVAULT_USERNAME";
const PASSWORD_ENV: &str = "CALCVAULT_PASSWORD";

type CliSession<'a> = Session<&'a FileBlobStore, ConsoleReporter>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data_dir = resolve_data_dir()?;
    let ctx = initialize(data_dir);
    debug!("using data dir {}", ctx.data_dir.display());

    let credential = credential_from(&cli);

    if cli.command == Some(Commands::Init) {
        return handle_init(&ctx, &credential);
    }

    let (mut session, status) =
        ctx.api.unlock(&credential.username, &credential.password, ConsoleReporter)?;
    if let LoadStatus::Recovered(e) = &status {
        debug!("started with an empty collection: {}", e);
    }

    let outcome = match cli.command {
        Some(Commands::Add { title, text }) => handle_add(&mut session, &title, &text),
        Some(Commands::Eval { indexes }) => handle_eval(&session, &indexes),
        Some(Commands::List) | None => handle_list(&session),
        Some(Commands::Init) => Ok(()),
    };

    // Save even when the command failed; report the first error.
    let stopped = session.stop();
    outcome.and(stopped)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

/// Flags win over the environment; anything missing stays empty so the
/// gate can reject it with the usual message.
fn credential_from(cli: &Cli) -> Credential {
    let username = cli
        .username
        .clone()
        .or_else(|| std::env::var(USERNAME_ENV).ok())
        .unwrap_or_default();
    let password = cli
        .password
        .clone()
        .or_else(|| std::env::var(PASSWORD_ENV).ok())
        .unwrap_or_default();
    Credential::new(username, password)
}

/// Provisions the credential and writes the effective config next to it.
fn handle_init(ctx: &VaultContext, credential: &Credential) -> Result<()> {
    let api = &ctx.api;
    if api.is_provisioned()? {
        return Err(VaultError::Validation(
            "Vault is already initialized.".into(),
        ));
    }
    api.provision(credential)?;
    api.config().save(&ctx.data_dir)?;
    println!("Vault initialized for {}.", credential.username);
    Ok(())
}

fn handle_add(session: &mut CliSession<'_>, title: &str, text: &str) -> Result<()> {
    let result = create::run(session, title, text)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(session: &CliSession<'_>) -> Result<()> {
    let result = list::run(session)?;
    print_notes(&result.listed_notes);
    print_messages(&result.messages);
    Ok(())
}

fn handle_eval(session: &CliSession<'_>, indexes: &[usize]) -> Result<()> {
    let result = evaluate::run(session, indexes)?;
    print_messages(&result.messages);
    Ok(())
}
