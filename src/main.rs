use clap::Parser;

use dsman::{
    cli,
    command::{archive, init, list, new, profiles, snapshot, status},
    config::Config,
    paths,
    result::Result,
};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("dsman")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli_args = cli::Args::parse();

    initialize_logger(cli_args.debug)?;

    let config_path = paths::config_file(cli_args.config.as_deref())?;
    let config = Config::load(&config_path)?;
    let registry_path = paths::registry_file()?;

    match cli_args.command {
        cli::Command::New {
            name,
            path,
            description,
            profile,
            license,
            python,
            env,
            remote,
            no_git,
        } => new::execute(
            new::NewRequest {
                name,
                parent: path,
                description,
                profile,
                license,
                python,
                env,
                remote,
                no_git,
            },
            &config,
            &registry_path,
        ),
        cli::Command::Init {
            path,
            name,
            profile,
        } => init::execute(
            init::InitRequest {
                path,
                name,
                profile,
            },
            &config,
            &registry_path,
        ),
        cli::Command::List { all } => list::execute(
            list::ListRequest { all },
            &config,
            &registry_path,
        ),
        cli::Command::Status { name, path } => status::execute(
            status::StatusRequest { name, path },
            &config,
            &registry_path,
        ),
        cli::Command::Snapshot {
            name,
            path,
            message,
        } => snapshot::execute(
            snapshot::SnapshotRequest {
                name,
                path,
                message,
            },
            &config,
            &registry_path,
        ),
        cli::Command::Archive { name, restore } => archive::execute(
            archive::ArchiveRequest { name, restore },
            &config,
            &registry_path,
        ),
        cli::Command::Profiles => profiles::execute(),
    }
}
