use anyhow::Result;
use env_logger::{Builder, Env};
use log::error;

mod cli;
mod util;
mod cmd_init;
mod cmd_list;
mod cmd_get;
mod cmd_add;
mod cmd_update;
mod cmd_del;
mod cmd_view;
mod cmd_status;

fn init_logger() {
    // RUST_LOG, otherwise info. Example: RUST_LOG=debug rosterdb list --path ./data
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    use clap::Parser;

    let cli = cli::Cli::parse();
    match cli.cmd {
        cli::Cmd::Init { path, no_seed } =>
            cmd_init::exec(path, no_seed),

        cli::Cmd::List { path, page, json } =>
            cmd_list::exec(path, page, json),

        cli::Cmd::Get { path, id, json } =>
            cmd_get::exec(path, id, json),

        cli::Cmd::Add { path, fields } =>
            cmd_add::exec(path, fields),

        cli::Cmd::Update { path, id, fields } =>
            cmd_update::exec(path, id, fields),

        cli::Cmd::Del { path, id } =>
            cmd_del::exec(path, id),

        cli::Cmd::DelMany { path, ids } =>
            cmd_del::exec_many(path, ids),

        cli::Cmd::View { path, mode } =>
            cmd_view::exec_mode(path, mode),

        cli::Cmd::Page { path, page } =>
            cmd_view::exec_page(path, page),

        cli::Cmd::Status { path, json } =>
            cmd_status::exec(path, json),
    }
}
