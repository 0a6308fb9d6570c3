mod args;
mod repos;
mod table;

use crate::args::{render_parse_error, Args, Command};
use anyhow::Result;
use colored::Colorize;
use env_logger::Env;
use std::env;
use std::process::exit;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let args = match Args::parse_from_args(env::args_os()) {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            eprint!("{}", render_parse_error(&e));
            exit(1)
        }
        Err(e) => {
            print!("{}", render_parse_error(&e));
            exit(0)
        }
    };

    if let Err(e) = run(args).await {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        exit(1)
    }
}

async fn run(args: Args) -> Result<()> {
    match &args.command {
        Command::Repos(repos_args) => repos::run(&args.api_url, repos_args).await,
    }
}
