mod actions;
mod app;
mod client;
mod components;
mod config;
mod decoder;
mod error;
mod fixture;
mod image_pipeline;
mod message;
mod model;
mod pdf;
mod utils;
mod views;

use clap::Parser;

use crate::config::{Cli, Command, ServeArgs, ViewArgs};

pub fn main() -> iced::Result {
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .try_init();

    match Cli::parse().into_command() {
        Command::Serve(args) => {
            if let Err(err) = serve(args) {
                log::error!("Fixture endpoint failed: {err}");
                std::process::exit(1);
            }
            Ok(())
        }
        Command::View(args) => view(args),
    }
}

fn serve(args: ServeArgs) -> std::io::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(args.bind).await?;
        fixture::serve(listener).await
    })
}

fn view(args: ViewArgs) -> iced::Result {
    if args.with_fixture {
        match args.fixture_addr() {
            Some(addr) => {
                if let Err(err) = fixture::spawn_background(addr) {
                    log::error!("Unable to start fixture endpoint on {addr}: {err}");
                }
            }
            None => log::error!("Cannot serve a fixture for endpoint {}", args.endpoint),
        }
    }

    app::run(args)
}
