mod commands;
mod config;
mod discover;
mod image;
mod options;
mod page_size;
mod render;
mod session;
mod settings;

use std::{iter, process};

use structopt::StructOpt;

use crate::options::{Options, PackOptions, Subcommand};

fn main() {
    env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Options::from_args();

    match run(options) {
        Ok(_) => {}
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    }
}

fn run(options: Options) -> anyhow::Result<()> {
    let command = options.command.unwrap_or_else(|| {
        log::info!("Running with default parameters...");
        Subcommand::Pack(PackOptions::from_iter(iter::once("pagepack")))
    });

    match command {
        Subcommand::Pack(pack_options) => commands::pack(pack_options)?,
        Subcommand::Layout(layout_options) => commands::layout(layout_options)?,
    }

    Ok(())
}
