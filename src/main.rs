use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use tickets::core::config::{self, Overrides, TicketsConfig};
use tickets::view::{Controller, ViewOptions, page};

#[derive(Parser)]
#[command(name = "tickets", about = "Terminal ticket tracker")]
struct Args {
    /// Config file to use instead of ~/.tickets/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Id of the element to mount the tracker on
    #[arg(short, long, value_name = "ID")]
    mount: Option<String>,

    /// Render tickets without comment threads
    #[arg(long)]
    no_comments: bool,

    /// Render once, print the document as HTML and exit
    #[arg(long)]
    dump_html: bool,

    /// Add a ticket with this title before starting (repeatable)
    #[arg(long = "seed", value_name = "TITLE")]
    seeds: Vec<String>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let file_config = match config::load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}; using defaults");
            TicketsConfig::default()
        }
    };
    let overrides = Overrides {
        mount_id: args.mount.as_deref(),
        comments: args.no_comments.then_some(false),
    };
    let resolved = config::resolve(&file_config, &overrides);

    // Initialize file logger; the terminal belongs to the UI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!("Tickets starting up with {:?}", resolved);

    let options = ViewOptions {
        comments: resolved.comments,
    };
    let Some(mut controller) = Controller::mount(page()?, &resolved.mount_id, options)? else {
        eprintln!("mount point #{} not found; nothing to do", resolved.mount_id);
        return Ok(());
    };

    for title in args.seeds {
        controller.add_ticket(title, "")?;
    }

    if args.dump_html {
        println!("{}", controller.document().outer_html(controller.root())?);
        return Ok(());
    }

    tickets::tui::run(controller)
}
