use std::io;

use clap::{crate_authors, crate_description, crate_version, CommandFactory, Parser};
use clap_complete::generate;
use eyre::Result;
use tracing::trace;

use lookup_common::init_logging;
use lookupctl::{
    bearing_between, bounds_around, detect_in_file, fetch_flights, match_in_file,
    track_from_file, CtlConfig, Opts, SubCommand,
};

/// Binary name, using a different binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

#[tokio::main]
async fn main() -> Result<()> {
    let opts = Opts::parse();

    // Initialise logging early
    //
    init_logging(NAME, opts.use_tree, opts.use_file.clone())?;
    trace!("Logging initialised.");

    // Defaults if there is no file
    //
    let cfg = CtlConfig::load(opts.config.as_deref())?;

    handle_subcmd(&cfg, &opts.subcmd).await
}

pub async fn handle_subcmd(cfg: &CtlConfig, subcmd: &SubCommand) -> Result<()> {
    match subcmd {
        // Handle `bearing --from --to`
        //
        SubCommand::Bearing(bopts) => {
            trace!("bearing");

            println!("{}", bearing_between(bopts));
        }

        // Handle `bounds --lat --lon`
        //
        SubCommand::Bounds(bopts) => {
            trace!("bounds");

            println!("{}", bounds_around(cfg, bopts)?);
        }

        // Handle `detect file`
        //
        SubCommand::Detect(dopts) => {
            trace!("detect");

            println!("{}", detect_in_file(dopts)?);
        }

        // Handle `fetch`
        //
        SubCommand::Fetch(fopts) => {
            trace!("fetch");

            println!("{}", fetch_flights(cfg, fopts).await?);
        }

        // Handle `match file`
        //
        SubCommand::Match(mopts) => {
            trace!("match");

            println!("{}", match_in_file(cfg, mopts)?);
        }

        // Handle `track [file]`
        //
        SubCommand::Track(topts) => {
            trace!("track");

            println!("{}", track_from_file(cfg, topts).await?);
        }

        // Standalone completion generation
        //
        // NOTE: you can generate UNIX shells completion on Windows and vice-versa.  Not worth
        //       trying to limit depending on the OS.
        //
        SubCommand::Completion(copts) => {
            let generator = copts.shell;
            generate(generator, &mut Opts::command(), NAME, &mut io::stdout());
        }

        // Standalone `version` command
        //
        SubCommand::Version => {
            banner()?;
            eprintln!("Modules: ");
            eprintln!("\t{}", lookup_common::version());
        }
    }
    Ok(())
}

/// Display banner
///
fn banner() -> Result<()> {
    Ok(eprintln!(
        r##"
{}/{} by {}
{}
"##,
        NAME,
        VERSION,
        AUTHORS,
        crate_description!()
    ))
}
