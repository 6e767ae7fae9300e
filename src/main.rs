//! The simple file server binary.

use std::env::current_dir;
use std::process::exit;
use clap::{App, ErrorKind, crate_version};
use log::{error, info};
use simple_file_server::{start_server, Config, ExitError};
use simple_file_server::config::{parse_port, DEFAULT_ADDRESS};
use simple_file_server::logger;

fn _main() -> Result<(), ExitError> {
    let app = Config::config_args(
        App::new("simple-file-server")
            .version(crate_version!())
            .about("Serves the files below a directory over HTTP")
    );
    let matches = match app.get_matches_safe() {
        Ok(matches) => matches,
        Err(err) => {
            println!("{}", err.message);
            return match err.kind {
                ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => Ok(()),
                _ => Err(ExitError::Usage)
            }
        }
    };

    logger::init(logger::level_from_verbosity(
        matches.occurrences_of("verbose"), matches.occurrences_of("quiet")
    ))?;

    let port = parse_port(matches.value_of("port").unwrap_or_default())?;
    let cur_dir = match current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            error!("Fatal: cannot get current directory ({}).", err);
            return Err(ExitError::InvalidRoot)
        }
    };
    let config = Config::from_arg_matches(&matches, &cur_dir)?;
    let address = matches.value_of("address").unwrap_or(DEFAULT_ADDRESS);

    info!("Starting server");
    let handle = start_server(config, address, port)?;
    handle.wait()?;
    Ok(())
}

fn main() {
    match _main() {
        Ok(()) => exit(0),
        Err(err) => exit(err.exit_code()),
    }
}
