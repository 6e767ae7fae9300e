//! Configuration.
//!
//! The server is configured once at start-up from the command line and two
//! optional JSON side-files. The resulting [`Config`] never changes
//! afterwards and is shared by all request handlers.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use clap::{App, AppSettings, Arg, ArgMatches};
use log::{error, info, warn};
use serde::de::DeserializeOwned;
use crate::error::{ExitError, Failed};
use crate::server::{AccessPolicy, MimeTable};


//------------ Constants -----------------------------------------------------

/// The side-file with additional MIME types.
pub const MIME_TYPES_FILE: &str = "mime-types.json";

/// The side-files with additional clients, in the order they are merged.
pub const CLIENT_FILES: &[&str] = &["clients.json", "hosts.json"];

/// The address we listen on if none is given.
pub const DEFAULT_ADDRESS: &str = "0.0.0.0";


//------------ Config --------------------------------------------------------

/// Everything a request handler needs to know.
#[derive(Clone, Debug)]
pub struct Config {
    /// The directory files are served from.
    pub root: PathBuf,

    /// Content types by file extension.
    pub mime_types: MimeTable,

    /// Which clients may access the server.
    pub access: AccessPolicy,

    /// The value for an `Access-Control-Allow-Origin` header, if any.
    pub cors_origin: Option<String>,
}

impl Config {
    /// Creates a config with the built-in defaults for the given root.
    pub fn new(root: PathBuf) -> Config {
        Config {
            root,
            mime_types: MimeTable::default(),
            access: AccessPolicy::default(),
            cors_origin: None,
        }
    }

    /// Adds the command line arguments understood by the config.
    ///
    /// Negative numbers are taken as values so that a negative port is
    /// reported as an invalid port rather than an unknown option.
    pub fn config_args<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
        app
        .setting(AppSettings::AllowNegativeNumbers)
        .arg(Arg::with_name("port")
            .required(true)
            .value_name("PORT")
            .help("port to listen on")
        )
        .arg(Arg::with_name("root_directory")
            .required(true)
            .value_name("ROOT_DIRECTORY")
            .help("directory to serve files from")
        )
        .arg(Arg::with_name("address")
            .short("a")
            .long("address")
            .value_name("BIND_ADDRESS")
            .default_value(DEFAULT_ADDRESS)
            .takes_value(true)
            .help("address to listen on")
        )
        .arg(Arg::with_name("cors")
            .long("cors")
            .value_name("ORIGIN")
            .takes_value(true)
            .help("send Access-Control-Allow-Origin with this value")
        )
        .arg(Arg::with_name("config_dir")
            .long("config-dir")
            .value_name("DIR")
            .takes_value(true)
            .help("directory with mime-types.json and clients.json")
        )
        .arg(Arg::with_name("verbose")
            .short("v")
            .long("verbose")
            .multiple(true)
            .help("log more information, twice for even more")
        )
        .arg(Arg::with_name("quiet")
            .short("q")
            .long("quiet")
            .multiple(true)
            .help("log less information, twice for no information")
        )
    }

    /// Creates the config from parsed command line arguments.
    ///
    /// Relative paths are taken relative to `cur_dir`, which is also where
    /// side-files are looked for unless `--config-dir` says otherwise.
    pub fn from_arg_matches(
        matches: &ArgMatches,
        cur_dir: &Path,
    ) -> Result<Self, ExitError> {
        let root = validate_root(
            matches.value_of("root_directory").unwrap_or_default(), cur_dir
        )?;
        let mut res = Config::new(root);
        let config_dir = match matches.value_of("config_dir") {
            Some(dir) => cur_dir.join(dir),
            None => cur_dir.to_path_buf()
        };
        res.load_side_files(&config_dir);
        res.cors_origin = matches.value_of("cors").map(Into::into);
        Ok(res)
    }

    /// Merges the optional side-files found in `dir`.
    ///
    /// Problems with the files are logged and otherwise ignored.
    pub fn load_side_files(&mut self, dir: &Path) {
        let types = read_json_file::<HashMap<String, String>>(
            &dir.join(MIME_TYPES_FILE)
        );
        if let Ok(Some(types)) = types {
            self.add_mime_types(types);
        }
        for name in CLIENT_FILES {
            let clients = read_json_file::<Vec<String>>(&dir.join(name));
            if let Ok(Some(clients)) = clients {
                self.add_clients(clients);
            }
        }
    }

    pub fn add_mime_types(&mut self, types: HashMap<String, String>) {
        let count = types.len();
        self.mime_types.extend(types);
        info!("Added {} MIME types", count);
    }

    pub fn add_clients(&mut self, clients: Vec<String>) {
        let access = std::mem::take(&mut self.access);
        self.access = access.merge(clients);
        match self.access {
            AccessPolicy::AllowAll => info!("All clients allowed"),
            AccessPolicy::AllowListed(ref list) => {
                info!("Allowed clients: {}", list.join(", "))
            }
        }
    }
}


//------------ Argument Validation -------------------------------------------

/// Parses a port number, which must be between 1 and 65535.
pub fn parse_port(value: &str) -> Result<u16, ExitError> {
    match value.parse::<i64>() {
        Ok(port) if (1..=65535).contains(&port) => Ok(port as u16),
        _ => {
            error!("Invalid port: {}", value);
            Err(ExitError::InvalidPort)
        }
    }
}

/// Checks that `value` names an existing directory.
pub fn validate_root(value: &str, cur_dir: &Path) -> Result<PathBuf, ExitError> {
    let path = cur_dir.join(value);
    match fs::metadata(&path) {
        Ok(ref metadata) if metadata.is_dir() => Ok(path),
        _ => {
            error!("Invalid path: {}", value);
            Err(ExitError::InvalidRoot)
        }
    }
}


//------------ Side-files ----------------------------------------------------

/// Reads and parses a JSON side-file.
///
/// A missing file quietly results in `Ok(None)`. Any other problem is
/// logged as a warning.
fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, Failed> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(ref err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(None)
        }
        Err(err) => {
            warn!("Failed to read {}: {}", path.display(), err);
            return Err(Failed)
        }
    };
    match serde_json::from_slice(&data) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            warn!("Failed to parse {}: {}", path.display(), err);
            Err(Failed)
        }
    }
}


//============ Tests =========================================================
