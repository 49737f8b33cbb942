//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default locations for the configuration files of the
//! various `lookup` tools.  This is a configuration struct neutral loading engine, storing
//! only the base directory and with `load()` read the proper file or the default one.
//!
//! This encapsulates the configuration, available with `.inner()` or `.into_inner()`.
//!

use std::fmt::Debug;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use eyre::Result;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::{Status, Versioned};

/// Main name for the directory base
const TAG: &str = "lookup";

#[derive(Debug)]
pub struct ConfigFile<T: Debug + DeserializeOwned + Versioned> {
    /// This is the base directory for all files.
    basedir: PathBuf,
    /// Name of the default file inside `basedir`.
    name: String,
    inner: T,
}

/// Returns the path of the default config directory, `$HOME/.config/lookup` on UNIX.
///
#[tracing::instrument]
pub fn config_dir() -> Result<PathBuf> {
    let base = BaseDirs::new().ok_or(Status::NoHomeDir)?;

    #[cfg(unix)]
    let basedir = crate::makepath!(base.home_dir(), ".config", TAG);

    #[cfg(windows)]
    let basedir = crate::makepath!(base.data_local_dir(), TAG);

    debug!("base = {basedir:?}");
    Ok(basedir)
}

impl<T> ConfigFile<T>
where
    T: Debug + DeserializeOwned + Versioned,
{
    /// Returns the path of the default config directory
    ///
    pub fn config_path(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// Returns the path of the default config file
    ///
    pub fn default_file(&self) -> PathBuf {
        self.config_path().join(&self.name)
    }

    /// Load the file and return a struct T in the right format.
    ///
    /// Use the following search path:
    /// - file specified on CLI
    /// - `name` in the default basedir (base on $HOME or $LOCALAPPDATA)
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&str>, name: &str) -> Result<ConfigFile<T>> {
        let basedir = config_dir()?;
        let def = basedir.join(name);

        let fname = match fname {
            Some(fname) => PathBuf::from(fname),
            None => def.clone(),
        };

        if !fname.exists() {
            return Err(Status::MissingConfig(
                fname.to_string_lossy().to_string(),
                def.to_string_lossy().to_string(),
            )
            .into());
        }

        trace!("Loading config file {fname:?} from {basedir:?}");
        let inner: T = Self::parse(&fs::read_to_string(&fname)?)?;

        Ok(ConfigFile {
            basedir,
            name: name.to_string(),
            inner,
        })
    }

    /// Parse an HCL string and check its version.
    ///
    #[tracing::instrument(skip(data))]
    pub fn parse(data: &str) -> Result<T> {
        let inner: T = hcl::from_str(data)?;
        debug!("struct data = {inner:?}");

        if inner.version() != T::VERSION {
            return Err(Status::BadFileVersion(inner.version(), T::VERSION).into());
        }
        Ok(inner)
    }

    /// Return the inner configuration file
    ///
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Consume the file and keep only the configuration
    ///
    pub fn into_inner(self) -> T {
        self.inner
    }
}
