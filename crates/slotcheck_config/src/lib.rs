use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::Path;
use tracing::debug;

pub mod models;

pub use models::*;

/// Prefix for environment overrides, e.g. `SLOTCHECK__TIMEOUT_SECS=5`.
pub const ENV_PREFIX: &str = "SLOTCHECK";

/// Config file looked up in the working directory when none is given. Any
/// extension the `config` crate understands is accepted; a missing file is fine.
pub const DEFAULT_CONFIG_NAME: &str = "slotcheck";

/// Loads the smoke run configuration.
///
/// Sources, later ones overriding earlier ones:
/// 1. built-in defaults
/// 2. the config file (`config_file` if given, which must then exist; otherwise
///    an optional `slotcheck.*` in the working directory)
/// 3. environment variables prefixed with `SLOTCHECK__`
pub fn load_config(config_file: Option<&Path>) -> Result<SmokeConfig, ConfigError> {
    ensure_dotenv_loaded();
    load_config_with_prefix(config_file, ENV_PREFIX)
}

/// Same as [`load_config`] with a custom environment prefix and without
/// touching the dotenv file.
pub fn load_config_with_prefix(
    config_file: Option<&Path>,
    prefix: &str,
) -> Result<SmokeConfig, ConfigError> {
    let file_source = match config_file {
        Some(path) => {
            let path = path.to_str().ok_or_else(|| {
                ConfigError::Message(format!("config path is not valid UTF-8: {}", path.display()))
            })?;
            File::with_name(path).required(true)
        }
        None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };

    let builder = Config::builder().add_source(file_source).add_source(
        Environment::with_prefix(prefix)
            .separator("__")
            .try_parsing(true),
    );

    debug!("loading configuration: {builder:?}");

    let config: SmokeConfig = builder.build()?.try_deserialize()?;
    Ok(config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file into the process environment, at most once.
///
/// The path defaults to `.env` and can be overridden with `DOTENV_OVERRIDE`.
/// Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
