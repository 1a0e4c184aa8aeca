// Configuration management for Twitch EventSub applications
//
// Settings come from `EVENTSUB_*` environment variables, an optional `.env`
// file, or a JSON/TOML file, and are validated before use.

pub mod env;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use settings::{
    DEFAULT_API_BASE_URL, DEFAULT_AUTH_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, ENV_PREFIX,
    EventSubSettings, load_dotenv,
};
pub use validation::{ConfigValidator, Validate};
