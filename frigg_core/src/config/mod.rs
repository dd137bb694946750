pub mod healthchecks;
pub mod settings;

pub use healthchecks::{compile_config, load_config, parse_config, CheckConfig, FriggConfig};
pub use settings::{DaemonSettings, LogFormat};
