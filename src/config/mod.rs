mod defaults;
mod loader;

pub use defaults::{ClientConfig, LiskConfig, PeersConfig};
pub use loader::{get_default_config, load_configuration, load_lisk_config, write_config_to};
