/// Default bound on waiting for terminated units, in milliseconds
pub const DEFAULT_TERMINATION_TIMEOUT_MS: u64 = 500;
/// File extensions `load_config` parses as YAML
pub const YAML_EXTENSIONS: [&str; 2] = ["yaml", "yml"];
/// File extension `load_config` parses as TOML
pub const TOML_EXTENSION: &str = "toml";
