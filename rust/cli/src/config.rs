//! Layered configuration: defaults, then a TOML file named by
//! `HEADSUP_CONFIG`, then `HEADSUP_*` environment variables. Command-line
//! flags are applied on top by each command.

use serde::{Deserialize, Serialize};
use std::fs;

use headsup_engine::game::TableConfig;
use headsup_engine::player::{Chips, STARTING_STACK};

pub const ENV_CONFIG: &str = "HEADSUP_CONFIG";
pub const ENV_STARTING_STACK: &str = "HEADSUP_STARTING_STACK";
pub const ENV_SMALL_BLIND: &str = "HEADSUP_SMALL_BLIND";
pub const ENV_BIG_BLIND: &str = "HEADSUP_BIG_BLIND";
pub const ENV_SEED: &str = "HEADSUP_SEED";
pub const ENV_HANDS: &str = "HEADSUP_HANDS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub starting_stack: Chips,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub seed: Option<u64>,
    pub hands: u32,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub starting_stack: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub seed: ValueSource,
    pub hands: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_stack: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            seed: ValueSource::Default,
            hands: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let table = TableConfig::default();
        Self {
            starting_stack: STARTING_STACK,
            small_blind: table.small_blind,
            big_blind: table.big_blind,
            seed: None,
            hands: 1_000,
        }
    }
}

impl Config {
    pub fn table(&self) -> TableConfig {
        TableConfig {
            small_blind: self.small_blind,
            big_blind: self.big_blind,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Resolves every layer below the command line. The result is not
/// validated; callers run [`validate`] after applying their flags.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(ENV_CONFIG)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.hands {
            cfg.hands = v;
            sources.hands = ValueSource::File;
        }
    }

    if let Ok(stack) = std::env::var(ENV_STARTING_STACK)
        && !stack.is_empty()
    {
        cfg.starting_stack = stack
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid starting stack: {}", stack)))?;
        sources.starting_stack = ValueSource::Env;
    }
    if let Ok(sb) = std::env::var(ENV_SMALL_BLIND)
        && !sb.is_empty()
    {
        cfg.small_blind = sb
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid small blind: {}", sb)))?;
        sources.small_blind = ValueSource::Env;
    }
    if let Ok(bb) = std::env::var(ENV_BIG_BLIND)
        && !bb.is_empty()
    {
        cfg.big_blind = bb
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid big blind: {}", bb)))?;
        sources.big_blind = ValueSource::Env;
    }
    if let Ok(seed) = std::env::var(ENV_SEED)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed: {}", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(hands) = std::env::var(ENV_HANDS)
        && !hands.is_empty()
    {
        cfg.hands = hands
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid hands: {}", hands)))?;
        sources.hands = ValueSource::Env;
    }

    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    starting_stack: Option<Chips>,
    #[serde(default)]
    small_blind: Option<Chips>,
    #[serde(default)]
    big_blind: Option<Chips>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    hands: Option<u32>,
}

/// Checks a configuration after every layer (flags included) is applied.
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(cfg.starting_stack > 0.0) || !cfg.starting_stack.is_finite() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_stack must be >0".into(),
        ));
    }
    if cfg.hands == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: hands must be >=1".into(),
        ));
    }
    cfg.table()
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))
}
