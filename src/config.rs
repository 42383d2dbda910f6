use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, ValueEnum};
use serde::Deserialize;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Positional,
    Identity,
    Greedy,
    EditDistance,
    MinCostFlow,
    /// Exact matches first, then greedy matching of what is left.
    Combined,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Unit {
    Lines,
    Words,
    Chars,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    Debug,
    Pairs,
    Side,
    Summary,
}

macro_rules! config_structs {
    {
        $(
            $( #[config_opt($attr:meta)] )*
            pub $name:ident: $typ:ty,
        )*
        $(
            #[config_alias($atarget:ident = $avalue:expr)]
            $( #[config_opt($aattr:meta)] )*
            pub $aname:ident: bool,
        )*
    } => {
        #[derive(Debug, Clone, PartialEq)]
        pub struct Config {
            $( pub $name: $typ, )*
        }

        #[derive(Args, Deserialize, Default)]
        #[serde(deny_unknown_fields)]
        pub struct ConfigOpt {
            $( $( #[$aattr] )* #[serde(skip)] pub $aname: bool, )*
            $( $( #[$attr] )* pub $name: Option<$typ>, )*
        }

        impl Config {
            pub fn update(self, mut opt: ConfigOpt) -> Config {
                $(
                    if opt.$aname {
                        opt.$atarget = Some($avalue);
                    }
                )*
                Config {
                    $( $name: opt.$name.unwrap_or(self.$name), )*
                }
            }
        }
    }
}

config_structs! {
    #[config_opt(arg(short, long))]
    pub strategy: Strategy,

    #[config_opt(arg(short, long))]
    pub unit: Unit,

    #[config_opt(arg(short, long))]
    pub mode: OutputMode,

    #[config_opt(arg(long, value_name = "NUM"))]
    pub gap_weight: f64,

    #[config_opt(arg(long, value_name = "NUM"))]
    pub distance_weight: f64,

    #[config_opt(arg(short = 'j', long, value_name = "NUM", group = "threads_group"))]
    pub threads: usize,

    #[config_opt(arg(long, require_equals = true, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL", group = "validate_group"))]
    pub validate: bool,

    #[config_alias(threads = 1)]
    #[config_opt(arg(long, group = "threads_group"))]
    pub sequential: bool,

    #[config_alias(validate = false)]
    #[config_opt(arg(long, group = "validate_group"))]
    pub no_validate: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            strategy: Strategy::Combined,
            unit: Unit::Lines,
            mode: OutputMode::Pairs,
            gap_weight: 1.0,
            distance_weight: 1.0,
            threads: 0,
            validate: true,
        }
    }
}

pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gridmatch").join("config.toml"))
}

pub fn parse_config_file(text: &str) -> anyhow::Result<ConfigOpt> {
    Ok(toml::from_str(text)?)
}

/// Reads the user's config file, if there is one.
pub fn read_config_file() -> anyhow::Result<ConfigOpt> {
    let Some(path) = config_file_path() else {
        return Ok(ConfigOpt::default());
    };
    if !path.exists() {
        debug!(path = %path.display(), "no config file");
        return Ok(ConfigOpt::default());
    }
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    debug!(path = %path.display(), "read config file");
    parse_config_file(&text).with_context(|| format!("parsing {}", path.display()))
}
