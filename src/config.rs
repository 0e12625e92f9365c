use crate::error::HubError;
use crate::hub::HubOptions;
use crate::router::{game_path, HUB_PATH};
use std::env;
use std::path::PathBuf;

const ENV_CATALOG: &str = "GAME_HUB_CATALOG";
const ENV_LOG: &str = "GAME_HUB_LOG";
const ENV_SELECT: &str = "GAME_HUB_SELECT";
const DEFAULT_LOG_FILE: &str = "game-hub.log";

#[derive(Debug, PartialEq, Eq)]
pub enum Action
{
    /// Interactive hub starting at the given route.
    Open { path: String },
    List,
    Help,
}

impl Action
{
    /// Only the interactive hub logs; `list` and `help` write to stdout and leave no log file.
    pub fn writes_log(&self) -> bool
    {
        matches!(self, Action::Open { .. })
    }
}

#[derive(Debug)]
pub struct HubConfig
{
    pub action: Action,
    pub catalog_path: Option<PathBuf>,
    pub log_path: PathBuf,
    pub hub: HubOptions,
}

impl HubConfig
{
    pub fn from_args(args: &[String]) -> Result<Self, HubError>
    {
        Self::parse(args, |key| env::var(key).ok())
    }

    fn parse(args: &[String], env_var: impl Fn(&str) -> Option<String>) -> Result<Self, HubError>
    {
        let mut action: Option<Action> = None;
        let mut catalog_path: Option<PathBuf> = None;
        let mut log_path: Option<PathBuf> = None;
        let mut preferred: Option<String> = None;
        let mut particles = true;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let arg = arg.as_str();
            if arg == "-h" || arg == "--help" {
                action = Some(Action::Help);
            } else if arg == "--no-particles" {
                particles = false;
            } else if let Some(value) = option_value(arg, "--catalog", &mut iter)? {
                catalog_path = Some(PathBuf::from(value));
            } else if let Some(value) = option_value(arg, "--log", &mut iter)? {
                log_path = Some(PathBuf::from(value));
            } else if let Some(value) = option_value(arg, "--select", &mut iter)? {
                preferred = Some(value);
            } else if arg.starts_with('-') {
                return Err(HubError::Config(format!("Unknown option '{arg}'. Run with --help.")));
            } else if action.is_some() {
                return Err(HubError::Config(format!("Unexpected argument '{arg}'.")));
            } else {
                action = Some(match arg {
                    "list" => Action::List,
                    "show" => {
                        let id = iter
                            .next()
                            .ok_or_else(|| HubError::Config("Expected a game id after 'show'".to_string()))?;
                        Action::Open { path: game_path(id) }
                    }
                    "open" => {
                        let path = iter
                            .next()
                            .ok_or_else(|| HubError::Config("Expected a path after 'open'".to_string()))?;
                        Action::Open { path: path.clone() }
                    }
                    other => {
                        return Err(HubError::Config(format!(
                            "Unknown command '{other}'. Run with --help."
                        )));
                    }
                });
            }
        }

        let catalog_path = catalog_path.or_else(|| env_var(ENV_CATALOG).map(PathBuf::from));
        let log_path = log_path
            .or_else(|| env_var(ENV_LOG).map(PathBuf::from))
            .unwrap_or_else(|| env::temp_dir().join(DEFAULT_LOG_FILE));
        let preferred = preferred.or_else(|| env_var(ENV_SELECT));

        Ok(Self {
            action: action.unwrap_or(Action::Open {
                path: HUB_PATH.to_string(),
            }),
            catalog_path,
            log_path,
            hub: HubOptions {
                preferred,
                particles,
                ..HubOptions::default()
            },
        })
    }
}

/// Matches `--name value` and `--name=value`.
fn option_value<'a>(
    arg: &str,
    name: &str,
    rest: &mut impl Iterator<Item = &'a String>,
) -> Result<Option<String>, HubError>
{
    if arg == name {
        let value = rest
            .next()
            .ok_or_else(|| HubError::Config(format!("Expected value after {name}")))?;
        return Ok(Some(value.clone()));
    }
    match arg.strip_prefix(name).and_then(|tail| tail.strip_prefix('=')) {
        Some("") => Err(HubError::Config(format!("Expected value after {name}="))),
        Some(value) => Ok(Some(value.to_string())),
        None => Ok(None),
    }
}
