use std::io;
use thiserror::Error;

/// A requested game id that the catalog does not know about.
///
/// `requested` is `None` when the route carried no id at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("game not found: {}", .requested.as_deref().unwrap_or("<none>"))]
pub struct NotFound
{
    pub requested: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("game engine unavailable for '{id}': {reason}")]
pub struct EngineUnavailable
{
    pub id: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum HubError
{
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
    #[error("{0}")]
    Config(String),
    #[error("catalog error: {0}")]
    Catalog(String),
    #[error("failed to start logging: {0}")]
    Logging(String),
    #[error(transparent)]
    NotFound(#[from] NotFound),
    #[error(transparent)]
    Engine(#[from] EngineUnavailable),
}
