use tracing::info;

pub const HUB_PATH: &str = "/";
pub const GAME_ROUTE_PREFIX: &str = "/game/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route
{
    Hub,
    /// Anything under `/game/`; the id still has to be resolved.
    Game,
    Unknown,
}

pub fn game_path(id: &str) -> String
{
    format!("{GAME_ROUTE_PREFIX}{id}")
}

/// Holds the current location and answers route questions about it.
pub struct Router
{
    location: String,
    history: Vec<String>,
}

impl Router
{
    pub fn new(path: &str) -> Self
    {
        Self {
            location: normalize_path(path),
            history: Vec::new(),
        }
    }

    pub fn current_path(&self) -> &str
    {
        &self.location
    }

    pub fn route(&self) -> Route
    {
        let path = strip_query(&self.location);
        if path == HUB_PATH {
            Route::Hub
        } else if path.starts_with(GAME_ROUTE_PREFIX) {
            Route::Game
        } else {
            Route::Unknown
        }
    }

    /// The `:gameId` parameter of `/game/:gameId`. Only an exact one-segment
    /// match yields a value, like a route pattern matcher would.
    pub fn matched_game_id(&self) -> Option<&str>
    {
        let rest = strip_query(&self.location).strip_prefix(GAME_ROUTE_PREFIX)?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        if rest.is_empty() || rest.contains('/') {
            return None;
        }
        Some(rest)
    }

    pub fn navigate(&mut self, path: &str)
    {
        let next = normalize_path(path);
        info!(from = %self.location, to = %next, "navigate");
        let previous = std::mem::replace(&mut self.location, next);
        self.history.push(previous);
    }

    pub fn history(&self) -> &[String]
    {
        &self.history
    }
}

fn normalize_path(path: &str) -> String
{
    let trimmed = path.trim();
    if trimmed.is_empty() {
        HUB_PATH.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

pub(crate) fn strip_query(path: &str) -> &str
{
    let end = path.find(|ch| ch == '?' || ch == '#').unwrap_or(path.len());
    &path[..end]
}
