use crate::error::EngineUnavailable;
use tracing::info;

/// Hands a chosen game over to whatever actually runs it.
pub trait GameEngine
{
    fn launch(&mut self, id: &str) -> Result<(), EngineUnavailable>;
}

/// Stand-in used until real game engines ship. Records the request and reports
/// that nothing can take over.
#[derive(Default)]
pub struct PlaceholderEngine
{
    launches: Vec<String>,
}

impl PlaceholderEngine
{
    pub fn launches(&self) -> &[String]
    {
        &self.launches
    }
}

impl GameEngine for PlaceholderEngine
{
    fn launch(&mut self, id: &str) -> Result<(), EngineUnavailable>
    {
        info!(game = id, "starting game");
        self.launches.push(id.to_string());
        Err(EngineUnavailable {
            id: id.to_string(),
            reason: "no game engine is bundled with this hub".to_string(),
        })
    }
}
