use super::{Command, Status};
use crate::error::NotFound;
use crate::games::engine::GameEngine;
use crate::games::{Catalog, GameDescriptor};
use crate::render::{wrap, Canvas, Rect, Rgb, Style};
use crate::router::{strip_query, Router, GAME_ROUTE_PREFIX, HUB_PATH};
use crate::terminal::{KeyListeners, KeySubscription, ListenerId};
use crate::theme::AccentTag;
use crossterm::event::{KeyCode, KeyEvent};
use tracing::{debug, info, warn};

const DESCRIPTION_LINES: usize = 4;

/// Picks the game id for the detail page. The structured route parameter
/// wins; the raw path is only parsed when that parameter is missing or empty,
/// taking the first segment after `/game/`.
pub fn normalize_requested_id(structured: Option<&str>, raw_path: &str) -> Option<String>
{
    if let Some(id) = structured.map(str::trim).filter(|id| !id.is_empty()) {
        return Some(id.to_string());
    }
    let rest = strip_query(raw_path.trim()).strip_prefix(GAME_ROUTE_PREFIX)?;
    rest.split('/')
        .next()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

pub fn resolve<'a>(catalog: &'a Catalog, candidate: Option<&str>) -> Result<&'a GameDescriptor, NotFound>
{
    let not_found = || NotFound {
        requested: candidate.map(str::to_string),
    };
    match candidate {
        Some(id) if !id.is_empty() => catalog.get(id).ok_or_else(not_found),
        _ => Err(not_found()),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailAction
{
    StartGame,
    Settings,
    Leaderboard,
    ReturnToCatalog,
}

const FOUND_ACTIONS: [DetailAction; 4] = [
    DetailAction::StartGame,
    DetailAction::Settings,
    DetailAction::Leaderboard,
    DetailAction::ReturnToCatalog,
];
const NOT_FOUND_ACTIONS: [DetailAction; 1] = [DetailAction::ReturnToCatalog];

impl DetailAction
{
    pub fn label(self) -> &'static str
    {
        match self {
            DetailAction::StartGame => "[s] Start Game",
            DetailAction::Settings => "[o] Settings",
            DetailAction::Leaderboard => "[l] Leaderboard",
            DetailAction::ReturnToCatalog => "[b] Back to Game Hub",
        }
    }
}

pub struct DetailView<'a>
{
    outcome: Result<&'a GameDescriptor, NotFound>,
    subscription: KeySubscription,
    focus: usize,
    status: Option<Status>,
}

impl<'a> DetailView<'a>
{
    pub fn mount(catalog: &'a Catalog, router: &Router, listeners: &KeyListeners) -> Self
    {
        let requested = normalize_requested_id(router.matched_game_id(), router.current_path());
        let outcome = resolve(catalog, requested.as_deref());
        match &outcome {
            Ok(game) => debug!(game = %game.id, "detail resolved"),
            Err(err) => info!(path = router.current_path(), "{err}"),
        }
        Self {
            outcome,
            subscription: listeners.subscribe("detail"),
            focus: 0,
            status: None,
        }
    }

    pub fn listener_id(&self) -> ListenerId
    {
        self.subscription.id()
    }

    pub fn outcome(&self) -> Result<&'a GameDescriptor, &NotFound>
    {
        self.outcome.as_ref().map(|game| *game)
    }

    pub fn actions(&self) -> &'static [DetailAction]
    {
        if self.outcome.is_ok() {
            &FOUND_ACTIONS
        } else {
            &NOT_FOUND_ACTIONS
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, engine: &mut dyn GameEngine) -> Command
    {
        let count = self.actions().len();
        let action = match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => DetailAction::ReturnToCatalog,
            KeyCode::Left | KeyCode::BackTab => {
                self.focus = (self.focus + count - 1) % count;
                return Command::Stay;
            }
            KeyCode::Right | KeyCode::Tab => {
                self.focus = (self.focus + 1) % count;
                return Command::Stay;
            }
            KeyCode::Enter => self.actions()[self.focus],
            KeyCode::Char('s') => DetailAction::StartGame,
            KeyCode::Char('o') => DetailAction::Settings,
            KeyCode::Char('l') => DetailAction::Leaderboard,
            _ => return Command::Stay,
        };
        if !self.actions().contains(&action) {
            return Command::Stay;
        }
        self.activate(action, engine)
    }

    fn activate(&mut self, action: DetailAction, engine: &mut dyn GameEngine) -> Command
    {
        match action {
            DetailAction::ReturnToCatalog => return Command::Navigate(HUB_PATH.to_string()),
            DetailAction::StartGame => {
                if let Ok(game) = &self.outcome {
                    self.status = match engine.launch(&game.id) {
                        Ok(()) => None,
                        Err(err) => {
                            warn!(game = %err.id, reason = %err.reason, "game engine unavailable");
                            Some(Status::error(err.to_string()))
                        }
                    };
                }
            }
            DetailAction::Settings => {
                info!("opening game settings");
                self.status = Some(Status::info("Settings are not available yet"));
            }
            DetailAction::Leaderboard => {
                info!("showing leaderboard");
                self.status = Some(Status::info("Leaderboard is not available yet"));
            }
        }
        Command::Stay
    }

    pub fn draw(&self, canvas: &mut Canvas)
    {
        match &self.outcome {
            Ok(game) => self.draw_game(canvas, game),
            Err(_) => self.draw_not_found(canvas),
        }
    }

    fn draw_not_found(&self, canvas: &mut Canvas)
    {
        let middle = canvas.height() / 2;
        canvas.text_centered(middle.saturating_sub(1), "Game Not Found", Style::fg(Rgb::RED).bold());
        let label = format!("> {} <", DetailAction::ReturnToCatalog.label());
        let color = AccentTag::Primary.theme().accent;
        canvas.text_centered(middle + 1, &label, Style::fg(color).bold());
    }

    fn draw_game(&self, canvas: &mut Canvas, game: &GameDescriptor)
    {
        let theme = game.accent.theme();
        let width = canvas.width();
        canvas.text(2, 0, "< Back to Game Hub [b]", Style::fg(Rgb::MUTED));

        canvas.text_centered(2, &game.name, Style::fg(theme.accent).bold());
        let mut row: u16 = 3;
        let description = wrap(&game.description, width.saturating_sub(8) as usize);
        for (idx, line) in description.iter().take(DESCRIPTION_LINES).enumerate() {
            let cut = idx + 1 == DESCRIPTION_LINES && description.len() > DESCRIPTION_LINES;
            let line = if cut { format!("{line} ...") } else { line.clone() };
            canvas.text_centered(row, &line, Style::fg(Rgb::MUTED));
            row += 1;
        }
        row += 1;

        let column_width = (width.saturating_sub(6) / 2).max(10);
        let left = 2;
        let right = left + column_width + 2;
        // Leave room for the actions and status below the panels.
        let room = canvas.height().saturating_sub(row).saturating_sub(4).max(6);
        let wanted = game.rules.len().saturating_add(game.objectives.len()).saturating_add(5);
        let panel_height = u16::try_from(wanted).unwrap_or(u16::MAX).min(room);
        let panel_end = row.saturating_add(panel_height - 1);

        let info_area = Rect {
            x: left,
            y: row,
            width: column_width,
            height: 6,
        };
        canvas.frame(info_area, theme.border, false);
        let inner = column_width.saturating_sub(4);
        canvas.text_clipped(left + 2, row + 1, &format!("Mode:    {}", game.category), inner, Style::fg(Rgb::WHITE));
        canvas.text_clipped(left + 2, row + 2, &format!("Players: {}", game.player_range), inner, Style::fg(Rgb::WHITE));
        canvas.text_clipped(left + 2, row + 3, "Image:", inner, Style::fg(Rgb::MUTED));
        canvas.text_clipped(left + 2, row + 4, &game.thumbnail_ref, inner, Style::fg(Rgb::DIM));

        let rules_area = Rect {
            x: right,
            y: row,
            width: column_width,
            height: panel_height,
        };
        canvas.frame(rules_area, theme.border, false);
        canvas.text(right + 2, row + 1, "Game Rules", Style::fg(theme.accent).bold());
        let mut line_row = row + 2;
        for (idx, rule) in game.rules.iter().enumerate() {
            if line_row >= panel_end {
                break;
            }
            let text = format!("{}. {rule}", idx + 1);
            canvas.text_clipped(right + 2, line_row, &text, inner, Style::fg(Rgb::WHITE));
            line_row += 1;
        }
        line_row = line_row.saturating_add(1);
        if line_row < panel_end {
            canvas.text(right + 2, line_row, "Objectives", Style::fg(theme.accent).bold());
        }
        line_row = line_row.saturating_add(1);
        for objective in &game.objectives {
            if line_row >= panel_end {
                break;
            }
            canvas.text_clipped(right + 2, line_row, &format!("* {objective}"), inner, Style::fg(Rgb::WHITE));
            line_row += 1;
        }

        let actions_row = row.saturating_add(panel_height.max(6)).saturating_add(1);
        let mut x = 2;
        for (idx, action) in self.actions().iter().enumerate() {
            let style = if idx == self.focus {
                Style::fg(theme.highlight).bold()
            } else {
                Style::fg(Rgb::WHITE)
            };
            let label = if idx == self.focus {
                format!("> {} <", action.label())
            } else {
                format!("  {}  ", action.label())
            };
            x = canvas.text(x, actions_row, &label, style) + 1;
        }

        if let Some(status) = &self.status {
            canvas.text(2, actions_row.saturating_add(2), &status.text, Style::fg(status.color));
        }
        canvas.text_centered(
            canvas.height().saturating_sub(1),
            "<-/-> choose  Enter activate  s start  o settings  l leaderboard  b back",
            Style::fg(Rgb::DIM),
        );
    }
}
