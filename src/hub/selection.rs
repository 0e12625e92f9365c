use super::particles::Particles;
use super::{Command, HubOptions, Status};
use crate::error::EngineUnavailable;
use crate::games::engine::GameEngine;
use crate::games::{Catalog, GameDescriptor};
use crate::render::{wrap, Canvas, Rect, Rgb, Style};
use crate::router::game_path;
use crate::terminal::{KeyListeners, KeySubscription, ListenerId};
use crate::theme::AccentTag;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Highlighted on entry when the catalog has it.
pub const DEFAULT_GAME: &str = "red-light-green";

const LAUNCH_DELAY: Duration = Duration::from_secs(2);
const CARD_WIDTH: u16 = 28;
const CARD_HEIGHT: u16 = 8;
const CARD_GAP: u16 = 2;
const GRID_TOP: u16 = 5;
// Browse link, buttons, status and the controls line under the grid.
const FOOTER_ROWS: u16 = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction
{
    Previous,
    Next,
}

/// Which game is highlighted. Once initialised over a non-empty catalog it
/// always points at a catalog entry.
pub struct SelectionState<'a>
{
    catalog: &'a Catalog,
    default_index: Option<usize>,
    highlighted: Option<usize>,
}

impl<'a> SelectionState<'a>
{
    /// `preferred` wins when it names a catalog entry; otherwise
    /// `DEFAULT_GAME`, then the first game, then nothing.
    pub fn new(catalog: &'a Catalog, preferred: Option<&str>) -> Self
    {
        let default_index = preferred
            .and_then(|id| catalog.position(id))
            .or_else(|| catalog.position(DEFAULT_GAME))
            .or(if catalog.is_empty() { None } else { Some(0) });
        Self {
            catalog,
            default_index,
            highlighted: default_index,
        }
    }

    pub fn highlighted_id(&self) -> Option<&'a str>
    {
        self.highlighted_game().map(|game| game.id.as_str())
    }

    pub fn highlighted_game(&self) -> Option<&'a GameDescriptor>
    {
        self.highlighted.and_then(|idx| self.catalog.list().get(idx))
    }

    pub fn highlighted_index(&self) -> Option<usize>
    {
        self.highlighted
    }

    /// Returns whether the highlight moved. Unknown ids are ignored.
    pub fn select_by_id(&mut self, id: &str) -> bool
    {
        match self.catalog.position(id) {
            Some(idx) => {
                let changed = self.highlighted != Some(idx);
                self.highlighted = Some(idx);
                changed
            }
            None => false,
        }
    }

    pub fn select_relative(&mut self, direction: Direction)
    {
        let len = self.catalog.len();
        if len == 0 {
            return;
        }
        let next = match (self.highlighted, direction) {
            (Some(idx), Direction::Next) => (idx + 1) % len,
            (Some(idx), Direction::Previous) => (idx + len - 1) % len,
            (None, Direction::Next) => 0,
            (None, Direction::Previous) => len - 1,
        };
        self.highlighted = Some(next);
    }

    pub fn reset(&mut self)
    {
        self.highlighted = self.default_index;
    }

    /// Hands the highlighted game to `engine`. `None` means nothing was
    /// highlighted and the engine was not called.
    pub fn confirm_start(&self, engine: &mut dyn GameEngine) -> Option<Result<(), EngineUnavailable>>
    {
        let id = self.highlighted_id()?;
        Some(engine.launch(id))
    }
}

struct PendingLaunch
{
    id: String,
    since: Instant,
}

pub struct SelectionView<'a>
{
    state: SelectionState<'a>,
    subscription: KeySubscription,
    launch: Option<PendingLaunch>,
    status: Option<Status>,
    particles: Option<Particles>,
    mounted_at: Instant,
    cards: Vec<(usize, Rect)>,
}

impl<'a> SelectionView<'a>
{
    pub fn mount(
        catalog: &'a Catalog,
        listeners: &KeyListeners,
        options: &HubOptions,
        now: Instant,
    ) -> Self
    {
        let particles = if options.particles {
            Some(Particles::new(&mut rand::thread_rng(), options.particle_count))
        } else {
            None
        };
        Self {
            state: SelectionState::new(catalog, options.preferred.as_deref()),
            subscription: listeners.subscribe("selection"),
            launch: None,
            status: None,
            particles,
            mounted_at: now,
            cards: Vec::new(),
        }
    }

    pub fn listener_id(&self) -> ListenerId
    {
        self.subscription.id()
    }

    pub fn state(&self) -> &SelectionState<'a>
    {
        &self.state
    }

    pub fn is_launching(&self) -> bool
    {
        self.launch.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Command
    {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Command::Quit,
            KeyCode::Left | KeyCode::Char('h') => self.move_highlight(Direction::Previous),
            KeyCode::Right | KeyCode::Char('l') => self.move_highlight(Direction::Next),
            KeyCode::Enter => self.request_start(now),
            KeyCode::Home => {
                if self.launch.is_none() {
                    self.state.reset();
                }
            }
            KeyCode::Char('r') | KeyCode::Char('i') => {
                if let Some(pending) = &self.launch {
                    debug!(game = %pending.id, "rules ignored while loading");
                } else if let Some(id) = self.state.highlighted_id() {
                    info!(game = id, "showing game rules");
                    return Command::Navigate(game_path(id));
                }
            }
            KeyCode::Char('b') => {
                info!("showing leaderboard");
                self.status = Some(Status::info("Leaderboard is not available yet"));
            }
            KeyCode::Char('m') => {
                info!("showing more games");
                self.status = Some(Status::info("More games are on the way"));
            }
            _ => {}
        }
        Command::Stay
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Command
    {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || self.launch.is_some() {
            return Command::Stay;
        }
        if let Some(idx) = card_at(&self.cards, mouse.column, mouse.row) {
            if let Some(game) = self.state.catalog.list().get(idx) {
                if self.state.select_by_id(&game.id) {
                    debug!(game = %game.id, "card clicked");
                }
            }
        }
        Command::Stay
    }

    /// Fires the pending launch once the loading animation has run.
    pub fn tick(&mut self, now: Instant, engine: &mut dyn GameEngine)
    {
        let due = self
            .launch
            .as_ref()
            .is_some_and(|pending| now.saturating_duration_since(pending.since) >= LAUNCH_DELAY);
        if !due {
            return;
        }
        if let Some(pending) = self.launch.take() {
            // Navigation is locked while loading, so the highlight is still the requested game.
            debug_assert_eq!(self.state.highlighted_id(), Some(pending.id.as_str()));
            debug!(game = %pending.id, "loading finished");
        }
        self.status = match self.state.confirm_start(engine) {
            Some(Ok(())) => None,
            Some(Err(err)) => {
                warn!(game = %err.id, reason = %err.reason, "game engine unavailable");
                Some(Status::error(err.to_string()))
            }
            None => None,
        };
    }

    fn move_highlight(&mut self, direction: Direction)
    {
        if self.launch.is_some() {
            return;
        }
        self.state.select_relative(direction);
        debug!(game = self.state.highlighted_id().unwrap_or("<none>"), "highlight moved");
    }

    fn request_start(&mut self, now: Instant)
    {
        if self.launch.is_some() {
            return;
        }
        if let Some(id) = self.state.highlighted_id() {
            self.status = None;
            self.launch = Some(PendingLaunch {
                id: id.to_string(),
                since: now,
            });
        }
    }

    pub fn draw(&mut self, canvas: &mut Canvas, now: Instant)
    {
        let elapsed = now.saturating_duration_since(self.mounted_at);
        if let Some(particles) = &self.particles {
            particles.draw(canvas, elapsed);
        }

        let title_color = AccentTag::Primary.theme().accent;
        canvas.text_centered(1, "G A M E   H U B", Style::fg(title_color).bold());
        canvas.text_centered(
            2,
            "Select your next gaming adventure from our collection of immersive experiences",
            Style::fg(Rgb::MUTED),
        );

        let games = self.state.catalog.list();
        if games.is_empty() {
            canvas.text_centered(GRID_TOP + 2, "No games available", Style::fg(Rgb::MUTED));
            self.cards.clear();
            draw_controls(canvas);
            return;
        }

        let selected = self.state.highlighted_index();
        let rows = visible_rows(canvas.height(), GRID_TOP);
        self.cards = card_layout(canvas.width(), games.len(), GRID_TOP, rows, selected);
        for (idx, area) in &self.cards {
            if let Some(game) = games.get(*idx) {
                draw_card(canvas, *area, game, selected == Some(*idx));
            }
        }

        let grid_bottom = self
            .cards
            .iter()
            .map(|(_, area)| area.y.saturating_add(area.height))
            .max()
            .unwrap_or(GRID_TOP);
        let shown = self.cards.len();
        let browse = if shown < games.len() {
            format!("[m] Browse All Games ({shown} of {})  >>", games.len())
        } else {
            "[m] Browse All Games  >>".to_string()
        };
        canvas.text_centered(grid_bottom.saturating_add(1), &browse, Style::fg(Rgb::MUTED));

        let start_label = match &self.launch {
            Some(pending) => {
                let dots = (now.saturating_duration_since(pending.since).as_millis() / 400) % 4;
                format!("[ Loading{:<3} ]", ".".repeat(dots as usize))
            }
            None => "[Enter] Start Game >".to_string(),
        };
        let start_color = self
            .state
            .highlighted_game()
            .map(|game| game.accent.theme().highlight)
            .unwrap_or(Rgb::WHITE);
        let buttons_row = grid_bottom.saturating_add(3);
        let rest = "   [r] Game Rules   [b] Leaderboard";
        let total = (start_label.chars().count() + rest.chars().count()) as u16;
        let x = canvas.width().saturating_sub(total) / 2;
        let x = canvas.text(x, buttons_row, &start_label, Style::fg(start_color).bold());
        canvas.text(x, buttons_row, rest, Style::fg(Rgb::WHITE));

        if let Some(status) = &self.status {
            canvas.text_centered(buttons_row.saturating_add(2), &status.text, Style::fg(status.color));
        }
        draw_controls(canvas);
    }
}

fn draw_controls(canvas: &mut Canvas)
{
    let row = canvas.height().saturating_sub(1);
    canvas.text_centered(
        row,
        "<-/-> h/l choose  Home reset  Enter start  r rules  b leaderboard  m more  q quit",
        Style::fg(Rgb::DIM),
    );
}

fn draw_card(canvas: &mut Canvas, area: Rect, game: &GameDescriptor, selected: bool)
{
    let theme = game.accent.theme();
    let border = if selected { theme.accent } else { theme.border };
    canvas.frame(area, border, selected);
    if area.width < 4 || area.height < 4 {
        return;
    }

    let inner_x = area.x + 2;
    let inner_width = area.width.saturating_sub(4);
    let name_style = if selected {
        Style::fg(theme.accent).bold()
    } else {
        Style::fg(Rgb::WHITE).bold()
    };
    canvas.text_clipped(inner_x, area.y + 1, &game.name, inner_width, name_style);
    let meta = format!("{} | {}", game.category, game.player_range);
    canvas.text_clipped(inner_x, area.y + 2, &meta, inner_width, Style::fg(Rgb::MUTED));

    let last_row = area.y + area.height - 2;
    let description_rows = last_row.saturating_sub(area.y + 3) as usize;
    for (offset, line) in wrap(&game.description, inner_width as usize)
        .iter()
        .take(description_rows)
        .enumerate()
    {
        canvas.text(inner_x, area.y + 3 + offset as u16, line, Style::fg(Rgb::DIM));
    }

    if selected {
        canvas.text_clipped(inner_x, last_row, "> SELECTED", inner_width, Style::fg(theme.highlight).bold());
    }
}

/// How many card rows fit between `top` and the footer; never less than one.
pub fn visible_rows(height: u16, top: u16) -> usize
{
    let free = height.saturating_sub(top).saturating_sub(FOOTER_ROWS);
    usize::from(free / (CARD_HEIGHT + 1)).max(1)
}

/// Card rectangles for `count` games, laid out left to right in as many
/// columns as fit and centred horizontally. Only `rows` rows are returned,
/// scrolled so the row holding `focus` is on screen. Each rectangle is
/// paired with the catalog index it shows.
pub fn card_layout(width: u16, count: usize, top: u16, rows: usize, focus: Option<usize>) -> Vec<(usize, Rect)>
{
    if count == 0 || rows == 0 {
        return Vec::new();
    }
    let card_width = CARD_WIDTH.min(width.max(1));
    let step = usize::from(card_width) + usize::from(CARD_GAP);
    let columns = ((usize::from(width) + usize::from(CARD_GAP)) / step).clamp(1, count);
    let total = columns * usize::from(card_width) + (columns - 1) * usize::from(CARD_GAP);
    let left = usize::from(width).saturating_sub(total) / 2;

    let focus_row = focus.unwrap_or(0).min(count - 1) / columns;
    let first_row = (focus_row + 1).saturating_sub(rows);
    let first = first_row * columns;
    let last = count.min(first + rows * columns);

    (first..last)
        .filter_map(|idx| {
            let col = idx % columns;
            let row = idx / columns - first_row;
            let x = u16::try_from(left + col * step).ok()?;
            let y = u16::try_from(usize::from(top) + row * usize::from(CARD_HEIGHT + 1)).ok()?;
            Some((
                idx,
                Rect {
                    x,
                    y,
                    width: card_width,
                    height: CARD_HEIGHT,
                },
            ))
        })
        .collect()
}

/// Catalog index of the card under (`column`, `row`).
pub fn card_at(cards: &[(usize, Rect)], column: u16, row: u16) -> Option<usize>
{
    cards
        .iter()
        .find(|(_, area)| area.contains(column, row))
        .map(|(idx, _)| *idx)
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::games::engine::tests::RecordingEngine;
    use crate::games::tests::catalog_of;
    use crossterm::event::KeyModifiers;
    use proptest::prelude::*;

    fn key(code: KeyCode) -> KeyEvent
    {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent
    {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn quiet() -> HubOptions
    {
        HubOptions {
            particles: false,
            ..HubOptions::default()
        }
    }

    #[test]
    fn default_highlight_prefers_red_light_green()
    {
        let catalog = Catalog::builtin();
        let state = SelectionState::new(&catalog, None);
        assert_eq!(state.highlighted_id(), Some("red-light-green"));

        let state = SelectionState::new(&catalog, Some("sharp-shooter"));
        assert_eq!(state.highlighted_id(), Some("sharp-shooter"));

        let state = SelectionState::new(&catalog, Some("missing"));
        assert_eq!(state.highlighted_id(), Some("red-light-green"));

        let other = catalog_of(&["a", "b"]);
        assert_eq!(SelectionState::new(&other, None).highlighted_id(), Some("a"));
    }

    #[test]
    fn previous_from_first_wraps_to_last()
    {
        let catalog = catalog_of(&["a", "b", "c", "d"]);
        let mut state = SelectionState::new(&catalog, Some("a"));
        state.select_relative(Direction::Previous);
        assert_eq!(state.highlighted_id(), Some("d"));
    }

    #[test]
    fn next_from_last_wraps_to_first()
    {
        let catalog = catalog_of(&["a", "b", "c", "d"]);
        let mut state = SelectionState::new(&catalog, Some("d"));
        state.select_relative(Direction::Next);
        assert_eq!(state.highlighted_id(), Some("a"));
    }

    #[test]
    fn single_game_wraps_onto_itself()
    {
        let catalog = catalog_of(&["solo"]);
        let mut state = SelectionState::new(&catalog, None);
        state.select_relative(Direction::Next);
        assert_eq!(state.highlighted_id(), Some("solo"));
        state.select_relative(Direction::Previous);
        assert_eq!(state.highlighted_id(), Some("solo"));
    }

    #[test]
    fn select_by_id_ignores_unknown_ids()
    {
        let catalog = Catalog::builtin();
        let mut state = SelectionState::new(&catalog, None);
        assert!(!state.select_by_id("does-not-exist"));
        assert_eq!(state.highlighted_id(), Some("red-light-green"));
        assert!(state.select_by_id("find-color"));
        assert!(!state.select_by_id("find-color"));
        assert_eq!(state.highlighted_id(), Some("find-color"));
        state.reset();
        assert_eq!(state.highlighted_id(), Some("red-light-green"));
    }

    #[test]
    fn empty_catalog_stays_unselected()
    {
        let catalog = Catalog::default();
        let mut state = SelectionState::new(&catalog, Some("escape-lava"));
        state.select_relative(Direction::Next);
        state.select_relative(Direction::Previous);
        assert_eq!(state.highlighted_id(), None);

        let mut engine = RecordingEngine::default();
        assert!(state.confirm_start(&mut engine).is_none());
        assert!(engine.calls.is_empty());
    }

    #[test]
    fn confirm_start_passes_highlighted_id()
    {
        let catalog = Catalog::builtin();
        let state = SelectionState::new(&catalog, Some("find-color"));
        let mut engine = RecordingEngine::default();
        assert_eq!(state.confirm_start(&mut engine), Some(Ok(())));
        assert_eq!(engine.calls, vec!["find-color"]);
        assert_eq!(state.highlighted_id(), Some("find-color"));
    }

    #[test]
    fn arrow_keys_move_the_highlight()
    {
        let catalog = Catalog::builtin();
        let listeners = KeyListeners::new();
        let now = Instant::now();
        let mut view = SelectionView::mount(&catalog, &listeners, &quiet(), now);
        assert_eq!(view.handle_key(key(KeyCode::Right), now), Command::Stay);
        assert_eq!(view.state().highlighted_id(), Some("sharp-shooter"));
        view.handle_key(key(KeyCode::Right), now);
        assert_eq!(view.state().highlighted_id(), Some("escape-lava"));
        view.handle_key(key(KeyCode::Left), now);
        assert_eq!(view.state().highlighted_id(), Some("sharp-shooter"));
        view.handle_key(key(KeyCode::Home), now);
        assert_eq!(view.state().highlighted_id(), Some("red-light-green"));
    }

    #[test]
    fn rules_key_navigates_to_detail_route()
    {
        let catalog = Catalog::builtin();
        let listeners = KeyListeners::new();
        let now = Instant::now();
        let mut view = SelectionView::mount(&catalog, &listeners, &quiet(), now);
        assert_eq!(
            view.handle_key(key(KeyCode::Char('r')), now),
            Command::Navigate("/game/red-light-green".to_string())
        );
        assert_eq!(view.handle_key(key(KeyCode::Char('q')), now), Command::Quit);
    }

    #[test]
    fn start_waits_for_the_loading_delay()
    {
        let catalog = Catalog::builtin();
        let listeners = KeyListeners::new();
        let start = Instant::now();
        let mut view = SelectionView::mount(&catalog, &listeners, &quiet(), start);
        let mut engine = RecordingEngine {
            refuse: true,
            ..RecordingEngine::default()
        };

        view.handle_key(key(KeyCode::Enter), start);
        assert!(view.is_launching());
        view.handle_key(key(KeyCode::Right), start);
        view.handle_key(key(KeyCode::Enter), start);
        view.tick(start + Duration::from_millis(500), &mut engine);
        assert!(engine.calls.is_empty());

        view.tick(start + LAUNCH_DELAY, &mut engine);
        assert!(!view.is_launching());
        assert_eq!(engine.calls, vec!["red-light-green"]);
        let status = view.status.as_ref().unwrap();
        assert!(status.text.contains("unavailable"));
    }

    #[test]
    fn start_on_empty_catalog_never_launches()
    {
        let catalog = Catalog::default();
        let listeners = KeyListeners::new();
        let now = Instant::now();
        let mut view = SelectionView::mount(&catalog, &listeners, &quiet(), now);
        let mut engine = RecordingEngine::default();
        view.handle_key(key(KeyCode::Enter), now);
        view.tick(now + LAUNCH_DELAY * 2, &mut engine);
        assert!(engine.calls.is_empty());
    }

    #[test]
    fn clicking_a_card_selects_it()
    {
        let catalog = Catalog::builtin();
        let listeners = KeyListeners::new();
        let now = Instant::now();
        let mut view = SelectionView::mount(&catalog, &listeners, &quiet(), now);
        let mut canvas = Canvas::new(124, 40);
        view.draw(&mut canvas, now);

        let (_, first) = view.cards[0];
        view.handle_mouse(click(first.x + 1, first.y + 1));
        assert_eq!(view.state().highlighted_id(), Some("escape-lava"));

        view.handle_mouse(click(0, 0));
        assert_eq!(view.state().highlighted_id(), Some("escape-lava"));
    }

    #[test]
    fn view_releases_its_listener_when_dropped()
    {
        let catalog = Catalog::builtin();
        let listeners = KeyListeners::new();
        for _ in 0..5 {
            let view = SelectionView::mount(&catalog, &listeners, &quiet(), Instant::now());
            assert_eq!(listeners.current(), Some(view.listener_id()));
        }
        assert_eq!(listeners.active_count(), 0);
    }

    #[test]
    fn draw_shows_every_card_and_marks_the_selected_one()
    {
        let catalog = Catalog::builtin();
        let listeners = KeyListeners::new();
        let now = Instant::now();
        let mut view = SelectionView::mount(&catalog, &listeners, &quiet(), now);
        let mut canvas = Canvas::new(124, 40);
        view.draw(&mut canvas, now);

        let screen: Vec<String> = (0..canvas.height()).map(|y| canvas.row_text(y)).collect();
        let text = screen.join("\n");
        assert!(text.contains("G A M E   H U B"));
        for game in catalog.list() {
            assert!(text.contains(&game.name), "missing {}", game.name);
        }
        assert_eq!(text.matches("> SELECTED").count(), 1);
        assert!(text.contains("[Enter] Start Game"));
    }

    #[test]
    fn layout_wraps_into_rows_when_narrow()
    {
        let wide = card_layout(124, 4, GRID_TOP, 3, None);
        assert!(wide.iter().all(|(_, area)| area.y == GRID_TOP));

        let narrow = card_layout(60, 4, GRID_TOP, 3, None);
        assert_eq!(narrow[0].1.y, narrow[1].1.y);
        assert!(narrow[2].1.y > narrow[0].1.y);
        let (_, last) = narrow[3];
        assert_eq!(card_at(&narrow, last.x, last.y), Some(3));
        assert!(card_layout(80, 0, GRID_TOP, 3, None).is_empty());
    }

    #[test]
    fn layout_scrolls_to_keep_the_focused_row_visible()
    {
        let cards = card_layout(60, 10, GRID_TOP, 2, Some(7));
        let indices: Vec<usize> = cards.iter().map(|(idx, _)| *idx).collect();
        assert_eq!(indices, vec![4, 5, 6, 7]);
        assert_eq!(cards[0].1.y, GRID_TOP);
        assert_eq!(card_at(&cards, cards[3].1.x, cards[3].1.y), Some(7));

        let top = card_layout(60, 10, GRID_TOP, 2, Some(1));
        assert_eq!(top.first().map(|(idx, _)| *idx), Some(0));
        assert_eq!(visible_rows(40, GRID_TOP), 3);
        assert_eq!(visible_rows(3, GRID_TOP), 1);
    }

    #[test]
    fn huge_catalog_draws_only_the_rows_that_fit()
    {
        let ids: Vec<String> = (0..8000).map(|idx| format!("game-{idx}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let catalog = catalog_of(&refs);
        let listeners = KeyListeners::new();
        let now = Instant::now();
        let mut view = SelectionView::mount(&catalog, &listeners, &quiet(), now);
        let mut canvas = Canvas::new(30, 24);
        view.draw(&mut canvas, now);
        assert!(view.cards.iter().all(|(_, area)| area.y < canvas.height()));

        view.handle_key(key(KeyCode::Left), now);
        assert_eq!(view.state().highlighted_id(), Some("game-7999"));
        let mut canvas = Canvas::new(30, 24);
        view.draw(&mut canvas, now);
        assert_eq!(view.cards.last().map(|(idx, _)| *idx), Some(7999));
        let text: Vec<String> = (0..canvas.height()).map(|y| canvas.row_text(y)).collect();
        assert!(text.join("\n").contains("> SELECTED"));
    }

    #[test]
    fn letter_keys_mirror_the_arrows()
    {
        let catalog = Catalog::builtin();
        let listeners = KeyListeners::new();
        let now = Instant::now();
        let mut view = SelectionView::mount(&catalog, &listeners, &quiet(), now);
        assert_eq!(view.handle_key(key(KeyCode::Char('l')), now), Command::Stay);
        assert_eq!(view.state().highlighted_id(), Some("sharp-shooter"));
        view.handle_key(key(KeyCode::Char('h')), now);
        view.handle_key(key(KeyCode::Char('h')), now);
        assert_eq!(view.state().highlighted_id(), Some("find-color"));
        assert!(view.status.is_none());
    }

    #[test]
    fn leaderboard_and_browse_only_report_status()
    {
        let catalog = Catalog::builtin();
        let listeners = KeyListeners::new();
        let now = Instant::now();
        let mut view = SelectionView::mount(&catalog, &listeners, &quiet(), now);

        assert_eq!(view.handle_key(key(KeyCode::Char('b')), now), Command::Stay);
        assert_eq!(view.status.as_ref().unwrap().text, "Leaderboard is not available yet");
        assert_eq!(view.state().highlighted_id(), Some("red-light-green"));

        assert_eq!(view.handle_key(key(KeyCode::Char('m')), now), Command::Stay);
        assert_eq!(view.status.as_ref().unwrap().text, "More games are on the way");
        assert!(!view.is_launching());
    }

    #[test]
    fn rules_key_is_ignored_while_loading()
    {
        let catalog = Catalog::builtin();
        let listeners = KeyListeners::new();
        let start = Instant::now();
        let mut view = SelectionView::mount(&catalog, &listeners, &quiet(), start);
        let mut engine = RecordingEngine::default();

        view.handle_key(key(KeyCode::Enter), start);
        assert_eq!(view.handle_key(key(KeyCode::Char('r')), start), Command::Stay);
        assert_eq!(view.handle_key(key(KeyCode::Char('i')), start), Command::Stay);
        view.handle_key(key(KeyCode::Home), start);
        assert!(view.is_launching());

        view.tick(start + LAUNCH_DELAY, &mut engine);
        assert_eq!(engine.calls, vec!["red-light-green"]);
    }

    #[test]
    fn refused_launch_calls_the_engine_once()
    {
        let catalog = Catalog::builtin();
        let listeners = KeyListeners::new();
        let start = Instant::now();
        let mut view = SelectionView::mount(&catalog, &listeners, &quiet(), start);
        let mut engine = RecordingEngine {
            refuse: true,
            ..RecordingEngine::default()
        };

        view.handle_key(key(KeyCode::Char('l')), start);
        view.handle_key(key(KeyCode::Enter), start);
        view.tick(start + LAUNCH_DELAY, &mut engine);
        view.tick(start + LAUNCH_DELAY * 3, &mut engine);
        assert_eq!(engine.calls, vec!["sharp-shooter"]);
        assert!(view.status.as_ref().unwrap().text.contains("unavailable"));

        view.handle_key(key(KeyCode::Enter), start + LAUNCH_DELAY * 3);
        view.tick(start + LAUNCH_DELAY * 5, &mut engine);
        assert_eq!(engine.calls.len(), 2);
    }

    proptest! {
        #[test]
        fn next_n_times_is_identity(len in 1usize..12, start in 0usize..12) {
            let ids: Vec<String> = (0..len).map(|idx| format!("game-{idx}")).collect();
            let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
            let catalog = catalog_of(&refs);
            let start_id = &ids[start % len];
            let mut state = SelectionState::new(&catalog, Some(start_id.as_str()));
            for _ in 0..len {
                state.select_relative(Direction::Next);
            }
            prop_assert_eq!(state.highlighted_id(), Some(start_id.as_str()));
        }

        #[test]
        fn previous_then_next_is_identity(len in 1usize..12, start in 0usize..12) {
            let ids: Vec<String> = (0..len).map(|idx| format!("game-{idx}")).collect();
            let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
            let catalog = catalog_of(&refs);
            let start_id = &ids[start % len];
            let mut state = SelectionState::new(&catalog, Some(start_id.as_str()));
            state.select_relative(Direction::Previous);
            state.select_relative(Direction::Next);
            prop_assert_eq!(state.highlighted_id(), Some(start_id.as_str()));
        }
    }
}
