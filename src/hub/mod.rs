pub mod detail;
pub mod particles;
pub mod selection;

use crate::error::HubError;
use crate::games::Catalog;
use crate::games::engine::GameEngine;
use crate::render::{Canvas, Rgb};
use crate::router::{Route, Router};
use crate::terminal::{KeyListeners, ListenerId, TerminalGuard};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use crossterm::terminal;
use detail::DetailView;
use selection::SelectionView;
use std::time::{Duration, Instant};
use tracing::info;

const TICK_MS: u64 = 33;
const DEFAULT_PARTICLES: usize = 14;

/// What a view asks the hub to do after handling input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command
{
    Stay,
    Navigate(String),
    Quit,
}

pub struct Status
{
    pub text: String,
    pub color: Rgb,
}

impl Status
{
    pub fn info(text: impl Into<String>) -> Self
    {
        Self {
            text: text.into(),
            color: Rgb::GOLD,
        }
    }

    pub fn error(text: impl Into<String>) -> Self
    {
        Self {
            text: text.into(),
            color: Rgb::RED,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HubOptions
{
    /// Game highlighted when the selection screen mounts.
    pub preferred: Option<String>,
    pub particles: bool,
    pub particle_count: usize,
}

impl Default for HubOptions
{
    fn default() -> Self
    {
        Self {
            preferred: None,
            particles: true,
            particle_count: DEFAULT_PARTICLES,
        }
    }
}

enum Screen<'a>
{
    Selection(SelectionView<'a>),
    Detail(DetailView<'a>),
}

impl<'a> Screen<'a>
{
    fn mount(
        router: &Router,
        catalog: &'a Catalog,
        listeners: &KeyListeners,
        options: &HubOptions,
        now: Instant,
    ) -> Self
    {
        match router.route() {
            Route::Hub => Screen::Selection(SelectionView::mount(catalog, listeners, options, now)),
            Route::Game | Route::Unknown => {
                Screen::Detail(DetailView::mount(catalog, router, listeners))
            }
        }
    }

    fn listener_id(&self) -> ListenerId
    {
        match self {
            Screen::Selection(view) => view.listener_id(),
            Screen::Detail(view) => view.listener_id(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant, engine: &mut dyn GameEngine) -> Command
    {
        match self {
            Screen::Selection(view) => view.handle_key(key, now),
            Screen::Detail(view) => view.handle_key(key, engine),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Command
    {
        match self {
            Screen::Selection(view) => view.handle_mouse(mouse),
            Screen::Detail(_) => Command::Stay,
        }
    }

    fn tick(&mut self, now: Instant, engine: &mut dyn GameEngine)
    {
        if let Screen::Selection(view) = self {
            view.tick(now, engine);
        }
    }

    fn draw(&mut self, canvas: &mut Canvas, now: Instant)
    {
        match self {
            Screen::Selection(view) => view.draw(canvas, now),
            Screen::Detail(view) => view.draw(canvas),
        }
    }
}

/// Router plus whichever view the current route mounts.
pub struct Hub<'a>
{
    catalog: &'a Catalog,
    router: Router,
    listeners: KeyListeners,
    options: HubOptions,
    screen: Screen<'a>,
}

impl<'a> Hub<'a>
{
    pub fn new(catalog: &'a Catalog, start_path: &str, options: HubOptions, now: Instant) -> Self
    {
        let router = Router::new(start_path);
        let listeners = KeyListeners::new();
        let screen = Screen::mount(&router, catalog, &listeners, &options, now);
        Self {
            catalog,
            router,
            listeners,
            options,
            screen,
        }
    }

    pub fn current_path(&self) -> &str
    {
        self.router.current_path()
    }

    pub fn listeners(&self) -> &KeyListeners
    {
        &self.listeners
    }

    /// Returns `true` when the hub should exit.
    pub fn handle_event(&mut self, event: Event, now: Instant, engine: &mut dyn GameEngine) -> bool
    {
        let command = match event {
            Event::Key(key) if key.kind == KeyEventKind::Release => Command::Stay,
            Event::Key(key) if is_interrupt(&key) => Command::Quit,
            Event::Key(key) => {
                if self.listeners.current() == Some(self.screen.listener_id()) {
                    self.screen.handle_key(key, now, engine)
                } else {
                    Command::Stay
                }
            }
            Event::Mouse(mouse) => self.screen.handle_mouse(mouse),
            _ => Command::Stay,
        };

        match command {
            Command::Stay => false,
            Command::Quit => true,
            Command::Navigate(path) => {
                self.router.navigate(&path);
                let next = Screen::mount(&self.router, self.catalog, &self.listeners, &self.options, now);
                self.screen = next;
                false
            }
        }
    }

    pub fn tick(&mut self, now: Instant, engine: &mut dyn GameEngine)
    {
        self.screen.tick(now, engine);
    }

    pub fn draw(&mut self, canvas: &mut Canvas, now: Instant)
    {
        self.screen.draw(canvas, now);
    }
}

fn is_interrupt(key: &KeyEvent) -> bool
{
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

pub fn run(
    catalog: &Catalog,
    engine: &mut dyn GameEngine,
    start_path: &str,
    options: HubOptions,
) -> Result<(), HubError>
{
    let mut term = TerminalGuard::enter()?;
    let mut hub = Hub::new(catalog, start_path, options, Instant::now());
    info!(path = hub.current_path(), games = catalog.len(), "hub started");

    let tick = Duration::from_millis(TICK_MS);
    let mut last_draw: Option<Instant> = None;
    loop {
        if event::poll(tick)? {
            if hub.handle_event(event::read()?, Instant::now(), engine) {
                break;
            }
        }

        let now = Instant::now();
        hub.tick(now, engine);
        if last_draw.map_or(true, |at| now.saturating_duration_since(at) >= tick) {
            let (cols, rows) = terminal::size().unwrap_or((80, 24));
            let mut canvas = Canvas::new(cols, rows);
            hub.draw(&mut canvas, now);
            canvas.present(term.stdout())?;
            last_draw = Some(now);
        }
    }

    info!("hub closed");
    Ok(())
}
