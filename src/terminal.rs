use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use std::cell::RefCell;
use std::io::{self, Stdout};
use std::rc::{Rc, Weak};
use tracing::debug;

/// Raw mode, alternate screen and mouse capture for as long as it lives.
pub struct TerminalGuard
{
    stdout: Stdout,
}

impl TerminalGuard
{
    pub fn enter() -> io::Result<Self>
    {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(Self { stdout })
    }

    pub fn stdout(&mut self) -> &mut Stdout
    {
        &mut self.stdout
    }
}

impl Drop for TerminalGuard
{
    fn drop(&mut self)
    {
        let _ = execute!(self.stdout, Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

pub type ListenerId = u64;

#[derive(Default)]
struct Registry
{
    next_id: ListenerId,
    active: Vec<(ListenerId, &'static str)>,
}

/// Keyboard listeners registered by views. Only the most recent live
/// listener receives key events.
#[derive(Clone, Default)]
pub struct KeyListeners
{
    inner: Rc<RefCell<Registry>>,
}

impl KeyListeners
{
    pub fn new() -> Self
    {
        Self::default()
    }

    pub fn subscribe(&self, owner: &'static str) -> KeySubscription
    {
        let mut registry = self.inner.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.active.push((id, owner));
        debug!(listener = id, owner, "key listener registered");
        KeySubscription {
            id,
            owner,
            registry: Rc::downgrade(&self.inner),
        }
    }

    pub fn current(&self) -> Option<ListenerId>
    {
        self.inner.borrow().active.last().map(|(id, _)| *id)
    }

    pub fn active_count(&self) -> usize
    {
        self.inner.borrow().active.len()
    }
}

/// Registration handle; deregisters on drop.
pub struct KeySubscription
{
    id: ListenerId,
    owner: &'static str,
    registry: Weak<RefCell<Registry>>,
}

impl KeySubscription
{
    pub fn id(&self) -> ListenerId
    {
        self.id
    }
}

impl Drop for KeySubscription
{
    fn drop(&mut self)
    {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().active.retain(|(id, _)| *id != self.id);
            debug!(listener = self.id, owner = self.owner, "key listener released");
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn subscription_releases_on_drop()
    {
        let listeners = KeyListeners::new();
        {
            let sub = listeners.subscribe("selection");
            assert_eq!(listeners.active_count(), 1);
            assert_eq!(listeners.current(), Some(sub.id()));
        }
        assert_eq!(listeners.active_count(), 0);
        assert_eq!(listeners.current(), None);
    }

    #[test]
    fn repeated_mounts_do_not_accumulate()
    {
        let listeners = KeyListeners::new();
        let mut held = None;
        for _ in 0..25 {
            held = Some(listeners.subscribe("selection"));
            assert_eq!(listeners.active_count(), 1);
        }
        drop(held);
        assert_eq!(listeners.active_count(), 0);
    }

    #[test]
    fn latest_listener_is_current()
    {
        let listeners = KeyListeners::new();
        let first = listeners.subscribe("selection");
        let second = listeners.subscribe("detail");
        assert_eq!(listeners.current(), Some(second.id()));
        drop(second);
        assert_eq!(listeners.current(), Some(first.id()));
    }

    #[test]
    fn subscription_outliving_registry_is_harmless()
    {
        let listeners = KeyListeners::new();
        let sub = listeners.subscribe("selection");
        drop(listeners);
        drop(sub);
    }
}
