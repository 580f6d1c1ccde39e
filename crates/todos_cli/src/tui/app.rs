use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use todos_core::TaskStore;
use todos_core::model::{Filter, Task};
use todos_core::storage::Storage;

use super::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
}

/// What a click on a recorded screen region means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Input,
    Row(usize),
    Checkbox(u64),
    Delete(u64),
    Filter(Filter),
    ClearCompleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hitbox {
    pub area: Rect,
    pub target: Target,
}

/// View state for the full-screen UI.
///
/// Task data lives in the store; the app only owns the input line, focus,
/// selection and the click regions of the last frame.
pub struct App<S: Storage> {
    pub(crate) store: TaskStore<S>,
    pub(crate) input: String,
    pub(crate) focus: Focus,
    pub(crate) selected: Option<usize>,
    pub(crate) hitboxes: Vec<Hitbox>,
    pub(crate) theme: Theme,
    should_quit: bool,
}

impl<S: Storage> App<S> {
    pub fn new(store: TaskStore<S>, theme: Theme) -> Self {
        Self {
            store,
            input: String::new(),
            focus: Focus::Input,
            selected: None,
            hitboxes: Vec::new(),
            theme,
            should_quit: false,
        }
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let index = self.selected?;
        self.store.visible().get(index).copied()
    }

    pub fn clear_completed_enabled(&self) -> bool {
        self.store.completed_count() > 0
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::List => self.handle_list_key(key),
        }
        self.clamp_selection();
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if let Some(target) = self.hit(mouse.column, mouse.row) {
            self.activate(target);
        }
        self.clamp_selection();
    }

    pub(crate) fn hit(&self, column: u16, row: u16) -> Option<Target> {
        let position = Position::new(column, row);
        self.hitboxes
            .iter()
            .rev()
            .find(|hitbox| hitbox.area.contains(position))
            .map(|hitbox| hitbox.target)
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_input(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Tab | KeyCode::Down => self.focus_list(),
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.input.push(ch);
            }
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Char('i') => self.focus = Focus::Input,
            KeyCode::Up | KeyCode::Char('k') => match self.selected {
                Some(0) | None => self.focus = Focus::Input,
                Some(index) => self.selected = Some(index - 1),
            },
            KeyCode::Down | KeyCode::Char('j') => {
                let next = self.selected.map_or(0, |index| index + 1);
                if next < self.store.visible().len() {
                    self.selected = Some(next);
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('x') => {
                if let Some(id) = self.selected_task().map(|task| task.id) {
                    self.store.toggle(id);
                }
            }
            KeyCode::Delete | KeyCode::Char('d') => {
                if let Some(id) = self.selected_task().map(|task| task.id) {
                    self.store.delete(id);
                }
            }
            KeyCode::Char('1') => self.store.set_filter(Filter::All),
            KeyCode::Char('2') => self.store.set_filter(Filter::Active),
            KeyCode::Char('3') => self.store.set_filter(Filter::Completed),
            KeyCode::Left => self.store.set_filter(self.store.filter().previous()),
            KeyCode::Right => self.store.set_filter(self.store.filter().next()),
            KeyCode::Char('c') => self.clear_completed(),
            _ => {}
        }
    }

    fn activate(&mut self, target: Target) {
        match target {
            Target::Input => self.focus = Focus::Input,
            Target::Row(index) => {
                self.focus = Focus::List;
                self.selected = Some(index);
            }
            Target::Checkbox(id) => {
                self.store.toggle(id);
            }
            Target::Delete(id) => {
                self.store.delete(id);
            }
            Target::Filter(filter) => self.store.set_filter(filter),
            Target::ClearCompleted => self.clear_completed(),
        }
    }

    fn submit_input(&mut self) {
        if self.store.add(&self.input).is_some() {
            self.input.clear();
        }
    }

    fn clear_completed(&mut self) {
        if self.clear_completed_enabled() {
            self.store.clear_completed();
        }
    }

    fn focus_list(&mut self) {
        self.focus = Focus::List;
        if self.selected.is_none() && !self.store.visible().is_empty() {
            self.selected = Some(0);
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.store.visible().len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(index) => Some(index.min(len - 1)),
            None if self.focus == Focus::List => Some(0),
            None => None,
        };
    }
}
