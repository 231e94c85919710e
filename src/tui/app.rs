use ratatui::layout::{Position, Rect};
use ratatui::widgets::ListState;

use crate::domain::{FeedState, NewsItem};
use crate::navigation::NavigationPort;
use crate::view::{ClickTarget, FeedView, ModalController};

/// Rows each list entry occupies: title line and meta line.
pub const ITEM_HEIGHT: u16 = 2;

/// Screen regions recorded during the last draw, used for mouse hit-testing.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitAreas {
    pub list: Option<Rect>,
    pub modal: Option<Rect>,
    pub close_button: Option<Rect>,
}

pub struct TuiApp {
    pub view: FeedView,
    pub feed: FeedState,
    pub modal: ModalController,
    pub selected: usize,
    pub list_state: ListState,
    pub hit_areas: HitAreas,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new(view: FeedView) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            view,
            feed: FeedState::new(),
            modal: ModalController::new(),
            selected: 0,
            list_state,
            hit_areas: HitAreas::default(),
            status_message: None,
            should_quit: false,
        }
    }

    /// Take a new state snapshot, keeping the selection within bounds.
    pub fn set_feed(&mut self, feed: FeedState) {
        self.feed = feed;
        if self.selected >= self.feed.items.len() {
            self.selected = self.feed.items.len().saturating_sub(1);
        }
        self.list_state.select(Some(self.selected));
    }

    pub fn selected_item(&self) -> Option<&NewsItem> {
        self.feed.items.get(self.selected)
    }

    pub fn move_up(&mut self) {
        if self.modal.is_open() {
            return;
        }
        if self.selected > 0 {
            self.selected -= 1;
            self.list_state.select(Some(self.selected));
        }
    }

    pub fn move_down(&mut self) {
        if self.modal.is_open() {
            return;
        }
        if self.selected + 1 < self.feed.items.len() {
            self.selected += 1;
            self.list_state.select(Some(self.selected));
        }
    }

    pub fn activate_selected(&mut self, navigator: &dyn NavigationPort) {
        if self.modal.is_open() || self.feed.loading {
            return;
        }
        if let Some(item) = self.selected_item().cloned() {
            self.activate(&item, navigator);
        }
    }

    fn activate(&mut self, item: &NewsItem, navigator: &dyn NavigationPort) {
        if let Err(e) = self.view.activate(item, navigator, &mut self.modal) {
            self.set_status(e.to_string());
        }
    }

    pub fn close_modal(&mut self) {
        self.modal.close_modal();
    }

    /// Route a left click at terminal cell (`column`, `row`).
    pub fn handle_click(&mut self, column: u16, row: u16, navigator: &dyn NavigationPort) {
        let position = Position::new(column, row);

        if self.modal.is_open() {
            let target = modal_target(&self.hit_areas, position);
            self.modal.handle_click(target);
            return;
        }

        if self.feed.loading {
            return;
        }
        if let Some(index) = self.item_at(position) {
            self.selected = index;
            self.list_state.select(Some(index));
            if let Some(item) = self.feed.items.get(index).cloned() {
                self.activate(&item, navigator);
            }
        }
    }

    fn item_at(&self, position: Position) -> Option<usize> {
        let list = self.hit_areas.list?;
        if !list.contains(position) {
            return None;
        }
        let index = self.list_state.offset() + ((position.y - list.y) / ITEM_HEIGHT) as usize;
        (index < self.feed.items.len()).then_some(index)
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

/// Classify a click made while the popup is open.
pub fn modal_target(areas: &HitAreas, position: Position) -> ClickTarget {
    let inside = |area: Option<Rect>| area.is_some_and(|a| a.contains(position));

    if inside(areas.close_button) {
        ClickTarget::CloseButton
    } else if inside(areas.modal) {
        ClickTarget::Content
    } else {
        ClickTarget::Overlay
    }
}
