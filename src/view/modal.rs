use crate::domain::NewsItem;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open(NewsItem),
}

/// Where a click landed while the detail overlay is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed backdrop around the dialog.
    Overlay,
    CloseButton,
    /// Anywhere inside the dialog body. Never closes the dialog.
    Content,
}

#[derive(Debug, Clone, Default)]
pub struct ModalController {
    state: ModalState,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn selection(&self) -> Option<&NewsItem> {
        match &self.state {
            ModalState::Open(item) => Some(item),
            ModalState::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    pub fn open(&mut self, item: NewsItem) {
        self.state = ModalState::Open(item);
    }

    /// Returns whether the modal was open.
    pub fn close_modal(&mut self) -> bool {
        let was_open = self.is_open();
        self.state = ModalState::Closed;
        was_open
    }

    /// Route a click; returns whether the state changed.
    pub fn handle_click(&mut self, target: ClickTarget) -> bool {
        match target {
            ClickTarget::Overlay | ClickTarget::CloseButton => self.close_modal(),
            ClickTarget::Content => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemId;

    fn item() -> NewsItem {
        NewsItem::new(ItemId::Positional(0), "Y")
    }

    #[test]
    fn test_starts_closed() {
        let modal = ModalController::new();
        assert_eq!(modal.state(), &ModalState::Closed);
        assert!(modal.selection().is_none());
    }

    #[test]
    fn test_open_and_close_button() {
        let mut modal = ModalController::new();
        modal.open(item());
        assert_eq!(modal.selection(), Some(&item()));

        assert!(modal.handle_click(ClickTarget::CloseButton));
        assert!(!modal.is_open());
    }

    #[test]
    fn test_overlay_click_closes() {
        let mut modal = ModalController::new();
        modal.open(item());
        assert!(modal.handle_click(ClickTarget::Overlay));
        assert_eq!(modal.state(), &ModalState::Closed);
    }

    #[test]
    fn test_content_click_keeps_open() {
        let mut modal = ModalController::new();
        modal.open(item());
        assert!(!modal.handle_click(ClickTarget::Content));
        assert_eq!(modal.state(), &ModalState::Open(item()));
    }

    #[test]
    fn test_clicks_while_closed_are_noops() {
        let mut modal = ModalController::new();
        assert!(!modal.handle_click(ClickTarget::Overlay));
        assert!(!modal.handle_click(ClickTarget::CloseButton));
        assert!(!modal.close_modal());
    }
}
