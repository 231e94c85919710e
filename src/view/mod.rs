//! Pure projection of feed state plus the detail-overlay state machine.

pub mod feed_view;
pub mod modal;

pub use feed_view::{
    dispatch, Badge, FeedBody, FeedView, Header, Intent, Interaction, MetaLine, RenderedFeed,
    RenderedItem,
};
pub use modal::{ClickTarget, ModalController, ModalState};
