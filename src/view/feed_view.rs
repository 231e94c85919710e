use crate::app::Result;
use crate::config::DisplayConfig;
use crate::domain::{category, FeedState, Glyph, NewsItem};
use crate::navigation::NavigationPort;

use super::modal::ModalController;

/// Render-ready projection of a [`FeedState`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFeed {
    pub header: Header,
    pub body: FeedBody,
    /// A refresh is running behind already-visible items.
    pub refreshing: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub badges: Vec<String>,
    pub description: Option<String>,
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedBody {
    Loading(String),
    Items(Vec<RenderedItem>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedItem {
    /// 1-based position shown in the number badge.
    pub number: usize,
    pub title: String,
    pub badges: Vec<Badge>,
    pub meta: MetaLine,
    pub interaction: Interaction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Badge {
    Latest(String),
    Link(String),
}

impl Badge {
    pub fn text(&self) -> &str {
        match self {
            Badge::Latest(text) | Badge::Link(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaLine {
    pub glyph: Option<Glyph>,
    pub source: Option<String>,
    pub timestamp: Option<String>,
}

impl MetaLine {
    pub fn to_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(glyph) = self.glyph {
            parts.push(glyph.to_string());
        }
        if let Some(source) = &self.source {
            parts.push(format!("Source: {}", source));
        }
        if let Some(timestamp) = &self.timestamp {
            parts.push(timestamp.clone());
        }
        parts.join("  ")
    }
}

/// What activating an item does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    External(String),
    Detail,
    Informational,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    OpenExternal(String),
    OpenDetail(NewsItem),
    None,
}

#[derive(Debug, Clone, Default)]
pub struct FeedView {
    display: DisplayConfig,
}

impl FeedView {
    pub fn new(display: DisplayConfig) -> Self {
        Self { display }
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn project(&self, state: &FeedState) -> RenderedFeed {
        let header = Header {
            badges: self.display.header_badges.clone(),
            description: self.display.description.clone(),
            last_updated: state
                .last_updated_label()
                .map(|time| format!("Last updated: {}", time)),
        };

        if state.is_initial_load() {
            return RenderedFeed {
                header,
                body: FeedBody::Loading(self.display.loading_text.clone()),
                refreshing: None,
                error: None,
            };
        }

        let items = state
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| self.project_item(index, item))
            .collect();

        RenderedFeed {
            header,
            body: FeedBody::Items(items),
            refreshing: state
                .refreshing
                .then(|| self.display.refreshing_text.clone()),
            error: state.error.clone(),
        }
    }

    fn project_item(&self, index: usize, item: &NewsItem) -> RenderedItem {
        let interaction = self.interaction_for(item);

        let mut badges = Vec::new();
        if item.is_latest {
            badges.push(Badge::Latest(self.display.latest_badge.clone()));
        }
        if matches!(interaction, Interaction::External(_)) {
            badges.push(Badge::Link(self.display.link_indicator.clone()));
        }

        RenderedItem {
            number: index + 1,
            title: item.title.clone(),
            badges,
            meta: MetaLine {
                glyph: self
                    .display
                    .show_category_icons
                    .then(|| category::resolve(item.category.as_deref())),
                source: item.source.clone(),
                timestamp: item.timestamp.clone(),
            },
            interaction,
        }
    }

    fn interaction_for(&self, item: &NewsItem) -> Interaction {
        match &item.url {
            Some(url) => Interaction::External(url.clone()),
            None if self.display.modal_enabled => Interaction::Detail,
            None => Interaction::Informational,
        }
    }

    pub fn intent_for(&self, item: &NewsItem) -> Intent {
        match self.interaction_for(item) {
            Interaction::External(url) => Intent::OpenExternal(url),
            Interaction::Detail => Intent::OpenDetail(item.clone()),
            Interaction::Informational => Intent::None,
        }
    }

    /// Activate an item: follow its link or show its details.
    pub fn activate(
        &self,
        item: &NewsItem,
        navigator: &dyn NavigationPort,
        modal: &mut ModalController,
    ) -> Result<Intent> {
        let intent = self.intent_for(item);
        dispatch(&intent, navigator, modal)?;
        Ok(intent)
    }
}

pub fn dispatch(
    intent: &Intent,
    navigator: &dyn NavigationPort,
    modal: &mut ModalController,
) -> Result<()> {
    match intent {
        Intent::OpenExternal(url) => navigator.open_external(url),
        Intent::OpenDetail(item) => {
            modal.open(item.clone());
            Ok(())
        }
        Intent::None => Ok(()),
    }
}
