//! Read-only view of the current page.

use parking_lot::RwLock;
use url::Url;

/// The navigation context a tracked event is attributed to.
pub trait PageContext: Send + Sync {
    /// Full current URL
    fn url(&self) -> String;
    fn title(&self) -> String;
    fn referrer(&self) -> Option<String>;
    /// Declared document language, if any
    fn language(&self) -> Option<String>;
    /// Current viewport width in CSS px
    fn viewport_width(&self) -> u32;

    /// Query string of the current URL, without the leading `?`.
    fn query(&self) -> String {
        Url::parse(&self.url())
            .ok()
            .and_then(|u| u.query().map(str::to_string))
            .unwrap_or_default()
    }

    /// Path of the current URL.
    fn path(&self) -> String {
        Url::parse(&self.url())
            .map(|u| u.path().to_string())
            .unwrap_or_else(|_| "/".to_string())
    }
}

/// Fields of a page at one moment.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSnapshot {
    pub url: String,
    pub title: String,
    pub referrer: Option<String>,
    pub language: Option<String>,
    pub viewport_width: u32,
}

impl Default for PageSnapshot {
    fn default() -> Self {
        Self {
            url: "http://localhost/".to_string(),
            title: String::new(),
            referrer: None,
            language: None,
            viewport_width: 1280,
        }
    }
}

/// Mutable in-process page context, updated by the host on navigation.
#[derive(Debug, Default)]
pub struct MemoryPageContext {
    state: RwLock<PageSnapshot>,
}

impl MemoryPageContext {
    pub fn new(snapshot: PageSnapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
        }
    }

    /// Move to a new URL and title; the previous URL becomes the referrer.
    pub fn navigate(&self, url: impl Into<String>, title: impl Into<String>) {
        let mut state = self.state.write();
        let previous = std::mem::replace(&mut state.url, url.into());
        state.referrer = Some(previous);
        state.title = title.into();
    }

    pub fn set_viewport_width(&self, width: u32) {
        self.state.write().viewport_width = width;
    }

    pub fn set_language(&self, language: Option<String>) {
        self.state.write().language = language;
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.state.read().clone()
    }
}

impl PageContext for MemoryPageContext {
    fn url(&self) -> String {
        self.state.read().url.clone()
    }

    fn title(&self) -> String {
        self.state.read().title.clone()
    }

    fn referrer(&self) -> Option<String> {
        self.state.read().referrer.clone()
    }

    fn language(&self) -> Option<String> {
        self.state.read().language.clone()
    }

    fn viewport_width(&self) -> u32 {
        self.state.read().viewport_width
    }
}
