use crate::config::ViewerConfig;
use crate::storage;
use leptos::prelude::*;
use wasm_bindgen::JsValue;

/// Dispatched on the window after every accepted section switch, detail =
/// new section id. The TOC controller (and any future observer) reacts to
/// this; the section store itself never listens.
pub(crate) const SECTION_CHANGED_EVENT: &str = "section-changed";

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// The platform's color-scheme signal, consulted only when no stored choice
/// exists.
pub(crate) fn ambient_theme() -> Theme {
    let prefers_dark = web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|m| m.matches())
        .unwrap_or(false);
    if prefers_dark {
        Theme::Dark
    } else {
        Theme::Light
    }
}

/// Owns the light/dark preference.
///
/// Every set, including the initial apply at construction, persists the value
/// and mirrors it to `<html data-theme>` so CSS can key off it.
#[derive(Clone, Copy)]
pub(crate) struct ThemeStore {
    current: RwSignal<Theme>,
}

impl ThemeStore {
    pub fn new() -> Self {
        let initial = storage::load_theme().unwrap_or_else(ambient_theme);
        let store = Self {
            current: RwSignal::new(initial),
        };
        store.apply(initial);
        store
    }

    pub fn get(&self) -> Theme {
        self.current.get()
    }

    pub fn set(&self, value: Theme) {
        self.current.set(value);
        self.apply(value);
    }

    pub fn toggle(&self) {
        self.set(self.current.get_untracked().toggled());
    }

    fn apply(&self, value: Theme) {
        storage::save_theme(value);
        if let Some(root) = crate::util::document().and_then(|d| d.document_element()) {
            let _ = root.set_attribute("data-theme", &value.to_string());
        }
    }
}

/// Owns the single active-section id.
///
/// `set` accepts any string; callers validate membership first (the hash-link
/// router checks against `ids()`). Re-setting the current id is not
/// suppressed; observers rebuild cheaply.
#[derive(Clone, Copy)]
pub(crate) struct SectionStore {
    active: RwSignal<String>,
    ids: StoredValue<Vec<String>>,
}

impl SectionStore {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            active: RwSignal::new(config.initial_section_id()),
            ids: StoredValue::new(config.section_ids()),
        }
    }

    pub fn get(&self) -> String {
        self.active.get()
    }

    pub fn get_untracked(&self) -> String {
        self.active.get_untracked()
    }

    pub fn ids(&self) -> Vec<String> {
        self.ids.with_value(|ids| ids.clone())
    }

    /// Switch the active section: update the value, reset the viewport to the
    /// top, then notify observers. The scroll reset lands before any TOC
    /// rebuild is observable.
    pub fn set(&self, id: &str) {
        self.active.set(id.to_string());
        crate::util::scroll_to_top();
        dispatch_section_changed(id);
    }
}

fn dispatch_section_changed(id: &str) {
    let Some(win) = web_sys::window() else {
        return;
    };
    let init = web_sys::CustomEventInit::new();
    init.set_detail(&JsValue::from_str(id));
    if let Ok(event) = web_sys::CustomEvent::new_with_event_init_dict(SECTION_CHANGED_EVENT, &init)
    {
        let _ = win.dispatch_event(&event);
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    /// Immutable page configuration (embedded blob or nav scan).
    pub config: StoredValue<ViewerConfig>,
    pub sections: SectionStore,
    pub theme: ThemeStore,

    /// Mobile burger panel; auto-closes on section selection.
    pub nav_open: RwSignal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        Self::from_config(ViewerConfig::load())
    }

    pub fn from_config(config: ViewerConfig) -> Self {
        let sections = SectionStore::new(&config);
        Self {
            config: StoredValue::new(config),
            sections,
            theme: ThemeStore::new(),
            nav_open: RwSignal::new(false),
        }
    }

    /// Section selection from the nav: switch, and collapse the mobile panel.
    pub fn select_section(&self, id: &str) {
        self.sections.set(id);
        self.nav_open.set(false);
    }

    pub fn toggle_nav(&self) {
        self.nav_open.update(|open| *open = !*open);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
