use serde::Deserialize;
use wasm_bindgen::{JsCast, JsValue};

/// `<script type="application/json">` element the build pipeline embeds.
pub(crate) const CONFIG_SCRIPT_ID: &str = "microdocs-config";

/// Window global fallback for templates that inline the blob as a script.
pub(crate) const CONFIG_GLOBAL: &str = "__MICRODOCS_CONFIG__";

// The blob flows one way, pipeline to viewer; nothing re-serializes it.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Section {
    pub id: String,

    /// Navigation label; falls back to the uppercased id.
    #[serde(default)]
    pub label: Option<String>,

    /// Article markup produced by the markdown pipeline. Heading ids inside
    /// are section-qualified (`{id}-{slug}`), so fragments never collide
    /// across sections.
    #[serde(default)]
    pub html: String,
}

impl Section {
    pub fn nav_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.id.to_uppercase())
    }
}

/// Page configuration, produced once at load and immutable afterwards.
///
/// The blob shape is a contract with the build pipeline; see the serde tests
/// below.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ViewerConfig {
    /// Declared order is navigation order; ids are unique.
    #[serde(default)]
    pub sections: Vec<Section>,

    #[serde(default)]
    pub initial_section: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub repo_url: Option<String>,

    #[serde(default)]
    pub footer: Option<String>,
}

impl ViewerConfig {
    /// Resolve the page configuration.
    ///
    /// Precedence: embedded JSON script > window global > `data-section-id`
    /// navigation scan > empty. A malformed source degrades to the next one;
    /// with no source at all, navigation and TOC stay inert.
    pub fn load() -> Self {
        if let Some(config) = Self::from_embedded_script() {
            return config;
        }
        if let Some(config) = Self::from_window_global() {
            return config;
        }
        if let Some(config) = Self::from_nav_dom() {
            return config;
        }
        Self::default()
    }

    fn from_embedded_script() -> Option<Self> {
        let doc = crate::util::document()?;
        let node = doc.get_element_by_id(CONFIG_SCRIPT_ID)?;
        let json = node.text_content()?;
        serde_json::from_str(&json).ok()
    }

    fn from_window_global() -> Option<Self> {
        let window = web_sys::window()?;
        let raw = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).ok()?;
        if raw.is_undefined() || raw.is_null() {
            return None;
        }
        let json: String = js_sys::JSON::stringify(&raw).ok()?.into();
        serde_json::from_str(&json).ok()
    }

    /// Legacy discovery: enumerate `data-section-id` attributes in the
    /// navigation markup, unique values only, first-seen order.
    fn from_nav_dom() -> Option<Self> {
        let doc = crate::util::document()?;
        let nodes = doc
            .query_selector_all("#main-nav [data-section-id], #mobile-nav [data-section-id]")
            .ok()?;

        let mut ids: Vec<String> = Vec::new();
        for i in 0..nodes.length() {
            let Some(el) = nodes
                .item(i)
                .and_then(|n| n.dyn_into::<web_sys::Element>().ok())
            else {
                continue;
            };
            let Some(id) = el.get_attribute("data-section-id") else {
                continue;
            };
            if !id.is_empty() && !ids.contains(&id) {
                ids.push(id);
            }
        }

        if ids.is_empty() {
            return None;
        }

        Some(Self {
            sections: ids
                .into_iter()
                .map(|id| Section {
                    id,
                    label: None,
                    html: String::new(),
                })
                .collect(),
            ..Self::default()
        })
    }

    pub fn section_ids(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.id.clone()).collect()
    }

    /// Initially active section: the configured one when it names a known
    /// section, otherwise the first declared, otherwise empty.
    pub fn initial_section_id(&self) -> String {
        if !self.initial_section.is_empty()
            && self.sections.iter().any(|s| s.id == self.initial_section)
        {
            return self.initial_section.clone();
        }
        self.sections
            .first()
            .map(|s| s.id.clone())
            .unwrap_or_default()
    }
}
