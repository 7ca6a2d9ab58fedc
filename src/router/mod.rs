use crate::state::SectionStore;
use leptos::ev;
use leptos_dom::helpers::{window_event_listener, WindowListenerHandle};
use wasm_bindgen::JsCast;

/// What a delegated click on a hash link should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum HashAction {
    /// Fragment names a section: suppress the native jump and switch.
    SwitchSection(String),
    /// Intra-section heading jump (or dangling fragment); the browser
    /// handles it.
    Passthrough,
}

/// Pure routing decision: a fragment switches sections only when it equals a
/// known section id. Heading ids are section-qualified (`{id}-{slug}`), so
/// they never land here by accident.
pub(crate) fn decide(fragment: &str, section_ids: &[String]) -> HashAction {
    if section_ids.iter().any(|id| id == fragment) {
        HashAction::SwitchSection(fragment.to_string())
    } else {
        HashAction::Passthrough
    }
}

/// Fragment of the nearest ancestor hash link, if the click landed on one.
fn clicked_fragment(ev: &web_sys::MouseEvent) -> Option<String> {
    let target = ev.target()?;
    let el = target.dyn_ref::<web_sys::Element>()?;
    let link = el.closest("a[href^='#']").ok().flatten()?;
    let href = link.get_attribute("href")?;
    Some(href.strip_prefix('#')?.to_string())
}

/// Install the delegated click handler.
///
/// One listener on the window covers every hash link, including ones
/// inserted after startup (TOC rebuilds), with no re-registration.
pub(crate) fn install(sections: SectionStore) -> WindowListenerHandle {
    window_event_listener(ev::click, move |ev: web_sys::MouseEvent| {
        let Some(fragment) = clicked_fragment(&ev) else {
            return;
        };
        if let HashAction::SwitchSection(id) = decide(&fragment, &sections.ids()) {
            ev.prevent_default();
            sections.set(&id);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_bare_section_id_switches() {
        let action = decide("guide", &ids(&["readme", "guide"]));
        assert_eq!(action, HashAction::SwitchSection("guide".to_string()));
    }

    #[test]
    fn test_qualified_heading_id_passes_through() {
        // `guide-deep-dive` is a heading inside GUIDE, not the section itself.
        let action = decide("guide-deep-dive", &ids(&["readme", "guide"]));
        assert_eq!(action, HashAction::Passthrough);
    }

    #[test]
    fn test_unknown_fragment_passes_through() {
        assert_eq!(decide("nowhere", &ids(&["readme"])), HashAction::Passthrough);
    }

    #[test]
    fn test_empty_fragment_passes_through() {
        assert_eq!(decide("", &ids(&["readme", "guide"])), HashAction::Passthrough);
    }

    #[test]
    fn test_no_sections_means_everything_passes_through() {
        assert_eq!(decide("readme", &[]), HashAction::Passthrough);
    }

    #[test]
    fn test_match_is_exact_not_prefix() {
        assert_eq!(decide("read", &ids(&["readme"])), HashAction::Passthrough);
        assert_eq!(decide("readme2", &ids(&["readme"])), HashAction::Passthrough);
    }
}
