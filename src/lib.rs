mod app;
mod components;
mod config;
mod content;
mod router;
mod state;
mod storage;
mod toc;
mod util;

use crate::app::App;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use leptos::ev;
    use leptos::mount::mount_to;
    use leptos::prelude::*;
    use leptos_dom::helpers::window_event_listener;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    use crate::app::SectionRegion;
    use crate::config::ViewerConfig;
    use crate::state::{AppContext, AppState, SectionStore, Theme, ThemeStore, SECTION_CHANGED_EVENT};
    use crate::{content, router, storage, toc};

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> web_sys::Document {
        web_sys::window().unwrap().document().unwrap()
    }

    /// Append a fixture subtree; callers remove it before returning.
    fn mount_fixture(html: &str) -> web_sys::Element {
        let doc = document();
        let fixture = doc.create_element("div").unwrap();
        fixture.set_inner_html(html);
        doc.body().unwrap().append_child(&fixture).unwrap();
        fixture
    }

    fn two_section_config() -> ViewerConfig {
        serde_json::from_str(
            r#"{"sections":[{"id":"readme"},{"id":"guide"}],"initialSection":"readme"}"#,
        )
        .unwrap()
    }

    #[wasm_bindgen_test]
    fn test_theme_storage_roundtrip() {
        storage::clear_theme();
        assert!(storage::load_theme().is_none());

        storage::save_theme(Theme::Dark);
        assert_eq!(storage::load_theme(), Some(Theme::Dark));

        // Corrupt entries fail open so the store falls back to ambient.
        let raw = web_sys::window().unwrap().local_storage().unwrap().unwrap();
        raw.set_item(storage::THEME_KEY, "sepia").unwrap();
        assert!(storage::load_theme().is_none());

        storage::clear_theme();
    }

    #[wasm_bindgen_test]
    fn test_theme_store_prefers_stored_choice_over_ambient() {
        storage::save_theme(Theme::Dark);

        let store = ThemeStore::new();
        assert_eq!(store.get(), Theme::Dark);

        // The initial apply mirrors the value onto the document element.
        let root = document().document_element().unwrap();
        assert_eq!(root.get_attribute("data-theme").as_deref(), Some("dark"));

        store.set(Theme::Light);
        assert_eq!(storage::load_theme(), Some(Theme::Light));
        assert_eq!(root.get_attribute("data-theme").as_deref(), Some("light"));

        storage::clear_theme();
    }

    #[wasm_bindgen_test]
    fn test_section_switch_dispatches_section_changed_after_scroll_reset() {
        let sections = SectionStore::new(&two_section_config());
        assert_eq!(sections.get_untracked(), "readme");

        // Give the page something to scroll, then scroll away from the top.
        let fixture = mount_fixture(r#"<div style="height:3000px"></div>"#);
        let win = web_sys::window().unwrap();
        win.scroll_to_with_x_and_y(0.0, 500.0);
        assert!(win.scroll_y().unwrap() > 0.0);

        let seen: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
        let scroll_at_dispatch: Rc<RefCell<Option<f64>>> = Rc::new(RefCell::new(None));
        let seen_in_handler = seen.clone();
        let scroll_in_handler = scroll_at_dispatch.clone();
        let handle = window_event_listener(
            ev::Custom::<web_sys::CustomEvent>::new(SECTION_CHANGED_EVENT),
            move |ev: web_sys::CustomEvent| {
                *seen_in_handler.borrow_mut() = ev.detail().as_string();
                *scroll_in_handler.borrow_mut() =
                    web_sys::window().and_then(|w| w.scroll_y().ok());
            },
        );

        // The handler runs synchronously, before `set` returns.
        sections.set("guide");
        assert_eq!(sections.get_untracked(), "guide");
        assert_eq!(seen.borrow().as_deref(), Some("guide"));

        // The viewport was already back at the top when observers ran.
        assert_eq!(*scroll_at_dispatch.borrow(), Some(0.0));

        handle.remove();
        fixture.remove();
    }

    #[wasm_bindgen_test]
    async fn test_exactly_one_section_region_visible() {
        let config = two_section_config();
        let state = AppState::from_config(config.clone());

        let doc = document();
        let mount_point = doc.create_element("div").unwrap();
        doc.body().unwrap().append_child(&mount_point).unwrap();

        let regions = config.sections.clone();
        let handle = mount_to(mount_point.clone().unchecked_into(), move || {
            provide_context(AppContext(state));
            regions
                .into_iter()
                .map(|section| view! { <SectionRegion section=section /> })
                .collect_view()
        });

        let class_of = |id: &str| doc.get_element_by_id(id).unwrap().class_name();
        assert!(!class_of("readme").contains("hidden"));
        assert!(class_of("guide").contains("hidden"));

        state.sections.set("guide");
        leptos::task::tick().await;

        assert!(class_of("readme").contains("hidden"));
        assert!(!class_of("guide").contains("hidden"));

        drop(handle);
        mount_point.remove();
    }

    #[wasm_bindgen_test]
    fn test_burger_toggles_and_selection_closes_the_panel() {
        let state = AppState::from_config(two_section_config());
        assert!(!state.nav_open.get_untracked());

        state.toggle_nav();
        assert!(state.nav_open.get_untracked());
        state.toggle_nav();
        assert!(!state.nav_open.get_untracked());

        // Selecting from the open panel switches and collapses it.
        state.toggle_nav();
        state.select_section("guide");
        assert_eq!(state.sections.get_untracked(), "guide");
        assert!(!state.nav_open.get_untracked());
    }

    #[wasm_bindgen_test]
    fn test_hash_link_click_switches_sections() {
        let sections = SectionStore::new(&two_section_config());
        let handle = router::install(sections);

        let fixture = mount_fixture(
            r##"<a id="to-guide" href="#guide">Usage guide</a>
                <a id="to-heading" href="#guide-deep-dive">Deep dive</a>"##,
        );

        let click = |id: &str| {
            document()
                .get_element_by_id(id)
                .unwrap()
                .dyn_into::<web_sys::HtmlElement>()
                .unwrap()
                .click();
        };

        // Bare section id: intercepted, active section switches.
        click("to-guide");
        assert_eq!(sections.get_untracked(), "guide");

        // Qualified heading id: left to the browser, no switch.
        sections.set("readme");
        click("to-heading");
        assert_eq!(sections.get_untracked(), "readme");

        handle.remove();
        fixture.remove();
    }

    #[wasm_bindgen_test]
    fn test_toc_rebuild_scopes_to_section_and_settles_chrome() {
        let fixture = mount_fixture(
            r#"<section id="guide"><article>
                   <h2 id="guide-setup">Setup</h2>
                   <h2 id="guide-deep-dive">Deep Dive</h2>
               </article></section>
               <section id="barren"><article><p>no headings here</p></article></section>
               <nav id="guide-toc-nav"><div class="toc-guide"></div></nav>
               <nav id="barren-toc-nav"><div class="toc-barren"></div></nav>"#,
        );

        toc::rebuild_for_section("guide");

        let doc = document();
        let entries = doc.query_selector_all(".toc-guide .toc-list-item").unwrap();
        assert_eq!(entries.length(), 2);
        let link = doc.query_selector(".toc-guide .toc-link").unwrap().unwrap();
        assert_eq!(link.get_attribute("href").as_deref(), Some("#guide-setup"));

        let guide_nav = doc
            .get_element_by_id("guide-toc-nav")
            .unwrap()
            .dyn_into::<web_sys::HtmlElement>()
            .unwrap();
        assert_ne!(guide_nav.style().get_property_value("display").unwrap(), "none");

        // Rebinding to a heading-less section destroys the old list and
        // hides the new section's chrome.
        toc::rebuild_for_section("barren");

        let stale = doc.query_selector_all(".toc-guide .toc-list-item").unwrap();
        assert_eq!(stale.length(), 0);

        let barren_nav = doc
            .get_element_by_id("barren-toc-nav")
            .unwrap()
            .dyn_into::<web_sys::HtmlElement>()
            .unwrap();
        assert_eq!(barren_nav.style().get_property_value("display").unwrap(), "none");

        toc::TocEngine::destroy();
        fixture.remove();
    }

    #[wasm_bindgen_test]
    fn test_toc_rebuild_against_missing_nodes_is_a_noop() {
        // No `.toc-ghost` container and no `#ghost` region exist.
        toc::rebuild_for_section("ghost");
        toc::TocEngine::destroy();
    }

    #[wasm_bindgen_test]
    fn test_image_row_classification() {
        let fixture = mount_fixture(
            r#"<p id="badges">
                   <a href="https://ci.example"><img src="badge.svg" alt="ci"></a>
                   <a href="https://docs.example"><svg viewBox="0 0 1 1"></svg></a>
               </p>
               <p id="mixed"><a href="https://ci.example"><img src="badge.svg"></a> latest</p>
               <p id="bare-link"><a href="https://ci.example"></a></p>"#,
        );

        content::classify_image_rows();

        let doc = document();
        let class_of = |id: &str| doc.get_element_by_id(id).unwrap().class_name();
        assert!(class_of("badges").contains(content::IMAGE_ROW_CLASS));
        assert!(!class_of("mixed").contains(content::IMAGE_ROW_CLASS));
        assert!(!class_of("bare-link").contains(content::IMAGE_ROW_CLASS));

        fixture.remove();
    }

    #[wasm_bindgen_test]
    fn test_config_nav_scan_dedupes_in_declaration_order() {
        let fixture = mount_fixture(
            r#"<nav id="main-nav">
                   <button data-section-id="readme">README</button>
                   <button data-section-id="guide">GUIDE</button>
               </nav>
               <nav id="mobile-nav">
                   <button data-section-id="readme">README</button>
                   <button data-section-id="guide">GUIDE</button>
               </nav>"#,
        );

        let config = ViewerConfig::load();
        assert_eq!(config.section_ids(), vec!["readme", "guide"]);
        assert_eq!(config.initial_section_id(), "readme");

        fixture.remove();
    }

    #[wasm_bindgen_test]
    fn test_config_embedded_blob_wins_over_nav_scan() {
        let doc = document();
        let script = doc.create_element("script").unwrap();
        script.set_id(crate::config::CONFIG_SCRIPT_ID);
        script.set_attribute("type", "application/json").unwrap();
        script.set_text_content(Some(
            r#"{"sections":[{"id":"changelog"}],"initialSection":"changelog"}"#,
        ));
        doc.body().unwrap().append_child(&script).unwrap();

        let fixture = mount_fixture(
            r#"<nav id="main-nav"><button data-section-id="readme">README</button></nav>"#,
        );

        let config = ViewerConfig::load();
        assert_eq!(config.section_ids(), vec!["changelog"]);

        script.remove();
        fixture.remove();
    }
}
