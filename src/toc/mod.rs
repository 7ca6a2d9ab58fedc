use std::cell::RefCell;

use leptos::ev;
use leptos_dom::helpers::{window_event_listener, WindowListenerHandle};
use wasm_bindgen::JsCast;

use crate::state::SECTION_CHANGED_EVENT;
use crate::util::document;

pub(crate) const TOC_LIST_CLASS: &str = "toc-list";
pub(crate) const TOC_LIST_ITEM_CLASS: &str = "toc-list-item";
pub(crate) const TOC_LINK_CLASS: &str = "toc-link";
pub(crate) const ACTIVE_LINK_CLASS: &str = "is-active-link";

/// Deepest heading level that participates. Headings without ids are not
/// navigable and are skipped regardless of level.
const HEADING_DEPTH: usize = 6;

/// Binding parameters for one section's table of contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TocOptions {
    pub toc_selector: String,
    pub content_selector: String,
    pub heading_depth: usize,
}

impl TocOptions {
    pub fn for_section(section_id: &str) -> Self {
        Self {
            toc_selector: format!(".toc-{section_id}"),
            content_selector: format!("#{section_id} article"),
            heading_depth: HEADING_DEPTH,
        }
    }

    /// `h1[id], h2[id], ...` down to the configured depth.
    pub fn heading_selector(&self) -> String {
        (1..=self.heading_depth)
            .map(|level| format!("h{level}[id]"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

thread_local! {
    // The engine is process-wide: at most one binding exists at a time.
    static BINDING: RefCell<Option<TocOptions>> = const { RefCell::new(None) };
}

/// Exclusive-binding wrapper around the generated-list machinery.
///
/// `init` does not clear a previous binding's markup; callers go through
/// [`rebuild_for_section`], which destroys first. Initialising twice without
/// a destroy leaves two lists in the container, which is exactly the stale
/// state the destroy discipline exists to prevent.
pub(crate) struct TocEngine;

impl TocEngine {
    /// Drop the current binding and remove its generated markup.
    pub fn destroy() {
        let Some(options) = BINDING.with(|b| b.borrow_mut().take()) else {
            return;
        };
        if let Some(container) = query(&options.toc_selector) {
            container.set_inner_html("");
        }
    }

    /// Bind to one section and generate its list. Returns the number of
    /// entries generated; zero when the container, the content root, or
    /// every id-carrying heading is missing.
    pub fn init(options: TocOptions) -> usize {
        let entries = build_list(&options).unwrap_or(0);
        BINDING.with(|b| *b.borrow_mut() = Some(options));
        entries
    }
}

fn query(selector: &str) -> Option<web_sys::Element> {
    document()?.query_selector(selector).ok().flatten()
}

fn build_list(options: &TocOptions) -> Option<usize> {
    let doc = document()?;
    let container = doc.query_selector(&options.toc_selector).ok().flatten()?;
    let content = doc
        .query_selector(&options.content_selector)
        .ok()
        .flatten()?;

    let headings = content
        .query_selector_all(&options.heading_selector())
        .ok()?;
    if headings.length() == 0 {
        return Some(0);
    }

    let list = doc.create_element("ol").ok()?;
    list.set_class_name(TOC_LIST_CLASS);

    let mut entries = 0;
    for i in 0..headings.length() {
        let Some(heading) = headings
            .item(i)
            .and_then(|n| n.dyn_into::<web_sys::Element>().ok())
        else {
            continue;
        };
        let Some(id) = heading.get_attribute("id") else {
            continue;
        };

        let item = doc.create_element("li").ok()?;
        item.set_class_name(TOC_LIST_ITEM_CLASS);

        let link = doc.create_element("a").ok()?;
        link.set_class_name(TOC_LINK_CLASS);
        link.set_attribute("href", &format!("#{id}")).ok()?;
        link.set_text_content(heading.text_content().as_deref());

        item.append_child(&link).ok()?;
        list.append_child(&item).ok()?;
        entries += 1;
    }

    container.append_child(&list).ok()?;
    Some(entries)
}

/// Destroy-then-rebuild for the given section, then settle the "on this
/// page" chrome. Missing DOM nodes degrade to an empty list and hidden
/// chrome, never an error.
pub(crate) fn rebuild_for_section(section_id: &str) {
    TocEngine::destroy();
    let options = TocOptions::for_section(section_id);
    let toc_selector = options.toc_selector.clone();
    let entries = TocEngine::init(options);
    set_chrome_visible(&toc_selector, entries > 0);
}

/// Show or hide the `nav` chrome enclosing a TOC container. Re-evaluated on
/// every rebind; sections differ in heading count.
fn set_chrome_visible(toc_selector: &str, visible: bool) {
    let Some(nav) = query(toc_selector).and_then(|c| c.closest("nav").ok().flatten()) else {
        return;
    };
    let Ok(nav) = nav.dyn_into::<web_sys::HtmlElement>() else {
        return;
    };
    if visible {
        let _ = nav.style().remove_property("display");
    } else {
        let _ = nav.style().set_property("display", "none");
    }
}

/// Wire the controller: rebuild on every `section-changed`, plus one
/// synthetic pass for the initial section. The handler is synchronous, so a
/// switch is fully settled before the next interaction dispatches.
pub(crate) fn setup(initial_section: &str) -> WindowListenerHandle {
    let handle = window_event_listener(
        ev::Custom::<web_sys::CustomEvent>::new(SECTION_CHANGED_EVENT),
        |ev: web_sys::CustomEvent| {
            if let Some(section_id) = ev.detail().as_string() {
                rebuild_for_section(&section_id);
            }
        },
    );

    rebuild_for_section(initial_section);

    handle
}

/// Mark the clicked TOC link active within its list (single delegated
/// listener; survives rebinds because the generated links share one class).
pub(crate) fn install_active_link_marker() -> WindowListenerHandle {
    window_event_listener(ev::click, |ev: web_sys::MouseEvent| {
        let Some(link) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.closest(&format!("a.{TOC_LINK_CLASS}")).ok().flatten())
        else {
            return;
        };
        let Some(list) = link.closest(&format!(".{TOC_LIST_CLASS}")).ok().flatten() else {
            return;
        };

        if let Ok(active) = list.query_selector_all(&format!(".{ACTIVE_LINK_CLASS}")) {
            for i in 0..active.length() {
                if let Some(el) = active
                    .item(i)
                    .and_then(|n| n.dyn_into::<web_sys::Element>().ok())
                {
                    let _ = el.class_list().remove_1(ACTIVE_LINK_CLASS);
                }
            }
        }
        let _ = link.class_list().add_1(ACTIVE_LINK_CLASS);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_scope_to_the_section() {
        let options = TocOptions::for_section("guide");
        assert_eq!(options.toc_selector, ".toc-guide");
        assert_eq!(options.content_selector, "#guide article");
    }

    #[test]
    fn test_heading_selector_requires_ids_at_every_level() {
        let options = TocOptions::for_section("readme");
        assert_eq!(
            options.heading_selector(),
            "h1[id], h2[id], h3[id], h4[id], h5[id], h6[id]"
        );
    }
}
