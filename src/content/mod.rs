use wasm_bindgen::JsCast;

/// Marker class the stylesheet keys off to lay badge links out as a row.
pub(crate) const IMAGE_ROW_CLASS: &str = "image-row";

/// One-shot pass over every paragraph, tagging the ones that consist solely
/// of linked badge images. Pure classification: nothing but the marker class
/// is touched, and non-qualifying paragraphs are left alone.
pub(crate) fn classify_image_rows() {
    let Some(doc) = crate::util::document() else {
        return;
    };
    let Ok(paragraphs) = doc.query_selector_all("p") else {
        return;
    };

    for i in 0..paragraphs.length() {
        let Some(p) = paragraphs
            .item(i)
            .and_then(|n| n.dyn_into::<web_sys::Element>().ok())
        else {
            continue;
        };
        if is_image_row(&p) {
            let _ = p.class_list().add_1(IMAGE_ROW_CLASS);
        }
    }
}

/// A paragraph qualifies iff it carries no visible text anywhere, every
/// child is an anchor, and every anchor wraps at least one element that is
/// an image or inline vector graphic and nothing else.
pub(crate) fn is_image_row(p: &web_sys::Element) -> bool {
    if p.text_content()
        .map(|t| !t.trim().is_empty())
        .unwrap_or(false)
    {
        return false;
    }

    let links = p.children();
    if links.length() == 0 {
        return false;
    }

    for i in 0..links.length() {
        let Some(link) = links.item(i) else {
            return false;
        };
        if !link.tag_name().eq_ignore_ascii_case("a") {
            return false;
        }

        let wrapped = link.children();
        if wrapped.length() == 0 {
            return false;
        }
        for j in 0..wrapped.length() {
            let Some(child) = wrapped.item(j) else {
                return false;
            };
            // Inline `svg` keeps its lowercase tag name in an HTML document.
            let tag = child.tag_name();
            if !(tag.eq_ignore_ascii_case("img") || tag.eq_ignore_ascii_case("svg")) {
                return false;
            }
        }
    }

    true
}
