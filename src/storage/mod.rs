use crate::state::Theme;

pub(crate) const THEME_KEY: &str = "theme";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Stored theme preference, if one exists and parses.
///
/// Unknown values yield `None` so the caller falls open to ambient
/// resolution instead of trusting a corrupt entry.
pub(crate) fn load_theme() -> Option<Theme> {
    let raw = local_storage()?.get_item(THEME_KEY).ok().flatten()?;
    raw.parse().ok()
}

pub(crate) fn save_theme(value: Theme) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(THEME_KEY, &value.to_string());
    }
}

// Test support; the viewer itself never forgets a stored choice.
#[allow(dead_code)]
pub(crate) fn clear_theme() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(THEME_KEY);
    }
}
