//! Small DOM helpers for the page shell.

use vocab_deck::Theme;

/// Swap the theme class on `<body>`.
pub fn apply(theme: Theme) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    let classes = body.class_list();
    for other in Theme::ALL {
        let _ = classes.remove_1(other.css_class());
    }
    if let Err(e) = classes.add_1(theme.css_class()) {
        log::warn!("theme: could not apply {}: {e:?}", theme.css_class());
    }
}

/// Value of the `level` query parameter of the current page, if any.
pub fn query_level() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get("level").filter(|l| !l.trim().is_empty())
}
