use crate::host::ColorScheme;

const DARK_PALETTE: [(&str, &str); 4] = [
    ("--background", "#1C1C1E"),
    ("--card-background", "#2C2C2E"),
    ("--text-primary", "#FFFFFF"),
    ("--text-secondary", "#8E8E93"),
];

/// CSS custom property overrides for the host's color scheme.
/// Light keeps the stylesheet defaults.
pub fn theme_overrides(scheme: ColorScheme) -> &'static [(&'static str, &'static str)] {
    match scheme {
        ColorScheme::Light => &[],
        ColorScheme::Dark => &DARK_PALETTE,
    }
}

pub fn theme_style(scheme: ColorScheme) -> String {
    let overrides = theme_overrides(scheme);
    if overrides.is_empty() {
        return String::new();
    }
    let body: String = overrides
        .iter()
        .map(|(name, value)| format!("{name}: {value};"))
        .collect::<Vec<_>>()
        .join(" ");
    format!("<style>:root {{ {body} }}</style>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_scheme_has_no_overrides() {
        assert!(theme_overrides(ColorScheme::Light).is_empty());
        assert_eq!(theme_style(ColorScheme::Light), "");
    }

    #[test]
    fn dark_scheme_sets_palette() {
        let style = theme_style(ColorScheme::Dark);
        assert!(style.starts_with("<style>:root {"));
        assert!(style.contains("--background: #1C1C1E;"));
        assert!(style.contains("--card-background: #2C2C2E;"));
        assert!(style.contains("--text-primary: #FFFFFF;"));
        assert!(style.contains("--text-secondary: #8E8E93;"));
    }
}
