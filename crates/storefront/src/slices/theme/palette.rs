//! Fixed color palettes, one per theme mode.

/// Hex colors used by the views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub accent: &'static str,
    pub error: &'static str,
    pub success: &'static str,
    pub tab_bar_background: &'static str,
    pub tab_bar_label: &'static str,
}

pub const LIGHT: Palette = Palette {
    primary: "#228B22",
    background: "#FFFFFF",
    surface: "#F4F1EA",
    text_primary: "#3E3E3E",
    text_secondary: "#6E6E6E",
    accent: "#8A9A5B",
    error: "#B22222",
    success: "#28A745",
    tab_bar_background: "#FFFFFF",
    tab_bar_label: "#555555",
};

pub const DARK: Palette = Palette {
    primary: "#32D74B",
    background: "#121212",
    surface: "#1E1E1E",
    text_primary: "#E0E0E0",
    text_secondary: "#A0A0A0",
    accent: "#A8B88A",
    error: "#FF453A",
    success: "#32D74B",
    tab_bar_background: "#1E1E1E",
    tab_bar_label: "#CCCCCC",
};
