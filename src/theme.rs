//! Colour themes and the effects toggle resource.
//!
//! A theme is an ordered palette used consistently across the string, trail,
//! bob, and sparks.  Themes are selected by index; any index is reduced
//! modulo the palette length so cycling (and a bad TOML value) can never
//! select a non-existent theme.

use bevy::prelude::*;

/// Number of themes in the fixed palette list.
pub const THEME_COUNT: usize = 4;

/// One colour theme for the whole scene.
#[derive(Clone, Debug)]
pub struct ColorTheme {
    /// Display name shown in the HUD.
    pub name: &'static str,
    /// String colour at the pivot end of the gradient.
    pub string_top: Color,
    /// String colour at the bob end of the gradient.
    pub string_bottom: Color,
    /// Trail stroke colour (alpha applied per point from age).
    pub trail: Color,
    /// Bob body fill.
    pub bob_body: Color,
    /// Bob outer ring / detail ring stroke.
    pub bob_ring: Color,
    /// Glow disc colour while effects are enabled.
    pub glow: Color,
    /// Spark base colours; each spark picks one at random.
    pub sparks: [Color; 3],
}

/// Look up a theme, wrapping the index modulo [`THEME_COUNT`].
pub fn theme(index: usize) -> ColorTheme {
    match index % THEME_COUNT {
        0 => ColorTheme {
            name: "Ocean",
            string_top: Color::srgb(0.95, 0.95, 0.95),
            string_bottom: Color::srgb(0.20, 0.57, 0.86),
            trail: Color::srgb(0.20, 0.60, 0.86),
            bob_body: Color::srgb(0.91, 0.30, 0.24),
            bob_ring: Color::srgb(0.75, 0.22, 0.17),
            glow: Color::srgba(0.20, 0.60, 0.86, 0.25),
            sparks: [
                Color::srgb(0.20, 0.60, 0.86),
                Color::srgb(0.52, 0.80, 0.96),
                Color::srgb(0.90, 0.95, 1.00),
            ],
        },
        1 => ColorTheme {
            name: "Ember",
            string_top: Color::srgb(0.95, 0.88, 0.70),
            string_bottom: Color::srgb(0.95, 0.45, 0.10),
            trail: Color::srgb(0.95, 0.50, 0.12),
            bob_body: Color::srgb(0.25, 0.23, 0.28),
            bob_ring: Color::srgb(0.95, 0.60, 0.20),
            glow: Color::srgba(0.95, 0.45, 0.10, 0.25),
            sparks: [
                Color::srgb(1.00, 0.72, 0.20),
                Color::srgb(0.95, 0.45, 0.10),
                Color::srgb(0.90, 0.20, 0.10),
            ],
        },
        2 => ColorTheme {
            name: "Meadow",
            string_top: Color::srgb(0.90, 0.96, 0.88),
            string_bottom: Color::srgb(0.28, 0.72, 0.37),
            trail: Color::srgb(0.30, 0.72, 0.40),
            bob_body: Color::srgb(0.96, 0.83, 0.25),
            bob_ring: Color::srgb(0.70, 0.58, 0.12),
            glow: Color::srgba(0.30, 0.72, 0.40, 0.25),
            sparks: [
                Color::srgb(0.45, 0.85, 0.50),
                Color::srgb(0.85, 0.95, 0.55),
                Color::srgb(0.96, 0.83, 0.25),
            ],
        },
        _ => ColorTheme {
            name: "Violet",
            string_top: Color::srgb(0.93, 0.90, 0.98),
            string_bottom: Color::srgb(0.61, 0.35, 0.89),
            trail: Color::srgb(0.63, 0.40, 0.90),
            bob_body: Color::srgb(0.95, 0.95, 0.97),
            bob_ring: Color::srgb(0.61, 0.35, 0.89),
            glow: Color::srgba(0.61, 0.35, 0.89, 0.25),
            sparks: [
                Color::srgb(0.61, 0.35, 0.89),
                Color::srgb(0.85, 0.60, 0.98),
                Color::srgb(0.98, 0.85, 0.95),
            ],
        },
    }
}

// ── Effects toggle resource ───────────────────────────────────────────────────

/// Whether effects (trail, sparks, glow) are active and which theme is used.
///
/// Mutated only by the explicit toggle/cycle/reset actions in
/// [`crate::input::apply_intent_system`]; everything else reads it.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct EffectsConfig {
    /// Trail sampling, spark emission, and the glow disc are gated on this.
    pub enabled: bool,
    /// Index into the fixed theme list; always read through [`theme`],
    /// which wraps modulo [`THEME_COUNT`].
    pub theme: usize,
}

impl EffectsConfig {
    /// Advance to the next theme, wrapping at the end of the palette.
    pub fn cycle_theme(&mut self) {
        self.theme = (self.theme + 1) % THEME_COUNT;
    }

    /// The active theme's palette.
    pub fn active_theme(&self) -> ColorTheme {
        theme(self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycling_wraps_around_the_palette() {
        let mut fx = EffectsConfig::default();
        for _ in 0..THEME_COUNT {
            fx.cycle_theme();
        }
        assert_eq!(fx.theme, 0);
    }

    #[test]
    fn out_of_range_index_is_wrapped_not_rejected() {
        let wrapped = theme(THEME_COUNT + 2);
        let direct = theme(2);
        assert_eq!(wrapped.name, direct.name);
    }

    #[test]
    fn theme_names_are_distinct() {
        let names: Vec<_> = (0..THEME_COUNT).map(|i| theme(i).name).collect();
        let mut deduped = names.clone();
        deduped.dedup();
        assert_eq!(names.len(), deduped.len());
    }
}
