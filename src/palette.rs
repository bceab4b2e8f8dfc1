//! The user's working palette and current paint color

use crate::color::Color;
use crate::error::EditError;

/// Colors offered when no configuration overrides them
pub const DEFAULT_COLORS: [&str; 8] =
    ["#000000", "#FFFFFF", "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF", "#00FFFF"];

pub const DEFAULT_MAX_COLORS: usize = 12;

/// An ordered, bounded list of colors with one selected for painting.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
    selected: Color,
    max_colors: usize,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_COLORS.iter().map(|c| Color::new(*c)).collect(), DEFAULT_MAX_COLORS)
    }
}

impl Palette {
    /// Build a palette; the first color starts selected.
    ///
    /// An empty list falls back to black. Colors beyond `max_colors` are dropped.
    pub fn new(mut colors: Vec<Color>, max_colors: usize) -> Self {
        let max_colors = max_colors.max(1);
        colors.dedup();
        colors.truncate(max_colors);
        if colors.is_empty() {
            colors.push(Color::new(DEFAULT_COLORS[0]));
        }
        let selected = colors[0].clone();
        Self { colors, selected, max_colors }
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn selected(&self) -> &Color {
        &self.selected
    }

    pub fn max_colors(&self) -> usize {
        self.max_colors
    }

    /// Add a color and select it. Adding a color already present just selects it.
    pub fn add_color(&mut self, color: Color) -> Result<(), EditError> {
        if !self.colors.contains(&color) {
            if self.colors.len() >= self.max_colors {
                return Err(EditError::PaletteFull(self.max_colors));
            }
            self.colors.push(color.clone());
        }
        self.selected = color;
        Ok(())
    }

    /// Make `color` the paint color.
    ///
    /// Any color may be selected, including ones not in the list.
    pub fn select_color(&mut self, color: Color) {
        self.selected = color;
    }

    /// Replace the list, keeping the selection if it is still offered.
    pub fn replace_colors(&mut self, colors: Vec<Color>) {
        let selected = self.selected.clone();
        *self = Palette::new(colors, self.max_colors);
        if self.colors.contains(&selected) {
            self.selected = selected;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.colors().len(), 8);
        assert_eq!(palette.selected().as_str(), "#000000");
    }

    #[test]
    fn test_add_until_full() {
        let mut palette = Palette::default();
        for i in 0..4 {
            palette.add_color(Color::new(format!("#00000{}", i + 1))).unwrap();
        }
        assert_eq!(palette.colors().len(), 12);
        assert_eq!(palette.selected().as_str(), "#000004");
        assert_eq!(palette.add_color(Color::new("#123456")), Err(EditError::PaletteFull(12)));
        // Re-adding an existing color still works when full
        palette.add_color(Color::new("#FF0000")).unwrap();
        assert_eq!(palette.selected().as_str(), "#FF0000");
    }

    #[test]
    fn test_empty_list_falls_back() {
        let palette = Palette::new(Vec::new(), 4);
        assert_eq!(palette.colors(), &[Color::new("#000000")]);
    }

    #[test]
    fn test_replace_keeps_selection_when_present() {
        let mut palette = Palette::default();
        palette.select_color(Color::new("#FF0000"));
        palette.replace_colors(vec![Color::new("#AAAAAA"), Color::new("#FF0000")]);
        assert_eq!(palette.selected().as_str(), "#FF0000");
        palette.replace_colors(vec![Color::new("#BBBBBB")]);
        assert_eq!(palette.selected().as_str(), "#BBBBBB");
    }
}
