/// Edit modes and their UI metadata
///
/// The set of supported transformations is closed: every mode maps to a
/// fixed instruction template in `prompt.rs` and nothing is dispatched
/// dynamically.

/// One of the fixed AI edit operations selectable from the tool grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Restore,
    Enhance,
    Colorize,
    AgeChange,
    Headshot,
    ClothChange,
    ObjectRemove,
    BackgroundRemove,
    BackgroundChange,
    Sketch,
    Cartoonify,
}

impl EditMode {
    /// All modes in tool-grid display order.
    pub const ALL: [EditMode; 11] = [
        EditMode::Restore,
        EditMode::Enhance,
        EditMode::Colorize,
        EditMode::AgeChange,
        EditMode::Headshot,
        EditMode::ClothChange,
        EditMode::ObjectRemove,
        EditMode::BackgroundRemove,
        EditMode::BackgroundChange,
        EditMode::Sketch,
        EditMode::Cartoonify,
    ];

    /// Short label shown on the tool button.
    pub fn label(&self) -> &'static str {
        match self {
            EditMode::Restore => "Restore",
            EditMode::Enhance => "Enhance",
            EditMode::Colorize => "Colorize",
            EditMode::AgeChange => "Age Swap",
            EditMode::Headshot => "Headshot",
            EditMode::ClothChange => "Outfit",
            EditMode::ObjectRemove => "Eraser",
            EditMode::BackgroundRemove => "No BG",
            EditMode::BackgroundChange => "New BG",
            EditMode::Sketch => "Sketch",
            EditMode::Cartoonify => "3D Toon",
        }
    }

    /// Lowercase slug used in download filenames.
    pub fn slug(&self) -> &'static str {
        match self {
            EditMode::Restore => "restore",
            EditMode::Enhance => "enhance",
            EditMode::Colorize => "colorize",
            EditMode::AgeChange => "age-change",
            EditMode::Headshot => "headshot",
            EditMode::ClothChange => "cloth-change",
            EditMode::ObjectRemove => "object-remove",
            EditMode::BackgroundRemove => "bg-remove",
            EditMode::BackgroundChange => "bg-change",
            EditMode::Sketch => "sketch",
            EditMode::Cartoonify => "cartoonify",
        }
    }

    /// Whether the mode takes a free-text custom instruction.
    pub fn takes_custom_text(&self) -> bool {
        matches!(
            self,
            EditMode::ClothChange | EditMode::BackgroundChange | EditMode::ObjectRemove
        )
    }

    /// Placeholder shown in the custom-instruction input.
    pub fn placeholder(&self) -> &'static str {
        match self {
            EditMode::ClothChange => "E.g. Blue business suit, red evening dress...",
            EditMode::BackgroundChange => "E.g. Sunset beach, futuristic city, cozy office...",
            _ => "Describe what to remove...",
        }
    }
}

impl Default for EditMode {
    fn default() -> Self {
        EditMode::Restore
    }
}

/// Target age bucket, only meaningful when the mode is [`EditMode::AgeChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeDirection {
    Child,
    Younger,
    Older,
    Elderly,
}

impl AgeDirection {
    /// All buckets in display order.
    pub const ALL: [AgeDirection; 4] = [
        AgeDirection::Child,
        AgeDirection::Younger,
        AgeDirection::Older,
        AgeDirection::Elderly,
    ];

    /// Label shown on the age selector buttons.
    pub fn label(&self) -> &'static str {
        match self {
            AgeDirection::Child => "Child",
            AgeDirection::Younger => "Younger",
            AgeDirection::Older => "Older",
            AgeDirection::Elderly => "Elderly",
        }
    }
}

impl Default for AgeDirection {
    fn default() -> Self {
        AgeDirection::Younger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_modes_listed_once() {
        // The enumeration is closed at eleven operations.
        assert_eq!(EditMode::ALL.len(), 11);
        for (i, a) in EditMode::ALL.iter().enumerate() {
            for b in &EditMode::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_custom_text_modes() {
        let custom: Vec<EditMode> = EditMode::ALL
            .into_iter()
            .filter(EditMode::takes_custom_text)
            .collect();
        assert_eq!(
            custom,
            vec![
                EditMode::ClothChange,
                EditMode::ObjectRemove,
                EditMode::BackgroundChange,
            ]
        );
    }

    #[test]
    fn test_slugs_are_filename_safe() {
        for mode in EditMode::ALL {
            assert!(mode
                .slug()
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '-'));
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(EditMode::default(), EditMode::Restore);
        assert_eq!(AgeDirection::default(), AgeDirection::Younger);
    }
}
