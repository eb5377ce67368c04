/// Per-mode instruction templates
///
/// Each edit mode maps to a fixed natural-language template that is sent
/// verbatim to the generative endpoint. Modes that accept free text
/// interpolate it as-is; empty text falls back to a canned default phrase.

use crate::state::modes::{AgeDirection, EditMode};

/// Default phrase for [`EditMode::ClothChange`] when no custom text is given.
pub const DEFAULT_OUTFIT: &str = "stylish modern casual wear";

/// Default phrase for [`EditMode::BackgroundChange`] when no custom text is given.
pub const DEFAULT_BACKGROUND: &str = "a beautiful outdoor scenery";

/// Default phrase for [`EditMode::ObjectRemove`] when no custom text is given.
pub const DEFAULT_OBJECT: &str = "object";

/// Build the complete instruction string for one generation request.
///
/// `custom` is only consulted for the modes that take free text; whitespace-only
/// input counts as empty and falls back to the mode's default phrase.
pub fn build_instruction(mode: EditMode, age: AgeDirection, custom: &str) -> String {
    let custom = custom.trim();

    match mode {
        EditMode::Restore => {
            "Restore this old photo to look like it was taken with a modern high-end camera. \
             Fix any scratches, tears, dust, or noise. Sharpen details and improve clarity. \
             Output a photorealistic result. If the image is B&W, keep it B&W unless \
             colorization is requested."
                .to_string()
        }
        EditMode::Enhance => {
            "Enhance this image to professional studio quality. Upscale resolution, sharpen \
             fine details, denoise, and improve lighting and contrast. Make the image crisp, \
             vibrant, and clear while preserving the original subject matter. High definition \
             4k output."
                .to_string()
        }
        EditMode::Colorize => {
            "Colorize this black and white photo. Use natural, realistic colors for skin \
             tones, clothing, and background. The lighting should look consistent and \
             photorealistic."
                .to_string()
        }
        EditMode::AgeChange => format!(
            "Edit this photo to make the person look {}. Preserve the original identity, \
             facial structure, ethnicity, and background context exactly. Only change the \
             age-related characteristics (skin texture, hair). Return a highly realistic, \
             seamless photo.",
            age_description(age)
        ),
        EditMode::ClothChange => format!(
            "Change the person's clothing in this photo to: {}. Maintain the exact body \
             pose, facial expression, and background. The clothing should fit naturally and \
             look photorealistic.",
            or_default(custom, DEFAULT_OUTFIT)
        ),
        EditMode::BackgroundRemove => {
            "Remove the background of this image and replace it with a solid clean white \
             background. Isolate the main subject perfectly. Do not alter the subject's \
             appearance."
                .to_string()
        }
        EditMode::BackgroundChange => format!(
            "Change the background of this image to: {}. Ensure the lighting on the subject \
             matches the new background for a realistic composite. Keep the subject exactly \
             the same.",
            or_default(custom, DEFAULT_BACKGROUND)
        ),
        EditMode::ObjectRemove => format!(
            "Remove the {} from this image. Fill in the empty space seamlessly to match the \
             surrounding background pattern and texture. The result should look natural as \
             if the object was never there.",
            or_default(custom, DEFAULT_OBJECT)
        ),
        EditMode::Headshot => {
            "Transform this photo into a professional corporate headshot. The person should \
             be wearing professional business attire (suit/blazer). Ensure neutral \
             professional lighting and a soft blurred office or studio background. Maintain \
             the person's identity perfectly."
                .to_string()
        }
        EditMode::Sketch => {
            "Convert this image into a high-quality pencil sketch. Detailed shading, \
             artistic strokes, black and white graphite style."
                .to_string()
        }
        EditMode::Cartoonify => {
            "Transform this image into a high-quality 3D Disney/Pixar style cartoon \
             character. Keep the resemblance to the original person but stylized. Vibrant \
             colors, smooth shading."
                .to_string()
        }
    }
}

fn or_default<'a>(custom: &'a str, default: &'a str) -> &'a str {
    if custom.is_empty() {
        default
    } else {
        custom
    }
}

fn age_description(age: AgeDirection) -> &'static str {
    match age {
        AgeDirection::Younger => {
            "much younger, like a teenager or young adult (approx 18-24 years old)"
        }
        AgeDirection::Child => "like a young child (approx 5-8 years old)",
        AgeDirection::Elderly => "elderly (approx 75+ years old) with natural aging features",
        AgeDirection::Older => "older and more mature (approx 50-60 years old)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mode_produces_nonempty_instruction() {
        for mode in EditMode::ALL {
            let instruction = build_instruction(mode, AgeDirection::default(), "");
            assert!(!instruction.is_empty(), "empty instruction for {:?}", mode);
        }
    }

    #[test]
    fn test_fixed_template_text_per_mode() {
        let cases = [
            (EditMode::Restore, "Restore this old photo"),
            (EditMode::Enhance, "professional studio quality"),
            (EditMode::Colorize, "Colorize this black and white photo"),
            (EditMode::AgeChange, "Preserve the original identity"),
            (EditMode::Headshot, "professional corporate headshot"),
            (EditMode::ClothChange, "Change the person's clothing"),
            (EditMode::ObjectRemove, "Fill in the empty space seamlessly"),
            (EditMode::BackgroundRemove, "solid clean white background"),
            (EditMode::BackgroundChange, "Change the background of this image"),
            (EditMode::Sketch, "pencil sketch"),
            (EditMode::Cartoonify, "3D Disney/Pixar style"),
        ];

        for (mode, fragment) in cases {
            let instruction = build_instruction(mode, AgeDirection::default(), "");
            assert!(
                instruction.contains(fragment),
                "{:?} missing template fragment {:?}",
                mode,
                fragment
            );
        }
    }

    #[test]
    fn test_custom_text_interpolated_verbatim() {
        let instruction =
            build_instruction(EditMode::ClothChange, AgeDirection::default(), "red kimono");
        assert!(instruction.contains("clothing in this photo to: red kimono."));

        let instruction = build_instruction(
            EditMode::BackgroundChange,
            AgeDirection::default(),
            "a neon-lit alley",
        );
        assert!(instruction.contains("background of this image to: a neon-lit alley."));

        let instruction =
            build_instruction(EditMode::ObjectRemove, AgeDirection::default(), "lamp post");
        assert!(instruction.contains("Remove the lamp post from this image."));
    }

    #[test]
    fn test_empty_custom_text_falls_back_to_defaults() {
        let instruction = build_instruction(EditMode::ClothChange, AgeDirection::default(), "");
        assert!(instruction.contains(DEFAULT_OUTFIT));

        // Whitespace-only input counts as empty
        let instruction = build_instruction(EditMode::BackgroundChange, AgeDirection::default(), "   ");
        assert!(instruction.contains(DEFAULT_BACKGROUND));

        let instruction = build_instruction(EditMode::ObjectRemove, AgeDirection::default(), "");
        assert!(instruction.contains("Remove the object from this image."));
    }

    #[test]
    fn test_age_buckets_change_instruction() {
        let child = build_instruction(EditMode::AgeChange, AgeDirection::Child, "");
        let younger = build_instruction(EditMode::AgeChange, AgeDirection::Younger, "");
        let older = build_instruction(EditMode::AgeChange, AgeDirection::Older, "");
        let elderly = build_instruction(EditMode::AgeChange, AgeDirection::Elderly, "");

        assert!(child.contains("young child (approx 5-8 years old)"));
        assert!(younger.contains("approx 18-24 years old"));
        assert!(older.contains("approx 50-60 years old"));
        assert!(elderly.contains("approx 75+ years old"));
    }

    #[test]
    fn test_age_ignored_outside_age_change() {
        let a = build_instruction(EditMode::Sketch, AgeDirection::Child, "");
        let b = build_instruction(EditMode::Sketch, AgeDirection::Elderly, "");
        assert_eq!(a, b);
    }
}
