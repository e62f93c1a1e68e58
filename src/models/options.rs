//! Fixed option sets offered by the create form.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageStyle {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TtsModel {
    pub id: &'static str,
    pub name: &'static str,
    pub multilingual: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FontOption {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(rename = "className")]
    pub class_name: &'static str,
}

pub const IMAGE_STYLES: &[ImageStyle] = &[
    ImageStyle {
        id: "realistic",
        name: "Realistic",
        description: "Highly detailed, 8K, professional photography",
    },
    ImageStyle {
        id: "cartoon",
        name: "Cartoon",
        description: "Vibrant colors, Pixar animation, 3D render",
    },
    ImageStyle {
        id: "anime",
        name: "Anime",
        description: "Studio Ghibli style, vibrant colors, detailed",
    },
    ImageStyle {
        id: "fantasy",
        name: "Fantasy",
        description: "Magical, dreamlike, highly detailed digital painting",
    },
    ImageStyle {
        id: "cyberpunk",
        name: "Cyberpunk",
        description: "Neon lights, futuristic, cinematic lighting",
    },
    ImageStyle {
        id: "watercolor",
        name: "Watercolor",
        description: "Soft edges, artistic, pastel colors",
    },
];

pub const TTS_MODELS: &[TtsModel] = &[
    TtsModel {
        id: "1",
        name: "English (High Quality)",
        multilingual: false,
    },
    TtsModel {
        id: "2",
        name: "Multilingual (XTTS v2)",
        multilingual: true,
    },
];

pub const FONT_OPTIONS: &[FontOption] = &[
    FontOption {
        id: "roboto",
        name: "Roboto",
        class_name: "font-roboto",
    },
    FontOption {
        id: "opensans",
        name: "Open Sans",
        class_name: "font-opensans",
    },
    FontOption {
        id: "inter",
        name: "Inter",
        class_name: "font-inter",
    },
    FontOption {
        id: "space",
        name: "Space Grotesk",
        class_name: "font-space",
    },
    FontOption {
        id: "poppins",
        name: "Poppins",
        class_name: "font-poppins",
    },
];

pub fn image_style(id: &str) -> Option<&'static ImageStyle> {
    IMAGE_STYLES.iter().find(|s| s.id == id)
}

pub fn tts_model(id: &str) -> Option<&'static TtsModel> {
    TTS_MODELS.iter().find(|m| m.id == id)
}

pub fn font(id: &str) -> Option<&'static FontOption> {
    FONT_OPTIONS.iter().find(|f| f.id == id)
}
