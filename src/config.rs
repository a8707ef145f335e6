//! Page configuration: element ids, storage key, timings and cat vocabulary.
//!
//! `SiteConfig::default()` matches the markup shipped with the portfolio page.
//! With the `serde` feature every struct (de)serializes with `#[serde(default)]`
//! so a host page can override a single field from JSON.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SiteConfig {
    pub theme: ThemeConfig,
    pub cat: CatConfig,
    pub modal: ModalConfig,
    pub links: LinkConfig,
}

#[cfg(feature = "serde_json")]
impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, crate::SiteError> {
        serde_json::from_str(raw).map_err(|e| crate::SiteError::Config(e.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ThemeConfig {
    /// localStorage key holding "light" / "dark".
    pub storage_key: String,
    pub light_class: String,
    pub dark_class: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".into(),
            light_class: "light-theme".into(),
            dark_class: "dark-theme".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct CatConfig {
    pub widget_id: String,
    pub speech_id: String,
    pub pupil_selector: String,
    pub speaking_class: String,
    pub excited_animation: String,
    pub prompt: String,
    pub happy_message: String,
    pub light_secondary: String,
    pub dark_secondary: String,
    pub light_default: String,
    pub dark_default: String,
    pub idle_phrases: Vec<String>,
    /// Chance per idle tick that the cat says something.
    pub idle_chance: f64,
    pub idle_interval_ms: u32,
    pub idle_speech_ms: u32,
    pub click_speech_ms: u32,
    pub happy_ms: u32,
    pub pupil_reset_ms: u32,
    /// Pupils never travel further than this many pixels.
    pub pupil_max_offset: f64,
    /// Pointer distance (px) per pixel of pupil travel.
    pub pupil_distance_scale: f64,
}

impl Default for CatConfig {
    fn default() -> Self {
        Self {
            widget_id: "kikiCat".into(),
            speech_id: "catSpeech".into(),
            pupil_selector: ".pupil".into(),
            speaking_class: "speaking".into(),
            excited_animation: "cat-excited 0.8s ease-in-out infinite".into(),
            prompt: "click me to change theme!".into(),
            happy_message: "purr purr~ ❤️".into(),
            light_secondary: "bright!".into(),
            dark_secondary: "cozy~".into(),
            light_default: "light mode!".into(),
            dark_default: "dark mode!".into(),
            idle_phrases: ["meow?", "*stretches*", "*yawns*", "mrow~", "*blinks slowly*"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            idle_chance: 0.1,
            idle_interval_ms: 5_000,
            idle_speech_ms: 1_500,
            click_speech_ms: 2_000,
            happy_ms: 3_000,
            pupil_reset_ms: 2_000,
            pupil_max_offset: 2.0,
            pupil_distance_scale: 100.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ModalConfig {
    /// Elements whose click opens (or closes) the about window.
    pub trigger_ids: Vec<String>,
    pub window_class: String,
    pub visible_class: String,
    pub header_id: String,
    pub close_id: String,
    pub close_class: String,
    pub reveal_delay_ms: u32,
    pub teardown_delay_ms: u32,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            trigger_ids: vec!["aboutBtn".into(), "hakuLink".into()],
            window_class: "about-window".into(),
            visible_class: "visible".into(),
            header_id: "aboutWindowHeader".into(),
            close_id: "aboutCloseBtn".into(),
            close_class: "close-btn".into(),
            reveal_delay_ms: 10,
            teardown_delay_ms: 400,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct LinkConfig {
    pub contact_id: String,
    pub contact_href: String,
    /// Intercept `a[href^="#"]` clicks and scroll smoothly.
    pub smooth_scroll: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            contact_id: "contactBtn".into(),
            contact_href: "mailto:dhanrazx@proton.me".into(),
            smooth_scroll: true,
        }
    }
}
