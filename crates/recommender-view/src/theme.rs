//! Mood styling.
//!
//! [`theme_for`] is a total function: every [`Mood`], including
//! `Unrecognized`, maps to an image and an accent color.

use std::fmt;

use mood_types::Mood;

/// Header artwork shown above the form.
pub const HEADER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1511671782779-c97d3d27a1d4?auto=format&fit=crop&w=400&q=80";

/// Brand green used for the title and the submit control.
pub const BRAND_COLOR: Rgb = Rgb(0x1d, 0xb9, 0x54);

/// Color of failure text.
pub const ERROR_COLOR: Rgb = Rgb(0xe7, 0x4c, 0x3c);

/// Accent for labels without a theme of their own.
pub const FALLBACK_ACCENT: Rgb = Rgb(0xcc, 0xcc, 0xcc);

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Image and accent color for one mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodTheme {
    pub image_url: &'static str,
    pub accent: Rgb,
}

const SAD_IMAGE: &str =
    "https://images.unsplash.com/photo-1464983953574-0892a716854b?auto=format&fit=crop&w=400&q=80";
const HAPPY_IMAGE: &str =
    "https://images.unsplash.com/photo-1506744038136-46273834b3fb?auto=format&fit=crop&w=400&q=80";
const ANGRY_IMAGE: &str =
    "https://images.unsplash.com/photo-1519125323398-675f0ddb6308?auto=format&fit=crop&w=400&q=80";
const FEARFUL_IMAGE: &str =
    "https://images.unsplash.com/photo-1465101046530-73398c7f28ca?auto=format&fit=crop&w=400&q=80";
const NEUTRAL_IMAGE: &str =
    "https://images.unsplash.com/photo-1465101178521-c1a9136a3b99?auto=format&fit=crop&w=400&q=80";

pub fn theme_for(mood: Mood) -> MoodTheme {
    match mood {
        Mood::Sad => MoodTheme {
            image_url: SAD_IMAGE,
            accent: Rgb(0x34, 0x98, 0xdb),
        },
        Mood::Happy => MoodTheme {
            image_url: HAPPY_IMAGE,
            accent: Rgb(0xf1, 0xc4, 0x0f),
        },
        Mood::Angry => MoodTheme {
            image_url: ANGRY_IMAGE,
            accent: Rgb(0xe7, 0x4c, 0x3c),
        },
        Mood::Fearful => MoodTheme {
            image_url: FEARFUL_IMAGE,
            accent: Rgb(0x9b, 0x59, 0xb6),
        },
        Mood::Neutral => MoodTheme {
            image_url: NEUTRAL_IMAGE,
            accent: Rgb(0x7f, 0x8c, 0x8d),
        },
        // Neutral artwork, but a plain gray rather than neutral's slate
        Mood::Unrecognized => MoodTheme {
            image_url: NEUTRAL_IMAGE,
            accent: FALLBACK_ACCENT,
        },
    }
}

pub fn theme_for_label(label: &str) -> MoodTheme {
    theme_for(Mood::from_label(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_moods_have_distinct_accents() {
        let accents: Vec<Rgb> = Mood::KNOWN.iter().map(|m| theme_for(*m).accent).collect();
        for (i, a) in accents.iter().enumerate() {
            for b in &accents[i + 1..] {
                assert_ne!(a, b);
            }
            assert_ne!(*a, FALLBACK_ACCENT);
        }
    }

    #[test]
    fn test_unknown_label_falls_back() {
        let theme = theme_for_label("joyful");
        assert_eq!(theme.image_url, theme_for(Mood::Neutral).image_url);
        assert_eq!(theme.accent, FALLBACK_ACCENT);
        assert_eq!(theme.accent.to_hex(), "#cccccc");
    }

    #[test]
    fn test_label_lookup() {
        assert_eq!(theme_for_label("sad").accent.to_hex(), "#3498db");
        assert_eq!(theme_for_label("happy").accent.to_hex(), "#f1c40f");
        assert_eq!(theme_for_label("angry").accent, ERROR_COLOR);
        assert_eq!(theme_for_label("fearful").accent.to_string(), "#9b59b6");
        assert_eq!(theme_for_label("neutral").accent.to_hex(), "#7f8c8d");
    }
}
