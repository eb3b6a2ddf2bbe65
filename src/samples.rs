//! The static sample configuration shown by the demo binary.

use crate::card::{CardConfig, ReminderConfig};
use crate::element::Color;
use anyhow::{Context, Result};
use std::path::Path;

pub fn reminders() -> Vec<ReminderConfig> {
    vec![
        ReminderConfig {
            title: "Don't forget math homework".to_string(),
            emoji: "\u{1F4D6}".to_string(),
            time: "2:30 PM".to_string(),
            gradient: vec![
                Color::new(0.85, 0.75, 0.55, 1.0),
                Color::new(0.80, 0.65, 0.50, 1.0),
            ],
        },
        ReminderConfig {
            title: "Buy Snacks before 6 PM".to_string(),
            emoji: "\u{1F36A}".to_string(),
            time: "5:45 PM".to_string(),
            gradient: vec![
                Color::new(0.78, 0.72, 0.85, 1.0),
                Color::new(0.72, 0.65, 0.80, 1.0),
            ],
        },
        ReminderConfig {
            title: "Call mom Every Weekend".to_string(),
            emoji: "\u{1F495}".to_string(),
            time: "8:00 PM".to_string(),
            gradient: vec![
                Color::new(0.88, 0.72, 0.65, 1.0),
                Color::new(0.82, 0.62, 0.55, 1.0),
            ],
        },
        ReminderConfig {
            title: "Water the plants".to_string(),
            emoji: "\u{1F331}".to_string(),
            time: "Morning".to_string(),
            gradient: vec![
                Color::new(0.65, 0.80, 0.78, 1.0),
                Color::new(0.55, 0.75, 0.72, 1.0),
            ],
        },
    ]
}

pub fn folder_gradient() -> Vec<Color> {
    vec![Color::rgb8(0x48, 0x43, 0x4E), Color::rgb8(0x35, 0x30, 0x39)]
}

pub fn folder_cards() -> Vec<CardConfig> {
    vec![
        CardConfig {
            title: "Japan 2027".to_string(),
            image_refs: vec![
                "card1.jpg".to_string(),
                "card2.jpg".to_string(),
                "card3.jpg".to_string(),
            ],
            background_gradient: folder_gradient(),
            sticker_ref: None,
            show_date: true,
        },
        CardConfig {
            title: "Japan 2027".to_string(),
            image_refs: vec![
                "card1.jpg".to_string(),
                "card2.jpg".to_string(),
                "card3.jpg".to_string(),
            ],
            background_gradient: folder_gradient(),
            sticker_ref: Some("sticker.svg".to_string()),
            show_date: true,
        },
    ]
}

/// Loads folder-card overrides from a JSON file, replacing the built-in
/// sample set.
pub fn load_card_overrides(path: &Path) -> Result<Vec<CardConfig>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read card overrides at {}", path.display()))?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_sets_are_well_formed() {
        assert_eq!(reminders().len(), 4);
        for r in reminders() {
            assert!(r.gradient.len() >= 2);
        }
        for c in folder_cards() {
            assert!(!c.image_refs.is_empty() && c.image_refs.len() <= 3);
            assert!(c.background_gradient.len() >= 2);
        }
    }

    #[test]
    fn card_config_round_trips_through_json() {
        let cards = folder_cards();
        let json = serde_json::to_string(&cards).unwrap();
        let back: Vec<CardConfig> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), cards.len());
        assert_eq!(back[1].sticker_ref.as_deref(), Some("sticker.svg"));
    }
}
