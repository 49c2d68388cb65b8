//! Emoji frequency.
//!
//! Emojis are detected one character at a time against the Unicode emoji
//! list. Skin tone modifiers are components of other emojis and are never
//! counted on their own.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Table;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiCount {
    pub emoji: String,
    /// CLDR short name, e.g. `"face with tears of joy"`
    pub name: String,
    pub count: usize,
}

/// Returns the emojis in `text`, in order, skin tone modifiers excluded.
pub fn extract_emojis(text: &str) -> Vec<&'static emojis::Emoji> {
    let mut buf = [0u8; 4];
    text.chars()
        .filter_map(|c| emojis::get(c.encode_utf8(&mut buf)))
        .filter(|e| !e.name().contains("skin tone"))
        .collect()
}

/// Ranks emojis by frequency across all messages.
///
/// Ties keep the order in which the emojis first appear.
pub fn emoji_ranking(table: &Table) -> Vec<EmojiCount> {
    // emoji -> (first seen, count, name)
    let mut seen: HashMap<&'static str, (usize, usize, &'static str)> = HashMap::new();
    let mut order = 0usize;
    for record in table {
        for emoji in extract_emojis(&record.message) {
            let entry = seen.entry(emoji.as_str()).or_insert_with(|| {
                order += 1;
                (order, 0, emoji.name())
            });
            entry.1 += 1;
        }
    }

    let mut ranked: Vec<_> = seen.into_iter().collect();
    ranked.sort_by(|(_, a), (_, b)| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .map(|(emoji, (_, count, name))| EmojiCount {
            emoji: emoji.to_string(),
            name: name.to_string(),
            count,
        })
        .collect()
}
