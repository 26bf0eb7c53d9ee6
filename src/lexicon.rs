//! Kana reading tables
//!
//! Each character set is a static list of (glyph, canonical romanization)
//! pairs. Readings are lowercase Hepburn.

use serde::{Deserialize, Serialize};

/// A single glyph and its canonical reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexiconEntry {
    pub kana: &'static str,
    pub romanization: &'static str,
}

const fn e(kana: &'static str, romanization: &'static str) -> LexiconEntry {
    LexiconEntry { kana, romanization }
}

/// Selectable character sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CharSet {
    Hiragana,
    HiraganaDiacritics,
    Katakana,
    KatakanaDiacritics,
    Kanji,
}

impl CharSet {
    /// All sets, in vocabulary build order
    pub const ALL: [CharSet; 5] = [
        CharSet::Hiragana,
        CharSet::HiraganaDiacritics,
        CharSet::Katakana,
        CharSet::KatakanaDiacritics,
        CharSet::Kanji,
    ];

    /// The static table for this set
    pub fn entries(&self) -> &'static [LexiconEntry] {
        match self {
            CharSet::Hiragana => HIRAGANA,
            CharSet::HiraganaDiacritics => HIRAGANA_DIACRITICS,
            CharSet::Katakana => KATAKANA,
            CharSet::KatakanaDiacritics => KATAKANA_DIACRITICS,
            CharSet::Kanji => KANJI,
        }
    }

    /// Block background color (0xRRGGBB) for glyphs drawn from this set
    pub fn color(&self) -> u32 {
        match self {
            CharSet::Hiragana => 0xFFFFFF,
            CharSet::HiraganaDiacritics => 0xFFE4E1,
            CharSet::Katakana => 0xE0FFFF,
            CharSet::KatakanaDiacritics => 0xE6E6FA,
            CharSet::Kanji => 0xFFFACD,
        }
    }
}

pub const HIRAGANA: &[LexiconEntry] = &[
    e("あ", "a"), e("い", "i"), e("う", "u"), e("え", "e"), e("お", "o"),
    e("か", "ka"), e("き", "ki"), e("く", "ku"), e("け", "ke"), e("こ", "ko"),
    e("さ", "sa"), e("し", "shi"), e("す", "su"), e("せ", "se"), e("そ", "so"),
    e("た", "ta"), e("ち", "chi"), e("つ", "tsu"), e("て", "te"), e("と", "to"),
    e("な", "na"), e("に", "ni"), e("ぬ", "nu"), e("ね", "ne"), e("の", "no"),
    e("は", "ha"), e("ひ", "hi"), e("ふ", "fu"), e("へ", "he"), e("ほ", "ho"),
    e("ま", "ma"), e("み", "mi"), e("む", "mu"), e("め", "me"), e("も", "mo"),
    e("や", "ya"), e("ゆ", "yu"), e("よ", "yo"),
    e("ら", "ra"), e("り", "ri"), e("る", "ru"), e("れ", "re"), e("ろ", "ro"),
    e("わ", "wa"), e("を", "o"), e("ん", "nn"),
];

pub const HIRAGANA_DIACRITICS: &[LexiconEntry] = &[
    e("が", "ga"), e("ぎ", "gi"), e("ぐ", "gu"), e("げ", "ge"), e("ご", "go"),
    e("ざ", "za"), e("じ", "ji"), e("ず", "zu"), e("ぜ", "ze"), e("ぞ", "zo"),
    e("だ", "da"), e("ぢ", "di"), e("づ", "du"), e("で", "de"), e("ど", "do"),
    e("ば", "ba"), e("び", "bi"), e("ぶ", "bu"), e("べ", "be"), e("ぼ", "bo"),
    e("ぱ", "pa"), e("ぴ", "pi"), e("ぷ", "pu"), e("ぺ", "pe"), e("ぽ", "po"),
];

pub const KATAKANA: &[LexiconEntry] = &[
    e("ア", "a"), e("イ", "i"), e("ウ", "u"), e("エ", "e"), e("オ", "o"),
    e("カ", "ka"), e("キ", "ki"), e("ク", "ku"), e("ケ", "ke"), e("コ", "ko"),
    e("サ", "sa"), e("シ", "shi"), e("ス", "su"), e("セ", "se"), e("ソ", "so"),
    e("タ", "ta"), e("チ", "chi"), e("ツ", "tsu"), e("テ", "te"), e("ト", "to"),
    e("ナ", "na"), e("ニ", "ni"), e("ヌ", "nu"), e("ネ", "ne"), e("ノ", "no"),
    e("ハ", "ha"), e("ヒ", "hi"), e("フ", "fu"), e("ヘ", "he"), e("ホ", "ho"),
    e("マ", "ma"), e("ミ", "mi"), e("ム", "mu"), e("メ", "me"), e("モ", "mo"),
    e("ヤ", "ya"), e("ユ", "yu"), e("ヨ", "yo"),
    e("ラ", "ra"), e("リ", "ri"), e("ル", "ru"), e("レ", "re"), e("ロ", "ro"),
    e("ワ", "wa"), e("ヲ", "o"), e("ン", "nn"),
];

pub const KATAKANA_DIACRITICS: &[LexiconEntry] = &[
    e("ガ", "ga"), e("ギ", "gi"), e("グ", "gu"), e("ゲ", "ge"), e("ゴ", "go"),
    e("ザ", "za"), e("ジ", "ji"), e("ズ", "zu"), e("ゼ", "ze"), e("ゾ", "zo"),
    e("ダ", "da"), e("ヂ", "di"), e("ヅ", "du"), e("デ", "de"), e("ド", "do"),
    e("バ", "ba"), e("ビ", "bi"), e("ブ", "bu"), e("ベ", "be"), e("ボ", "bo"),
    e("パ", "pa"), e("ピ", "pi"), e("プ", "pu"), e("ペ", "pe"), e("ポ", "po"),
];

/// Single-glyph kanji with one common reading
pub const KANJI: &[LexiconEntry] = &[
    e("一", "ichi"), e("二", "ni"), e("三", "san"), e("四", "yon"), e("五", "go"),
    e("六", "roku"), e("七", "nana"), e("八", "hachi"), e("九", "kyuu"), e("十", "juu"),
    e("日", "hi"), e("月", "tsuki"), e("火", "hi"), e("水", "mizu"), e("木", "ki"),
    e("金", "kin"), e("土", "tsuchi"), e("山", "yama"), e("川", "kawa"), e("人", "hito"),
    e("口", "kuchi"), e("目", "me"), e("手", "te"), e("空", "sora"), e("花", "hana"),
];

/// Readings accepted in addition to the canonical one when alternate
/// readings are enabled. Keyed by glyph; glyphs absent from the active
/// vocabulary are ignored.
pub const ALTERNATE_READINGS: &[LexiconEntry] = &[
    e("は", "wa"), e("へ", "e"), e("を", "wo"),
    e("し", "si"), e("ち", "ti"), e("つ", "tu"), e("ふ", "hu"), e("ん", "n"),
    e("じ", "zi"), e("ぢ", "ji"), e("づ", "zu"),
    e("シ", "si"), e("チ", "ti"), e("ツ", "tu"), e("フ", "hu"), e("ン", "n"),
    e("ジ", "zi"), e("ヂ", "ji"), e("ヅ", "zu"), e("ヲ", "wo"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tables_have_unique_glyphs() {
        for set in CharSet::ALL {
            let glyphs: HashSet<_> = set.entries().iter().map(|e| e.kana).collect();
            assert_eq!(glyphs.len(), set.entries().len(), "duplicate glyph in {:?}", set);
        }
    }

    #[test]
    fn test_readings_are_lowercase_ascii() {
        for set in CharSet::ALL {
            for entry in set.entries() {
                assert!(!entry.romanization.is_empty());
                assert!(entry.romanization.chars().all(|c| c.is_ascii_lowercase()));
            }
        }
    }

    #[test]
    fn test_kana_readings_are_not_prefixes() {
        // Matching runs after every keystroke, so a reading that is a strict
        // prefix of another would make the longer one untypeable
        let kana = [
            CharSet::Hiragana,
            CharSet::HiraganaDiacritics,
            CharSet::Katakana,
            CharSet::KatakanaDiacritics,
        ];
        let readings: Vec<&str> = kana
            .iter()
            .flat_map(|set| set.entries())
            .map(|e| e.romanization)
            .collect();
        for short in &readings {
            for long in &readings {
                assert!(
                    short == long || !long.starts_with(short),
                    "{} shadows {}",
                    short,
                    long
                );
            }
        }
    }

    #[test]
    fn test_ambiguous_kana_readings() {
        let reading = |kana: &str| {
            HIRAGANA
                .iter()
                .chain(KATAKANA)
                .find(|e| e.kana == kana)
                .map(|e| e.romanization)
        };
        assert_eq!(reading("を"), Some("o"));
        assert_eq!(reading("ヲ"), Some("o"));
        assert_eq!(reading("ん"), Some("nn"));
        assert_eq!(reading("ン"), Some("nn"));
    }
}
