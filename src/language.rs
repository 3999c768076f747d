// Reply-language detection for the claim assistant.
//
// A keyword heuristic, not a classifier. Indicator sets are checked in order
// and the first set with any hit wins, so Hindi beats Marathi whenever both
// appear. Several Devanagari consonants sit in both sets and some romanized
// words are very short ("ka", "to", "is"), so plenty of Marathi and some
// English input lands on Hindi. That ordering is relied on by the client and
// is kept as-is.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Languages the assistant can answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Hindi,
    Marathi,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Hindi => "hindi",
            Language::Marathi => "marathi",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Literal indicators for one language.
#[derive(Debug)]
pub struct IndicatorSet {
    pub language: Language,
    /// Devanagari characters and conjuncts, matched as raw substrings of the
    /// original text
    pub script_chars: &'static [&'static str],
    /// Native-script words, matched against tokens of the lower-cased text
    pub native_words: &'static [&'static str],
    /// Latin-script transliterations, matched against tokens of the
    /// lower-cased text
    pub romanized_words: &'static [&'static str],
}

impl IndicatorSet {
    fn matches(&self, text: &str, tokens: &[&str]) -> bool {
        self.script_chars.iter().any(|c| text.contains(c))
            || self
                .native_words
                .iter()
                .chain(self.romanized_words)
                .any(|word| tokens.contains(word))
    }
}

/// Indicator sets in priority order.
pub static INDICATORS: [IndicatorSet; 2] = [
    IndicatorSet {
        language: Language::Hindi,
        script_chars: &[
            "ह", "ा", "ि", "ी", "ु", "ू", "ृ", "े", "ै", "ओ", "ौ", "ं", "ः", "क", "ख", "ग", "घ",
            "ङ", "च", "छ", "ज", "झ", "ञ", "ट", "ठ", "ड", "ढ", "ण", "त", "थ", "द", "ध", "न", "प",
            "फ", "ब", "भ", "म", "य", "र", "ल", "व", "श", "ष", "स", "क्ष", "त्र", "ज्ञ",
        ],
        native_words: &[
            "क्या", "है", "में", "का", "की", "के", "और", "या", "फिर", "अब", "तो", "भी", "नहीं",
            "हाँ", "कैसे", "कहाँ", "कब", "कोण",
        ],
        romanized_words: &[
            "kya", "hai", "mein", "ka", "ki", "ke", "aur", "ya", "phir", "ab", "to", "bhi", "nahi",
            "haan", "kaise", "kahan", "kab", "kaun", "nahin", "main", "aap", "tum", "hum", "wo",
            "ye", "us", "is", "unka", "unki", "mera", "meri", "tera", "teri", "hamara", "hamari",
        ],
    },
    IndicatorSet {
        language: Language::Marathi,
        script_chars: &[
            "अ", "आ", "इ", "ई", "उ", "ऊ", "ऋ", "ए", "ऐ", "ओ", "औ", "क", "ख", "ग", "घ", "ङ", "च",
            "छ", "ज", "झ", "ञ", "ट", "ठ", "ड", "ढ", "ण", "त", "थ", "द", "ध", "न", "प", "फ", "ब",
            "भ", "म", "य", "र", "ल", "व", "श", "ष", "स", "ह", "ळ", "क्ष", "ज्ञ",
        ],
        native_words: &[
            "काय", "आहे", "मध्ये", "चा", "ची", "चे", "आणि", "किंवा", "मग", "आता", "तर", "देखील",
            "नाही", "होय", "कसे", "कुठे", "कधी", "कोण", "का",
        ],
        romanized_words: &[
            "kay", "ahe", "madhye", "cha", "chi", "che", "ani", "kinva", "maga", "aata", "tar",
            "dekhil", "nahi", "hoy", "kase", "kuthe", "kadhi", "kon", "ka", "mi", "tu", "amhi",
            "to", "he", "te", "tya", "hya", "tyacha", "tyachi", "maza", "mazi", "tuzha", "tuzhi",
            "amcha", "amchi", "kasa", "ahes", "yeil", "karto", "karte",
        ],
    },
];

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c.is_ascii_punctuation() || c == '।' || c == '॥'
}

/// Detect the language a chat message is written in. Defaults to English.
pub fn detect_language(text: &str) -> Language {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = lowered
        .split(is_separator)
        .filter(|t| !t.is_empty())
        .collect();

    let language = INDICATORS
        .iter()
        .find(|set| set.matches(text, &tokens))
        .map(|set| set.language)
        .unwrap_or(Language::English);

    debug!(language = %language, tokens = tokens.len(), "Detected message language");
    language
}
