//! Screenshot identities and the `<key>__<width>.png` file naming convention
//!
//! The capture side names every screenshot after a slugified page label and
//! the viewport width it was taken at. [`ShotId::parse`] is the only way a
//! file name becomes an identity, and it rejects names that do not follow
//! the convention instead of silently skipping them.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::error::ShotdiffError;

/// Extension of every screenshot, baseline and diff image
pub const IMAGE_EXTENSION: &str = "png";

/// Separator between the logical key and the viewport width
pub const WIDTH_SEPARATOR: &str = "__";

fn shot_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Greedy key: "a__b__375.png" is key "a__b", width 375
        Regex::new(r"^(.+)__([0-9]+)\.png$").expect("shot name pattern is valid")
    })
}

/// One (logical key, viewport width) pair
///
/// # Examples
///
/// ```
/// use shotdiff::naming::ShotId;
///
/// let id = ShotId::parse("pricing-page__1400.png")?;
/// assert_eq!(id.key, "pricing-page");
/// assert_eq!(id.width, 1400);
/// assert_eq!(id.file_name(), "pricing-page__1400.png");
/// # Ok::<(), shotdiff::error::ShotdiffError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShotId {
    /// Logical page/view identifier, independent of width
    pub key: String,
    /// Viewport width in CSS pixels
    pub width: u32,
}

impl ShotId {
    /// Build an id from an already-slugified key.
    pub fn new(key: impl Into<String>, width: u32) -> Self {
        Self {
            key: key.into(),
            width,
        }
    }

    /// Build an id from a human page label, slugifying it the same way the
    /// capture tooling does.
    ///
    /// ```
    /// use shotdiff::naming::ShotId;
    ///
    /// let id = ShotId::from_label("Pricing & Plans", 375);
    /// assert_eq!(id.file_name(), "pricing-and-plans__375.png");
    /// ```
    pub fn from_label(label: &str, width: u32) -> Self {
        Self::new(slug(label), width)
    }

    /// Parse a screenshot file name of the form `<key>__<width>.png`.
    pub fn parse(file_name: &str) -> Result<Self, ShotdiffError> {
        let invalid = |reason: &str| ShotdiffError::InvalidShotName {
            file_name: file_name.to_string(),
            reason: reason.to_string(),
        };

        let captures = shot_name_pattern()
            .captures(file_name)
            .ok_or_else(|| invalid("expected <key>__<width>.png"))?;

        let key = &captures[1];
        if key.trim().is_empty() {
            return Err(invalid("key is empty"));
        }

        let width: u32 = captures[2]
            .parse()
            .map_err(|_| invalid("width does not fit in 32 bits"))?;
        if width == 0 {
            return Err(invalid("width must be positive"));
        }

        Ok(Self::new(key, width))
    }

    /// File name of this screenshot inside any image set directory.
    pub fn file_name(&self) -> String {
        format!(
            "{}{}{}.{}",
            self.key, WIDTH_SEPARATOR, self.width, IMAGE_EXTENSION
        )
    }
}

impl fmt::Display for ShotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}px", self.key, self.width)
    }
}

/// Slugify a page label into a file-name-safe key.
///
/// Mirrors strict-mode `slugify`: symbols and accented letters are
/// transliterated (`&` becomes `and`, `é` becomes `e`), any other character
/// outside `[A-Za-z0-9]`, whitespace and `-` is dropped, and runs of
/// whitespace or dashes become a single `-`.
///
/// ```
/// use shotdiff::naming::slug;
///
/// assert_eq!(slug("  Home Page!! "), "home-page");
/// assert_eq!(slug("Docs / API -- v2"), "docs-api-v2");
/// assert_eq!(slug("Node.js Guide"), "nodejs-guide");
/// assert_eq!(slug("Café"), "cafe");
/// ```
pub fn slug(label: &str) -> String {
    let mut kept = String::with_capacity(label.len());
    for ch in label.chars() {
        if ch == '-' || ch.is_whitespace() {
            kept.push(' ');
        } else if let Some(mapped) = transliterate(ch) {
            kept.extend(mapped.chars().filter(char::is_ascii_alphanumeric));
        } else if ch.is_ascii_alphanumeric() {
            kept.push(ch);
        }
    }

    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_ascii_lowercase()
}

/// Replacement text for characters `slugify` spells out instead of dropping
fn transliterate(ch: char) -> Option<&'static str> {
    let mapped = match ch {
        '&' => "and",
        '$' => "dollar",
        '%' => "percent",
        '<' => "less",
        '>' => "greater",
        '|' => "or",
        '¢' => "cent",
        '£' => "pound",
        '¤' => "currency",
        '¥' => "yen",
        '©' => "(c)",
        '®' => "(r)",
        'ª' => "a",
        'º' => "o",
        '€' => "euro",
        '™' => "tm",
        '∞' => "infinity",
        '♥' => "love",
        '∑' => "sum",
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ă' | 'Ą' => "A",
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'Æ' => "AE",
        'æ' => "ae",
        'Ç' | 'Ć' | 'Č' => "C",
        'ç' | 'ć' | 'č' => "c",
        'Ð' | 'Ď' => "D",
        'ð' | 'ď' => "d",
        'Đ' => "DJ",
        'đ' => "dj",
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ė' | 'Ę' | 'Ě' => "E",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => "e",
        'Ğ' => "G",
        'ğ' => "g",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ī' | 'Į' | 'İ' => "I",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => "i",
        'Ł' => "L",
        'ł' => "l",
        'Ñ' | 'Ń' | 'Ň' => "N",
        'ñ' | 'ń' | 'ň' => "n",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ő' => "O",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ő' => "o",
        'Œ' => "OE",
        'œ' => "oe",
        'Ř' => "R",
        'ř' => "r",
        'Ś' | 'Ş' | 'Š' => "S",
        'ś' | 'ş' | 'š' => "s",
        'ß' => "ss",
        'Ţ' | 'Ť' => "T",
        'ţ' | 'ť' => "t",
        'Þ' => "TH",
        'þ' => "th",
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ū' | 'Ů' | 'Ű' | 'Ų' => "U",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' | 'ų' => "u",
        'Ý' | 'Ÿ' => "Y",
        'ý' | 'ÿ' => "y",
        'Ź' | 'Ż' | 'Ž' => "Z",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    };
    Some(mapped)
}

/// Whether a directory entry should be treated as a screenshot at all.
///
/// Hidden files and anything without a lowercase `.png` extension are
/// ignored; PNGs are then held to the naming convention by
/// [`ShotId::parse`].
pub fn is_candidate(file_name: &str) -> bool {
    !file_name.starts_with('.')
        && file_name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext == IMAGE_EXTENSION)
}
