//! Event categories and their display colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Color used for any tag without an entry in the palette.
pub const DEFAULT_CATEGORY_COLOR: &str = "#667eea";

/// The category an event is filed under.
///
/// Unrecognized tags are kept verbatim in `Other` so they round-trip through
/// storage and still render, using [`DEFAULT_CATEGORY_COLOR`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    Community,
    Education,
    Advocacy,
    Volunteering,
    Workshop,
    Social,
    Other(String),
}

impl Category {
    /// The categories offered when creating an event.
    pub const KNOWN: [Category; 6] = [
        Category::Community,
        Category::Education,
        Category::Advocacy,
        Category::Volunteering,
        Category::Workshop,
        Category::Social,
    ];

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Community" => Category::Community,
            "Education" => Category::Education,
            "Advocacy" => Category::Advocacy,
            "Volunteering" => Category::Volunteering,
            "Workshop" => Category::Workshop,
            "Social" => Category::Social,
            other => Category::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Category::Community => "Community",
            Category::Education => "Education",
            Category::Advocacy => "Advocacy",
            Category::Volunteering => "Volunteering",
            Category::Workshop => "Workshop",
            Category::Social => "Social",
            Category::Other(tag) => tag,
        }
    }

    /// Hex color for badges and calendar chips.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Community => "#667eea",
            Category::Education => "#f59e0b",
            Category::Advocacy => "#ef4444",
            Category::Volunteering => "#10b981",
            Category::Workshop => "#8b5cf6",
            Category::Social => "#ec4899",
            Category::Other(_) => DEFAULT_CATEGORY_COLOR,
        }
    }

    /// Color as an `(r, g, b)` triple, for terminals that take truecolor.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = self.color().trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Other(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Category::from_tag(s))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Category::from_tag(&tag))
    }
}
