//! Category label to display glyph mapping.

use std::fmt;

/// A single display glyph for the meta line of a news item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph(&'static str);

impl Glyph {
    pub const DEFAULT: Glyph = Glyph("📰");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Categories the upstream service is known to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    AiMl,
    SoftwareDevelopment,
    Hardware,
    Security,
    Business,
    Gaming,
    Innovation,
    Culture,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::AiMl,
        Category::SoftwareDevelopment,
        Category::Hardware,
        Category::Security,
        Category::Business,
        Category::Gaming,
        Category::Innovation,
        Category::Culture,
    ];

    /// Match a free-form label against the known categories.
    ///
    /// Matching ignores case and surrounding whitespace and accepts the
    /// common spellings seen upstream ("AI/ML", "Cybersecurity", ...).
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.aliases().contains(&normalized.as_str()))
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Category::AiMl => &[
                "ai",
                "ml",
                "ai/ml",
                "ai & ml",
                "artificial intelligence",
                "machine learning",
            ],
            Category::SoftwareDevelopment => &[
                "software",
                "software development",
                "development",
                "programming",
                "dev",
            ],
            Category::Hardware => &["hardware", "devices", "chips", "semiconductors"],
            Category::Security => &["security", "cybersecurity", "cyber security", "privacy"],
            Category::Business => &["business", "finance", "startups", "industry"],
            Category::Gaming => &["gaming", "games", "esports"],
            Category::Innovation => &["innovation", "research", "science"],
            Category::Culture => &["culture", "society", "entertainment"],
        }
    }

    pub fn glyph(self) -> Glyph {
        match self {
            Category::AiMl => Glyph("🤖"),
            Category::SoftwareDevelopment => Glyph("💻"),
            Category::Hardware => Glyph("🔧"),
            Category::Security => Glyph("🔒"),
            Category::Business => Glyph("💼"),
            Category::Gaming => Glyph("🎮"),
            Category::Innovation => Glyph("💡"),
            Category::Culture => Glyph("🎭"),
        }
    }
}

/// Resolve the glyph for an optional category label.
///
/// Unknown and absent labels both yield [`Glyph::DEFAULT`].
pub fn resolve(category: Option<&str>) -> Glyph {
    category
        .and_then(Category::from_label)
        .map(Category::glyph)
        .unwrap_or(Glyph::DEFAULT)
}
