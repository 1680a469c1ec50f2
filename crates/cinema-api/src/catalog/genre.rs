//! The fixed genre set.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A browsable genre. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Genre {
    /// `action`
    Action,
    /// `comedy`
    Comedy,
    /// `romance`
    Romance,
    /// `drama`
    Drama,
    /// `sci-fi`
    SciFi,
    /// `thriller`
    Thriller,
    /// `horror`
    Horror,
}

impl Genre {
    /// Every genre, in display order.
    pub const ALL: [Self; 7] = [
        Self::Action,
        Self::Comedy,
        Self::Romance,
        Self::Drama,
        Self::SciFi,
        Self::Thriller,
        Self::Horror,
    ];

    /// The keyword sent upstream as the search term.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Comedy => "comedy",
            Self::Romance => "romance",
            Self::Drama => "drama",
            Self::SciFi => "sci-fi",
            Self::Thriller => "thriller",
            Self::Horror => "horror",
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A string that names no known genre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGenre(pub String);

impl std::fmt::Display for UnknownGenre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let known: Vec<&str> = Genre::ALL.iter().map(|g| g.keyword()).collect();
        write!(
            f,
            "unknown genre '{}' (expected one of: {})",
            self.0,
            known.join(", ")
        )
    }
}

impl std::error::Error for UnknownGenre {}

impl FromStr for Genre {
    type Err = UnknownGenre;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|g| g.keyword().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownGenre(String::from(s)))
    }
}
