//! Column sorting for the game list.
//!
//! The sortable columns form a closed set; anything else in the query string
//! falls back to the default order.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortColumn {
    TitleEnglish,
    TitleJp,
    TitleRomaji,
    RatingBayesian,
    Ratings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// How the game list is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortColumn {
    pub const ALL: [Self; 5] = [
        Self::TitleEnglish,
        Self::TitleJp,
        Self::TitleRomaji,
        Self::RatingBayesian,
        Self::Ratings,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TitleEnglish => "title_english",
            Self::TitleJp => "title_jp",
            Self::TitleRomaji => "title_romaji",
            Self::RatingBayesian => "rating_bayesian",
            Self::Ratings => "ratings",
        }
    }

    /// Case-insensitive match against the allow-list.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(raw))
    }

    /// Numbers sort high to low first, text A to Z.
    #[must_use]
    pub const fn default_direction(self) -> SortDirection {
        match self {
            Self::RatingBayesian | Self::Ratings => SortDirection::Desc,
            Self::TitleEnglish | Self::TitleJp | Self::TitleRomaji => SortDirection::Asc,
        }
    }
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if raw.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Apply this direction to an ascending comparison.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self {
            column: SortColumn::RatingBayesian,
            direction: SortDirection::Desc,
        }
    }
}

impl SortOrder {
    /// Read `s` (column) and `o` (direction) from the list query.
    ///
    /// An unknown column gives the default order. A known column with a
    /// missing or unknown direction uses that column's default direction.
    #[must_use]
    pub fn from_query(s: Option<&str>, o: Option<&str>) -> Self {
        let Some(column) = s.and_then(SortColumn::parse) else {
            return Self::default();
        };
        let direction = o
            .and_then(SortDirection::parse)
            .unwrap_or_else(|| column.default_direction());
        Self { column, direction }
    }
}

/// Link for a column header: clicking the active column flips its direction,
/// any other column starts at its default direction.
#[must_use]
pub fn sort_url(current_s: Option<&str>, current_o: Option<&str>, column: SortColumn) -> String {
    let direction = match (current_s, current_o.and_then(SortDirection::parse)) {
        (Some(s), Some(o)) if SortColumn::parse(s) == Some(column) => o.flipped(),
        _ => column.default_direction(),
    };
    format!(
        "/game/list?s={}&o={}",
        column.as_str(),
        direction.as_str()
    )
}

/// Compare optional values so that missing ones sort last in either direction.
pub fn nulls_last<T>(
    a: Option<T>,
    b: Option<T>,
    direction: SortDirection,
    cmp: impl FnOnce(&T, &T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => direction.apply(cmp(&a, &b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
