// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Genre categories known to the catalog API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    PersonalGrowth,
    InvestigativeJournalism,
    History,
    Comedy,
    Entertainment,
    Business,
    Fiction,
    News,
    KidsAndFamily,
}

impl Genre {
    pub const ALL: [Genre; 9] = [
        Genre::PersonalGrowth,
        Genre::InvestigativeJournalism,
        Genre::History,
        Genre::Comedy,
        Genre::Entertainment,
        Genre::Business,
        Genre::Fiction,
        Genre::News,
        Genre::KidsAndFamily,
    ];

    /// Numeric id used by the API
    pub fn id(self) -> u32 {
        match self {
            Genre::PersonalGrowth => 1,
            Genre::InvestigativeJournalism => 2,
            Genre::History => 3,
            Genre::Comedy => 4,
            Genre::Entertainment => 5,
            Genre::Business => 6,
            Genre::Fiction => 7,
            Genre::News => 8,
            Genre::KidsAndFamily => 9,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|genre| genre.id() == id)
    }

    pub fn title(self) -> &'static str {
        match self {
            Genre::PersonalGrowth => "Personal Growth",
            Genre::InvestigativeJournalism => "Investigative Journalism",
            Genre::History => "History",
            Genre::Comedy => "Comedy",
            Genre::Entertainment => "Entertainment",
            Genre::Business => "Business",
            Genre::Fiction => "Fiction",
            Genre::News => "News",
            Genre::KidsAndFamily => "Kids and Family",
        }
    }

    /// Slug used in `genre-<slug>` selectors
    pub fn slug(self) -> &'static str {
        match self {
            Genre::PersonalGrowth => "personal-growth",
            Genre::InvestigativeJournalism => "investigative-journalism",
            Genre::History => "history",
            Genre::Comedy => "comedy",
            Genre::Entertainment => "entertainment",
            Genre::Business => "business",
            Genre::Fiction => "fiction",
            Genre::News => "news",
            Genre::KidsAndFamily => "kids-and-family",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|genre| genre.slug() == slug)
    }
}

/// Human-readable label for a genre id; unknown ids render as the number
pub fn genre_label(id: u32) -> String {
    Genre::from_id(id)
        .map(|genre| genre.title().to_string())
        .unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_cover_one_through_nine() {
        let ids: Vec<u32> = Genre::ALL.iter().map(|g| g.id()).collect();
        assert_eq!(ids, (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn id_and_slug_lookups_agree() {
        for genre in Genre::ALL {
            assert_eq!(Genre::from_id(genre.id()), Some(genre));
            assert_eq!(Genre::from_slug(genre.slug()), Some(genre));
        }
        assert_eq!(Genre::from_id(0), None);
        assert_eq!(Genre::from_slug("jazz"), None);
    }

    #[test]
    fn label_falls_back_to_number() {
        assert_eq!(genre_label(9), "Kids and Family");
        assert_eq!(genre_label(42), "42");
    }
}
