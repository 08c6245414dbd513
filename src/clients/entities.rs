use serde::Serialize;

/// One catalog record returned by the remote service.
///
/// Every field is optional: the service omits fields freely depending on the
/// wrapper type. Omitted names and URLs render as empty strings in text
/// output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub track: Option<String>,
    pub artist: Option<String>,
    pub preview_url: Option<String>,
    pub wrapper_type: Option<String>,
}

impl CatalogEntry {
    // The service uses wrapperType to discriminate tracks from collections
    // and artists
    pub fn is_track(&self) -> bool {
        self.wrapper_type.as_deref() == Some("track")
    }

    // Haystack for keyword matching, lowercased
    fn match_name(&self) -> String {
        format!(
            "{} - {}",
            self.artist.as_deref().unwrap_or(""),
            self.track.as_deref().unwrap_or("")
        )
        .to_lowercase()
    }
}

/// Keyword post-filter over artist and track names.
///
/// Keywords are lowercased on construction; an entry matches when any keyword
/// is a substring of the lowercased `"<artist> - <track>"` name. An empty
/// criteria set matches everything.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    keywords: Vec<String>,
}

impl FilterCriteria {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterCriteria {
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        if self.keywords.is_empty() {
            return true;
        }
        let name = entry.match_name();
        self.keywords.iter().any(|k| name.contains(k))
    }
}

/// Serializable output shape for matched entries
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MatchRecord {
    pub artist: Option<String>,
    pub track: Option<String>,
    pub url: Option<String>,
}

impl From<&CatalogEntry> for MatchRecord {
    fn from(entry: &CatalogEntry) -> MatchRecord {
        MatchRecord {
            artist: entry.artist.clone(),
            track: entry.track.clone(),
            url: entry.preview_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(artist: &str, track: &str) -> CatalogEntry {
        CatalogEntry {
            track: Some(track.to_string()),
            artist: Some(artist.to_string()),
            preview_url: None,
            wrapper_type: Some("track".to_string()),
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        let criteria = FilterCriteria::new(["dave"]);
        assert!(criteria.matches(&entry("DAVE", "Raindance")));
        assert!(criteria.matches(&entry("Dave", "RAINDANCE")));
    }

    #[test]
    fn keywords_are_lowercased_on_construction() {
        let criteria = FilterCriteria::new(["DAVE"]);
        assert!(criteria.matches(&entry("dave", "Raindance")));
    }

    #[test]
    fn any_keyword_matches_artist_or_track() {
        let criteria = FilterCriteria::new(["dave", "tems"]);
        assert!(criteria.matches(&entry("Dave", "Starlight")));
        assert!(criteria.matches(&entry("Someone", "Tems Remix")));
        assert!(!criteria.matches(&entry("Other Artist", "Song")));
    }

    #[test]
    fn empty_criteria_matches_everything() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert!(criteria.matches(&entry("Other Artist", "Song")));
    }

    #[test]
    fn missing_names_do_not_panic() {
        let criteria = FilterCriteria::new(["dave"]);
        let bare = CatalogEntry {
            track: None,
            artist: None,
            preview_url: None,
            wrapper_type: None,
        };
        assert!(!criteria.matches(&bare));
        assert!(!bare.is_track());
    }

    #[test]
    fn match_record_takes_preview_url() {
        let mut e = entry("Dave", "Raindance");
        e.preview_url = Some("http://x/1".to_string());
        let record = MatchRecord::from(&e);
        assert_eq!(record.artist.as_deref(), Some("Dave"));
        assert_eq!(record.track.as_deref(), Some("Raindance"));
        assert_eq!(record.url.as_deref(), Some("http://x/1"));
    }
}
