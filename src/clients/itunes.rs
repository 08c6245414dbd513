use std::time::Duration;

use clap::ValueEnum;
use log::debug;
use serde::Deserialize;

use crate::clients::entities::CatalogEntry;
use crate::clients::errors::{Error, Result};

// Production endpoint of the iTunes Search API
const ITUNES_BASE_URL: &str = "https://itunes.apple.com";

// Applied to every outbound call; expiry surfaces as a transport error
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize, Debug)]
struct ItunesAPIEntry {
    #[serde(rename = "wrapperType")]
    wrapper_type: Option<String>,
    #[serde(rename = "trackName")]
    track_name: Option<String>,
    #[serde(rename = "artistName")]
    artist_name: Option<String>,
    #[serde(rename = "previewUrl")]
    preview_url: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ItunesAPIResponse {
    // Zero-result bodies may omit both fields entirely
    #[serde(rename = "resultCount", default)]
    result_count: u32,
    #[serde(default)]
    results: Vec<ItunesAPIEntry>,
}

impl From<ItunesAPIEntry> for CatalogEntry {
    fn from(e: ItunesAPIEntry) -> CatalogEntry {
        CatalogEntry {
            track: e.track_name,
            artist: e.artist_name,
            preview_url: e.preview_url,
            wrapper_type: e.wrapper_type,
        }
    }
}

/// Catalog entity kinds this tool queries for
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Entity {
    /// Track search within the music media type
    MusicTrack,
    /// Song entity, used by id lookups
    Song,
}

impl Entity {
    pub fn as_str(self) -> &'static str {
        match self {
            Entity::MusicTrack => "musicTrack",
            Entity::Song => "song",
        }
    }
}

/// One decoded page of catalog results, in remote order
#[derive(Debug)]
pub struct SearchPage {
    pub result_count: u32,
    pub entries: Vec<CatalogEntry>,
}

impl From<ItunesAPIResponse> for SearchPage {
    fn from(response: ItunesAPIResponse) -> SearchPage {
        SearchPage {
            result_count: response.result_count,
            entries: response.results.into_iter().map(CatalogEntry::from).collect(),
        }
    }
}

/// Thin transport client for the iTunes Search API
pub struct ItunesClient {
    http: reqwest::Client,
    base_url: String,
}

impl ItunesClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        ItunesClient {
            http,
            base_url: base_url.into(),
        }
    }

    // Build a client against the production endpoint with bounded timeouts
    pub fn try_default() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::ConfigurationError(e.to_string()))?;
        Ok(ItunesClient::new(http, ITUNES_BASE_URL))
    }

    /// Free-text search over the catalog
    pub async fn search(
        &self,
        term: &str,
        entity: Option<Entity>,
        limit: u32,
    ) -> Result<SearchPage> {
        let mut params = vec![("term", term.to_string())];
        if let Some(entity) = entity {
            params.push(("entity", entity.as_str().to_string()));
        }
        params.push(("limit", limit.to_string()));
        self.get_page("/search", &params).await
    }

    /// Look up a single catalog identifier
    pub async fn lookup(&self, id: u64) -> Result<SearchPage> {
        let params = [
            ("id", id.to_string()),
            ("entity", Entity::Song.as_str().to_string()),
        ];
        self.get_page("/lookup", &params).await
    }

    async fn get_page(&self, path: &str, params: &[(&str, String)]) -> Result<SearchPage> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url} ...");
        let response = self.http.get(&url).query(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::TransportError(format!(
                "Catalog returned {status} for {path}"
            )));
        }
        // Buffer the whole body before decoding so a bad payload never
        // leaves partial output behind
        let body = response.text().await?;
        let decoded: ItunesAPIResponse = serde_json::from_str(&body)?;
        debug!("Catalog reported {} results for {path}", decoded.result_count);
        Ok(SearchPage::from(decoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_camel_case_entry_fields() {
        let body = r#"{
            "resultCount": 1,
            "results": [{
                "wrapperType": "track",
                "trackName": "Raindance",
                "artistName": "Dave",
                "previewUrl": "http://x/1",
                "trackTimeMillis": 173000
            }]
        }"#;
        let decoded: ItunesAPIResponse = serde_json::from_str(body).unwrap();
        let page = SearchPage::from(decoded);
        assert_eq!(page.result_count, 1);
        assert_eq!(page.entries.len(), 1);
        let entry = &page.entries[0];
        assert_eq!(entry.track.as_deref(), Some("Raindance"));
        assert_eq!(entry.artist.as_deref(), Some("Dave"));
        assert_eq!(entry.preview_url.as_deref(), Some("http://x/1"));
        assert!(entry.is_track());
    }

    #[test]
    fn zero_result_body_without_results_key_decodes_empty() {
        let decoded: ItunesAPIResponse = serde_json::from_str(r#"{"resultCount": 0}"#).unwrap();
        let page = SearchPage::from(decoded);
        assert_eq!(page.result_count, 0);
        assert!(page.entries.is_empty());
    }

    #[test]
    fn empty_object_decodes_empty() {
        let decoded: ItunesAPIResponse = serde_json::from_str("{}").unwrap();
        let page = SearchPage::from(decoded);
        assert_eq!(page.result_count, 0);
        assert!(page.entries.is_empty());
    }

    #[test]
    fn entity_maps_to_api_values() {
        assert_eq!(Entity::MusicTrack.as_str(), "musicTrack");
        assert_eq!(Entity::Song.as_str(), "song");
    }
}
