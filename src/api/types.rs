//! Wire types for the `/artworks` endpoint

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier assigned to every artwork by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtworkId(pub u64);

impl fmt::Display for ArtworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single artwork record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: ArtworkId,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub place_of_origin: Option<String>,

    #[serde(default)]
    pub artist_display: Option<String>,

    #[serde(default)]
    pub inscriptions: Option<String>,

    #[serde(default)]
    pub date_start: Option<i32>,

    #[serde(default)]
    pub date_end: Option<i32>,
}

impl Artwork {
    /// Cell values in table column order
    pub fn columns(&self) -> [String; 6] {
        fn text(value: &Option<String>) -> String {
            value.as_deref().unwrap_or("").replace('\n', " ")
        }
        fn year(value: Option<i32>) -> String {
            value.map(|y| y.to_string()).unwrap_or_default()
        }

        [
            self.title.replace('\n', " "),
            text(&self.place_of_origin),
            text(&self.artist_display),
            text(&self.inscriptions),
            year(self.date_start),
            year(self.date_end),
        ]
    }
}

/// Column headers matching [`Artwork::columns`]
pub const COLUMN_HEADERS: [&str; 6] = [
    "Title",
    "Place",
    "Artist",
    "Inscriptions",
    "Start Date",
    "End Date",
];

/// Pagination block returned alongside every page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub limit: u32,
    #[serde(default)]
    pub next_url: Option<String>,
    #[serde(default)]
    pub prev_url: Option<String>,
    pub offset: u64,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    pub fn is_last_page(&self) -> bool {
        self.current_page >= self.total_pages
    }
}

/// One page of the `/artworks` listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtworkPage {
    pub pagination: Pagination,
    pub data: Vec<Artwork>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "pagination": {
            "total": 129884,
            "limit": 12,
            "offset": 0,
            "total_pages": 10824,
            "current_page": 1,
            "next_url": "https://api.artic.edu/api/v1/artworks?page=2"
        },
        "data": [
            {
                "id": 27992,
                "title": "A Sunday on La Grande Jatte — 1884",
                "place_of_origin": "France",
                "artist_display": "Georges Seurat\nFrench, 1859-1891",
                "inscriptions": null,
                "date_start": 1884,
                "date_end": 1886,
                "thumbnail": {"width": 3000}
            },
            {
                "id": 4,
                "title": "Priest and Boy"
            }
        ],
        "info": {"license_text": "CC0"}
    }"#;

    #[test]
    fn test_decode_listing() {
        let page: ArtworkPage = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(page.pagination.total_pages, 10824);
        assert_eq!(page.pagination.prev_url, None);
        assert!(!page.pagination.is_last_page());
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].id, ArtworkId(27992));
        assert_eq!(page.data[1].place_of_origin, None);
        assert_eq!(page.data[1].date_start, None);
    }

    #[test]
    fn test_columns_flatten_newlines_and_nulls() {
        let page: ArtworkPage = serde_json::from_str(SAMPLE).unwrap();
        let columns = page.data[0].columns();

        assert_eq!(columns[2], "Georges Seurat French, 1859-1891");
        assert_eq!(columns[3], "");
        assert_eq!(columns[4], "1884");
        assert_eq!(columns.len(), COLUMN_HEADERS.len());
    }
}
