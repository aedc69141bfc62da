use std::fmt;
use serde::{Serialize, Serializer};

/// Category of a logged item. Unrecognized values are kept verbatim in `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MediaType {
    Book,
    Movie,
    Podcast,
    Song,
    Other(String),
}

impl MediaType {
    pub const KNOWN: [MediaType; 4] = [MediaType::Book, MediaType::Movie, MediaType::Podcast, MediaType::Song];

    pub fn as_str(&self) -> &str {
        match self {
            MediaType::Book => "book",
            MediaType::Movie => "movie",
            MediaType::Podcast => "podcast",
            MediaType::Song => "song",
            MediaType::Other(s) => s,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            MediaType::Book => "Book",
            MediaType::Movie => "Movie",
            MediaType::Podcast => "Podcast",
            MediaType::Song => "Song",
            MediaType::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, MediaType::Other(_))
    }
}

impl Default for MediaType {
    fn default() -> Self {
        MediaType::Other(String::new())
    }
}

impl From<&str> for MediaType {
    fn from(value: &str) -> Self {
        match value {
            "book" => MediaType::Book,
            "movie" => MediaType::Movie,
            "podcast" => MediaType::Podcast,
            "song" => MediaType::Song,
            other => MediaType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MediaType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
