//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// PublicationType
// ---------------------------------------------------------------------------

/// Publication type of a title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PublicationType {
    All,
    Audiobook,
    Book,
    #[serde(rename = "Book Series")]
    BookSeries,
    Database,
    Journal,
    Newsletter,
    Newspaper,
    Proceedings,
    Report,
    #[serde(rename = "Streaming Audio")]
    StreamingAudio,
    #[serde(rename = "Streaming Video")]
    StreamingVideo,
    #[serde(rename = "Thesis & Dissertation")]
    ThesisAndDissertation,
    Website,
    Unspecified,
}

impl PublicationType {
    /// Book-like titles show coverage as years only
    pub fn is_book_like(&self) -> bool {
        matches!(
            self,
            PublicationType::Audiobook
                | PublicationType::Book
                | PublicationType::BookSeries
                | PublicationType::StreamingAudio
                | PublicationType::StreamingVideo
        )
    }
}

impl std::fmt::Display for PublicationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PublicationType::All => "All",
            PublicationType::Audiobook => "Audiobook",
            PublicationType::Book => "Book",
            PublicationType::BookSeries => "Book Series",
            PublicationType::Database => "Database",
            PublicationType::Journal => "Journal",
            PublicationType::Newsletter => "Newsletter",
            PublicationType::Newspaper => "Newspaper",
            PublicationType::Proceedings => "Proceedings",
            PublicationType::Report => "Report",
            PublicationType::StreamingAudio => "Streaming Audio",
            PublicationType::StreamingVideo => "Streaming Video",
            PublicationType::ThesisAndDissertation => "Thesis & Dissertation",
            PublicationType::Website => "Website",
            PublicationType::Unspecified => "Unspecified",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// EmbargoUnit
// ---------------------------------------------------------------------------

/// Time unit of a custom embargo period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EmbargoUnit {
    Days,
    Weeks,
    Months,
    Years,
}

impl std::str::FromStr for EmbargoUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Days" => Ok(EmbargoUnit::Days),
            "Weeks" => Ok(EmbargoUnit::Weeks),
            "Months" => Ok(EmbargoUnit::Months),
            "Years" => Ok(EmbargoUnit::Years),
            other => Err(format!("Unknown embargo unit: {}", other)),
        }
    }
}

impl std::fmt::Display for EmbargoUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EmbargoUnit::Days => "Days",
            EmbargoUnit::Weeks => "Weeks",
            EmbargoUnit::Months => "Months",
            EmbargoUnit::Years => "Years",
        };
        write!(f, "{}", label)
    }
}
