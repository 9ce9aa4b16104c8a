//! Pagination types

use crate::types::{with_default_tag, JsonValue};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Paging strategy of a polling connector
///
/// A block without `pagingType` loads as [`PollerPaging::None`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(remote = "Self", tag = "pagingType")]
pub enum PollerPaging {
    /// Single request per window
    #[default]
    None,

    /// Follow the `Link` response header (RFC 5988)
    #[serde(rename_all = "camelCase")]
    LinkHeader {
        /// Header carrying the next page link
        #[serde(default)]
        next_page_request_header: String,
    },

    /// Next page URL taken from the response body
    #[serde(rename_all = "camelCase")]
    NextPageUrl {
        #[serde(default)]
        next_page_url: String,
        #[serde(default)]
        next_page_para_name: String,
    },

    /// Opaque continuation token taken from the response body
    #[serde(rename_all = "camelCase")]
    NextPageToken {
        /// JSONPath to the token in the response
        #[serde(default)]
        next_page_token_json_path: String,
        /// Query parameter the token is sent back in
        #[serde(default)]
        next_page_para_name: String,
    },

    /// Offset and page size query parameters
    #[serde(rename_all = "camelCase")]
    Offset {
        #[serde(default)]
        page_size: u32,
        #[serde(default)]
        page_size_para_name: String,
    },

    /// Token persisted between polling windows
    #[serde(rename_all = "camelCase")]
    PersistentToken {
        #[serde(default)]
        has_next_flag_json_path: String,
    },

    /// Link persisted between polling windows
    #[serde(rename_all = "camelCase")]
    PersistentLink {
        #[serde(default)]
        has_next_flag_json_path: String,
    },
}

impl Serialize for PollerPaging {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PollerPaging::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for PollerPaging {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = with_default_tag(JsonValue::deserialize(deserializer)?, "pagingType", "None");
        PollerPaging::deserialize(value).map_err(serde::de::Error::custom)
    }
}

impl PollerPaging {
    /// Wire name of the paging type
    pub fn type_name(&self) -> &'static str {
        match self {
            PollerPaging::None => "None",
            PollerPaging::LinkHeader { .. } => "LinkHeader",
            PollerPaging::NextPageUrl { .. } => "NextPageUrl",
            PollerPaging::NextPageToken { .. } => "NextPageToken",
            PollerPaging::Offset { .. } => "Offset",
            PollerPaging::PersistentToken { .. } => "PersistentToken",
            PollerPaging::PersistentLink { .. } => "PersistentLink",
        }
    }

    /// Check if this is the no-paging variant
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
