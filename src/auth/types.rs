//! Auth configuration types
//!
//! Credential values are usually `{{placeholder}}` tokens that the portal
//! substitutes when a user connects; the compiler passes them through.

use crate::types::{with_default_tag, JsonValue, StringMap};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Authentication scheme of a polling connector
///
/// A block without `type` loads as [`PollerAuth::Basic`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", tag = "type")]
pub enum PollerAuth {
    /// HTTP Basic authentication
    Basic(BasicAuth),

    /// API key sent as a header (or in the POST payload)
    #[serde(rename = "APIKey")]
    ApiKey(ApiKeyAuth),

    /// OAuth2 token flow
    OAuth2(OAuth2Auth),
}

impl Default for PollerAuth {
    fn default() -> Self {
        Self::Basic(BasicAuth::default())
    }
}

impl Serialize for PollerAuth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PollerAuth::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for PollerAuth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = with_default_tag(JsonValue::deserialize(deserializer)?, "type", "Basic");
        PollerAuth::deserialize(value).map_err(serde::de::Error::custom)
    }
}

impl PollerAuth {
    /// Wire name of the auth type
    pub fn type_name(&self) -> &'static str {
        match self {
            PollerAuth::Basic(_) => "Basic",
            PollerAuth::ApiKey(_) => "APIKey",
            PollerAuth::OAuth2(_) => "OAuth2",
        }
    }
}

/// HTTP Basic credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasicAuth {
    pub user_name: String,
    pub password: String,
}

impl Default for BasicAuth {
    fn default() -> Self {
        Self {
            user_name: "{{username}}".to_string(),
            password: "{{password}}".to_string(),
        }
    }
}

/// API key credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiKeyAuth {
    /// The key value (template)
    pub api_key: String,
    /// Header name carrying the key
    pub api_key_name: String,
    /// Prefix before the key value (e.g. "Bearer")
    pub api_key_identifier: String,
    /// Send the key in the POST body instead of a header
    pub is_api_key_in_post_payload: bool,
}

impl Default for ApiKeyAuth {
    fn default() -> Self {
        Self {
            api_key: "{{apiKey}}".to_string(),
            api_key_name: String::new(),
            api_key_identifier: String::new(),
            is_api_key_in_post_payload: false,
        }
    }
}

/// OAuth2 client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuth2Auth {
    #[serde(default = "default_client_id")]
    pub client_id: String,
    #[serde(default = "default_client_secret")]
    pub client_secret: String,
    #[serde(default)]
    pub token_endpoint_url: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub token_endpoint_headers: StringMap,
    #[serde(default)]
    pub token_endpoint_query_parameters: StringMap,
    /// Grant type and its grant-specific settings
    #[serde(flatten)]
    pub grant: OAuth2Grant,
}

impl Default for OAuth2Auth {
    fn default() -> Self {
        Self {
            client_id: default_client_id(),
            client_secret: default_client_secret(),
            token_endpoint_url: String::new(),
            scope: String::new(),
            token_endpoint_headers: StringMap::new(),
            token_endpoint_query_parameters: StringMap::new(),
            grant: OAuth2Grant::default(),
        }
    }
}

fn default_client_id() -> String {
    "{{clientId}}".to_string()
}

fn default_client_secret() -> String {
    "{{clientSecret}}".to_string()
}

/// OAuth2 grant type
///
/// Settings without `grantType` load as client credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(remote = "Self", tag = "grantType", rename_all = "snake_case")]
pub enum OAuth2Grant {
    /// Machine-to-machine flow
    #[default]
    ClientCredentials,

    /// Interactive flow with a user consent redirect
    AuthorizationCode(AuthorizationCodeGrant),
}

impl Serialize for OAuth2Grant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        OAuth2Grant::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for OAuth2Grant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = with_default_tag(
            JsonValue::deserialize(deserializer)?,
            "grantType",
            "client_credentials",
        );
        OAuth2Grant::deserialize(value).map_err(serde::de::Error::custom)
    }
}

impl OAuth2Grant {
    /// Wire name of the grant type
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuth2Grant::ClientCredentials => "client_credentials",
            OAuth2Grant::AuthorizationCode(_) => "authorization_code",
        }
    }
}

/// Settings used only by the authorization code grant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthorizationCodeGrant {
    pub authorization_endpoint: String,
    pub redirect_uri: String,
    pub authorization_endpoint_query_parameters: StringMap,
}
