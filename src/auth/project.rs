//! Projection of auth settings into an instance `auth` block

use super::types::{OAuth2Auth, OAuth2Grant, PollerAuth};
use crate::document::Document;
use crate::types::JsonObject;

/// Build the `auth` block of a polling connector instance
///
/// Basic always carries all three keys. API key and OAuth2 emit their
/// optional keys only when non-empty (or, for flags, when `true`); the
/// authorization-code keys never appear for client credentials.
pub fn auth_document(auth: &PollerAuth) -> JsonObject {
    let doc = Document::new().field("type", auth.type_name());

    match auth {
        PollerAuth::Basic(basic) => doc
            .field("userName", basic.user_name.as_str())
            .field("password", basic.password.as_str()),

        PollerAuth::ApiKey(key) => doc
            .field("apiKey", key.api_key.as_str())
            .field("apiKeyName", key.api_key_name.as_str())
            .text_if_present("apiKeyIdentifier", &key.api_key_identifier)
            .flag_if_set("isApiKeyInPostPayload", key.is_api_key_in_post_payload),

        PollerAuth::OAuth2(oauth) => oauth2_fields(doc, oauth),
    }
    .build()
}

fn oauth2_fields(doc: Document, oauth: &OAuth2Auth) -> Document {
    let doc = doc
        .field("clientId", oauth.client_id.as_str())
        .field("clientSecret", oauth.client_secret.as_str())
        .field("grantType", oauth.grant.as_str())
        .field("tokenEndpointUrl", oauth.token_endpoint_url.as_str())
        .text_if_present("scope", &oauth.scope)
        .map_if_present("tokenEndpointHeaders", &oauth.token_endpoint_headers)
        .map_if_present(
            "tokenEndpointQueryParameters",
            &oauth.token_endpoint_query_parameters,
        );

    match &oauth.grant {
        OAuth2Grant::ClientCredentials => doc,
        OAuth2Grant::AuthorizationCode(code) => doc
            .text_if_present("authorizationEndpoint", &code.authorization_endpoint)
            .text_if_present("redirectUri", &code.redirect_uri)
            .map_if_present(
                "authorizationEndpointQueryParameters",
                &code.authorization_endpoint_query_parameters,
            ),
    }
}
