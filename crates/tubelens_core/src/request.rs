use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("search query is empty")]
    EmptyQuery,
    #[error("channel id is empty")]
    EmptyChannelId,
}

/// A request frame for the backend.
///
/// Serializes to `{"action":"search","query":…}` or
/// `{"action":"getChannelProfile","channelId":…}`. Only the validating
/// constructors can build one, so the argument is always trimmed and
/// non-empty and the action never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OutboundRequest(RequestBody);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action")]
enum RequestBody {
    #[serde(rename = "search")]
    Search { query: String },
    #[serde(rename = "getChannelProfile")]
    GetChannelProfile {
        #[serde(rename = "channelId")]
        channel_id: String,
    },
}

impl OutboundRequest {
    pub fn search(query: &str) -> Result<Self, RequestError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RequestError::EmptyQuery);
        }
        Ok(Self(RequestBody::Search {
            query: query.to_owned(),
        }))
    }

    pub fn channel_profile(channel_id: &str) -> Result<Self, RequestError> {
        let channel_id = channel_id.trim();
        if channel_id.is_empty() {
            return Err(RequestError::EmptyChannelId);
        }
        Ok(Self(RequestBody::GetChannelProfile {
            channel_id: channel_id.to_owned(),
        }))
    }

    /// Wire value of the `action` field.
    pub fn action(&self) -> &'static str {
        match &self.0 {
            RequestBody::Search { .. } => "search",
            RequestBody::GetChannelProfile { .. } => "getChannelProfile",
        }
    }

    pub fn key(&self) -> RequestKey {
        match &self.0 {
            RequestBody::Search { query } => RequestKey::Query(query.clone()),
            RequestBody::GetChannelProfile { channel_id } => {
                RequestKey::Channel(channel_id.clone())
            }
        }
    }
}

/// Addresses an in-flight request in the render state store and the
/// placeholder node that stands in for its reply.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequestKey {
    /// Trimmed search text.
    Query(String),
    /// Channel identifier.
    Channel(String),
}

impl RequestKey {
    /// Id of the loading placeholder mounted while this request is pending.
    pub fn placeholder_id(&self) -> String {
        match self {
            RequestKey::Query(query) => format!("loading-{query}"),
            RequestKey::Channel(channel_id) => format!("profile-loading-{channel_id}"),
        }
    }

    pub fn is_query(&self) -> bool {
        matches!(self, RequestKey::Query(_))
    }

    pub fn is_channel(&self) -> bool {
        matches!(self, RequestKey::Channel(_))
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKey::Query(query) => write!(f, "query \"{query}\""),
            RequestKey::Channel(channel_id) => write!(f, "channel {channel_id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{OutboundRequest, RequestError, RequestKey};

    #[test]
    fn search_is_trimmed_and_serialized_with_action_tag() {
        let request = OutboundRequest::search("  cats \n").unwrap();
        assert_eq!(request.action(), "search");
        assert_eq!(request.key(), RequestKey::Query("cats".to_string()));
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"action":"search","query":"cats"}"#
        );
    }

    #[test]
    fn channel_profile_uses_camel_case_field() {
        let request = OutboundRequest::channel_profile("UC123").unwrap();
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"action":"getChannelProfile","channelId":"UC123"}"#
        );
        assert_eq!(request.key(), RequestKey::Channel("UC123".to_string()));
    }

    #[test]
    fn blank_arguments_are_rejected() {
        assert_eq!(OutboundRequest::search("   "), Err(RequestError::EmptyQuery));
        assert_eq!(
            OutboundRequest::channel_profile(""),
            Err(RequestError::EmptyChannelId)
        );
    }

    #[test]
    fn placeholder_ids_do_not_collide_across_kinds() {
        let query = RequestKey::Query("x".to_string());
        let channel = RequestKey::Channel("x".to_string());
        assert_eq!(query.placeholder_id(), "loading-x");
        assert_ne!(query.placeholder_id(), channel.placeholder_id());
    }
}
