//! Structural classification of inbound frames.
//!
//! The backend sends no tag field, so each response variant is recognised by
//! its shape. Shapes are tried independently in a fixed order and every match
//! is kept: one payload may legitimately yield more than one variant.

use serde_json::{Map, Value};

/// Outcome of classifying one raw frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The frame is not valid JSON.
    Malformed { error: String },
    /// Valid JSON that matches none of the known shapes.
    Unrecognized,
    /// One or more variants, in reconciliation order.
    Recognized(Vec<ResponseVariant>),
}

impl Classification {
    pub fn variants(&self) -> &[ResponseVariant] {
        match self {
            Classification::Recognized(variants) => variants,
            Classification::Malformed { .. } | Classification::Unrecognized => &[],
        }
    }
}

/// Response shapes, declared in the order the reconciler applies them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseVariant {
    QueryHeading(QueryHeading),
    VideoResultList(VideoResultList),
    ChannelProfile(ChannelProfile),
    /// `{query, message}` sent when a search produced nothing.
    SearchNotice { query: String, message: String },
    /// `{error}` sent when a channel profile could not be fetched.
    ProfileError { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryHeading {
    pub query: String,
    pub overall_sentiment: String,
    pub sentiments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VideoResultList {
    /// Candidate video entries; validity is decided when rendering.
    pub entries: Vec<VideoEntry>,
    pub readability: Option<ReadabilitySummary>,
    pub word_stats: Option<String>,
}

/// One element of a result list, every field optional.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VideoEntry {
    /// Position in the original array.
    pub index: usize,
    pub title: Option<String>,
    pub channel_title: Option<String>,
    pub default_thumbnail: Option<String>,
    pub description: Option<String>,
    pub video_id: Option<String>,
    pub channel_id: Option<String>,
    pub grade_level: Option<String>,
    pub reading_ease_score: Option<String>,
}

impl VideoEntry {
    /// Names of the required fields that are missing or empty.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.is_none() {
            missing.push("title");
        }
        if self.channel_title.is_none() {
            missing.push("channelTitle");
        }
        if self.default_thumbnail.is_none() {
            missing.push("defaultThumbnail");
        }
        missing
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReadabilitySummary {
    pub overall_grade_level: Option<String>,
    pub overall_ease_score: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelProfile {
    pub title: String,
    pub thumbnail: String,
    pub description: String,
    pub subscriber_count: String,
    pub video_count: String,
    pub recent_videos: Vec<RecentVideo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentVideo {
    pub video_id: Option<String>,
    pub title: String,
}

/// Whether the backend's `{query, message}` and `{error}` replies are treated
/// as response variants.
///
/// They are outside the three shapes the client has always rendered, so by
/// default they classify as unrecognized and leave the view alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendNotices {
    #[default]
    Ignore,
    /// Recognise them as `SearchNotice` and `ProfileError`.
    Render,
}

/// Parse a raw frame and collect every response shape it satisfies, ignoring
/// backend notices.
pub fn classify(raw: &str) -> Classification {
    classify_with(raw, BackendNotices::Ignore)
}

/// Like [`classify`], with backend notices recognised when `notices` says so.
pub fn classify_with(raw: &str, notices: BackendNotices) -> Classification {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            return Classification::Malformed {
                error: err.to_string(),
            }
        }
    };

    let mut variants = Vec::new();
    if let Some(heading) = decode_query_heading(&value) {
        variants.push(ResponseVariant::QueryHeading(heading));
    }
    if let Some(list) = decode_video_result_list(&value) {
        variants.push(ResponseVariant::VideoResultList(list));
    }
    if let Some(profile) = decode_channel_profile(&value) {
        variants.push(ResponseVariant::ChannelProfile(profile));
    }
    if notices == BackendNotices::Render {
        if let Some((query, message)) = decode_search_notice(&value) {
            variants.push(ResponseVariant::SearchNotice { query, message });
        }
        if let Some(message) = non_empty_str(&value, "error") {
            variants.push(ResponseVariant::ProfileError { message });
        }
    }

    if variants.is_empty() {
        Classification::Unrecognized
    } else {
        Classification::Recognized(variants)
    }
}

fn decode_query_heading(value: &Value) -> Option<QueryHeading> {
    let query = truthy_text(value, "query")?;
    let overall_sentiment = truthy_text(value, "overallSentiment")?;
    let sentiments = value
        .get("sentiments")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(scalar_text).collect())
        .unwrap_or_default();
    Some(QueryHeading {
        query,
        overall_sentiment,
        sentiments,
    })
}

fn decode_video_result_list(value: &Value) -> Option<VideoResultList> {
    let items = value.as_array()?;
    let mut list = VideoResultList::default();
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            list.entries.push(VideoEntry {
                index,
                ..VideoEntry::default()
            });
            continue;
        };
        if is_metadata_entry(object) {
            absorb_metadata(&mut list, item);
            continue;
        }
        list.entries.push(VideoEntry {
            index,
            title: non_empty_str(item, "title"),
            channel_title: non_empty_str(item, "channelTitle"),
            default_thumbnail: non_empty_str(item, "defaultThumbnail"),
            description: non_empty_text(item, "description"),
            video_id: non_empty_text(item, "videoId"),
            channel_id: non_empty_text(item, "channelId"),
            grade_level: non_empty_text(item, "gradeLevel"),
            reading_ease_score: non_empty_text(item, "readingEaseScore"),
        });
    }
    Some(list)
}

// Summary rows carry list-wide statistics and never a title.
fn is_metadata_entry(object: &Map<String, Value>) -> bool {
    !object.contains_key("title")
        && (object.contains_key("overallGradeLevel")
            || object.contains_key("overallEaseScore")
            || object.contains_key("wordStats"))
}

fn absorb_metadata(list: &mut VideoResultList, item: &Value) {
    let grade = non_empty_text(item, "overallGradeLevel");
    let ease = non_empty_text(item, "overallEaseScore");
    if grade.is_some() || ease.is_some() {
        list.readability = Some(ReadabilitySummary {
            overall_grade_level: grade,
            overall_ease_score: ease,
        });
    }
    if let Some(stats) = non_empty_text(item, "wordStats") {
        list.word_stats = Some(stats);
    }
}

fn decode_channel_profile(value: &Value) -> Option<ChannelProfile> {
    let data = value.get("profileData")?;
    if !data.is_object() {
        return None;
    }
    let recent_videos = data
        .get("recentVideos")
        .and_then(Value::as_array)
        .map(|videos| {
            videos
                .iter()
                .filter(|video| video.is_object())
                .map(|video| RecentVideo {
                    video_id: non_empty_text(video, "videoId"),
                    title: text(video, "title").unwrap_or_default(),
                })
                .collect()
        })
        .unwrap_or_default();
    Some(ChannelProfile {
        title: text(data, "title").unwrap_or_default(),
        thumbnail: text(data, "thumbnail").unwrap_or_default(),
        description: text(data, "description").unwrap_or_default(),
        subscriber_count: text(data, "subscriberCount").unwrap_or_default(),
        video_count: text(data, "videoCount").unwrap_or_default(),
        recent_videos,
    })
}

fn decode_search_notice(value: &Value) -> Option<(String, String)> {
    if value.get("overallSentiment").is_some() {
        return None;
    }
    let query = non_empty_str(value, "query")?;
    let message = non_empty_str(value, "message")?;
    Some((query, message))
}

fn non_empty_str(value: &Value, field: &str) -> Option<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

/// Like `non_empty_str`, but numbers and booleans count too.
fn non_empty_text(value: &Value, field: &str) -> Option<String> {
    text(value, field).filter(|text| !text.is_empty())
}

/// Non-empty strings, non-zero numbers and `true`, as text.
fn truthy_text(value: &Value, field: &str) -> Option<String> {
    match value.get(field)? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        Value::Bool(true) => Some(true.to_string()),
        _ => None,
    }
}

/// Strings as-is; numbers and booleans in their JSON spelling.
fn text(value: &Value, field: &str) -> Option<String> {
    value.get(field).and_then(scalar_text)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
