use url::Url;

use crate::{ChannelProfile, QueryHeading, ReadabilitySummary, RequestKey, VideoEntry};

const WATCH_URL: &str = "https://www.youtube.com/watch";
const NO_DESCRIPTION: &str = "No description available.";

/// A node mounted in the render target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNode {
    Heading(HeadingView),
    VideoSection(VideoSectionView),
    ChannelProfile(ChannelProfileView),
    Notice(NoticeView),
}

impl ViewNode {
    pub fn id(&self) -> Option<&str> {
        match self {
            ViewNode::Heading(heading) => Some(&heading.id),
            ViewNode::Notice(notice) => notice.id.as_deref(),
            ViewNode::VideoSection(_) | ViewNode::ChannelProfile(_) => None,
        }
    }

    /// Placeholder shown while the request for `key` is in flight.
    pub fn loading(key: &RequestKey, text: impl Into<String>) -> Self {
        ViewNode::Notice(NoticeView {
            id: Some(key.placeholder_id()),
            kind: NoticeKind::Loading,
            text: text.into(),
        })
    }

    pub fn notice(kind: NoticeKind, text: impl Into<String>) -> Self {
        ViewNode::Notice(NoticeView {
            id: None,
            kind,
            text: text.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingView {
    pub id: String,
    pub query: String,
    pub sentiment: String,
}

impl HeadingView {
    pub fn id_for(query: &str) -> String {
        format!("heading-{query}")
    }

    pub fn text(&self) -> String {
        format!("Results for: {} (Sentiment: {})", self.query, self.sentiment)
    }
}

impl From<QueryHeading> for HeadingView {
    fn from(heading: QueryHeading) -> Self {
        Self {
            id: Self::id_for(&heading.query),
            query: heading.query,
            sentiment: heading.overall_sentiment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSectionView {
    pub items: Vec<VideoItemView>,
    pub readability: Option<ReadabilitySummary>,
    pub word_stats: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoItemView {
    pub title: String,
    pub channel_title: String,
    /// Target of the channel link; `None` renders the channel as plain text.
    pub channel_id: Option<String>,
    pub thumbnail: String,
    pub description: String,
    pub watch_url: Option<String>,
    pub grade_level: Option<String>,
    pub reading_ease_score: Option<String>,
}

impl TryFrom<VideoEntry> for VideoItemView {
    /// Names of the missing required fields.
    type Error = Vec<&'static str>;

    fn try_from(entry: VideoEntry) -> Result<Self, Self::Error> {
        let missing = entry.missing_required();
        let (Some(title), Some(channel_title), Some(thumbnail)) =
            (entry.title, entry.channel_title, entry.default_thumbnail)
        else {
            return Err(missing);
        };
        Ok(Self {
            title,
            channel_title,
            channel_id: entry.channel_id,
            thumbnail,
            description: entry
                .description
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            watch_url: entry.video_id.as_deref().and_then(watch_url),
            grade_level: entry.grade_level,
            reading_ease_score: entry.reading_ease_score,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelProfileView {
    pub title: String,
    pub thumbnail: String,
    pub description: String,
    pub subscriber_count: String,
    pub video_count: String,
    pub recent_videos: Vec<RecentVideoView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentVideoView {
    pub title: String,
    pub watch_url: Option<String>,
}

impl From<ChannelProfile> for ChannelProfileView {
    fn from(profile: ChannelProfile) -> Self {
        Self {
            title: profile.title,
            thumbnail: profile.thumbnail,
            description: profile.description,
            subscriber_count: profile.subscriber_count,
            video_count: profile.video_count,
            recent_videos: profile
                .recent_videos
                .into_iter()
                .map(|video| RecentVideoView {
                    watch_url: video.video_id.as_deref().and_then(watch_url),
                    title: video.title,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Loading,
    NoResults,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub id: Option<String>,
    pub kind: NoticeKind,
    pub text: String,
}

/// The results container: mounted nodes, most recent first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderTarget {
    nodes: Vec<ViewNode>,
}

impl RenderTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[ViewNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|node| node.id() == Some(id))
    }

    pub(crate) fn prepend(&mut self, node: ViewNode) {
        self.nodes.insert(0, node);
    }

    /// Removes every node carrying `id`. Returns whether anything was removed.
    pub(crate) fn remove(&mut self, id: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|node| node.id() != Some(id));
        self.nodes.len() != before
    }

    pub(crate) fn replace_all(&mut self, node: ViewNode) {
        self.nodes.clear();
        self.nodes.push(node);
    }
}

fn watch_url(video_id: &str) -> Option<String> {
    Url::parse_with_params(WATCH_URL, &[("v", video_id)])
        .ok()
        .map(String::from)
}
