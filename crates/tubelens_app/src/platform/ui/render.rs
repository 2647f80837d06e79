use tubelens_core::{
    AppViewModel, ChannelProfileView, ConnectionStatus, NoticeKind, NoticeView, VideoItemView,
    VideoSectionView, ViewNode,
};

use super::constants::CHANNEL_COMMAND;

const RULE: &str = "------------------------------------------------------------";

/// Renders the whole view model as terminal lines, most recent node first.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let connection_label = match view.connection {
        ConnectionStatus::Connecting => "Connecting",
        ConnectionStatus::Open => "Connected",
        ConnectionStatus::Closed => "Closed",
        ConnectionStatus::Failed => "Failed",
    };

    let mut lines = vec![
        RULE.to_string(),
        format!(
            "Connection: {} | Pending requests: {}",
            connection_label,
            view.pending.len()
        ),
        RULE.to_string(),
    ];

    for node in &view.nodes {
        match node {
            ViewNode::Heading(heading) => lines.push(heading.text()),
            ViewNode::VideoSection(section) => render_section(&mut lines, section),
            ViewNode::ChannelProfile(profile) => render_profile(&mut lines, profile),
            ViewNode::Notice(notice) => lines.push(notice_line(notice)),
        }
    }
    lines
}

fn render_section(lines: &mut Vec<String>, section: &VideoSectionView) {
    if let Some(readability) = &section.readability {
        let grade = readability.overall_grade_level.as_deref().unwrap_or("n/a");
        let ease = readability.overall_ease_score.as_deref().unwrap_or("n/a");
        lines.push(format!("Readability: grade {grade}, ease {ease}"));
    }
    if let Some(stats) = &section.word_stats {
        lines.push(format!("Word stats: {stats}"));
    }
    for (position, item) in section.items.iter().enumerate() {
        render_item(lines, position + 1, item);
    }
}

fn render_item(lines: &mut Vec<String>, number: usize, item: &VideoItemView) {
    lines.push(format!("{number:>3}. {}", item.title));
    if let Some(url) = &item.watch_url {
        lines.push(format!("     {url}"));
    }
    match &item.channel_id {
        Some(id) => lines.push(format!(
            "     Channel: {} [{CHANNEL_COMMAND} {id}]",
            item.channel_title
        )),
        None => lines.push(format!("     Channel: {}", item.channel_title)),
    }
    lines.push(format!("     {}", item.description));
    lines.push(format!("     Thumbnail: {}", item.thumbnail));
    if item.grade_level.is_some() || item.reading_ease_score.is_some() {
        lines.push(format!(
            "     Grade level: {} | Reading ease: {}",
            item.grade_level.as_deref().unwrap_or("n/a"),
            item.reading_ease_score.as_deref().unwrap_or("n/a")
        ));
    }
}

fn render_profile(lines: &mut Vec<String>, profile: &ChannelProfileView) {
    lines.push(format!("Channel: {}", profile.title));
    lines.push(format!("Thumbnail: {}", profile.thumbnail));
    lines.push(profile.description.clone());
    lines.push(format!("Subscribers: {}", profile.subscriber_count));
    lines.push(format!("Videos: {}", profile.video_count));
    lines.push("Recent Videos:".to_string());
    for video in &profile.recent_videos {
        match &video.watch_url {
            Some(url) => lines.push(format!("  - {} ({url})", video.title)),
            None => lines.push(format!("  - {}", video.title)),
        }
    }
}

fn notice_line(notice: &NoticeView) -> String {
    let prefix = match notice.kind {
        NoticeKind::Loading => "...",
        NoticeKind::NoResults => "(none)",
        NoticeKind::Error => "[error]",
    };
    format!("{prefix} {}", notice.text)
}
