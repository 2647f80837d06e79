use client_logging::{client_debug, client_info};

use crate::view::{HeadingView, NoticeKind, VideoItemView, VideoSectionView, ViewNode};
use crate::{
    classify_with, AppState, ChannelProfile, Classification, ConnectionStatus, Diagnostic, Effect, Msg,
    OutboundRequest, QueryHeading, ReplyCorrelation, RequestKey, ResponseVariant,
    VideoResultList,
};

pub const EMPTY_QUERY_ALERT: &str = "Please enter a search query.";
pub const CHANNEL_LOADING_TEXT: &str = "Loading channel profile...";
pub const NO_VALID_VIDEOS_TEXT: &str = "No valid videos found for your query.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SearchClicked => search_clicked(&mut state),
        Msg::ChannelLinkClicked { channel_id } => channel_link_clicked(&mut state, &channel_id),
        Msg::FrameReceived(raw) => {
            frame_received(&mut state, &raw);
            Vec::new()
        }
        Msg::ConnectionOpened => {
            client_info!("Connection established");
            state.set_connection(ConnectionStatus::Open);
            Vec::new()
        }
        Msg::ConnectionClosed { reason } => {
            client_info!(
                "Connection closed ({})",
                reason.as_deref().unwrap_or("no reason given")
            );
            state.set_connection(ConnectionStatus::Closed);
            Vec::new()
        }
        Msg::ConnectionFailed { detail } => {
            state.record(Diagnostic::Transport(detail));
            state.set_connection(ConnectionStatus::Failed);
            Vec::new()
        }
        Msg::SendFailed { key, detail } => {
            send_failed(&mut state, key, detail);
            Vec::new()
        }
    };

    (state, effects)
}

fn search_clicked(state: &mut AppState) -> Vec<Effect> {
    let query = state.input().trim().to_owned();
    let request = match OutboundRequest::search(&query) {
        Ok(request) => request,
        Err(err) => {
            client_debug!("Search ignored: {err}");
            return vec![Effect::ShowAlert {
                message: EMPTY_QUERY_ALERT.to_string(),
            }];
        }
    };
    let key = request.key();
    let loading = ViewNode::loading(&key, format!("Loading results for: {query}"));
    let newly_pending = state.render_state_mut().begin_pending(key.clone());
    ensure_mounted(state, &key.placeholder_id(), loading);

    if newly_pending {
        vec![Effect::Send(request)]
    } else {
        client_debug!("Search for {key} already in flight; not resending");
        Vec::new()
    }
}

fn channel_link_clicked(state: &mut AppState, channel_id: &str) -> Vec<Effect> {
    let request = match OutboundRequest::channel_profile(channel_id) {
        Ok(request) => request,
        Err(err) => {
            state.record(err.into());
            return Vec::new();
        }
    };
    let key = request.key();
    state
        .target_mut()
        .replace_all(ViewNode::loading(&key, CHANNEL_LOADING_TEXT));
    state.mark_dirty();

    if state.render_state_mut().begin_pending(key.clone()) {
        vec![Effect::Send(request)]
    } else {
        client_debug!("Profile for {key} already in flight; not resending");
        Vec::new()
    }
}

fn frame_received(state: &mut AppState, raw: &str) {
    let variants = match classify_with(raw, state.options().backend_notices) {
        Classification::Malformed { error } => {
            state.record(Diagnostic::Parse(error));
            return;
        }
        Classification::Unrecognized => {
            state.record(Diagnostic::ShapeMismatch);
            return;
        }
        Classification::Recognized(variants) => variants,
    };

    // Variants arrive in precedence order; see `ResponseVariant`.
    for variant in variants {
        match variant {
            ResponseVariant::QueryHeading(heading) => render_query_heading(state, heading),
            ResponseVariant::VideoResultList(list) => render_video_results(state, list),
            ResponseVariant::ChannelProfile(profile) => render_channel_profile(state, profile),
            ResponseVariant::SearchNotice { query, message } => {
                render_search_notice(state, &query, message)
            }
            ResponseVariant::ProfileError { message } => render_profile_error(state, &message),
        }
    }
}

fn render_query_heading(state: &mut AppState, heading: QueryHeading) {
    let heading = HeadingView::from(heading);
    let id = heading.id.clone();
    ensure_mounted(state, &id, ViewNode::Heading(heading));
}

fn render_video_results(state: &mut AppState, list: VideoResultList) {
    match reply_key(state) {
        Some(key) => settle_reply(state, &key, true),
        None => client_debug!("Video results arrived with no query to attach to"),
    }

    let mut items = Vec::with_capacity(list.entries.len());
    for entry in list.entries {
        let index = entry.index;
        match VideoItemView::try_from(entry) {
            Ok(item) => items.push(item),
            Err(missing) => state.record(Diagnostic::PartialData { index, missing }),
        }
    }

    let node = if items.is_empty() {
        client_info!("No valid video items to display");
        ViewNode::notice(NoticeKind::NoResults, NO_VALID_VIDEOS_TEXT)
    } else {
        client_debug!("Rendering {} video items", items.len());
        ViewNode::VideoSection(VideoSectionView {
            items,
            readability: list.readability,
            word_stats: list.word_stats,
        })
    };
    state.target_mut().prepend(node);
    state.mark_dirty();
}

fn render_channel_profile(state: &mut AppState, profile: ChannelProfile) {
    match state.render_state().oldest_pending_channel().cloned() {
        Some(key) => {
            state.render_state_mut().resolve(&key);
        }
        None => state.record(Diagnostic::UncorrelatedReply {
            variant: "channel profile",
        }),
    }
    client_debug!("Rendering channel profile {}", profile.title);
    state
        .target_mut()
        .replace_all(ViewNode::ChannelProfile(profile.into()));
    state.mark_dirty();
}

fn render_search_notice(state: &mut AppState, query: &str, message: String) {
    let key = RequestKey::Query(query.trim().to_owned());
    settle_reply(state, &key, true);
    state
        .target_mut()
        .prepend(ViewNode::notice(NoticeKind::NoResults, message));
    state.mark_dirty();
}

fn render_profile_error(state: &mut AppState, message: &str) {
    match state.render_state().oldest_pending_channel().cloned() {
        Some(key) => settle_reply(state, &key, false),
        None => state.record(Diagnostic::UncorrelatedReply {
            variant: "channel profile error",
        }),
    }
    state.target_mut().prepend(ViewNode::notice(
        NoticeKind::Error,
        format!("Could not load channel profile: {message}"),
    ));
    state.mark_dirty();
}

fn send_failed(state: &mut AppState, key: RequestKey, detail: String) {
    if !state.render_state_mut().fail(&key) {
        client_debug!("Send failure for {key} which is no longer pending");
    }
    state.target_mut().remove(&key.placeholder_id());
    let text = format!("Could not send request for {key}: {detail}");
    state.record(Diagnostic::SendRejected { key, detail });
    state
        .target_mut()
        .prepend(ViewNode::notice(NoticeKind::Error, text));
    state.mark_dirty();
}

/// Which pending query a video result list answers.
fn reply_key(state: &AppState) -> Option<RequestKey> {
    match state.options().reply_correlation {
        ReplyCorrelation::InputText => {
            let query = state.input().trim();
            (!query.is_empty()).then(|| RequestKey::Query(query.to_owned()))
        }
        ReplyCorrelation::OldestPending => state.render_state().oldest_pending_query().cloned(),
    }
}

/// Settles `key` and unmounts its placeholder. A key that is not pending is
/// recorded as a late reply.
fn settle_reply(state: &mut AppState, key: &RequestKey, resolved: bool) {
    let settled = if resolved {
        state.render_state_mut().resolve(key)
    } else {
        state.render_state_mut().fail(key)
    };
    if !settled {
        state.record(Diagnostic::LateReply { key: key.clone() });
    }
    if state.target_mut().remove(&key.placeholder_id()) {
        state.mark_dirty();
    }
}

/// Prepends `node` unless a node with `id` is already mounted.
fn ensure_mounted(state: &mut AppState, id: &str, node: ViewNode) {
    if state.target().contains(id) {
        return;
    }
    state.target_mut().prepend(node);
    state.mark_dirty();
}
