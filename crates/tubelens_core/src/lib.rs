//! Tubelens core: pure message-driven rendering state machine.
//!
//! Inbound frames are classified into response variants and reconciled
//! against the render target and the render state store by [`update`].
//! Nothing here performs IO; effects are returned to the caller.
mod classify;
mod diagnostic;
mod effect;
mod msg;
mod render_state;
mod request;
mod state;
mod update;
mod view;
mod view_model;

pub use classify::{
    classify, classify_with, BackendNotices, ChannelProfile, Classification, QueryHeading, ReadabilitySummary, RecentVideo,
    ResponseVariant, VideoEntry, VideoResultList,
};
pub use diagnostic::Diagnostic;
pub use effect::Effect;
pub use msg::Msg;
pub use render_state::RenderStateStore;
pub use request::{OutboundRequest, RequestError, RequestKey};
pub use state::{AppState, ConnectionStatus, ReconcilerOptions, ReplyCorrelation};
pub use update::{update, CHANNEL_LOADING_TEXT, EMPTY_QUERY_ALERT, NO_VALID_VIDEOS_TEXT};
pub use view::{
    ChannelProfileView, HeadingView, NoticeKind, NoticeView, RecentVideoView, RenderTarget,
    VideoItemView, VideoSectionView, ViewNode,
};
pub use view_model::AppViewModel;
