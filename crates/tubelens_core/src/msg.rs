use crate::RequestKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the query input box.
    InputChanged(String),
    /// User pressed the search control.
    SearchClicked,
    /// User clicked a channel link inside a rendered video section.
    ChannelLinkClicked { channel_id: String },
    /// Raw text frame from the connection.
    FrameReceived(String),
    ConnectionOpened,
    ConnectionClosed { reason: Option<String> },
    ConnectionFailed { detail: String },
    /// A request could not be written because the connection was not open.
    SendFailed { key: RequestKey, detail: String },
}
