use crate::OutboundRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write a request frame to the connection.
    Send(OutboundRequest),
    /// Tell the user something without touching the render target.
    ShowAlert { message: String },
}
