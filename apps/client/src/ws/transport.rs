//! Transport seam between the session driver and the coordinator socket.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    Text(String),
    /// Ping, pong or binary frame; carries no game data.
    Control,
}

#[async_trait]
pub trait Transport: Send {
    async fn send_text(&mut self, text: String) -> Result<(), ClientError>;

    /// Next frame, or `None` once the peer closed the connection.
    async fn next_frame(&mut self) -> Option<Result<InboundFrame, ClientError>>;

    async fn close(&mut self) -> Result<(), ClientError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for &mut T {
    async fn send_text(&mut self, text: String) -> Result<(), ClientError> {
        (**self).send_text(text).await
    }

    async fn next_frame(&mut self) -> Option<Result<InboundFrame, ClientError>> {
        (**self).next_frame().await
    }

    async fn close(&mut self) -> Result<(), ClientError> {
        (**self).close().await
    }
}

/// WebSocket connection to the coordinator.
pub struct WsTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsTransport {
    pub async fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut request = config.coordinator_url.as_str().into_client_request()?;
        if let Some(protocol) = &config.subprotocol {
            let value = HeaderValue::from_str(protocol)
                .map_err(|e| ClientError::config(format!("invalid subprotocol: {e}")))?;
            request.headers_mut().insert("Sec-WebSocket-Protocol", value);
        }

        let (stream, _) = connect_async(request).await?;
        info!(url = %config.coordinator_url, "[WS TRANSPORT] connected");
        Ok(Self { stream })
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn send_text(&mut self, text: String) -> Result<(), ClientError> {
        self.stream.send(Message::text(text)).await?;
        Ok(())
    }

    async fn next_frame(&mut self) -> Option<Result<InboundFrame, ClientError>> {
        match self.stream.next().await? {
            Ok(Message::Text(text)) => Some(Ok(InboundFrame::Text(text.as_str().to_owned()))),
            Ok(Message::Close(frame)) => {
                debug!(?frame, "[WS TRANSPORT] closed by coordinator");
                None
            }
            Ok(_) => Some(Ok(InboundFrame::Control)),
            Err(err) => Some(Err(err.into())),
        }
    }

    async fn close(&mut self) -> Result<(), ClientError> {
        self.stream.close(None).await?;
        Ok(())
    }
}
