//! Scripted coordinator: accepts one client connection and runs a test script against it.

use std::future::Future;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{accept_hdr_async, WebSocketStream};

const PING: &str = "\"Ping\"";

/// Server side of one client connection.
pub struct CoordinatorConn {
    ws: WebSocketStream<TcpStream>,
    pings: usize,
    answer_pings: bool,
}

impl CoordinatorConn {
    /// Reply `"Pong"` to heartbeats seen while waiting for other frames.
    pub fn answer_pings(&mut self, yes: bool) {
        self.answer_pings = yes;
    }

    /// Heartbeats received so far.
    pub fn pings(&self) -> usize {
        self.pings
    }

    pub async fn send(&mut self, text: &str) {
        self.ws
            .send(Message::text(text.to_string()))
            .await
            .expect("coordinator send");
    }

    pub async fn send_json(&mut self, value: Value) {
        self.send(&value.to_string()).await;
    }

    /// Next text frame of any kind, or `None` once the client closed.
    pub async fn recv_text(&mut self) -> Option<String> {
        loop {
            match self.ws.next().await? {
                Ok(Message::Text(text)) => {
                    let text = text.as_str().to_owned();
                    if text == PING {
                        self.pings += 1;
                        if self.answer_pings {
                            self.send("\"Pong\"").await;
                        }
                    }
                    return Some(text);
                }
                Ok(Message::Close(_)) | Err(_) => return None,
                Ok(_) => continue,
            }
        }
    }

    /// Next non-heartbeat frame parsed as JSON, or `None` once the client closed.
    pub async fn recv_request(&mut self) -> Option<Value> {
        loop {
            let text = self.recv_text().await?;
            if text != PING {
                return serde_json::from_str(&text).ok();
            }
        }
    }

    /// Waits for the next heartbeat; `false` if the client closed first.
    pub async fn wait_for_ping(&mut self) -> bool {
        loop {
            match self.recv_text().await {
                Some(text) if text == PING => return true,
                Some(_) => continue,
                None => return false,
            }
        }
    }

    /// Reads until the client closes the connection; returns the heartbeat count.
    pub async fn drain(mut self) -> usize {
        while self.recv_text().await.is_some() {}
        self.pings
    }
}

fn echo_subprotocol(req: &Request, mut resp: Response) -> Result<Response, ErrorResponse> {
    if let Some(protocol) = req.headers().get("Sec-WebSocket-Protocol") {
        resp.headers_mut()
            .insert("Sec-WebSocket-Protocol", protocol.clone());
    }
    Ok(resp)
}

/// Binds a local port and runs `script` on the first accepted connection.
///
/// Returns the `ws://` URL to connect to and the script's join handle.
pub async fn start_coordinator<F, Fut, T>(script: F) -> std::io::Result<(String, JoinHandle<T>)>
where
    F: FnOnce(CoordinatorConn) -> Fut + Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.expect("coordinator accept");
        let ws = accept_hdr_async(tcp, echo_subprotocol)
            .await
            .expect("coordinator handshake");
        script(CoordinatorConn {
            ws,
            pings: 0,
            answer_pings: false,
        })
        .await
    });

    Ok((format!("ws://{addr}/ws"), handle))
}
