// WebSocket client utilities for testing

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

const FRAME_TIMEOUT: Duration = Duration::from_secs(2);

/// WebSocket test client
pub struct WebSocketClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    pub participant_id: String,
}

impl WebSocketClient {
    /// Connect, retrying until success or timeout, and consume the welcome frame.
    pub async fn connect_retry(
        url: &str,
        timeout: Duration,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let start = tokio::time::Instant::now();
        let stream = loop {
            match connect_async(url).await {
                Ok((stream, _)) => break stream,
                Err(err) => {
                    if start.elapsed() >= timeout {
                        return Err(Box::new(err));
                    }
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }
            }
        };

        let mut client = Self {
            stream,
            participant_id: String::new(),
        };
        let welcome = client.recv_json().await?;
        if welcome["type"] != "welcome" {
            return Err(format!("expected welcome, got {welcome}").into());
        }
        client.participant_id = welcome["participant_id"]
            .as_str()
            .ok_or("welcome without participant_id")?
            .to_string();
        Ok(client)
    }

    /// Receive the next message with a timeout
    pub async fn recv_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<Message>, Box<dyn std::error::Error>> {
        tokio::time::timeout(timeout, self.stream.next())
            .await
            .map_err(|_| "Timeout waiting for message")?
            .transpose()
            .map_err(|e| e.into())
    }

    /// Next text frame as JSON; pings and pongs are skipped.
    pub async fn recv_json(&mut self) -> Result<Value, Box<dyn std::error::Error>> {
        loop {
            match self.recv_timeout(FRAME_TIMEOUT).await? {
                Some(Message::Text(text)) => return Ok(serde_json::from_str(text.as_str())?),
                Some(Message::Ping(_)) | Some(Message::Pong(_)) => continue,
                Some(other) => return Err(format!("unexpected frame: {other:?}").into()),
                None => return Err("connection closed".into()),
            }
        }
    }

    /// Next frame, which must be an `event` of the given type. Returns the event body.
    pub async fn expect_event(&mut self, kind: &str) -> Result<Value, Box<dyn std::error::Error>> {
        let frame = self.recv_json().await?;
        if frame["type"] != "event" || frame["event"]["type"] != kind {
            return Err(format!("expected event {kind}, got {frame}").into());
        }
        Ok(frame["event"].clone())
    }

    /// Next frame, which must be an `error` frame. Returns its code.
    pub async fn expect_error(&mut self) -> Result<String, Box<dyn std::error::Error>> {
        let frame = self.recv_json().await?;
        if frame["type"] != "error" {
            return Err(format!("expected error frame, got {frame}").into());
        }
        Ok(frame["code"].as_str().unwrap_or_default().to_string())
    }

    /// Send a JSON command
    pub async fn send_json(&mut self, value: Value) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.send(Message::Text(value.to_string().into())).await?;
        Ok(())
    }

    /// Send a raw text frame
    pub async fn send_text(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.send(Message::Text(text.to_string().into())).await?;
        Ok(())
    }

    /// Close the connection
    pub async fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.close(None).await?;
        Ok(())
    }
}
