//! Realtime document feed over the backend WebSocket endpoint.
//!
//! Every subscription owns one socket and one background reader task. The
//! task forwards `event` frames to the subscriber's handler, sends the
//! heartbeat `ping`, reopens the socket after the server drops it and closes
//! it when the subscription is dropped.

mod message;

pub use message::{parse_server_message, ServerMessage};

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::{HeaderValue, ORIGIN};
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::RealtimeConfig;
use crate::http::AppwriteClient;
use habitrack_domain::realtime::{Channel, RealtimeFeed, RealtimeHandler, Subscription};
use habitrack_domain::shared::DomainError;

type WebSocketStream = tokio_tungstenite::WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct AppwriteRealtime {
    client: Arc<AppwriteClient>,
    config: RealtimeConfig,
}

impl AppwriteRealtime {
    pub fn new(client: Arc<AppwriteClient>, config: &RealtimeConfig) -> Self {
        Self {
            client,
            config: config.clone(),
        }
    }
}

/// Opens sockets for one channel; reused for every reconnect
#[derive(Clone)]
struct Connector {
    client: Arc<AppwriteClient>,
    channel: Channel,
    url: Url,
}

impl Connector {
    /// Connect and, when signed in, authenticate with the current session
    async fn open(&self) -> Result<WebSocketStream, DomainError> {
        let mut request = self
            .url
            .as_str()
            .into_client_request()
            .map_err(|e| DomainError::Realtime(format!("Invalid realtime request: {}", e)))?;
        if let Ok(origin) = HeaderValue::from_str(&self.client.config().origin()) {
            request.headers_mut().insert(ORIGIN, origin);
        }

        let (mut ws_stream, _) = connect_async(request).await.map_err(|e| {
            DomainError::Realtime(format!("Failed to connect to {}: {}", self.channel, e))
        })?;

        if let Some(secret) = self.client.session_secret() {
            ws_stream
                .send(Message::text(message::authentication_message(&secret)))
                .await
                .map_err(|e| DomainError::Realtime(format!("Failed to authenticate: {}", e)))?;
        }

        Ok(ws_stream)
    }
}

/// `<ws(s) endpoint>/realtime?project=<id>&channels[]=<channel>`
pub fn realtime_url(endpoint: &str, project_id: &str, channel: &Channel) -> Result<Url, DomainError> {
    let mut url = Url::parse(endpoint)
        .map_err(|e| DomainError::Realtime(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

    let scheme = match url.scheme() {
        "https" | "wss" => "wss",
        "http" | "ws" => "ws",
        other => {
            return Err(DomainError::Realtime(format!(
                "Unsupported endpoint scheme '{}'",
                other
            )))
        }
    };
    url.set_scheme(scheme)
        .map_err(|_| DomainError::Realtime(format!("Cannot use scheme {}", scheme)))?;

    let path = format!("{}/realtime", url.path().trim_end_matches('/'));
    url.set_path(&path);
    url.query_pairs_mut()
        .clear()
        .append_pair("project", project_id)
        .append_pair("channels[]", channel.as_str());

    Ok(url)
}

#[async_trait]
impl RealtimeFeed for AppwriteRealtime {
    async fn subscribe(
        &self,
        channel: Channel,
        handler: Arc<dyn RealtimeHandler>,
    ) -> Result<Subscription, DomainError> {
        let connector = Connector {
            client: self.client.clone(),
            url: realtime_url(
                &self.client.config().endpoint,
                &self.client.config().project_id,
                &channel,
            )?,
            channel: channel.clone(),
        };

        let ws_stream = connector.open().await?;
        info!("Realtime subscription opened: {}", channel);

        let (close_tx, close_rx) = oneshot::channel();
        tokio::spawn(run_subscription(
            connector,
            ws_stream,
            close_rx,
            self.config.clone(),
            handler,
        ));

        Ok(Subscription::new(channel, move || {
            let _ = close_tx.send(());
        }))
    }
}

enum StreamEnd {
    Cancelled,
    Lost,
}

/// Read the channel until the subscription is cancelled, reopening the socket
/// with a doubling wait whenever it drops.
async fn run_subscription(
    connector: Connector,
    mut ws_stream: WebSocketStream,
    mut close_rx: oneshot::Receiver<()>,
    config: RealtimeConfig,
    handler: Arc<dyn RealtimeHandler>,
) {
    let channel = connector.channel.clone();

    loop {
        match read_stream(&mut ws_stream, &mut close_rx, &channel, config.heartbeat, &handler).await {
            StreamEnd::Cancelled => {
                let _ = ws_stream.close(None).await;
                info!("Realtime subscription closed: {}", channel);
                return;
            }
            StreamEnd::Lost => {}
        }

        let mut wait = config.initial_backoff;
        ws_stream = loop {
            warn!("Realtime connection to {} lost, retrying in {:?}", channel, wait);
            tokio::select! {
                biased;
                _ = &mut close_rx => {
                    info!("Realtime subscription closed while reconnecting: {}", channel);
                    return;
                }
                _ = tokio::time::sleep(wait) => {}
            }

            match connector.open().await {
                Ok(stream) => break stream,
                Err(e) => {
                    warn!("Realtime reconnect failed: {}", e);
                    wait = config.next_backoff(wait);
                }
            }
        };

        info!("Realtime subscription reopened: {}", channel);
        let handler = handler.clone();
        tokio::spawn(async move {
            handler.on_reconnect().await;
        });
    }
}

async fn read_stream(
    ws_stream: &mut WebSocketStream,
    close_rx: &mut oneshot::Receiver<()>,
    channel: &Channel,
    heartbeat: Duration,
    handler: &Arc<dyn RealtimeHandler>,
) -> StreamEnd {
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + heartbeat, heartbeat);

    loop {
        let frame = tokio::select! {
            biased;

            _ = &mut *close_rx => return StreamEnd::Cancelled,

            _ = ticker.tick() => {
                if let Err(e) = ws_stream.send(Message::text(message::ping_message())).await {
                    warn!("Realtime heartbeat failed on {}: {}", channel, e);
                    return StreamEnd::Lost;
                }
                continue;
            }

            frame = ws_stream.next() => frame,
        };

        match frame {
            Some(Ok(Message::Text(text))) => match parse_server_message(&text) {
                Ok(ServerMessage::Event(event)) => {
                    debug!(channel = %channel, events = ?event.events, "realtime event");
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        handler.on_event(event).await;
                    });
                }
                Ok(ServerMessage::Connected { channels }) => {
                    debug!("Realtime connected, channels: {:?}", channels);
                }
                Ok(ServerMessage::Error { code, message }) => {
                    error!("Realtime error on {} ({}): {}", channel, code, message);
                }
                Ok(ServerMessage::Response { to, success }) => {
                    if !success {
                        warn!("Realtime '{}' request was rejected on {}", to, channel);
                    }
                }
                Ok(ServerMessage::Pong) => {}
                Ok(ServerMessage::Unknown(kind)) => {
                    debug!("Ignoring realtime message of type '{}'", kind);
                }
                Err(e) => warn!("Unreadable realtime message on {}: {}", channel, e),
            },
            Some(Ok(Message::Close(frame))) => {
                info!("Realtime socket closed by server on {}: {:?}", channel, frame);
                return StreamEnd::Lost;
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                error!("Realtime socket error on {}: {}", channel, e);
                return StreamEnd::Lost;
            }
            None => {
                warn!("Realtime stream ended on {}", channel);
                return StreamEnd::Lost;
            }
        }
    }
}
