use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, info, warn};

use crate::domain::notification::Notification;
use crate::domain::session::{ParticipantId, SessionId};
use crate::errors::{DomainError, ErrorCode};
use crate::services::sessions::SessionService;
use crate::state::app_state::AppState;
use crate::ws::hub::WsRegistry;
use crate::ws::protocol::{ClientMsg, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = WsSession::new(app_state.sessions(), app_state.hub());
    ws::start(session, &req, stream)
}

#[derive(Message, Clone)]
#[rtype(result = "()")]
pub enum HubEvent {
    Notify {
        game_id: SessionId,
        notification: Arc<Notification>,
    },
    /// The session was removed from the registry.
    SessionClosed { game_id: SessionId },
}

/// One websocket connection. The connection is the participant: its id is
/// minted here and it holds at most one seat.
pub struct WsSession {
    participant_id: ParticipantId,
    service: Arc<SessionService>,
    hub: Arc<WsRegistry>,
    joined: Option<SessionId>,
    last_heartbeat: Instant,
}

impl WsSession {
    fn new(service: Arc<SessionService>, hub: Arc<WsRegistry>) -> Self {
        Self {
            participant_id: ParticipantId::random(),
            service,
            hub,
            joined: None,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg<'_>) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error(ctx: &mut ws::WebsocketContext<Self>, code: ErrorCode, message: impl Into<String>) {
        Self::send_json(
            ctx,
            &ServerMsg::Error {
                code,
                message: message.into(),
            },
        );
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(
                    participant_id = %actor.participant_id,
                    "[WS SESSION] heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn handle_command(&mut self, cmd: ClientMsg) -> Result<(), DomainError> {
        let me = self.participant_id;
        match cmd {
            ClientMsg::CreateGame {
                player_count,
                bunker_spots,
                name,
            } => {
                if self.joined.is_some() {
                    return Err(DomainError::AlreadyJoined);
                }
                let game_id =
                    self.service
                        .create_and_join(player_count, bunker_spots, me, &name)?;
                self.joined = Some(game_id);
            }
            ClientMsg::JoinGame { game_id, name } => {
                if self.joined.is_some() {
                    return Err(DomainError::AlreadyJoined);
                }
                self.service.join(game_id, me, &name)?;
                self.joined = Some(game_id);
            }
            ClientMsg::StartGame { game_id } => {
                self.service.start(game_id, me)?;
            }
            ClientMsg::RevealAttribute { game_id, attribute } => {
                self.service.reveal(game_id, me, &attribute)?;
            }
            ClientMsg::SubmitVote { game_id, target } => {
                self.service.vote(game_id, me, target)?;
            }
        }
        Ok(())
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(participant_id = %self.participant_id, "[WS SESSION] started");

        self.hub
            .register_connection(self.participant_id, ctx.address().recipient::<HubEvent>());
        Self::send_json(
            ctx,
            &ServerMsg::Welcome {
                participant_id: self.participant_id,
            },
        );

        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(game_id) = self.joined.take() {
            if let Err(err) = self.service.disconnect(game_id, self.participant_id) {
                debug!(
                    participant_id = %self.participant_id,
                    session_id = %game_id,
                    error = %err,
                    "[WS SESSION] disconnect not applied"
                );
            }
        }
        self.hub.unregister_connection(self.participant_id);
        info!(participant_id = %self.participant_id, "[WS SESSION] stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();

                let parsed: Result<ClientMsg, _> = serde_json::from_str(&text);
                let Ok(cmd) = parsed else {
                    Self::send_error(ctx, ErrorCode::BadRequest, "Malformed message");
                    return;
                };

                let command = cmd.name();
                if let Err(err) = self.handle_command(cmd) {
                    debug!(
                        participant_id = %self.participant_id,
                        command,
                        error = %err,
                        "[WS SESSION] command rejected"
                    );
                    Self::send_error(ctx, err.code(), err.to_string());
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_error(ctx, ErrorCode::BadRequest, "Binary not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    participant_id = %self.participant_id,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<HubEvent> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: HubEvent, ctx: &mut Self::Context) -> Self::Result {
        match msg {
            HubEvent::Notify {
                game_id,
                notification,
            } => {
                Self::send_json(
                    ctx,
                    &ServerMsg::Event {
                        game_id,
                        event: &notification,
                    },
                );
            }
            HubEvent::SessionClosed { game_id } => {
                if self.joined == Some(game_id) {
                    self.joined = None;
                }
            }
        }
    }
}
