use std::time::Instant;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use runtime::{
    logging::{
        write_events, RecomputeLogEvent, RecomputeLogKind, RecomputeLogWriter, TracingLogWriter,
    },
    record::SavedCosteo,
    session::{CosteoSession, SessionChange, SessionSnapshot},
};
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ServerFrame {
    Snapshot(SessionSnapshot),
    Saved(SavedCosteo),
    Rejected { reason: &'static str },
}

pub async fn recompute_socket(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| run_session(socket, state))
}

async fn run_session(mut socket: WebSocket, state: AppState) {
    let limits = state.limits();
    let Ok(mut session) = CosteoSession::new(limits.max_quantity, limits.default_margin_percent)
    else {
        tracing::warn!("configured volume margin is out of range; closing recompute socket");
        return;
    };
    let mut log = TracingLogWriter;

    if send_frame(&mut socket, &ServerFrame::Snapshot(session.snapshot()))
        .await
        .is_err()
    {
        return;
    }

    while let Some(inbound) = socket.recv().await {
        let text = match inbound {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) | Err(_) => return,
            Ok(_) => continue,
        };

        let reply = handle_frame(&mut session, &state, &mut log, &text);
        if send_frame(&mut socket, &reply).await.is_err() {
            return;
        }
    }
}

fn handle_frame(
    session: &mut CosteoSession,
    state: &AppState,
    log: &mut dyn RecomputeLogWriter,
    text: &str,
) -> ServerFrame {
    let Ok(frame) = serde_json::from_str::<Value>(text) else {
        return ServerFrame::Rejected {
            reason: "malformed_frame",
        };
    };

    if frame.get("type").and_then(Value::as_str) == Some("save") {
        let name = frame
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("costeo");
        let saved = session.save(name, OffsetDateTime::now_utc());
        log.write(
            RecomputeLogEvent::new(session.sequence(), RecomputeLogKind::CosteoSaved, None)
                .with_detail(name),
        );
        return ServerFrame::Saved(saved);
    }

    let Ok(change) = serde_json::from_value::<SessionChange>(frame) else {
        return ServerFrame::Rejected {
            reason: "malformed_frame",
        };
    };

    let started = Instant::now();
    match session.apply(change) {
        Ok(events) => {
            let latency_micros = started.elapsed().as_micros() as u64;
            write_events(log, &events);
            log.write(RecomputeLogEvent::new(
                session.sequence(),
                RecomputeLogKind::LatencyRecorded,
                Some(latency_micros),
            ));
            state.record_recompute();
            ServerFrame::Snapshot(session.snapshot())
        }
        Err(reason) => ServerFrame::Rejected {
            reason: reason.code(),
        },
    }
}

async fn send_frame(socket: &mut WebSocket, frame: &ServerFrame) -> Result<(), ()> {
    let payload = serde_json::to_string(frame).map_err(|_| ())?;
    socket.send(Message::Text(payload)).await.map_err(|_| ())
}
