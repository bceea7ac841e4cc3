use std::io::Cursor;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::sse::{format_sse_event, write_all, SSE_HEADER, SSE_KEEPALIVE};
use crate::state::{lock, SharedState};

const PAGE: &str = include_str!("assets/viz.html");

// How often the SSE loop looks for a new tick, and how long it may stay
// silent before sending a keep-alive.
const POLL_INTERVAL: Duration = Duration::from_millis(100);
const KEEPALIVE_AFTER: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn with_content_type(body: String, content_type: &str) -> Response<Cursor<Vec<u8>>> {
    let response = Response::from_string(body);
    match Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes()) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

fn html_response(body: String) -> Response<Cursor<Vec<u8>>> {
    with_content_type(body, "text/html; charset=utf-8")
}

fn json_response(body: String) -> Response<Cursor<Vec<u8>>> {
    with_content_type(body, "application/json")
}

fn error_response(code: u16, message: &str) -> Response<Cursor<Vec<u8>>> {
    with_content_type(message.to_owned(), "text/plain").with_status_code(StatusCode(code))
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Routes one request. The SSE stream takes ownership of the request; every
/// other route answers with a single buffered response.
pub fn dispatch(request: Request, state: SharedState) {
    let method = request.method().clone();
    let path = request.url().split('?').next().unwrap_or("").to_owned();
    debug!("{:?} {}", method, path);

    if method == Method::Get && path == "/events" {
        stream_events(request, state);
        return;
    }

    let response = match (method, path.as_str()) {
        (Method::Get, "/") => html_response(PAGE.to_owned()),
        (Method::Get, "/snapshot") => snapshot(&state),
        (Method::Post, "/toggle") => toggle(&state),
        (Method::Post, "/reset") => reset(&state),
        _ => error_response(404, "404 Not Found"),
    };

    if let Err(e) = request.respond(response) {
        warn!("failed to send response: {}", e);
    }
}

fn snapshot(state: &SharedState) -> Response<Cursor<Vec<u8>>> {
    let payload = lock(state).payload();
    match serde_json::to_string(&payload) {
        Ok(json) => json_response(json),
        Err(e) => error_response(500, &e.to_string()),
    }
}

/// `POST /toggle`: flips the training flag.
fn toggle(state: &SharedState) -> Response<Cursor<Vec<u8>>> {
    let training = lock(state).trainer.toggle();
    json_response(format!("{{\"training\":{}}}", training))
}

/// `POST /reset`: discards training and draws new random parameters.
fn reset(state: &SharedState) -> Response<Cursor<Vec<u8>>> {
    match lock(state).reset() {
        Ok(()) => json_response("{\"reset\":true}".to_owned()),
        Err(e) => error_response(500, &e.to_string()),
    }
}

/// `GET /events`: pushes a `snapshot` event whenever the tick counter moves.
///
/// Ends when the client disconnects (any write fails).
fn stream_events(request: Request, state: SharedState) {
    let mut writer = request.into_writer();
    if write_all(&mut *writer, SSE_HEADER.as_bytes()).is_err() {
        return;
    }

    let mut last_tick = None;
    let mut last_sent = Instant::now();
    loop {
        let update = {
            let st = lock(&state);
            let tick = st.trainer.ticks();
            if last_tick != Some(tick) {
                last_tick = Some(tick);
                serde_json::to_string(&st.payload()).ok()
            } else {
                None
            }
        };

        let frame = match update {
            Some(json) => Some(format_sse_event("snapshot", &json)),
            None if last_sent.elapsed() >= KEEPALIVE_AFTER => Some(SSE_KEEPALIVE.to_owned()),
            None => None,
        };
        if let Some(frame) = frame {
            if write_all(&mut *writer, frame.as_bytes()).is_err() {
                debug!("event stream closed");
                return;
            }
            last_sent = Instant::now();
        }

        thread::sleep(POLL_INTERVAL);
    }
}
