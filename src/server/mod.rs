use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::time::Duration;

use log::{error, info, warn};

use crate::config::AppConfig;

pub mod api;
pub mod routes;

pub use api::AppState;

const MAX_REQUEST_BYTES: usize = 1 << 20;
const READ_TIMEOUT: Duration = Duration::from_secs(5);

pub fn run_server(config: AppConfig) -> std::io::Result<()> {
    let bind_addr = config.bind_addr.clone();
    let mut state = AppState::new(config);
    let listener = TcpListener::bind(&bind_addr)?;
    info!("amo console listening on http://{bind_addr}");
    info!("{}", state.workbench.status());

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&mut stream, &mut state) {
                    warn!("request error: {err}");
                }
            }
            Err(err) => error!("connection failed: {err}"),
        }
    }

    Ok(())
}

fn content_length(head: &str) -> usize {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

fn find_head_end(buffer: &[u8]) -> Option<(usize, usize)> {
    if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
        return Some((pos, pos + 4));
    }
    buffer
        .windows(2)
        .position(|w| w == b"\n\n")
        .map(|pos| (pos, pos + 2))
}

enum RawRequest {
    Complete(Vec<u8>),
    TooLarge,
}

/// Read until the headers and `Content-Length` bytes of body have arrived.
/// Anything declaring or sending more than [MAX_REQUEST_BYTES] is refused.
fn read_request(stream: &mut impl Read) -> std::io::Result<RawRequest> {
    let mut request = Vec::new();
    let mut chunk = [0_u8; 16_384];
    loop {
        let bytes_read = stream.read(&mut chunk)?;
        if bytes_read == 0 {
            break;
        }
        request.extend_from_slice(&chunk[..bytes_read]);
        if request.len() > MAX_REQUEST_BYTES {
            return Ok(RawRequest::TooLarge);
        }
        if let Some((head_end, body_start)) = find_head_end(&request) {
            let head = String::from_utf8_lossy(&request[..head_end]);
            let expected = body_start.saturating_add(content_length(&head));
            if expected > MAX_REQUEST_BYTES {
                return Ok(RawRequest::TooLarge);
            }
            if request.len() >= expected {
                break;
            }
        }
    }
    Ok(RawRequest::Complete(request))
}

fn handle_connection(stream: &mut TcpStream, state: &mut AppState) -> std::io::Result<()> {
    stream.set_read_timeout(Some(READ_TIMEOUT))?;
    let raw = match read_request(stream)? {
        RawRequest::Complete(raw) => raw,
        RawRequest::TooLarge => {
            warn!("refusing request over {MAX_REQUEST_BYTES} bytes");
            stream.write_all(routes::payload_too_large().to_http_string().as_bytes())?;
            stream.flush()?;
            return Ok(());
        }
    };
    if raw.is_empty() {
        return Ok(());
    }

    let request = String::from_utf8_lossy(&raw);
    let mut lines = request.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET");
    let path = request_parts.next().unwrap_or("/");

    let body = request
        .split_once("\r\n\r\n")
        .or_else(|| request.split_once("\n\n"))
        .map(|(_, body)| body)
        .unwrap_or("");

    let response = routes::route_request(state, method, path, body).to_http_string();
    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    Ok(())
}
