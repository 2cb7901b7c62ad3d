//! Scene file server
//!
//! A small HTTP/1.1 server that lets the performer UI save scene files and
//! lets the display pages fetch them. Uploads are restricted to a fixed
//! allow-list of basenames and rejected before the body is read; any path
//! component in the request target is stripped, so traversal attempts
//! collapse to a basename lookup. Saves are atomic (temp file + rename).
//!
//! The handler is generic over the byte stream, so the request/response
//! contract is testable over [`tokio::io::duplex`] without sockets.

use crate::config::ServerConfig;
use crate::error::ServerResult;
use log::{info, warn};
use std::sync::Arc;
use tokio::io::{
    AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tokio::net::TcpListener;

/// Upper bound on the request head (request line + headers)
const MAX_HEAD_BYTES: u64 = 16 * 1024;
/// Upper bound on header count
const MAX_HEADERS: usize = 100;
/// Upper bound on an accepted PUT body
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

struct RequestHead {
    method: String,
    target: String,
    headers: Vec<(String, String)>,
}

impl RequestHead {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Basename of the request target, query string stripped
    fn filename(&self) -> &str {
        let path = self.target.split('?').next().unwrap_or("");
        path.rsplit('/').next().unwrap_or("")
    }
}

enum Head {
    Closed,
    Malformed,
    Parsed(RequestHead),
}

async fn read_head<R>(reader: &mut R) -> ServerResult<Head>
where
    R: AsyncBufReadExt + Unpin,
{
    let mut reader = AsyncReadExt::take(&mut *reader, MAX_HEAD_BYTES);
    let mut line = String::new();
    if reader.read_line(&mut line).await? == 0 {
        return Ok(Head::Closed);
    }

    let mut parts = line.split_whitespace();
    let (method, target) = match (parts.next(), parts.next(), parts.next()) {
        (Some(method), Some(target), Some(_version)) => (method.to_string(), target.to_string()),
        _ => return Ok(Head::Malformed),
    };

    let mut headers = Vec::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            // head never terminated (or exceeded the size cap)
            return Ok(Head::Malformed);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            break;
        }
        let Some((name, value)) = trimmed.split_once(':') else {
            return Ok(Head::Malformed);
        };
        headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
        if headers.len() > MAX_HEADERS {
            return Ok(Head::Malformed);
        }
    }

    Ok(Head::Parsed(RequestHead {
        method,
        target,
        headers,
    }))
}

async fn respond<W>(
    writer: &mut W,
    status: u16,
    reason: &str,
    content_type: Option<&str>,
    extra_headers: &[(&str, &str)],
    body: &[u8],
) -> ServerResult<()>
where
    W: AsyncWrite + Unpin,
{
    let mut head = format!(
        "HTTP/1.1 {} {}\r\nAccess-Control-Allow-Origin: *\r\nContent-Length: {}\r\nConnection: close\r\n",
        status,
        reason,
        body.len()
    );
    if let Some(content_type) = content_type {
        head.push_str(&format!("Content-Type: {}\r\n", content_type));
    }
    for (name, value) in extra_headers {
        head.push_str(&format!("{}: {}\r\n", name, value));
    }
    head.push_str("\r\n");

    writer.write_all(head.as_bytes()).await?;
    writer.write_all(body).await?;
    writer.flush().await?;
    Ok(())
}

fn content_type_for(name: &str) -> &'static str {
    match name.rsplit('.').next() {
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("html") => "text/html",
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        _ => "application/octet-stream",
    }
}

async fn handle_put<S>(
    reader: &mut BufReader<S>,
    head: &RequestHead,
    config: &ServerConfig,
) -> ServerResult<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let name = head.filename().to_string();
    if !config.is_allowed(&name) {
        warn!("Rejected PUT for {:?}", name);
        return respond(
            reader.get_mut(),
            403,
            "Forbidden",
            Some("text/plain"),
            &[],
            b"Not allowed",
        )
        .await;
    }

    let length = head
        .header("content-length")
        .and_then(|value| value.parse::<usize>().ok());
    let Some(length) = length.filter(|&len| len <= MAX_BODY_BYTES) else {
        return respond(
            reader.get_mut(),
            400,
            "Bad Request",
            Some("text/plain"),
            &[],
            b"Bad Content-Length",
        )
        .await;
    };

    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).await?;

    let temp_path = config.directory.join(format!(".{}.tmp", name));
    let final_path = config.directory.join(&name);
    tokio::fs::write(&temp_path, &body).await?;
    tokio::fs::rename(&temp_path, &final_path).await?;
    info!("Saved {} ({} bytes)", name, body.len());

    respond(reader.get_mut(), 200, "OK", Some("text/plain"), &[], b"OK").await
}

async fn handle_get<S>(
    reader: &mut BufReader<S>,
    head: &RequestHead,
    config: &ServerConfig,
) -> ServerResult<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let name = head.filename();
    if name.is_empty() {
        return respond(
            reader.get_mut(),
            404,
            "Not Found",
            Some("text/plain"),
            &[],
            b"Not found",
        )
        .await;
    }

    match tokio::fs::read(config.directory.join(name)).await {
        Ok(body) => {
            respond(
                reader.get_mut(),
                200,
                "OK",
                Some(content_type_for(name)),
                &[],
                &body,
            )
            .await
        }
        Err(_) => {
            respond(
                reader.get_mut(),
                404,
                "Not Found",
                Some("text/plain"),
                &[],
                b"Not found",
            )
            .await
        }
    }
}

/// Serve one HTTP request on an established byte stream.
pub async fn handle_connection<S>(stream: S, config: &ServerConfig) -> ServerResult<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(stream);

    let head = match read_head(&mut reader).await? {
        Head::Closed => return Ok(()),
        Head::Malformed => {
            return respond(
                reader.get_mut(),
                400,
                "Bad Request",
                Some("text/plain"),
                &[],
                b"Bad request",
            )
            .await;
        }
        Head::Parsed(head) => head,
    };

    match head.method.as_str() {
        "PUT" => handle_put(&mut reader, &head, config).await,
        "GET" => handle_get(&mut reader, &head, config).await,
        "OPTIONS" => {
            respond(
                reader.get_mut(),
                200,
                "OK",
                None,
                &[
                    ("Access-Control-Allow-Methods", "GET, PUT, OPTIONS"),
                    ("Access-Control-Allow-Headers", "Content-Type"),
                ],
                b"",
            )
            .await
        }
        _ => {
            respond(
                reader.get_mut(),
                405,
                "Method Not Allowed",
                Some("text/plain"),
                &[],
                b"Method not allowed",
            )
            .await
        }
    }
}

/// Accept loop for the file server. Runs until the listener fails.
pub async fn serve(config: Arc<ServerConfig>) -> ServerResult<()> {
    let listener = TcpListener::bind(("0.0.0.0", config.http_port)).await?;
    info!("HTTP listening on http://0.0.0.0:{}", config.http_port);
    loop {
        let (stream, addr) = listener.accept().await?;
        let config = Arc::clone(&config);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, &config).await {
                warn!("HTTP connection from {} failed: {}", addr, e);
            }
        });
    }
}
