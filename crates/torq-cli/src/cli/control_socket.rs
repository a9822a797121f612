//! Control socket: server (during `torq run`) and client (for commands
//! aimed at a live daemon).
//!
//! Protocol: one JSON [`Command`] per line, answered by one JSON
//! [`Response`] line. Commands are validated by serde at this boundary;
//! nothing untyped travels further in.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use torq_core::api::{Api, Command, Response};

/// Spawns a task that serves commands on `path`, dispatching each to the
/// daemon's [`Api`] and writing the outcome back to the requesting client.
pub fn spawn_control_listener(api: Arc<Api>, path: impl AsRef<Path>) -> Result<tokio::task::JoinHandle<()>> {
    let path = path.as_ref().to_path_buf();
    let handle = tokio::spawn(async move {
        let _ = std::fs::remove_file(&path);
        let listener = match UnixListener::bind(&path) {
            Ok(l) => l,
            Err(e) => {
                tracing::warn!(path = %path.display(), "control socket bind: {}", e);
                return;
            }
        };
        loop {
            match listener.accept().await {
                Ok((stream, _)) => {
                    let api = Arc::clone(&api);
                    tokio::spawn(serve_client(api, stream));
                }
                Err(e) => tracing::debug!("control socket accept: {}", e),
            }
        }
    });
    Ok(handle)
}

async fn serve_client(api: Arc<Api>, stream: UnixStream) {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half).lines();
    while let Ok(Some(line)) = reader.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<Command>(line) {
            Ok(command) => match api.dispatch(command).await {
                Ok(()) => Response::ok(),
                Err(err) => Response::err(err),
            },
            Err(err) => Response::err(format!("malformed command: {err}")),
        };
        let mut payload = match serde_json::to_string(&response) {
            Ok(json) => json,
            Err(_) => r#"{"ok":false,"error":"encode failure"}"#.to_string(),
        };
        payload.push('\n');
        if write_half.write_all(payload.as_bytes()).await.is_err() {
            return;
        }
    }
}

/// Send one command to a running daemon. Returns None when no daemon is
/// listening, so callers can fall back to direct store writes.
pub async fn send_command(path: &Path, command: &Command) -> Result<Option<Response>> {
    if !path.exists() {
        return Ok(None);
    }
    let Ok(mut stream) = UnixStream::connect(path).await else {
        return Ok(None);
    };
    let mut payload = serde_json::to_string(command)?;
    payload.push('\n');
    stream.write_all(payload.as_bytes()).await?;

    let (read_half, _write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half).lines();
    let Some(line) = reader.next_line().await? else {
        return Ok(None);
    };
    let response: Response = serde_json::from_str(&line)?;
    Ok(Some(response))
}

/// Default socket path, shared with the daemon side.
pub fn socket_path() -> Result<PathBuf> {
    torq_core::control::default_control_socket_path()
}
