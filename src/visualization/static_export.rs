//! Static raster export through the optional kaleido backend
//!
//! plotly figures rasterize through kaleido, a standalone renderer that
//! reads one JSON transform request per line on stdin and answers with a
//! JSON line carrying the base64-encoded image. The backend is optional:
//! when the executable is not installed the export fails with
//! [`StaticExportError::BackendUnavailable`] and callers downgrade that to
//! a warning, leaving the interactive document as the primary artifact.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

use crate::visualization::figure::Figure;

#[derive(Error, Debug)]
pub enum StaticExportError {
    #[error("kaleido backend not found; install kaleido and put it on PATH (or set KALEIDO_PATH)")]
    BackendUnavailable,

    #[error("kaleido transform failed: {0}")]
    TransformFailed(String),

    #[error("I/O error talking to kaleido: {0}")]
    Io(#[from] std::io::Error),
}

/// One answer line from the kaleido plotly scope.
#[derive(Debug, Deserialize)]
struct KaleidoResponse {
    code: i32,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    result: Option<String>,
}

/// Locate the kaleido executable: `KALEIDO_PATH` wins, then `PATH`.
fn find_backend() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("KALEIDO_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join("kaleido"))
        .find(|candidate| candidate.exists())
}

/// Render the figure to a PNG file at the given dimensions.
pub async fn write_png(
    figure: &Figure,
    path: &Path,
    width: u32,
    height: u32,
    scale: f64,
) -> Result<(), StaticExportError> {
    let backend = find_backend().ok_or(StaticExportError::BackendUnavailable)?;
    debug!("Using kaleido backend at {}", backend.display());

    let mut child = Command::new(&backend)
        .arg("plotly")
        .arg("--disable-gpu")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()?;

    let Some(mut stdin) = child.stdin.take() else {
        return Err(StaticExportError::TransformFailed(
            "could not open kaleido stdin".to_string(),
        ));
    };
    let Some(stdout) = child.stdout.take() else {
        return Err(StaticExportError::TransformFailed(
            "could not open kaleido stdout".to_string(),
        ));
    };

    let request = json!({
        "format": "png",
        "width": width,
        "height": height,
        "scale": scale,
        "data": figure,
    });
    let mut request_line = request.to_string();
    request_line.push('\n');
    stdin.write_all(request_line.as_bytes()).await?;
    stdin.flush().await?;

    // kaleido prints startup noise before the first transform answer; scan
    // lines until one parses as a response.
    let mut lines = BufReader::new(stdout).lines();
    let response = loop {
        let Some(line) = lines.next_line().await? else {
            let _ = child.kill().await;
            return Err(StaticExportError::TransformFailed(
                "kaleido closed its output stream".to_string(),
            ));
        };
        match serde_json::from_str::<KaleidoResponse>(&line) {
            Ok(parsed) if parsed.result.is_some() || parsed.code != 0 => break parsed,
            _ => continue,
        }
    };

    drop(stdin);
    let _ = child.kill().await;

    if response.code != 0 {
        return Err(StaticExportError::TransformFailed(
            response
                .message
                .unwrap_or_else(|| format!("kaleido error code {}", response.code)),
        ));
    }
    let Some(encoded) = response.result else {
        return Err(StaticExportError::TransformFailed(
            "kaleido returned no image data".to_string(),
        ));
    };

    let bytes = decode_base64(encoded.trim()).ok_or_else(|| {
        StaticExportError::TransformFailed("invalid base64 image payload".to_string())
    })?;
    tokio::fs::write(path, bytes).await?;

    info!(
        "Static map image saved to {} ({}x{} @ {}x)",
        path.display(),
        width,
        height,
        scale
    );
    Ok(())
}

/// Minimal standard-alphabet base64 decoder for the kaleido payload.
fn decode_base64(input: &str) -> Option<Vec<u8>> {
    fn sextet(byte: u8) -> Option<u32> {
        match byte {
            b'A'..=b'Z' => Some(u32::from(byte - b'A')),
            b'a'..=b'z' => Some(u32::from(byte - b'a') + 26),
            b'0'..=b'9' => Some(u32::from(byte - b'0') + 52),
            b'+' => Some(62),
            b'/' => Some(63),
            _ => None,
        }
    }

    let stripped: Vec<u8> = input
        .bytes()
        .filter(|byte| !byte.is_ascii_whitespace())
        .collect();

    let mut output = Vec::with_capacity(stripped.len() / 4 * 3);
    for chunk in stripped.chunks(4) {
        let mut acc = 0u32;
        let mut count = 0usize;
        for &byte in chunk {
            if byte == b'=' {
                break;
            }
            acc = (acc << 6) | sextet(byte)?;
            count += 1;
        }
        match count {
            4 => {
                output.push((acc >> 16) as u8);
                output.push((acc >> 8) as u8);
                output.push(acc as u8);
            }
            3 => {
                output.push((acc >> 10) as u8);
                output.push((acc >> 2) as u8);
            }
            2 => {
                output.push((acc >> 4) as u8);
            }
            _ => return None,
        }
    }
    Some(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_decoding_handles_all_padding_forms() {
        assert_eq!(decode_base64("TWFu").as_deref(), Some(b"Man".as_slice()));
        assert_eq!(decode_base64("TWE=").as_deref(), Some(b"Ma".as_slice()));
        assert_eq!(decode_base64("TQ==").as_deref(), Some(b"M".as_slice()));
        assert_eq!(decode_base64("").as_deref(), Some(b"".as_slice()));
    }

    #[test]
    fn base64_decoding_ignores_embedded_whitespace() {
        assert_eq!(
            decode_base64("TWFu\nTWFu").as_deref(),
            Some(b"ManMan".as_slice())
        );
    }

    #[test]
    fn invalid_base64_is_rejected() {
        assert_eq!(decode_base64("T!=="), None);
        assert_eq!(decode_base64("T"), None);
    }

    #[test]
    fn kaleido_error_lines_parse() {
        let response: KaleidoResponse =
            serde_json::from_str(r#"{"code": 530, "message": "render failed"}"#).unwrap();
        assert_eq!(response.code, 530);
        assert_eq!(response.message.as_deref(), Some("render failed"));
        assert!(response.result.is_none());
    }
}
