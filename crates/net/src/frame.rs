//! Length-prefixed frame encoding/decoding
//!
//! Wire format: [4-byte big-endian length][JSON payload]
//! Maximum frame size: 4MB (sanity limit)

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{Error, Result};

/// Maximum allowed frame size (4MB)
pub const MAX_FRAME_SIZE: u32 = 4 * 1024 * 1024;

fn map_eof(e: std::io::Error) -> Error {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        Error::ConnectionClosed
    } else {
        Error::Io(e)
    }
}

/// Read a length-prefixed frame from a stream
pub async fn read_frame<R, T>(reader: &mut R) -> Result<T>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).await.map_err(map_eof)?;

    let len = u32::from_be_bytes(len_buf);

    if len == 0 || len > MAX_FRAME_SIZE {
        return Err(Error::FrameSize {
            len: len as usize,
            max: MAX_FRAME_SIZE,
        });
    }

    let mut payload = vec![0u8; len as usize];
    reader.read_exact(&mut payload).await.map_err(map_eof)?;

    serde_json::from_slice(&payload).map_err(|e| Error::Decode(e.to_string()))
}

/// Write a length-prefixed frame to a stream.
///
/// An oversized message is rejected before anything is written, so the
/// stream stays usable.
pub async fn write_frame<W, T>(writer: &mut W, msg: &T) -> Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let payload = serde_json::to_vec(msg)
        .map_err(|e| Error::Protocol(format!("Serialization failed: {}", e)))?;

    let len = u32::try_from(payload.len())
        .ok()
        .filter(|len| *len <= MAX_FRAME_SIZE)
        .ok_or(Error::FrameSize {
            len: payload.len(),
            max: MAX_FRAME_SIZE,
        })?;

    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(&payload).await?;
    writer.flush().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Request;
    use std::io::Cursor;

    #[tokio::test]
    async fn test_frame_roundtrip() {
        let mut buf = Vec::new();
        write_frame(&mut buf, &Request::Ping).await.unwrap();

        let mut cursor = Cursor::new(buf);
        let decoded: Request = read_frame(&mut cursor).await.unwrap();
        assert!(matches!(decoded, Request::Ping));
    }

    #[tokio::test]
    async fn test_empty_frame_rejected() {
        let mut cursor = Cursor::new(vec![0, 0, 0, 0]);
        let result: Result<Request> = read_frame(&mut cursor).await;
        assert!(matches!(result, Err(Error::FrameSize { .. })));
    }

    #[tokio::test]
    async fn test_oversized_frame_rejected() {
        let len = (MAX_FRAME_SIZE + 1).to_be_bytes();
        let mut cursor = Cursor::new(len.to_vec());
        let result: Result<Request> = read_frame(&mut cursor).await;
        assert!(matches!(result, Err(Error::FrameSize { .. })));
    }

    #[tokio::test]
    async fn test_oversized_write_leaves_stream_untouched() {
        let mut buf = Vec::new();
        let big = crate::protocol::Response::error("x", "a".repeat(MAX_FRAME_SIZE as usize));
        let result = write_frame(&mut buf, &big).await;
        assert!(matches!(result, Err(Error::FrameSize { .. })));
        assert!(buf.is_empty());
    }

    #[tokio::test]
    async fn test_truncated_frame_is_closed_connection() {
        let mut bytes = 10u32.to_be_bytes().to_vec();
        bytes.extend_from_slice(b"{\"ty");
        let mut cursor = Cursor::new(bytes);
        let result: Result<Request> = read_frame(&mut cursor).await;
        assert!(matches!(result, Err(Error::ConnectionClosed)));
    }

    #[tokio::test]
    async fn test_bad_json_is_decode_error() {
        let payload = b"not json";
        let mut bytes = (payload.len() as u32).to_be_bytes().to_vec();
        bytes.extend_from_slice(payload);
        let mut cursor = Cursor::new(bytes);
        let result: Result<Request> = read_frame(&mut cursor).await;
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
