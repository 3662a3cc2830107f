// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Newline-delimited JSON stream decoding for streamed chat responses.
//!
//! Converts a reqwest response byte stream into [`ChatChunk`]s. Network
//! reads may split or merge lines arbitrarily, so bytes are buffered until
//! a full line is available.

use std::time::Duration;

use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream, StreamExt};
use llm_router_core::{ChatChunk, ChunkStream, RouterError};
use tracing::{debug, warn};

use crate::client::map_reqwest_error;
use crate::types::StreamLine;

/// Longest accepted NDJSON line. Ollama lines carry one token each.
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

/// Incremental line splitter over a byte buffer.
///
/// Bytes already searched for a newline are not searched again, so a line
/// arriving in many small reads is scanned once.
#[derive(Debug)]
pub struct NdjsonDecoder {
    buf: BytesMut,
    /// Prefix of `buf` known to contain no newline.
    scanned: usize,
    max_line_len: usize,
}

impl Default for NdjsonDecoder {
    fn default() -> Self {
        Self::with_max_line_len(MAX_LINE_BYTES)
    }
}

impl NdjsonDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A decoder that rejects lines longer than `max_line_len` bytes.
    pub fn with_max_line_len(max_line_len: usize) -> Self {
        Self {
            buf: BytesMut::new(),
            scanned: 0,
            max_line_len,
        }
    }

    /// Appends raw bytes read from the network.
    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Returns the next complete, non-blank line without its terminator.
    ///
    /// Fails with [`RouterError::MalformedResponse`] once a line grows past
    /// the length limit, terminated or not.
    pub fn next_line(&mut self) -> Result<Option<Bytes>, RouterError> {
        loop {
            let Some(offset) = self.buf[self.scanned..].iter().position(|b| *b == b'\n') else {
                self.scanned = self.buf.len();
                if self.buf.len() > self.max_line_len {
                    return Err(self.line_too_long());
                }
                return Ok(None);
            };
            let pos = self.scanned + offset;
            self.scanned = 0;
            if pos > self.max_line_len {
                return Err(self.line_too_long());
            }

            let mut line = self.buf.split_to(pos + 1);
            line.truncate(pos);
            if line.last() == Some(&b'\r') {
                line.truncate(pos - 1);
            }
            if !line.iter().all(u8::is_ascii_whitespace) {
                return Ok(Some(line.freeze()));
            }
        }
    }

    /// Returns whatever is left once the body has ended, if it is not blank.
    pub fn finish(&mut self) -> Option<Bytes> {
        self.scanned = 0;
        let rest = self.buf.split();
        if rest.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            Some(rest.freeze())
        }
    }

    fn line_too_long(&self) -> RouterError {
        RouterError::MalformedResponse {
            message: format!("stream line exceeds {} bytes", self.max_line_len),
            source: None,
        }
    }
}

/// Parses one NDJSON line into a chunk.
///
/// An in-band `{"error": ...}` object becomes [`RouterError::Backend`]
/// without a status, since the HTTP status was already 200.
pub fn parse_line(line: &[u8]) -> Result<ChatChunk, RouterError> {
    match serde_json::from_slice::<StreamLine>(line) {
        Ok(StreamLine::Chunk(resp)) => Ok(resp.into_chunk()),
        Ok(StreamLine::Error(err)) => Err(RouterError::Backend {
            status: None,
            message: err.error,
        }),
        Err(e) => Err(RouterError::MalformedResponse {
            message: format!("invalid stream line: {e}"),
            source: Some(Box::new(e)),
        }),
    }
}

struct DecodeState {
    body: BoxStream<'static, reqwest::Result<Bytes>>,
    decoder: NdjsonDecoder,
    timeout: Option<Duration>,
    eof: bool,
    finished: bool,
}

/// Wraps a streaming `/api/chat` response as a [`ChunkStream`].
///
/// The stream ends after the chunk with `done == true`, or after the first
/// error. A body that ends before the final chunk yields
/// [`RouterError::MalformedResponse`].
pub fn chunk_stream(response: reqwest::Response, timeout: Option<Duration>) -> ChunkStream {
    let state = DecodeState {
        body: response.bytes_stream().boxed(),
        decoder: NdjsonDecoder::new(),
        timeout,
        eof: false,
        finished: false,
    };

    let chunks = stream::unfold(state, |mut st| async move {
        if st.finished {
            return None;
        }
        loop {
            let next = match st.decoder.next_line() {
                Ok(next) => next,
                Err(e) => {
                    warn!(error = %e, "stream terminated by error");
                    st.finished = true;
                    return Some((Err(e), st));
                }
            };
            if let Some(line) = next {
                let item = parse_line(&line);
                match &item {
                    Ok(chunk) if chunk.done => {
                        debug!(done_reason = ?chunk.done_reason, "stream complete");
                        st.finished = true;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!(error = %e, "stream terminated by error");
                        st.finished = true;
                    }
                }
                return Some((item, st));
            }

            if st.eof {
                st.finished = true;
                return Some((
                    Err(RouterError::MalformedResponse {
                        message: "stream ended before the final chunk".to_string(),
                        source: None,
                    }),
                    st,
                ));
            }

            match st.body.next().await {
                Some(Ok(bytes)) => st.decoder.push(&bytes),
                Some(Err(e)) => {
                    st.finished = true;
                    let err = map_reqwest_error(e, st.timeout);
                    return Some((Err(err), st));
                }
                None => {
                    // Flush a trailing line that lacks a newline.
                    st.eof = true;
                    if let Some(rest) = st.decoder.finish() {
                        st.decoder.push(&rest);
                        st.decoder.push(b"\n");
                    }
                }
            }
        }
    });

    Box::pin(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn decoder_splits_lines_across_pushes() {
        let mut d = NdjsonDecoder::new();
        d.push(b"{\"a\":1}\n{\"b\"");
        assert_eq!(d.next_line().unwrap().as_deref(), Some(&b"{\"a\":1}"[..]));
        assert!(d.next_line().unwrap().is_none());
        d.push(b":2}\r\n\n");
        assert_eq!(d.next_line().unwrap().as_deref(), Some(&b"{\"b\":2}"[..]));
        assert!(d.next_line().unwrap().is_none());
        assert!(d.finish().is_none());
    }

    #[test]
    fn decoder_returns_unterminated_tail() {
        let mut d = NdjsonDecoder::new();
        d.push(b"{\"done\":true}");
        assert!(d.next_line().unwrap().is_none());
        assert_eq!(d.finish().as_deref(), Some(&b"{\"done\":true}"[..]));
    }

    #[test]
    fn decoder_resumes_scan_where_it_stopped() {
        let mut d = NdjsonDecoder::new();
        for piece in [&b"{\"content\":"[..], b"\"one ", b"token\"}"] {
            d.push(piece);
            assert!(d.next_line().unwrap().is_none());
        }
        assert_eq!(d.scanned, 23);
        d.push(b"\n{\"x\":1}\n");
        assert_eq!(d.next_line().unwrap().as_deref(), Some(&b"{\"content\":\"one token\"}"[..]));
        assert_eq!(d.next_line().unwrap().as_deref(), Some(&b"{\"x\":1}"[..]));
        assert_eq!(d.scanned, 0);
    }

    #[test]
    fn decoder_rejects_overlong_unterminated_line() {
        let mut d = NdjsonDecoder::with_max_line_len(8);
        d.push(b"12345678");
        assert!(d.next_line().unwrap().is_none());
        d.push(b"9");
        assert!(matches!(
            d.next_line(),
            Err(RouterError::MalformedResponse { ref message, .. }) if message.contains("8 bytes")
        ));
    }

    #[test]
    fn decoder_rejects_overlong_terminated_line() {
        let mut d = NdjsonDecoder::with_max_line_len(4);
        d.push(b"ok\n123456\n");
        assert_eq!(d.next_line().unwrap().as_deref(), Some(&b"ok"[..]));
        assert!(d.next_line().is_err());
    }

    #[test]
    fn parse_line_maps_in_band_error() {
        let err = parse_line(br#"{"error":"out of memory"}"#).unwrap_err();
        assert!(matches!(err, RouterError::Backend { status: None, ref message } if message == "out of memory"));
    }

    #[test]
    fn parse_line_rejects_garbage() {
        let err = parse_line(b"not json").unwrap_err();
        assert!(matches!(err, RouterError::MalformedResponse { .. }));
    }

    /// Serves `body` from a wiremock server and returns the live response.
    async fn mock_ndjson_response(body: &str) -> reqwest::Response {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/x-ndjson")
                    .set_body_string(body.to_string()),
            )
            .mount(&server)
            .await;
        reqwest::get(&server.uri()).await.unwrap()
    }

    async fn collect(body: &str) -> Vec<Result<ChatChunk, RouterError>> {
        let response = mock_ndjson_response(body).await;
        chunk_stream(response, None).collect().await
    }

    #[tokio::test]
    async fn stream_yields_chunks_in_order_then_stops() {
        let body = concat!(
            "{\"model\":\"m\",\"message\":{\"role\":\"assistant\",\"content\":\"Hel\"},\"done\":false}\n",
            "{\"model\":\"m\",\"message\":{\"role\":\"assistant\",\"content\":\"lo\"},\"done\":false}\n",
            "{\"model\":\"m\",\"message\":{\"role\":\"assistant\",\"content\":\"\"},\"done\":true,\"done_reason\":\"stop\",\"eval_count\":2}\n",
            "{\"model\":\"m\",\"message\":{\"role\":\"assistant\",\"content\":\"ignored\"},\"done\":false}\n",
        );
        let items = collect(body).await;
        assert_eq!(items.len(), 3);
        let text: String = items
            .iter()
            .map(|c| c.as_ref().unwrap().content.as_str())
            .collect();
        assert_eq!(text, "Hello");
        assert!(items[2].as_ref().unwrap().done);
    }

    #[tokio::test]
    async fn stream_accepts_final_line_without_newline() {
        let body = "{\"model\":\"m\",\"message\":{\"content\":\"ok\"},\"done\":true}";
        let items = collect(body).await;
        assert_eq!(items.len(), 1);
        assert!(items[0].as_ref().unwrap().done);
    }

    #[tokio::test]
    async fn truncated_stream_is_malformed() {
        let body = "{\"model\":\"m\",\"message\":{\"content\":\"partial\"},\"done\":false}\n";
        let items = collect(body).await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().unwrap().content, "partial");
        assert!(matches!(
            items[1],
            Err(RouterError::MalformedResponse { .. })
        ));
    }

    #[tokio::test]
    async fn in_band_error_ends_stream() {
        let body = concat!(
            "{\"model\":\"m\",\"message\":{\"content\":\"a\"},\"done\":false}\n",
            "{\"error\":\"model crashed\"}\n",
            "{\"model\":\"m\",\"message\":{\"content\":\"b\"},\"done\":false}\n",
        );
        let items = collect(body).await;
        assert_eq!(items.len(), 2);
        assert!(matches!(items[1], Err(RouterError::Backend { status: None, .. })));
    }
}
