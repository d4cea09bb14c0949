use futures::{AsyncRead, AsyncReadExt};
use tracing::info;
use uuid::Uuid;
use webk8s_common::drain_text;

use super::LogTarget;

#[cfg(test)]
#[path = "./session.tests.rs"]
mod session_tests;

const READ_BUFFER_SIZE: usize = 4_096;

/// Single log streaming session that reads the live feed chunk by chunk.
pub struct LogSession<R: AsyncRead + Unpin> {
    id: Uuid,
    target: LogTarget,
    feed: R,
    pending: Vec<u8>,
    is_open: bool,
}

impl<R: AsyncRead + Unpin> LogSession<R> {
    /// Creates new [`LogSession`] instance reading from the `feed`.
    pub fn new(target: LogTarget, feed: R) -> Self {
        Self {
            id: Uuid::new_v4(),
            target,
            feed,
            pending: Vec::with_capacity(READ_BUFFER_SIZE),
            is_open: true,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn target(&self) -> &LogTarget {
        &self.target
    }

    /// Returns `true` until the feed is exhausted or fails.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Waits for the next non-empty piece of text from the feed.\
    /// Returns `None` when the feed is exhausted, the session is closed after the first `None` or error.
    pub async fn next_chunk(&mut self) -> std::io::Result<Option<String>> {
        let mut buffer = [0u8; READ_BUFFER_SIZE];
        while self.is_open {
            let count = match self.feed.read(&mut buffer).await {
                Ok(count) => count,
                Err(err) => {
                    self.is_open = false;
                    return Err(err);
                },
            };

            if count == 0 {
                self.is_open = false;
                let text = drain_text(&mut self.pending, true);
                return Ok((!text.is_empty()).then_some(text));
            }

            self.pending.extend_from_slice(&buffer[..count]);
            let text = drain_text(&mut self.pending, false);
            if !text.is_empty() {
                return Ok(Some(text));
            }
        }

        Ok(None)
    }
}

impl<R: AsyncRead + Unpin> Drop for LogSession<R> {
    fn drop(&mut self) {
        info!("log session {} closed for {}", self.id, self.target);
    }
}
