use futures::TryStreamExt;
use futures::io::Cursor;
use futures::stream;
use std::io::{Error, ErrorKind};
use std::time::Duration;

use super::*;

fn target() -> LogTarget {
    LogTarget {
        namespace: "shop".to_owned(),
        pod: "web".to_owned(),
        container: None,
    }
}

fn feed(chunks: Vec<&'static [u8]>) -> impl AsyncRead + Unpin {
    stream::iter(chunks.into_iter().map(Ok::<_, Error>)).into_async_read()
}

async fn collect<R: AsyncRead + Unpin>(session: &mut LogSession<R>) -> Vec<String> {
    let mut result = Vec::new();
    while let Some(text) = session.next_chunk().await.unwrap() {
        result.push(text);
    }

    result
}

#[tokio::test]
async fn chunks_keep_feed_order_test() {
    let mut session = LogSession::new(target(), feed(vec![&b"first\n"[..], &b"second "[..], &b"third\n"[..]]));

    assert_eq!(vec!["first\n", "second ", "third\n"], collect(&mut session).await);
    assert!(!session.is_open());
}

#[tokio::test]
async fn split_character_is_not_broken_test() {
    let mut session = LogSession::new(target(), feed(vec![&b"price: \xE2\x82"[..], &b"\xAC 5\r"[..], &b"\nend"[..]]));

    assert_eq!(vec!["price: ", "\u{20AC} 5", "\nend"], collect(&mut session).await);
}

#[tokio::test]
async fn pending_bytes_are_flushed_at_end_test() {
    let mut session = LogSession::new(target(), feed(vec![&b"done\r"[..]]));

    assert_eq!(vec!["done", "\n"], collect(&mut session).await);
}

#[tokio::test]
async fn large_feed_is_read_in_chunks_test() {
    let data = vec![b'x'; READ_BUFFER_SIZE * 2 + 10];
    let mut session = LogSession::new(target(), Cursor::new(data));

    let chunks = collect(&mut session).await;

    assert_eq!(3, chunks.len());
    assert_eq!(READ_BUFFER_SIZE * 2 + 10, chunks.iter().map(String::len).sum::<usize>());
}

#[tokio::test]
async fn read_error_closes_session_test() {
    let items = vec![Ok(b"line\n".as_slice()), Err(Error::new(ErrorKind::ConnectionReset, "reset"))];
    let mut session = LogSession::new(target(), stream::iter(items).into_async_read());

    assert_eq!(Some("line\n".to_owned()), session.next_chunk().await.unwrap());
    assert!(session.next_chunk().await.is_err());
    assert!(!session.is_open());
    assert_eq!(None, session.next_chunk().await.unwrap());
}

#[tokio::test]
async fn idle_feed_keeps_session_open_test() {
    let items = stream::unfold(0, |step| async move {
        match step {
            0 => {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Some((Ok::<_, Error>(&b"after pause\n"[..]), 1))
            },
            1 => Some((Err(Error::new(ErrorKind::TimedOut, "idle")), 2)),
            _ => None,
        }
    });
    let mut session = LogSession::new(target(), Box::pin(items).into_async_read());

    assert_eq!(Some("after pause\n".to_owned()), session.next_chunk().await.unwrap());
    assert!(session.is_open());
    assert_eq!(ErrorKind::TimedOut, session.next_chunk().await.unwrap_err().kind());
    assert!(!session.is_open());
}
