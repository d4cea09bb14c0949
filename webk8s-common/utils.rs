use std::borrow::Cow;

#[cfg(test)]
#[path = "./utils.tests.rs"]
mod utils_tests;

/// Takes the longest decodable part of the `buffer` and returns it as text with normalized line endings.\
/// Bytes of an unfinished multi-byte character (and a trailing carriage return) stay in the buffer
/// waiting for the next chunk, unless `is_final` is set.\
/// **Note** that invalid UTF-8 sequences are replaced with `U+FFFD`.
pub fn drain_text(buffer: &mut Vec<u8>, is_final: bool) -> String {
    let end = if is_final { buffer.len() } else { complete_len(buffer) };
    if end == 0 {
        return String::new();
    }

    let text = normalize_line_endings(&String::from_utf8_lossy(&buffer[..end])).into_owned();
    buffer.drain(..end);

    text
}

/// Replaces `\r\n` and lone `\r` with `\n`.
pub fn normalize_line_endings(input: &str) -> Cow<'_, str> {
    if !input.contains('\r') {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len());
    let mut found_cr = false;
    for ch in input.chars() {
        if found_cr {
            found_cr = false;
            result.push('\n');
            if ch == '\n' {
                continue;
            }
        }

        match ch {
            '\r' => found_cr = true,
            other => result.push(other),
        }
    }

    if found_cr {
        result.push('\n');
    }

    Cow::Owned(result)
}

/// Returns length of the `buffer` part that does not end in the middle of a character or a line ending.
fn complete_len(buffer: &[u8]) -> usize {
    let mut end = buffer.len();
    let tail_start = end.saturating_sub(3);

    for i in (tail_start..end).rev() {
        let byte = buffer[i];
        if byte & 0b1100_0000 == 0b1000_0000 {
            continue;
        }

        let expected = match byte {
            b if b >= 0b1111_0000 => 4,
            b if b >= 0b1110_0000 => 3,
            b if b >= 0b1100_0000 => 2,
            _ => 1,
        };
        if i + expected > end {
            end = i;
        }

        break;
    }

    if end > 0 && buffer[end - 1] == b'\r' {
        end -= 1;
    }

    end
}
