/// Longest text Telegram accepts in a single message.
pub const TELEGRAM_MAX_MESSAGE_CHARS: usize = 4096;

/// Splits `text` into chunks of at most `max_chars` characters, breaking
/// between lines. A single line longer than the limit is cut at the limit.
/// Blank chunks are dropped since Telegram rejects empty messages.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current: Option<String> = None;
    let mut current_len = 0;

    for line in text.split('\n') {
        let line_len = line.chars().count();

        if let Some(chunk) = current.as_mut() {
            if current_len + 1 + line_len <= max_chars {
                chunk.push('\n');
                chunk.push_str(line);
                current_len += 1 + line_len;
                continue;
            }
            chunks.extend(current.take());
        }

        if line_len <= max_chars {
            current = Some(line.to_string());
            current_len = line_len;
            continue;
        }

        let chars: Vec<char> = line.chars().collect();
        let mut pieces = chars.chunks(max_chars).peekable();
        while let Some(piece) = pieces.next() {
            let piece: String = piece.iter().collect();
            if pieces.peek().is_some() {
                chunks.push(piece);
            } else {
                current_len = piece.chars().count();
                current = Some(piece);
            }
        }
    }

    chunks.extend(current);
    chunks.retain(|chunk| !chunk.trim().is_empty());
    chunks
}
