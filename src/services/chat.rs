//! Placeholder conversation partner: repeats the topic back to the user.

/// How many words of the user's message are echoed.
const ECHO_WORDS: usize = 5;

pub fn echo_reply(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().take(ECHO_WORDS).collect();
    format!(
        "Entendi que você falou sobre: {}. Quer falar mais sobre isso?",
        words.join(", ")
    )
}
