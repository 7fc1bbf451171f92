//! Dictionary lookup placeholder.
//!
//! No dictionary backend is wired in yet; the reply only echoes the word
//! with a marker saying the lookup is missing.

pub fn lookup_placeholder(word: &str) -> String {
    format!("Definição de {word}: [Implementar busca em API de dicionário]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_echoes_word() {
        let reply = lookup_placeholder("casa");
        assert_eq!(reply, "Definição de casa: [Implementar busca em API de dicionário]");
    }
}
