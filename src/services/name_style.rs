//! CamelCase to snake_case conversion for file basenames
//!
//! Follows the naming conventions of the rename plan: acronym runs stay
//! one word (`HTMLElement` -> `html_element`) and a handful of compound
//! tokens are kept intact rather than split at their inner capitals.

/// Compound tokens that would split wrong under the general rules
const SPECIAL_TOKENS: &[&str] = &["IFrame", "JavaScript", "WebGL", "WebSocket"];

fn match_special(rest: &[char]) -> Option<&'static str> {
    SPECIAL_TOKENS.iter().copied().find(|token| {
        let token_chars: Vec<char> = token.chars().collect();
        rest.len() >= token_chars.len()
            && rest[..token_chars.len()] == token_chars[..]
            // The token must end a word: next char may not be lowercase
            && rest.get(token_chars.len()).is_none_or(|c| !c.is_ascii_lowercase())
    })
}

/// Convert a CamelCase name to lowercase words separated by underscores
#[must_use]
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let n = chars.len();
    let mut words: Vec<String> = Vec::new();
    let mut i = 0;

    while i < n {
        if chars[i] == '_' || chars[i] == '-' {
            i += 1;
            continue;
        }

        if let Some(token) = match_special(&chars[i..]) {
            let mut word = token.to_ascii_lowercase();
            i += token.chars().count();
            // Trailing digits belong to the token (WebGL2 -> webgl2)
            while i < n && chars[i].is_ascii_digit() {
                word.push(chars[i]);
                i += 1;
            }
            words.push(word);
            continue;
        }

        let start = i;
        if chars[i].is_ascii_uppercase() {
            i += 1;
            if i < n && chars[i].is_ascii_uppercase() {
                // Acronym run; a trailing uppercase followed by lowercase
                // starts the next word (HTMLElement -> HTML + Element)
                while i < n && chars[i].is_ascii_uppercase() {
                    i += 1;
                }
                if i < n && chars[i].is_ascii_lowercase() {
                    i -= 1;
                } else {
                    while i < n && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            } else {
                while i < n && (chars[i].is_ascii_lowercase() || chars[i].is_ascii_digit()) {
                    i += 1;
                }
            }
        } else {
            while i < n && (chars[i].is_ascii_lowercase() || chars[i].is_ascii_digit()) {
                i += 1;
            }
        }
        words.push(chars[start..i].iter().collect::<String>().to_ascii_lowercase());
    }

    words.join("_")
}
