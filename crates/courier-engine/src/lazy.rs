//! Guard against persisting elided ("lazy") model output.

/// Elision tokens that flag a comment line as incomplete output.
const ELISION_TOKENS: [&str; 2] = ["...", "same"];

/// True when any line of `content` is a `//` comment whose remainder,
/// trimmed and lower-cased, contains an elision token.
pub fn detect_lazy_output(content: &str) -> bool {
    content.lines().any(|line| {
        let trimmed = line.trim();
        if !trimmed.starts_with("//") {
            return false;
        }
        let comment = trimmed[2..].trim().to_lowercase();
        ELISION_TOKENS.iter().any(|token| comment.contains(token))
    })
}
