//! Sanitizes raw OCR output for embedding inside a `<details>` span.

/// Make raw recognized text safe to splice into note markup.
///
/// Line-oriented: each line is trimmed, ordered-list markers (`1. `, `1) `)
/// lose the space the renderer keys on, angle brackets become entities, and
/// bullet markers (`* `, `- `) are removed. Lines left empty are dropped and
/// survivors are joined with `\n`.
///
/// The digit-marker rewrite runs before entity escaping; entity text never
/// introduces new brackets, so the order is safe. Total: every input maps to
/// some output, there is no failure case.
pub fn sanitize(raw: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in raw.lines() {
        let mut line = line.trim().to_string();
        for digit in '0'..='9' {
            line = line.replace(&format!("{digit}. "), &format!("{digit}."));
            line = line.replace(&format!("{digit}) "), &format!("{digit})"));
        }
        line = line.replace('<', "&lt;").replace('>', "&gt;");
        line = line.replace("* ", "").replace("- ", "");
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines.join("\n")
}
