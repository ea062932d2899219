/// Step boundaries, strongest first. At any position the first matching
/// delimiter wins, so `\r\n\r\n` is consumed as one boundary.
const STEP_DELIMITERS: [&str; 3] = ["\r\n\r\n", "\n\n", "\r\n"];

/// Split free-form instruction text into trimmed, non-empty steps.
///
/// Absent or empty text yields no steps. Text without any delimiter yields a
/// single step.
pub fn segment(text: Option<&str>) -> Vec<String> {
    let text = match text {
        Some(text) if !text.is_empty() => text,
        _ => return Vec::new(),
    };

    split_steps(text)
        .into_iter()
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(String::from)
        .collect()
}

fn split_steps(text: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut start = 0;
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        match STEP_DELIMITERS.iter().find(|d| rest.starts_with(**d)) {
            Some(delimiter) => {
                fragments.push(&text[start..pos]);
                pos += delimiter.len();
                start = pos;
            }
            None => {
                // advance one char, staying on a UTF-8 boundary
                pos += rest.chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    fragments.push(&text[start..]);

    fragments
}
