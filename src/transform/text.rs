/// Collapses the API's hard line breaks (`\n` and form feeds) into spaces.
pub fn clean_flavor_text(raw: &str) -> String {
    raw.replace(['\n', '\x0c'], " ")
}

/// Greedy word wrap. Words are never split: a word wider than `width` sits on
/// a line of its own. Lines are joined with `\n`, without a trailing newline.
pub fn wrap_text(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

/// Upper-cases the first character only: `"ho-oh"` becomes `"Ho-oh"`.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
