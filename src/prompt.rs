use std::borrow::Cow;

/// Instructions wrapped around the document text before it is sent to the model.
pub const SUMMARY_TEMPLATE: PromptTemplate = PromptTemplate {
    template: "You are a professional summarizer. Create a detailed and clear summary of the text below:\n\n{text}\n\nDetailed Summary:",
    input_variable: "text",
};

/// A fixed template with a single `{name}` placeholder.
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    pub template: &'static str,
    pub input_variable: &'static str,
}

impl PromptTemplate {
    /// Substitutes `value` verbatim for the placeholder.
    pub fn format(&self, value: &str) -> String {
        let placeholder = format!("{{{}}}", self.input_variable);
        let Some((head, tail)) = self.template.split_once(&placeholder) else {
            return self.template.to_string();
        };

        let mut result = String::with_capacity(self.template.len() + value.len());
        result.push_str(head);
        result.push_str(value);
        result.push_str(tail);
        result
    }
}

/// Caps `text` at `max_chars` characters; `0` means no limit.
///
/// The cut prefers the last whitespace within the final tenth of the window so
/// words are not split. The flag reports whether anything was dropped.
pub fn truncate_to_limit(text: &str, max_chars: usize) -> (Cow<'_, str>, bool) {
    if max_chars == 0 {
        return (Cow::Borrowed(text), false);
    }

    let Some((cut, _)) = text.char_indices().nth(max_chars) else {
        return (Cow::Borrowed(text), false);
    };

    let window = &text[..cut];
    // Windows too small to have a final tenth are cut hard.
    let min_cut = window
        .char_indices()
        .nth(max_chars - max_chars / 10)
        .map_or(cut, |(idx, _)| idx);
    let end = match window.rfind(char::is_whitespace) {
        Some(idx) if idx >= min_cut => idx,
        _ => cut,
    };

    (Cow::Owned(window[..end].trim_end().to_string()), true)
}
