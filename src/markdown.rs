use pulldown_cmark::{html, Event, Options, Parser, Tag};

/// Renders model output (Markdown) to HTML for the summary view.
///
/// Raw HTML is escaped and links and images are reduced to their text, so the
/// result is safe to insert into the page.
pub fn render_summary_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let events = Parser::new_ext(markdown, options).filter_map(|event| match event {
        Event::Html(raw) => Some(Event::Text(raw)),
        Event::Start(Tag::Link(..) | Tag::Image(..)) | Event::End(Tag::Link(..) | Tag::Image(..)) => None,
        other => Some(other),
    });

    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, events);
    output
}
