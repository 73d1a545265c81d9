/// The single-page interactive UI, served at `/`.
pub const INDEX_HTML: &str = include_str!("../../assets/index.html");
