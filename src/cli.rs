use clap::Parser;

/// Summarize a document from a given URL.
#[derive(Parser, Debug)]
#[command(name = "web-summarizer", version, about = "Summarize a document from a given URL.")]
pub struct Cli {
    /// URL of the document to summarize
    #[arg(short, long)]
    pub url: String,
}

/// Console rendering of a finished summary.
pub fn render_console(summary: &str) -> String {
    format!("\n🧠 SUMMARY:\n\n{}\n", summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_url_flag() {
        let cli = Cli::try_parse_from(["web-summarizer", "-u", "https://example.com"]).unwrap();
        assert_eq!(cli.url, "https://example.com");

        let cli = Cli::try_parse_from(["web-summarizer", "--url", "https://rust-lang.org"]).unwrap();
        assert_eq!(cli.url, "https://rust-lang.org");
    }

    #[test]
    fn url_flag_is_required() {
        let err = Cli::try_parse_from(["web-summarizer"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["web-summarizer", "-u", "x", "--model", "y"]).is_err());
    }

    #[test]
    fn console_output_has_banner_then_summary() {
        assert_eq!(render_console("Short."), "\n🧠 SUMMARY:\n\nShort.\n");
    }
}
