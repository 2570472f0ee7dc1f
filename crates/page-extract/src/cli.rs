use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "page-extract",
    version,
    about = "Extract GIF metadata embedded in a saved GIF page",
    after_help = "Examples:\n  page-extract page.html\n  page-extract page.html username\n  page-extract page.html images.gif\n  page-extract page.html tags"
)]
pub struct Args {
    /// Saved HTML page
    pub html: PathBuf,

    /// Dot-separated field to print instead of the whole record (e.g. `images.gif`)
    pub field: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_path_and_optional_field() {
        let args = Args::try_parse_from(["page-extract", "page.html"]).unwrap();
        assert_eq!(args.html, PathBuf::from("page.html"));
        assert_eq!(args.field, None);

        let args = Args::try_parse_from(["page-extract", "page.html", "images.gif"]).unwrap();
        assert_eq!(args.field.as_deref(), Some("images.gif"));
    }

    #[test]
    fn version_is_the_package_version() {
        let err = Args::try_parse_from(["page-extract", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
        assert!(err.to_string().contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn requires_html_path() {
        assert!(Args::try_parse_from(["page-extract"]).is_err());
    }
}
