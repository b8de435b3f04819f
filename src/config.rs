use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/api/result";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[derive(Parser, Debug)]
#[command(
    name = "result-viewer",
    version,
    about = "Clinical lab result viewer",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the viewer window (default)
    View(ViewArgs),
    /// Run only the fixture endpoint
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// Result endpoint to fetch on start
    #[arg(long, env = "RESULT_VIEWER_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Start the fixture endpoint on the endpoint's address before opening the window
    #[arg(long, env = "RESULT_VIEWER_WITH_FIXTURE", default_value_t = false)]
    pub with_fixture: bool,

    /// Device pixel ratio for PDF rasterization; the window scale factor when unset
    #[arg(long, env = "RESULT_VIEWER_PIXEL_RATIO")]
    pub pixel_ratio: Option<f32>,

    /// Directory containing the Pdfium shared library; the system library when unset
    #[arg(long, env = "PDFIUM_LIBRARY_PATH")]
    pub pdfium_library: Option<PathBuf>,

    /// Timeout for every HTTP request, in seconds
    #[arg(long, env = "RESULT_VIEWER_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, env = "RESULT_VIEWER_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,
}

impl ViewArgs {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn fixture_addr(&self) -> Option<SocketAddr> {
        let url = reqwest::Url::parse(&self.endpoint).ok()?;
        url.socket_addrs(|| None).ok()?.into_iter().next()
    }
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::View(self.view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_view() {
        let cli = Cli::try_parse_from(["result-viewer"]).unwrap();
        let Command::View(args) = cli.into_command() else {
            panic!("expected the viewer");
        };
        assert_eq!(args.endpoint, DEFAULT_ENDPOINT);
        assert!(!args.with_fixture);
        assert_eq!(args.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_view_flags() {
        let cli = Cli::try_parse_from([
            "result-viewer",
            "view",
            "--endpoint",
            "http://localhost:8080/api/result",
            "--with-fixture",
            "--pixel-ratio",
            "2",
        ])
        .unwrap();
        let Command::View(args) = cli.into_command() else {
            panic!("expected the viewer");
        };
        assert!(args.with_fixture);
        assert_eq!(args.pixel_ratio, Some(2.0));
        assert_eq!(args.fixture_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_top_level_flags_without_subcommand() {
        let cli = Cli::try_parse_from(["result-viewer", "--endpoint", "http://10.0.0.5:9000/r"])
            .unwrap();
        let Command::View(args) = cli.into_command() else {
            panic!("expected the viewer");
        };
        assert_eq!(args.endpoint, "http://10.0.0.5:9000/r");
    }

    #[test]
    fn test_flags_before_subcommand_are_rejected() {
        let parsed = Cli::try_parse_from([
            "result-viewer",
            "--endpoint",
            "http://10.0.0.5:9000/r",
            "view",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_serve_bind() {
        let cli = Cli::try_parse_from(["result-viewer", "serve", "--bind", "0.0.0.0:4000"]).unwrap();
        let Command::Serve(args) = cli.into_command() else {
            panic!("expected serve");
        };
        assert_eq!(args.bind.port(), 4000);
    }

    #[test]
    fn test_fixture_addr_of_default_endpoint() {
        let cli = Cli::try_parse_from(["result-viewer"]).unwrap();
        assert_eq!(
            cli.view.fixture_addr(),
            Some(DEFAULT_BIND.parse().unwrap())
        );
    }
}
