use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::{LevelFilter, Log, Metadata, Record};
use sort_html_attr::{run_command, Settings, SettingsError, StringBuffer};

/// Sorts the attributes of HTML and XML start tags.
#[derive(Parser, Debug)]
#[command(name = "sort-html-attr", author, version, about)]
pub struct Cli {
    /// Settings file, in the same JSON format as the editor settings
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Comma-separated attribute order, e.g. `id,class,*`; overrides the settings file
    #[arg(short, long, value_delimiter = ',')]
    pub priority: Option<Vec<String>>,

    /// Keep the whitespace between attributes
    #[arg(long, action = ArgAction::SetTrue)]
    pub preserve_whitespace: bool,

    /// Syntax name checked against `allowed_syntaxes` (default: HTML or XML
    /// for known markup extensions, the upper-cased extension otherwise, HTML
    /// when reading stdin)
    #[arg(long)]
    pub syntax: Option<String>,

    /// Overwrite the input file
    #[arg(short, long, action = ArgAction::SetTrue, requires = "input", conflicts_with = "output")]
    pub in_place: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write nothing; exit with status 1 when any start tag is out of order
    #[arg(long, action = ArgAction::SetTrue)]
    pub check: bool,

    /// Log to stderr; repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Input file (default: stdin)
    pub input: Option<PathBuf>,
}

#[derive(Debug)]
pub enum CliError {
    Settings(SettingsError),
    Io(io::Error),
}

impl std::error::Error for CliError {}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Settings(e) => write!(f, "{e}"),
            CliError::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(e: SettingsError) -> Self {
        CliError::Settings(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    Changed,
}

impl Cli {
    /// The settings file, if any, with command line overrides applied.
    pub fn resolve_settings(&self) -> Result<Settings, SettingsError> {
        let mut settings = match &self.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if let Some(priority) = &self.priority {
            settings.priority = priority.clone();
        }
        if self.preserve_whitespace {
            settings.preserve_white_space = true;
        }

        Ok(settings)
    }

    pub fn syntax_name(&self) -> String {
        if let Some(syntax) = &self.syntax {
            return syntax.clone();
        }

        match self.input.as_ref().and_then(|input| input.extension()) {
            Some(extension) => syntax_for_extension(&extension.to_string_lossy()),
            None => "HTML".to_string(),
        }
    }
}

/// Maps a file extension to the syntax name an editor would report.
fn syntax_for_extension(extension: &str) -> String {
    let extension = extension.to_ascii_uppercase();
    match extension.as_str() {
        "HTM" | "XHTM" | "XHTML" | "SHTML" => "HTML".to_string(),
        "SVG" | "XSL" | "XSLT" | "XSD" | "RSS" | "ATOM" => "XML".to_string(),
        _ => extension,
    }
}

pub fn run(cli: &Cli) -> Result<Outcome, CliError> {
    let settings = cli.resolve_settings()?;

    let html = match &cli.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut html = String::new();
            io::stdin().read_to_string(&mut html)?;
            html
        }
    };

    let syntax = cli.syntax_name();
    if cli.syntax.is_none() && !settings.is_syntax_allowed(&syntax) {
        let source = match &cli.input {
            Some(input) => input.display().to_string(),
            None => "stdin".to_string(),
        };
        log::warn!(
            target: "sort_html_attr.cli",
            "skipping {source}: syntax {syntax:?} is not in allowed_syntaxes {:?}, pass --syntax to override",
            settings.allowed_syntaxes
        );
    }

    let mut buffer = StringBuffer::new(syntax, html);
    let rewritten = run_command(&mut buffer, &settings);
    let outcome = if rewritten > 0 {
        Outcome::Changed
    } else {
        Outcome::Unchanged
    };

    if cli.check {
        return Ok(outcome);
    }

    let sorted = buffer.into_text();
    match (&cli.input, &cli.output) {
        (Some(input), _) if cli.in_place => {
            if outcome == Outcome::Changed {
                fs::write(input, sorted)?;
            }
        }
        (_, Some(output)) => fs::write(output, sorted)?,
        _ => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            writer.write_all(sorted.as_bytes())?;
            writer.flush()?;
        }
    }

    Ok(outcome)
}

struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Sends log records to stderr: warnings by default, `-v` for debug and
/// `-vv` for trace.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    if log::set_logger(Box::leak(Box::new(StderrLogger { level }))).is_ok() {
        log::set_max_level(level);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::ffi::OsStr;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sort-html-attr-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_priority_override() {
        let cli = Cli::try_parse_from(["sort-html-attr", "-p", "id,class,*", "--preserve-whitespace"])
            .unwrap();
        let settings = cli.resolve_settings().unwrap();
        assert_eq!(settings.priority, ["id", "class", "*"]);
        assert!(settings.preserve_white_space);
    }

    #[test]
    fn test_syntax_name() {
        let cli = Cli::try_parse_from(["sort-html-attr", "page.xml"]).unwrap();
        assert_eq!(cli.syntax_name(), "XML");

        let cli = Cli::try_parse_from(["sort-html-attr"]).unwrap();
        assert_eq!(cli.syntax_name(), "HTML");

        let cli = Cli::try_parse_from(["sort-html-attr", "--syntax", "Vue", "a.vue"]).unwrap();
        assert_eq!(cli.syntax_name(), "Vue");

        let cli = Cli::try_parse_from(["sort-html-attr", "a.vue"]).unwrap();
        assert_eq!(cli.syntax_name(), "VUE");
    }

    #[test]
    fn test_markup_extensions() {
        for (file, syntax) in [
            ("page.htm", "HTML"),
            ("page.XHTML", "HTML"),
            ("icon.svg", "XML"),
            ("style.xsl", "XML"),
            ("schema.xsd", "XML"),
        ] {
            let cli = Cli::try_parse_from(["sort-html-attr", file]).unwrap();
            assert_eq!(cli.syntax_name(), syntax, "{file}");
            assert!(cli.resolve_settings().unwrap().is_syntax_allowed(&cli.syntax_name()));
        }
    }

    #[test]
    fn test_check_htm_file() {
        let input_path = temp_path("page.htm");
        fs::write(&input_path, "<p class=a id=b>").unwrap();

        let cli = Cli::try_parse_from([
            OsStr::new("sort-html-attr"),
            OsStr::new("--check"),
            input_path.as_os_str(),
        ])
        .unwrap();
        assert_eq!(run(&cli).unwrap(), Outcome::Changed);

        fs::remove_file(input_path).unwrap();
    }

    #[test]
    fn test_in_place_requires_input() {
        assert!(Cli::try_parse_from(["sort-html-attr", "--in-place"]).is_err());
        assert!(Cli::try_parse_from(["sort-html-attr", "-i", "-o", "b.html", "a.html"]).is_err());
    }

    #[test]
    fn test_settings_file_and_in_place() {
        let settings_path = temp_path("settings.json");
        let input_path = temp_path("page.html");
        fs::write(
            &settings_path,
            "{\n  // ids first\n  \"priority\": [\"id\"],\n}\n",
        )
        .unwrap();
        fs::write(&input_path, "<p class=a id=b>x</p>\n").unwrap();

        let cli = Cli::try_parse_from([
            OsStr::new("sort-html-attr"),
            OsStr::new("--settings"),
            settings_path.as_os_str(),
            OsStr::new("--in-place"),
            input_path.as_os_str(),
        ])
        .unwrap();
        assert_eq!(run(&cli).unwrap(), Outcome::Changed);
        assert_eq!(fs::read_to_string(&input_path).unwrap(), "<p id=b class=a>x</p>\n");

        assert_eq!(run(&cli).unwrap(), Outcome::Unchanged);

        fs::remove_file(settings_path).unwrap();
        fs::remove_file(input_path).unwrap();
    }

    #[test]
    fn test_check_writes_nothing() {
        let input_path = temp_path("check.html");
        fs::write(&input_path, "<p b a>").unwrap();

        let cli = Cli::try_parse_from([
            OsStr::new("sort-html-attr"),
            OsStr::new("--check"),
            input_path.as_os_str(),
        ])
        .unwrap();
        assert_eq!(run(&cli).unwrap(), Outcome::Changed);
        assert_eq!(fs::read_to_string(&input_path).unwrap(), "<p b a>");

        fs::remove_file(input_path).unwrap();
    }

    #[test]
    fn test_missing_settings_file() {
        let cli = Cli::try_parse_from(["sort-html-attr", "-s", "/nonexistent/settings.json"]).unwrap();
        assert!(matches!(cli.resolve_settings(), Err(SettingsError::Io(_))));
    }
}
