use sort_html_attr::{run_command, Settings, StringBuffer};

/// One case from a `.dat` fixture file.
///
/// ```text
/// #data
/// <p class=a id=b>
/// #priority
/// id
/// #mode
/// preserve
/// #syntax
/// XML
/// #allowed-syntaxes
/// HTML
/// #expected
/// <p class=a id=b>
/// ```
///
/// Only `#data` and `#expected` are required. `#priority` and
/// `#allowed-syntaxes` take one entry per line, `#mode` is `normalize` or
/// `preserve` and `#syntax` defaults to `HTML`.
pub struct FixtureCase {
    pub data: String,
    pub priority: Vec<String>,
    pub preserve_white_space: bool,
    pub syntax: String,
    pub allowed_syntaxes: Option<Vec<String>>,
    pub expected: String,
    pub line_number: usize, // Line number where the input starts
}

impl Default for FixtureCase {
    fn default() -> Self {
        Self {
            data: String::new(),
            priority: Vec::new(),
            preserve_white_space: false,
            syntax: "HTML".to_string(),
            allowed_syntaxes: None,
            expected: String::new(),
            line_number: 0,
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Data,
    Priority,
    Mode,
    Syntax,
    AllowedSyntaxes,
    Expected,
}

fn push_line(target: &mut String, line: &str) {
    target.push_str(line);
    target.push('\n');
}

/// Multi-line sections keep inner newlines but drop the blank lines that
/// separate cases.
fn finish(mut case: FixtureCase) -> FixtureCase {
    let data_len = case.data.trim_end_matches('\n').len();
    case.data.truncate(data_len);
    let expected_len = case.expected.trim_end_matches('\n').len();
    case.expected.truncate(expected_len);
    case
}

pub fn parse_fixture_file(content: &str) -> Vec<FixtureCase> {
    let mut cases = Vec::new();
    let mut section = None;
    let mut current: Option<FixtureCase> = None;

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        let next_section = match line {
            "#data" => Some(Section::Data),
            "#priority" => Some(Section::Priority),
            "#mode" => Some(Section::Mode),
            "#syntax" => Some(Section::Syntax),
            "#allowed-syntaxes" => Some(Section::AllowedSyntaxes),
            "#expected" => Some(Section::Expected),
            _ => None,
        };

        if let Some(next_section) = next_section {
            if next_section == Section::Data {
                cases.extend(current.take().map(finish));
                current = Some(FixtureCase {
                    line_number: line_number + 1,
                    ..FixtureCase::default()
                });
            }
            if next_section == Section::AllowedSyntaxes {
                if let Some(case) = current.as_mut() {
                    case.allowed_syntaxes = Some(Vec::new());
                }
            }
            section = Some(next_section);
            continue;
        }

        let (Some(case), Some(section)) = (current.as_mut(), section) else {
            continue;
        };

        match section {
            Section::Data => push_line(&mut case.data, line),
            Section::Expected => push_line(&mut case.expected, line),
            Section::Priority if !line.is_empty() => case.priority.push(line.to_string()),
            Section::Mode if !line.is_empty() => {
                case.preserve_white_space = match line {
                    "preserve" => true,
                    "normalize" => false,
                    other => panic!("line {line_number}: unknown mode {other:?}"),
                }
            }
            Section::Syntax if !line.is_empty() => case.syntax = line.to_string(),
            Section::AllowedSyntaxes if !line.is_empty() => {
                if let Some(allowed) = case.allowed_syntaxes.as_mut() {
                    allowed.push(line.to_string());
                }
            }
            _ => {}
        }
    }

    cases.extend(current.map(finish));
    cases
}

/// Sorts the case's input the way the editor command would and returns the
/// resulting document.
pub fn run_fixture(case: &FixtureCase) -> String {
    let mut settings = Settings {
        priority: case.priority.clone(),
        preserve_white_space: case.preserve_white_space,
        ..Settings::default()
    };
    if let Some(allowed) = &case.allowed_syntaxes {
        settings.allowed_syntaxes = allowed.clone();
    }

    let mut buffer = StringBuffer::new(case.syntax.as_str(), case.data.as_str());
    run_command(&mut buffer, &settings);
    buffer.into_text()
}
