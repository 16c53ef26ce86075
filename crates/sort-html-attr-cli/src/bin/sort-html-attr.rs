use clap::Parser;
use sort_html_attr_cli::{init_logging, run, Cli, Outcome};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(Outcome::Changed) if cli.check => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("sort-html-attr: {e}");
            ExitCode::from(2)
        }
    }
}
