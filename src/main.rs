use std::process::ExitCode;

fn main() -> ExitCode {
    match merge_changelog::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            merge_changelog::ui::output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
