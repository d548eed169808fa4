use plistview::config::ViewerConfig;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = ViewerConfig::from_env();

    if config.dump {
        let stdout = std::io::stdout();
        return match plistview::write_dump(&config.files, &mut stdout.lock()) {
            Ok(failed) if failed.is_empty() => ExitCode::SUCCESS,
            Ok(_) => ExitCode::FAILURE,
            Err(e) => {
                log::error!("{e:#}");
                ExitCode::FAILURE
            }
        };
    }

    match plistview::run_gui(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Failed to start the viewer: {e}");
            ExitCode::FAILURE
        }
    }
}
