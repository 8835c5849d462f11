mod args;
mod display;

use std::fs::File;
use std::io::IsTerminal;
use std::process::ExitCode;
use std::rc::Rc;

use args::{Cli, Command, USAGE};
use display::GridDisplay;
use emojimix_core::config::Config;
use emojimix_core::presenter::MixListPresenter;
use emojimix_core::store::MixStore;

type AppResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

fn init_logging(verbose: bool) {
    use simplelog::{LevelFilter, WriteLogger};

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let log_path = dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("emojimix")
        .join("emojimix.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path)
        .or_else(|_| File::create(std::env::temp_dir().join("emojimix.log")))
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("emojimix: logging disabled ({})", e);
            return;
        }
    };

    if WriteLogger::init(log_level, simplelog::Config::default(), log_file).is_err() {
        return;
    }

    log::info!("emojimix starting (log level: {:?})", log_level);
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match Cli::parse(&args) {
        Ok(cli) => cli,
        Err(msg) => {
            eprintln!("emojimix: {}\n\n{}", msg, USAGE);
            return ExitCode::from(2);
        }
    };
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Failures are reported, never retried.
            log::error!("{}", e);
            eprintln!("emojimix: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> AppResult {
    if cli.command == Command::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = Config::load();
    let db_path = cli.db.unwrap_or_else(|| config.database_path());
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let store = MixStore::open(&db_path)?;
    let mut presenter = MixListPresenter::new(store, config.generator())?;

    let mut stdout = std::io::stdout();
    let display = Rc::new(GridDisplay::new(stdout.is_terminal()));
    let surface = Rc::clone(&display);
    presenter.bind(move |mixes| surface.present(mixes));

    match cli.command {
        Command::List { json: true } => {
            println!("{}", serde_json::to_string_pretty(presenter.mixes())?);
            return Ok(());
        }
        Command::List { json: false } => display.present(presenter.mixes()),
        Command::Add(count) => {
            for _ in 0..count {
                let mix = presenter.request_new_mix()?;
                log::info!("added {} ({})", mix.symbols, mix.color.to_hex());
            }
        }
        Command::Clear => {
            let removed = presenter.request_clear_all()?;
            log::info!("cleared {} mixes", removed);
            if removed == 0 {
                display.present(presenter.mixes());
            }
        }
        Command::Help => {}
    }

    display.flush_to(&mut stdout)?;
    Ok(())
}
