mod cli;
mod config;
mod golist;
mod http;
mod logging;
mod output;
mod resolve;
mod scan;

use clap::Parser;
use cli::Cli;
use http::HttpClient;
use output::ModuleEntry;
use resolve::ModuleLine;
use tracing::{debug, error};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.log_filter());

    if let Err(e) = run(&cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::load()?;

    let listing = if cli.stdin {
        golist::read_modules(std::io::stdin().lock())?
    } else {
        golist::list_modules(cli.directory.as_deref())?
    };

    let client = HttpClient::new(config.timeout(), config.user_agent());
    let format = cli.line_format();
    let mut entries = Vec::new();

    // One lookup at a time, in listing order
    for line in listing.lines() {
        let module = match ModuleLine::parse(line) {
            Ok(module) => module,
            Err(e) => {
                error!("{}", e);
                continue;
            }
        };

        let result = match config.repo_override(module.path) {
            Some(repo_url) => {
                debug!(module = module.path, repo = repo_url, "using configured override");
                Ok(repo_url.to_string())
            }
            None => resolve::resolve(&client, line),
        };

        match result {
            Ok(repo_url) if cli.json => {
                entries.push(ModuleEntry::resolved(module.path, module.version, &repo_url));
            }
            Ok(repo_url) => println!("{}", format.render(&repo_url, module.path)),
            Err(e) => {
                error!("{}", e);
                if cli.json {
                    entries.push(ModuleEntry::failed(module.path, module.version, &e.to_string()));
                }
            }
        }
    }

    if cli.json {
        output::print_json(&entries)?;
    }

    Ok(())
}
