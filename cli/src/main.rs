use std::io;
use std::rc::Rc;

use cmdtree_cli::app::{App, request_headers};
use cmdtree_cli::commands::{
    CONFIGURE_COMMAND, HEADER_KEY_FLAG, HEADER_VAL_FLAG, PROGRAM_NAME, command_forest,
    side_channel_flags,
};
use cmdtree_cli::config::{CliConfig, config_path};
use cmdtree_cli::render::renderer_for;
use cmdtree_cli::service::DryRunService;
use cmdtree_core::{
    ADD_FLAGS_COMMAND, CommandHandler, Dispatch, ROOT_DEPTH, TerminalPresenter, validate_tree,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Exit status when nothing matched and the command listing was printed.
const USAGE_EXIT_CODE: i32 = 2;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let argv: Vec<String> = std::env::args().collect();
    match run(argv) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn run(argv: Vec<String>) -> cmdtree_cli::Result<i32> {
    let side_channel = side_channel_flags();
    let extracted = side_channel.extract(&argv);

    let path = config_path()?;
    let config = CliConfig::load_or_default(&path)?;
    debug!(path = %path.display(), configured = config.has_credentials(), "Loaded configuration");

    let needs_credentials = extracted
        .argv
        .get(ROOT_DEPTH)
        .is_some_and(|token| token != CONFIGURE_COMMAND && token != ADD_FLAGS_COMMAND);
    if needs_credentials && !config.has_credentials() {
        println!("Firstly you should configure credentials");
        return Ok(1);
    }

    let headers = request_headers(
        &config.headers,
        extracted.value(HEADER_KEY_FLAG),
        extracted.value(HEADER_VAL_FLAG),
    );
    let app = Rc::new(App::new(
        Box::new(DryRunService::new(&config.api_key)),
        renderer_for(config.output, io::stdout()),
        headers,
    ));

    let forest = command_forest(&app, &path);
    for err in validate_tree(&forest) {
        warn!(error = %err, "Invalid command declaration");
    }

    let handler = CommandHandler::new(PROGRAM_NAME, forest, side_channel);
    let mut presenter = TerminalPresenter::stdout().with_color(config.color.enabled());

    let code = match handler.parse_args(&extracted.argv, &mut presenter) {
        Ok(Dispatch::Matched) => i32::from(app.failed()),
        Ok(Dispatch::SideChannelListing) => 0,
        Ok(Dispatch::CommandListing | Dispatch::NoCommands) => USAGE_EXIT_CODE,
        Err(err) if err.is_help() => 0,
        Err(err) => {
            debug!(error = %err, "Command not resolved");
            1
        }
    };
    Ok(code)
}
