use std::fs;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use schedule_matcher::availability::validate_duration;
use schedule_matcher::config::{Cli, Command, MatchArgs, ServeArgs};
use schedule_matcher::display::{print_suggestions, write_suggestions_to_file};
use schedule_matcher::parser::load_availability;
use schedule_matcher::store::{decode_share, share_fragment, AvailabilityState, JsonFileStore, StateStore};
use schedule_matcher::web;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => serve(args).await?,
        Command::Match(args) => run_match(&args)?,
        Command::Share { state } => {
            let state = AvailabilityState::from_json(&fs::read_to_string(state)?)?;
            println!("{}", share_fragment(&state)?);
        }
        Command::Unshare { encoded, output } => {
            let state = decode_share(&encoded)?;
            JsonFileStore::new(&output).save(&state)?;
            println!("Saved {} + {} availability to {}", state.label_you, state.label_them, output.display());
        }
    }

    Ok(())
}

async fn serve(args: ServeArgs) -> std::io::Result<()> {
    let key = web::session_key(args.session_secret.as_deref());
    info!(host = %args.host, port = args.port, "starting web server");
    println!("Access the site at http://localhost:{}", args.port);
    web::start_server(&args.host, args.port, key, args.secure_cookies).await
}

fn run_match(args: &MatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let min_duration = validate_duration(args.duration)?;

    let state = match &args.state {
        Some(path) => AvailabilityState::from_json(&fs::read_to_string(path)?)?,
        None => {
            let mut state = AvailabilityState::default();
            if let Some(path) = &args.you {
                state.you = load_availability(path)?;
            }
            if let Some(path) = &args.them {
                state.them = load_availability(path)?;
            }
            state.validate()?;
            state
        }
    };

    let suggestions = state.suggestions(min_duration, args.policy)?;
    print_suggestions(&state, &suggestions);

    if let Some(output) = &args.output {
        write_suggestions_to_file(&state, &suggestions, output)?;
        println!("Suggestions saved to {}", output.display());
    }

    Ok(())
}
