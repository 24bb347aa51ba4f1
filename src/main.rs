use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use placeshare::config::Config;
use placeshare::logging::init_tracing;
use placeshare::pages::{AuthPage, UpdatePlacePage};
use placeshare::session::Session;
use placeshare::upload::Upload;

#[derive(Parser)]
#[command(name = "placeshare", version, about = "Command-line client for the places API")]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the API base URL (e.g., http://localhost:5000/api)
    #[arg(long, global = true, value_name = "URL")]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and print the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and print the session
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Profile picture (PNG or JPEG)
        #[arg(long, value_name = "PATH")]
        image: PathBuf,
    },
    /// Print one place
    ShowPlace { place_id: String },
    /// Change the title and/or description of a place
    UpdatePlace {
        place_id: String,
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        token: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(url) = cli.backend_url {
        config.api.base_url = url;
        config.validate()?;
    }

    match cli.command {
        Command::Login { email, password } => {
            let mut page = AuthPage::new(config.api)?;
            let fields = [("email", email), ("password", password)];
            for (name, value) in fields {
                page.input(name, value)?;
                page.touch(name)?;
            }
            reject_invalid(&["email", "password"], |name| page.field_error(name))?;

            let session = page.submit().await?;
            print_session(&session)?;
        }
        Command::Signup {
            name,
            email,
            password,
            image,
        } => {
            let upload = Upload::from_path(&image)?;
            let mut page = AuthPage::new(config.api)?;
            page.switch_mode();

            let fields = [("name", name), ("email", email), ("password", password)];
            for (field, value) in fields {
                page.input(field, value)?;
                page.touch(field)?;
            }
            page.input("image", upload)?;
            reject_invalid(&["name", "email", "password", "image"], |name| {
                page.field_error(name)
            })?;

            let session = page.submit().await?;
            print_session(&session)?;
        }
        Command::ShowPlace { place_id } => {
            let mut page = UpdatePlacePage::new(config.api, place_id)?;
            let place = page.load().await?;
            println!("{}", serde_json::to_string_pretty(place)?);
        }
        Command::UpdatePlace {
            place_id,
            user_id,
            token,
            title,
            description,
        } => {
            let mut page = UpdatePlacePage::new(config.api, place_id)?;
            page.load().await.context("Failed to load place")?;

            let edits = [("title", title), ("description", description)];
            for (name, value) in edits {
                if let Some(value) = value {
                    page.input(name, value)?;
                    page.touch(name)?;
                }
            }
            reject_invalid(&["title", "description"], |name| page.field_error(name))?;

            let route = page.submit(&Session::new(user_id, token)).await?;
            println!("Place updated. Next: {}", route);
        }
    }

    Ok(())
}

fn reject_invalid<F>(names: &[&str], field_error: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> Option<&'static str>,
{
    let errors: Vec<&str> = names.iter().filter_map(|name| field_error(name)).collect();
    if !errors.is_empty() {
        bail!("{}", errors.join(" "));
    }
    Ok(())
}

fn print_session(session: &Session) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(session)?);
    Ok(())
}
