//! Tagsmith CLI - Tagging rule management
//!
//! Manage the custom rules injected into tagging prompts and preview the
//! prompts the inference backend will receive.

mod api;
mod config;
mod settings;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Input, Password};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use api::TagsmithClient;
use config::Config;
use settings::{NotificationLevel, RowState, SettingsSession, EMPTY_STATE_MESSAGE};
use tagsmith::{AppliesTo, DomainError};

#[derive(Parser)]
#[command(name = "tagsmith")]
#[command(about = "Tagsmith CLI - Tagging rule management", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login and store API key
    Login {
        /// API key (will prompt if not provided)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Manage tagging rules
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },

    /// Show the prompts built from the current rules
    Preview {
        /// Tag language (defaults to the configured one)
        #[arg(short, long)]
        lang: Option<String>,
        /// Ask the server to compose instead of composing locally
        #[arg(long)]
        remote: bool,
    },

    /// Show or change configuration
    Config {
        /// Set the server URL
        #[arg(long)]
        base_url: Option<String>,
        /// Set the tag language used for previews
        #[arg(long)]
        tag_lang: Option<String>,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// List all rules
    List,
    /// Add a rule
    Add {
        /// Rule text (will prompt if not provided)
        text: Option<String>,
        /// Content the rule applies to (all, text, images)
        #[arg(short, long, default_value = "all")]
        applies_to: AppliesTo,
    },
    /// Change the text or scope of a rule
    Update {
        /// Rule ID
        id: Uuid,
        /// New rule text
        #[arg(short, long)]
        text: Option<String>,
        /// New scope (all, text, images)
        #[arg(short, long)]
        applies_to: Option<AppliesTo>,
    },
    /// Delete a rule
    Delete {
        /// Rule ID
        id: Uuid,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Login { key } => cmd_login(key).await,
        Commands::Rules { action } => cmd_rules(action).await,
        Commands::Preview { lang, remote } => cmd_preview(lang, remote).await,
        Commands::Config { base_url, tag_lang } => cmd_config(base_url, tag_lang),
    }
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_login(key: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    let api_key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt("API Key")
            .interact()
            .context("Failed to read API key")?,
    };

    let base_url = config.effective_base_url();
    let client = TagsmithClient::new(&base_url, Some(&api_key));
    print!("Testing connection... ");

    match client.health().await {
        Ok(true) => {}
        _ => {
            println!("{}", "Failed".red());
            bail!("Could not reach Tagsmith API at {}", base_url);
        }
    }

    if let Err(e) = client.check_auth().await {
        println!("{}", "Failed".red());
        bail!("API key rejected: {}", e);
    }
    println!("{}", "OK".green());

    config.set_api_key(api_key);
    config.save()?;

    println!("{} API key saved to {:?}", "✓".green(), Config::config_path()?);
    Ok(())
}

fn client_from(config: &Config) -> TagsmithClient {
    TagsmithClient::new(&config.effective_base_url(), config.api_key.as_deref())
}

async fn open_session(config: &Config) -> Result<SettingsSession<TagsmithClient>> {
    let mut session = SettingsSession::new(Arc::new(client_from(config)));
    if let Err(e) = session.refresh().await {
        session.take_notifications();
        return Err(e).context("Failed to load rules. Is the server running? Try 'tagsmith login'.");
    }
    Ok(session)
}

/// Print queued notifications and turn a failed mutation into an exit code
fn report(
    session: &mut SettingsSession<TagsmithClient>,
    result: Result<(), DomainError>,
) -> Result<()> {
    for note in session.take_notifications() {
        match note.level {
            NotificationLevel::Success => println!("{} {}", "✓".green(), note.message),
            NotificationLevel::Error => eprintln!("{} {}", "✗".red(), note.message.red()),
        }
    }

    if result.is_err() {
        std::process::exit(1);
    }
    Ok(())
}

async fn cmd_rules(action: RulesAction) -> Result<()> {
    let config = Config::load()?;
    let mut session = open_session(&config).await?;

    match action {
        RulesAction::List => {
            if session.is_empty() {
                println!("{}", EMPTY_STATE_MESSAGE);
                println!("\n{}", "Add one with:".dimmed());
                println!("  tagsmith rules add \"<rule>\" --applies-to text");
                return Ok(());
            }

            println!("{}", "Rules:".bold());
            for row in session.rows() {
                println!(
                    "  {} {} {}",
                    row.rule.id.to_string().dimmed(),
                    format!("[{}]", row.rule.applies_to).cyan(),
                    row.rule.text
                );
            }
        }

        RulesAction::Add { text, applies_to } => {
            let text = match text {
                Some(t) => t,
                None => Input::new()
                    .with_prompt("Rule")
                    .allow_empty(true)
                    .interact_text()
                    .context("Failed to read input")?,
            };

            session.draft.text = text;
            session.draft.applies_to = applies_to;
            let result = session.submit_new().await;

            if let Some(error) = &session.draft.error {
                eprintln!("{} {}", "✗".red(), error.red());
            }
            report(&mut session, result)?;
        }

        RulesAction::Update {
            id,
            text,
            applies_to,
        } => {
            if text.is_none() && applies_to.is_none() {
                bail!("Nothing to update. Pass --text and/or --applies-to.");
            }

            let result = match session.edit(id, text, applies_to) {
                Ok(()) => session.submit_update(id).await,
                Err(e) => {
                    eprintln!("{} {}", "✗".red(), e.to_string().red());
                    Err(e)
                }
            };

            if let Some(row) = session.rows().iter().find(|row| row.rule.id == id) {
                if let (RowState::Failed(msg), Err(DomainError::Validation(_))) = (&row.state, &result) {
                    eprintln!("{} {}", "✗".red(), msg.red());
                }
            }
            report(&mut session, result)?;
        }

        RulesAction::Delete { id } => {
            let result = session.submit_delete(id).await;
            report(&mut session, result)?;
        }
    }

    Ok(())
}

async fn cmd_preview(lang: Option<String>, remote: bool) -> Result<()> {
    let config = Config::load()?;
    let lang = lang.unwrap_or_else(|| config.tag_lang.clone());

    let preview = if remote {
        client_from(&config)
            .remote_preview(Some(&lang))
            .await
            .context("Failed to fetch preview")?
    } else {
        open_session(&config).await?.preview(&lang)
    };

    println!("{}", "Text Prompt".bold());
    println!("{}", preview.text_prompt);
    println!();
    println!("{}", "Image Prompt".bold());
    println!("{}", preview.image_prompt);

    Ok(())
}

fn cmd_config(base_url: Option<String>, tag_lang: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    if base_url.is_some() || tag_lang.is_some() {
        if let Some(url) = base_url {
            config.base_url = url;
        }
        if let Some(lang) = tag_lang {
            config.tag_lang = lang;
        }
        config.save()?;
        println!("{} Configuration saved", "✓".green());
    }

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);
    let effective = config.effective_base_url();
    if effective != config.base_url {
        println!("  {} {}", "Overridden by TAGSMITH_BASE_URL:".yellow(), effective);
    }
    println!("  Tag Language: {}", config.tag_lang.cyan());
    println!(
        "  API Key: {}",
        if config.api_key.is_some() {
            "Set".green()
        } else {
            "Not set".red()
        }
    );

    Ok(())
}
