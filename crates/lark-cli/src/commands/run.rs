use anyhow::{anyhow, Context, Result};
use bat::PrettyPrinter;
use clap::Args;
use cliclack::spinner;
use std::path::PathBuf;

use lark::environment::RealEnvironment;
use lark::providers::factory::resolve_with;
use lark::{Agent, Runner};

use crate::configuration::Settings;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Model vendor (qwen or ark); overrides LARK_PROVIDER__VENDOR
    #[arg(short, long)]
    pub vendor: Option<String>,

    /// Model to use; defaults to the vendor's default model
    #[arg(short, long)]
    pub model: Option<String>,

    /// Agent display name
    #[arg(long)]
    pub name: Option<String>,

    /// System instructions for the agent
    #[arg(short, long)]
    pub instructions: Option<String>,

    /// Path to a TOML settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Wait for the complete reply instead of streaming it
    #[arg(long)]
    pub no_stream: bool,

    /// The user input to send
    pub input: String,
}

impl RunArgs {
    /// Command line flags take precedence over file and environment settings
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(vendor) = &self.vendor {
            settings.provider.vendor = vendor.clone();
        }
        if let Some(model) = &self.model {
            settings.provider.model = model.clone();
        }
        if let Some(name) = &self.name {
            settings.agent.name = name.clone();
        }
        if let Some(instructions) = &self.instructions {
            settings.agent.instructions = instructions.clone();
        }
        settings
    }
}

pub async fn execute(args: RunArgs) -> Result<()> {
    let settings = args.apply(
        Settings::load(args.config.as_deref()).context("Failed to load settings")?,
    );

    let model = resolve_with(
        &settings.provider.vendor,
        &settings.provider.model,
        &RealEnvironment,
        settings.provider.timeout(),
    )
    .await
    .context("Failed to resolve chat model")?;

    tracing::info!(
        agent = %settings.agent.name,
        vendor = %model.vendor(),
        model = model.model(),
        "agent ready"
    );
    let agent = Agent::with_model(settings.agent.name, settings.agent.instructions, model);
    let mut runner = Runner::new(agent, args.input);

    if args.no_stream {
        let spin = spinner();
        spin.start("awaiting reply");
        let reply = runner.process(true).await;
        spin.stop("");

        if let Some(message) = reply.context("Generation failed")? {
            render(&message.content)?;
        }
    } else {
        runner.process_stream().await.context("Streaming failed")?;
    }

    Ok(())
}

fn render(content: &str) -> Result<()> {
    PrettyPrinter::new()
        .input_from_bytes(content.as_bytes())
        .language("markdown")
        .print()
        .map_err(|e| anyhow!("Failed to render reply: {}", e))?;
    println!();
    Ok(())
}
