use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use flagdraw::inference::{self, InferenceClient};
use flagdraw::{script, InferenceOutcome, Page, PageConfig};
use log::info;

#[derive(Parser)]
#[command(name = "flagdraw", version, about = "Draw a flag, let a vision model guess the country")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a gesture script and write the canvas as PNG
    Render {
        script: PathBuf,
        #[arg(short, long, default_value = "flag.png")]
        output: PathBuf,
    },
    /// Replay a gesture script, submit the drawing and print the guess
    Guess {
        script: PathBuf,
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Print an HTML snapshot of the page, optionally after a script
    Page { script: Option<PathBuf> },
}

#[derive(Args)]
struct ApiArgs {
    #[arg(long, env = "FLAGDRAW_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,
    #[arg(long, env = "FLAGDRAW_ENDPOINT", default_value = inference::DEFAULT_ENDPOINT)]
    endpoint: String,
    #[arg(long, default_value = inference::DEFAULT_MODEL)]
    model: String,
    #[arg(long, default_value_t = inference::DEFAULT_MAX_TOKENS)]
    max_tokens: u32,
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Extra request header as NAME=VALUE (repeatable)
    #[arg(long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,
}

impl ApiArgs {
    fn into_config(self) -> PageConfig {
        PageConfig {
            endpoint: self.endpoint,
            api_key: self.api_key,
            model: self.model,
            max_tokens: self.max_tokens,
            timeout_ms: self.timeout_ms,
            headers: self.headers.into_iter().collect(),
            ..Default::default()
        }
    }
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected NAME=VALUE, got {:?}", raw))
}

fn load_page(config: PageConfig, script_path: Option<&PathBuf>) -> anyhow::Result<Page> {
    let mut page = Page::new(config);
    if let Some(path) = script_path {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let gestures = script::parse_script(&text)?;
        page.replay(&gestures)?;
        info!("replayed {} gestures from {}", gestures.len(), path.display());
    }
    Ok(page)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Render { script, output } => {
            let page = load_page(PageConfig::default(), Some(&script))?;
            let png = page
                .surface()
                .map_err(|_| anyhow!("script never activated the selector"))?
                .raster()
                .encode_png()?;
            std::fs::write(&output, png)
                .with_context(|| format!("writing {}", output.display()))?;
            info!("wrote {}", output.display());
        }
        Command::Guess { script, api } => {
            let config = api.into_config();
            let client = Arc::new(InferenceClient::new(config.clone())?);
            let mut page = load_page(config, Some(&script))?;
            let payload = page
                .surface()
                .map_err(|_| anyhow!("script never activated the selector"))?
                .encode_payload()?;

            let runtime = tokio::runtime::Builder::new_current_thread().build()?;
            let outcome: InferenceOutcome =
                runtime.block_on(flagdraw::async_api::submit(client.clone(), payload))?;
            // Failures are logged by the page and leave the response empty.
            page.apply_outcome(&outcome);
            println!("{}", page.response_text());
        }
        Command::Page { script } => {
            let page = load_page(PageConfig::default(), script.as_ref())?;
            print!("{}", page.to_html());
        }
    }
    Ok(())
}
