// SPDX-License-Identifier: MPL-2.0
//! `hx-toast` replays `HX-Trigger` header values against a toast container.
//!
//! Each stdin line is one header value. The container markup is printed after
//! every line; at end of input the remaining toasts are dismissed and the
//! final state printed.

use hx_toast::config::{self, Config};
use hx_toast::error::Result;
use hx_toast::locale::{resolve_language, DocumentLocale, LocaleSwitcher};
use hx_toast::toast::{HttpTemplateSource, ToastManager};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
hx-toast: replay HX-Trigger headers against a toast container

USAGE:
  hx-toast [OPTIONS] < triggers.txt

OPTIONS:
  --base-url URL    Origin serving /toast/{kind} templates
  --lang TAG        Document language (e.g. en, ar)
  --config PATH     Settings file to use instead of the default
  --linger MS       Time to let toasts live after the last line [default: 0]
  -h, --help        Print this help
";

/// Slack after the exit animation before the final render.
const SETTLE_MARGIN: Duration = Duration::from_millis(50);

struct Args {
    base_url: Option<String>,
    lang: Option<String>,
    config: Option<PathBuf>,
    linger_ms: u64,
}

fn parse_args() -> std::result::Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(None);
    }
    let parsed = Args {
        base_url: args.opt_value_from_str("--base-url")?,
        lang: args.opt_value_from_str("--lang")?,
        config: args.opt_value_from_str("--config")?,
        linger_ms: args.opt_value_from_str("--linger")?.unwrap_or(0),
    };
    let rest = args.finish();
    if !rest.is_empty() {
        log::warn!("Ignoring unexpected arguments: {rest:?}");
    }
    Ok(Some(parsed))
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };
    if let Some(base_url) = &args.base_url {
        config.base_url.clone_from(base_url);
    }
    Ok(config)
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let lang = resolve_language(args.lang.as_deref(), &config);
    let switcher = LocaleSwitcher::new(DocumentLocale::new(lang));
    let source = HttpTemplateSource::new(config.base_url.clone());
    let manager = ToastManager::new(&config, source, switcher.subscribe(), None);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        // Failures are already logged by the manager.
        let _ = manager.handle_trigger_header(&line).await;
        println!("{}", manager.render());
    }

    tokio::time::sleep(Duration::from_millis(args.linger_ms)).await;
    manager.dismiss_all();
    tokio::time::sleep(config.exit_animation() + SETTLE_MARGIN).await;
    println!("{}", manager.render());
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => return,
        Err(err) => {
            eprintln!("{err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(args).await {
        log::error!("{err}");
        std::process::exit(1);
    }
}
