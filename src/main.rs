use std::path::PathBuf;
use std::process;

use clap::Parser;
use env_logger::{self as logger};

use fieldmask::config::{self, Config, FieldConfig};
use fieldmask::error::Result;
use fieldmask::prompt::{MaskedPrompt, PromptState};
use fieldmask::terminal::{Terminal, TerminalEvent};
use fieldmask::{Mask, MaskOptions};

const FIELDMASK_DEBUG_LOG: &str = "FIELDMASK_DEBUG_LOG";

/// Prompt for masked values in the terminal and print them as JSON.
#[derive(Parser, Debug)]
#[command(name = "fieldmask", version)]
struct Opt {
    /// Mask definition: 9 digit, a lowercase, A uppercase, * any, others literal.
    #[arg(long, short, conflicts_with_all = ["preset", "config"])]
    mask: Option<String>,

    /// Named mask preset.
    #[arg(long, short, conflicts_with = "config")]
    preset: Option<String>,

    /// Label shown in front of the field.
    #[arg(long, short, default_value = "Value")]
    label: String,

    /// Match letter placeholders without folding case.
    #[arg(long)]
    case_sensitive: bool,

    /// YAML or JSON file listing the fields to prompt for.
    #[arg(long, short)]
    config: Option<PathBuf>,
}

fn main() {
    if std::env::var(FIELDMASK_DEBUG_LOG).is_ok() {
        logger::Builder::from_env(logger::Env::new().filter(FIELDMASK_DEBUG_LOG))
            .format_timestamp_micros()
            .init();
        log::debug!("logging initialized");
    }

    if let Err(err) = run(Opt::parse()) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(opt: Opt) -> Result<()> {
    let prompts = build_prompts(&opt)?;

    let mut terminal = Terminal::new();
    terminal.enter_raw_mode()?;
    let result = collect(&mut terminal, prompts);
    terminal.exit_raw_mode()?;

    if let Some(values) = result? {
        println!("{}", serde_json::to_string_pretty(&values)?);
    }
    Ok(())
}

fn build_prompts(opt: &Opt) -> Result<Vec<MaskedPrompt>> {
    if let Some(path) = &opt.config {
        let config = Config::load(path)?;
        return config.fields.iter().map(field_prompt).collect();
    }

    let mask = match (&opt.mask, &opt.preset) {
        (Some(definition), _) => Mask::new(definition.as_str()),
        (None, Some(name)) => config::resolve_preset(name)?,
        (None, None) => Mask::new("*".repeat(32)),
    };
    let options = MaskOptions {
        case_sensitive: opt.case_sensitive,
    };
    Ok(vec![MaskedPrompt::new(
        "value",
        opt.label.as_str(),
        mask,
        options,
    )])
}

fn field_prompt(field: &FieldConfig) -> Result<MaskedPrompt> {
    let prompt = MaskedPrompt::new(
        field.id.as_str(),
        field.label(),
        field.resolve_mask()?,
        field.options(),
    );
    Ok(match &field.default {
        Some(value) => prompt.with_default(value),
        None => prompt,
    })
}

/// Runs each prompt in turn; `None` when the user cancels.
fn collect(
    terminal: &mut Terminal,
    prompts: Vec<MaskedPrompt>,
) -> Result<Option<serde_json::Map<String, serde_json::Value>>> {
    let mut values = serde_json::Map::new();

    for mut prompt in prompts {
        terminal.render_line(&prompt.render_spans(), prompt.cursor_col())?;
        loop {
            let state = match terminal.read_event()? {
                TerminalEvent::Key(key) => prompt.on_key(key),
                TerminalEvent::Resize { .. } => PromptState::Editing,
            };
            terminal.render_line(&prompt.render_spans(), prompt.cursor_col())?;
            match state {
                PromptState::Editing => continue,
                PromptState::Submitted(value) => {
                    log::debug!("field {:?} submitted {:?}", prompt.id(), value);
                    values.insert(prompt.id().to_string(), serde_json::Value::String(value));
                    terminal.finish_line()?;
                    break;
                }
                PromptState::Cancelled => {
                    terminal.finish_line()?;
                    return Ok(None);
                }
            }
        }
    }

    Ok(Some(values))
}
