use crate::cli::CliContext;
use anyhow::{bail, Context, Result};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, Table};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Output format: table|json
    #[arg(long, default_value = "table")]
    pub format: String,

    /// Print values in clear text
    #[arg(long)]
    pub reveal: bool,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Credential name
    pub name: String,
}

#[derive(Serialize)]
struct ShowItem {
    name: String,
    value: String,
    filled: bool,
}

pub fn run_show(ctx: &CliContext, args: ShowArgs) -> Result<()> {
    if args.format != "table" && args.format != "json" {
        bail!("invalid format: {} (use table|json)", args.format);
    }
    let store = ctx.open_existing()?;

    let items: Vec<ShowItem> = store
        .get_all()
        .iter()
        .map(|(name, value)| ShowItem {
            name: name.clone(),
            value: if args.reveal { value.clone() } else { mask_value(value) },
            filled: !value.trim().is_empty(),
        })
        .collect();

    if args.format == "json" {
        let json = serde_json::to_string_pretty(&items).context("serialize credentials")?;
        println!("{}", json);
        return Ok(());
    }

    if items.is_empty() {
        println!("No credentials in {}", store.path().display());
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Name").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    for item in &items {
        let value = if item.filled {
            Cell::new(&item.value)
        } else {
            Cell::new("(empty)").fg(Color::Yellow)
        };
        table.add_row(vec![Cell::new(&item.name), value]);
    }
    println!("{}", table);

    let missing = store.missing_keys();
    if !missing.is_empty() {
        println!("\nMissing template keys: {}", missing.join(", "));
    }
    Ok(())
}

pub fn run_get(ctx: &CliContext, args: GetArgs) -> Result<()> {
    let store = ctx.open_existing()?;
    match store.get_credential(&args.name) {
        Some(value) => {
            println!("{}", value);
            Ok(())
        }
        None => bail!("credential '{}' not found in {}", args.name, store.path().display()),
    }
}

pub fn run_path(ctx: &CliContext) -> Result<()> {
    println!("{}", ctx.config.path.display());
    Ok(())
}

fn mask_value(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..2].iter().collect();
        let tail: String = chars[chars.len() - 2..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
