//! Store command - inspect and maintain stored results

use crate::cli::args::{OutputFormat, StoreAction, StoreArgs};
use crate::config::{Config, ConfigManager};
use crate::error::LintResult;
use crate::orchestrator::open_store;
use crate::store::{EntryInfo, EntryStatus, ResultStore};
use crate::ui::{self, UiContext};
use console::style;

/// Execute the store command
pub async fn execute(args: StoreArgs, config: &Config) -> LintResult<()> {
    let store = open_store(config).await?;

    match args.action {
        StoreAction::List { format } => list(&store, config, format).await,
        StoreAction::Prune { dry_run } => prune(&store, dry_run).await,
        StoreAction::Remove { path } => remove(&store, &path).await,
        StoreAction::Clear { yes } => clear(&store, yes).await,
    }
}

async fn list(store: &ResultStore, config: &Config, format: OutputFormat) -> LintResult<()> {
    let entries = store.entries().await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Plain => {
            for entry in &entries {
                println!("{}", entry.key);
            }
        }
        OutputFormat::Table => {
            let ctx = UiContext::detect();
            if entries.is_empty() {
                ui::step_info(&ctx, "No stored results");
                ui::remark(
                    &ctx,
                    &format!("Store: {}", ConfigManager::store_dir(config).display()),
                );
            } else {
                print_table(&entries);
            }
        }
    }

    Ok(())
}

fn print_table(entries: &[EntryInfo]) {
    println!(
        "{:<50} {:<12} {:<8}",
        style("PACKAGE").bold(),
        style("STATUS").bold(),
        style("VERSION").bold()
    );
    println!("{}", "-".repeat(72));

    for entry in entries {
        let status = match entry.status {
            EntryStatus::Current => style("current").green(),
            EntryStatus::Stale => style("stale").yellow(),
            EntryStatus::Unreadable => style("unreadable").red(),
        };
        let version = entry
            .format_version
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<50} {:<12} {:<8}", entry.key, status, version);
    }

    println!();
    println!("{} stored result(s)", entries.len());
}

async fn prune(store: &ResultStore, dry_run: bool) -> LintResult<()> {
    let ctx = UiContext::detect();
    let keys = store.prune(dry_run).await?;

    if keys.is_empty() {
        ui::step_info(&ctx, "No stale results");
        return Ok(());
    }

    for key in &keys {
        ui::remark(&ctx, key);
    }
    if dry_run {
        ui::step_info(&ctx, &format!("Would remove {} stale result(s)", keys.len()));
    } else {
        ui::step_ok(&ctx, &format!("Removed {} stale result(s)", keys.len()));
    }

    Ok(())
}

async fn remove(store: &ResultStore, path: &str) -> LintResult<()> {
    let ctx = UiContext::detect();
    store.remove(path).await?;
    ui::step_ok(&ctx, &format!("Removed stored result for {}", path));
    Ok(())
}

async fn clear(store: &ResultStore, yes: bool) -> LintResult<()> {
    let ctx = UiContext::detect().with_auto_yes(yes);

    if !ui::confirm(&ctx, "Remove every stored result?", false).await? {
        ui::step_warn_hint(&ctx, "Store left untouched", "Use --yes to skip the prompt");
        return Ok(());
    }

    let removed = store.clear().await?;
    ui::step_ok(&ctx, &format!("Removed {} stored result(s)", removed));
    Ok(())
}
