//! List product options for an entry type.

use anyhow::{Context as _, Result};
use dairy_commerce::{EntryType, UserId};

use super::CatalogArgs;
use crate::context::Context;
use crate::output::format_percent;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let entry_type: EntryType = args.entry_type.parse()?;
    let user_id = UserId::new(args.user.trim());
    if user_id.is_empty() {
        anyhow::bail!("--user must not be blank");
    }
    let api = ctx.authenticated_api()?;

    let spinner = ctx
        .output
        .spinner(&format!("Fetching {} products", entry_type.display_name()));
    let result = api.fetch_catalog(entry_type, &user_id).await;
    spinner.finish_and_clear();

    let options = result.with_context(|| format!("Failed to fetch {} catalog", entry_type))?;
    let query = args.search.as_deref().unwrap_or("");
    let options: Vec<_> = options.into_iter().filter(|o| o.matches(query)).collect();

    if ctx.output.is_json() {
        ctx.output.json(&options);
        return Ok(());
    }

    if options.is_empty() {
        ctx.output.warn("No products found");
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} products for user {} ({})",
        entry_type.display_name(),
        user_id,
        options.len()
    ));

    let widths = [
        options.iter().map(|o| o.id.as_str().len()).max().unwrap_or(0).max(2),
        options.iter().map(|o| o.name.len()).max().unwrap_or(0).max(4),
        10,
        5,
        5,
    ];
    ctx.output
        .table_row(&["ID", "Name", "Rate", "GST", "Photo"], &widths);
    for option in &options {
        let rate = option.price.display();
        let gst = format_percent(option.gst_rate);
        let photo = if option.has_image() { "yes" } else { "-" };
        ctx.output.table_row(
            &[option.id.as_str(), option.name.as_str(), rate.as_str(), gst.as_str(), photo],
            &widths,
        );
    }

    Ok(())
}
