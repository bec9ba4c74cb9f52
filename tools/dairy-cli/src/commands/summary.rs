//! Parse an order-line summary.

use anyhow::Result;
use dairy_commerce::order::parse_order_summary;

use super::SummaryArgs;
use crate::context::Context;

/// Run the summary command.
pub async fn run(args: SummaryArgs, ctx: &Context) -> Result<()> {
    let rows = parse_order_summary(&args.text);

    if ctx.output.is_json() {
        ctx.output.json(&rows);
        return Ok(());
    }

    if rows.is_empty() {
        ctx.output.warn("No order lines recognised");
        return Ok(());
    }

    let widths = [
        rows.iter().map(|r| r.product.len()).max().unwrap_or(0).max(7),
        rows.iter().map(|r| r.spec.len()).max().unwrap_or(0).max(4),
        8,
    ];
    ctx.output.header("Order Lines");
    ctx.output.table_row(&["Product", "Spec", "Quantity"], &widths);
    for row in &rows {
        ctx.output.table_row(
            &[row.product.as_str(), row.spec.as_str(), row.quantity.as_str()],
            &widths,
        );
    }

    Ok(())
}
