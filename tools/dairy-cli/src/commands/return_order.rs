//! Build, review and submit a return order from a draft file.

use anyhow::{bail, Result};
use dairy_client::ReturnOrderForm;
use dairy_commerce::submission::ReviewSummary;
use dialoguer::Confirm;

use super::ReturnArgs;
use crate::context::Context;
use crate::draft::ReturnDraft;
use crate::output::{entry_badge, format_percent};

/// Run the return command.
pub async fn run(args: ReturnArgs, ctx: &Context) -> Result<()> {
    let draft = ReturnDraft::load(&ctx.resolve_path(&args.draft))?;
    let order = draft.selected_order()?;
    let api = ctx.authenticated_api()?;

    let mut form = ReturnOrderForm::new(api, order).with_on_close(|| {
        tracing::info!("return order form closed");
    });
    if draft.return_date.is_some() {
        form.set_return_date(draft.return_date);
    }
    form.set_delivery_status(draft.delivery_status);
    form.set_payment_status(draft.payment_status);

    let spinner = ctx.output.spinner("Initiating wallet transaction");
    form.initialize_transaction().await;
    spinner.finish_and_clear();
    if let Some(notification) = form.take_notification() {
        // Submission still goes ahead without a transaction token.
        ctx.output.warn(&format!(
            "Wallet transaction not started: {}",
            notification.description
        ));
    }

    for entry_type in draft.entry_types() {
        let spinner = ctx
            .output
            .spinner(&format!("Fetching {} products", entry_type.display_name()));
        form.load_catalog(entry_type).await;
        spinner.finish_and_clear();

        if let Some(notification) = form.take_notification() {
            bail!(
                "Could not load {} products: {}",
                entry_type.display_name(),
                notification.description
            );
        }
        ctx.output.debug(&format!(
            "{} {} products available",
            form.catalog().options().len(),
            entry_type
        ));

        for item in draft.items_of(entry_type) {
            if !form.add_product(&item.product_id) {
                bail!(
                    "Product {} is not in the {} catalog",
                    item.product_id,
                    entry_type.display_name()
                );
            }
            // add_product counted one; top up to the requested quantity.
            if item.quantity > 1 {
                let current = form
                    .store()
                    .get(&item.product_id, entry_type)
                    .map_or(1, |line| line.quantity);
                form.update_quantity(&item.product_id, entry_type, current + item.quantity - 1);
            }
        }
    }

    if !form.submit() {
        bail!("Nothing to submit: the order needs at least one item and a return date");
    }
    let Some(review) = form.review() else {
        bail!("Could not price the order");
    };
    print_review(&review, ctx);

    if args.dry_run {
        form.cancel_review();
        ctx.output.info("Dry run - order not submitted");
        return Ok(());
    }

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt("Submit this return order?")
            .default(false)
            .interact()?;

        if !confirmed {
            form.cancel_review();
            ctx.output.warn("Return order not submitted");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Submitting return order");
    let accepted = form.confirm().await;
    spinner.finish_and_clear();

    let notification = form.take_notification();
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "submitted": accepted,
            "order_id": review.order_id,
            "total": review.pricing.total.display(),
            "notification": notification,
        }));
    } else if let Some(notification) = &notification {
        ctx.output.notification(notification);
    }

    if !accepted {
        bail!(
            "Return order was not accepted after {} attempt(s)",
            form.flow().attempts()
        );
    }
    Ok(())
}

fn print_review(review: &ReviewSummary, ctx: &Context) {
    if ctx.output.is_json() {
        return;
    }

    ctx.output.header("Return Order Review");
    ctx.output.kv("Order", &review.order_id);
    if !review.distributor_name.is_empty() {
        ctx.output.kv("Distributor", &review.distributor_name);
    }
    ctx.output
        .kv("Return date", &review.return_date.format("%d %b %Y").to_string());
    ctx.output
        .kv("Delivery status", review.delivery_status.display_name());
    ctx.output
        .kv("Payment status", review.payment_status.display_name());
    ctx.output.blank();

    let widths = [8, name_width(review), 5, 10, 5, 10];
    ctx.output.table_row(
        &["Type", "Product", "Qty", "Rate", "GST", "Amount"],
        &widths,
    );
    for (index, line) in review.lines.iter().enumerate() {
        if review.starts_group(index) {
            ctx.output.blank();
        }
        let amount = review
            .pricing
            .lines
            .iter()
            .find(|p| p.key == line.key())
            .map(|p| p.subtotal.display())
            .unwrap_or_default();
        let badge = entry_badge(line.entry_type);
        let quantity = line.quantity.to_string();
        let rate = line.per_item_rate.display();
        let gst = format_percent(line.gst_rate);
        ctx.output.table_row(
            &[
                badge.as_str(),
                line.product_name.as_str(),
                quantity.as_str(),
                rate.as_str(),
                gst.as_str(),
                amount.as_str(),
            ],
            &widths,
        );
    }

    ctx.output.blank();
    ctx.output.kv("Subtotal", &review.pricing.subtotal.display());
    ctx.output.kv("GST", &review.pricing.tax_total.display());
    ctx.output.kv("Total", &review.pricing.total.display());
}

fn name_width(review: &ReviewSummary) -> usize {
    review
        .lines
        .iter()
        .map(|l| l.product_name.chars().count())
        .max()
        .unwrap_or(0)
        .max(7)
}
