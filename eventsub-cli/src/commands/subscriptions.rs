//! Subscription management commands
//!
//! Lists, creates and deletes EventSub subscriptions through Helix.

use super::{client, ensure_token, expect_reply, info, success};
use crate::error::CliResult;
use colored::Colorize;
use eventsub_client::{ListFilter, SubscriptionList};
use eventsub_config::EventSubSettings;
use eventsub_core::{Condition, EventType, SubscriptionStatus};

/// List subscriptions, one page or all of them
pub async fn list(
    settings: &EventSubSettings,
    filter: ListFilter,
    all: bool,
    after: Option<&str>,
    json: bool,
) -> CliResult<()> {
    let client = client(settings)?;
    ensure_token(&client).await?;

    let reply = if all {
        client.list_all_subscriptions(&filter).await
    } else {
        client.list_subscriptions(&filter, after).await
    };
    let list = expect_reply(reply, "listing subscriptions")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        print_table(&list);
    }
    Ok(())
}

/// Create a webhook subscription
pub async fn create(
    settings: &EventSubSettings,
    event_type: EventType,
    condition: &str,
) -> CliResult<()> {
    let condition = serde_json::from_str(condition)?;
    let condition = Condition::from_value(event_type, condition)?;

    let client = client(settings)?;
    ensure_token(&client).await?;

    info(&format!(
        "Subscribing to {} v{} at {}",
        event_type.as_str().cyan(),
        event_type.version(),
        settings.callback_url
    ));

    let created = expect_reply(
        client.create_subscription(condition).await,
        "creating the subscription",
    )?;

    for subscription in &created.data {
        success(&format!(
            "Created {} ({})",
            subscription.id,
            subscription.status.as_str()
        ));
    }
    Ok(())
}

/// Delete a subscription by id
pub async fn delete(settings: &EventSubSettings, id: &str) -> CliResult<()> {
    let client = client(settings)?;
    ensure_token(&client).await?;

    // The client logs failures; there is no outcome to report here
    client.delete_subscription(id).await;
    info(&format!("Delete requested for {}", id));
    Ok(())
}

/// Parse a `--status` value
pub fn parse_status(value: &str) -> Result<SubscriptionStatus, String> {
    match serde_json::from_value(serde_json::Value::String(value.to_string())) {
        Ok(SubscriptionStatus::Other) | Err(_) => Err(format!("unknown status: {}", value)),
        Ok(status) => Ok(status),
    }
}

fn print_table(list: &SubscriptionList) {
    if list.data.is_empty() {
        println!("No subscriptions found.");
        return;
    }

    println!(
        "{:<38} {:<52} {:<4} {:<38} {:>4}",
        "ID".bold(),
        "TYPE".bold(),
        "VER".bold(),
        "STATUS".bold(),
        "COST".bold()
    );

    for subscription in &list.data {
        let status = subscription.status.as_str();
        let status = if subscription.status.is_active() {
            status.green()
        } else {
            status.yellow()
        };
        println!(
            "{:<38} {:<52} {:<4} {:<38} {:>4}",
            subscription.id,
            subscription.subscription_type,
            subscription.version,
            status,
            subscription.cost
        );
    }

    println!();
    println!(
        "Total: {}  Cost: {}/{}",
        list.total, list.total_cost, list.max_total_cost
    );
    if let Some(cursor) = list.next_cursor() {
        println!("More results: --after {}", cursor);
    }
}
