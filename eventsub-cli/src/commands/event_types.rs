//! List the subscription types this tool understands.

use colored::Colorize;
use eventsub_core::EventType;

pub fn run(json: bool) {
    if json {
        let types: Vec<_> = EventType::ALL
            .iter()
            .map(|t| serde_json::json!({ "type": t.as_str(), "version": t.version() }))
            .collect();
        println!("{}", serde_json::Value::Array(types));
        return;
    }

    println!("{}", "Supported subscription types:".bright_cyan().bold());
    for event_type in EventType::ALL {
        println!(
            "  {:<48} {}",
            event_type.as_str(),
            format!("v{}", event_type.version()).dimmed()
        );
    }
}
