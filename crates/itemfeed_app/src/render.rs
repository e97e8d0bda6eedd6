use chrono::{DateTime, SecondsFormat, Utc};
use itemfeed_core::{ListPhase, ListViewModel};

/// Renders a view-model snapshot as console lines.
pub fn render(view: &ListViewModel, now: DateTime<Utc>) -> Vec<String> {
    match view.phase {
        ListPhase::Idle => Vec::new(),
        ListPhase::Loading => vec!["Loading items...".to_string()],
        ListPhase::Failed => vec![format!("Error: {}", view.error_message)],
        ListPhase::Loaded => {
            let items = view.items.as_deref().unwrap_or_default();
            let mut lines = Vec::with_capacity(items.len() + 2);
            lines.push(format!(
                "{} items as of {}",
                items.len(),
                now.to_rfc3339_opts(SecondsFormat::Secs, true)
            ));
            lines.push(format!("{:>6}  {}", "listId", "name"));
            lines.extend(
                items
                    .iter()
                    .map(|item| format!("{:>6}  {}", item.group_id, item.name_str())),
            );
            lines
        }
    }
}
