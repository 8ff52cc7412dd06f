use crate::app::View;

/// A user action, as emitted by the rendered controls (`data-action`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Navigate(View),
    Back,
    LoadMore,
    QuickTransfer,
    QuickHistory,
    Refresh,
    SubmitTransfer { recipient: String, amount: String },
}

impl Event {
    /// Parses `"{action} [args...]"`, e.g. `nav history` or `transfer @bob 100`.
    /// A transfer with a missing amount still parses so validation can reject it.
    pub fn parse(input: &str) -> Option<Self> {
        let mut parts = input.split_whitespace();
        let action = parts.next()?;
        let event = match action {
            "nav" => Self::Navigate(parts.next()?.parse().ok()?),
            "back" => Self::Back,
            "more" | "load-more" => Self::LoadMore,
            "quick-transfer" => Self::QuickTransfer,
            "quick-history" => Self::QuickHistory,
            "refresh" => Self::Refresh,
            "transfer" => Self::SubmitTransfer {
                recipient: parts.next().unwrap_or_default().to_string(),
                amount: parts.next().unwrap_or_default().to_string(),
            },
            _ => return None,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(event)
    }
}
