//! # Control-Message Protocol
//!
//! Discovery announcements travel as bus messages whose second filter is an
//! `offer services` / `want services` tag (see `hostlink_bus::message`). The
//! directed provider response travels as a command call to the requester's
//! control command, carrying a `{command};{provider}` payload.

/// Format the payload a provider sends to a requester's control command.
#[must_use]
pub fn provider_response_payload(command: &str, provider: &str) -> String {
    format!("{command};{provider}")
}

/// Parse a `{command};{provider}` control payload.
///
/// Returns `None` when either part is missing or empty; malformed control
/// traffic is dropped, never an error.
#[must_use]
pub fn parse_provider_response(param: &str) -> Option<(&str, &str)> {
    let (command, provider) = param.split_once(';')?;
    if command.is_empty() || provider.is_empty() {
        return None;
    }
    Some((command, provider))
}
