//! Application callback capabilities.
//!
//! Both traits have blanket impls for plain closures, so free functions,
//! closures and stateful handler objects are all expressible.

/// Callback invoked for every event delivered on a subscribed topic.
///
/// Handlers run on the inbound dispatch task: they must return promptly and
/// must not panic across this boundary.
pub trait EventHandler: Send + Sync {
    /// Handle one delivered event.
    fn on_event(&self, topic: &str, param: &str);
}

impl<F> EventHandler for F
where
    F: Fn(&str, &str) + Send + Sync,
{
    fn on_event(&self, topic: &str, param: &str) {
        self(topic, param)
    }
}

/// Callback answering a command this host offers.
///
/// Runs on the inbound RPC-serving task; the returned string travels back to
/// the remote caller verbatim. Handlers must not block indefinitely.
pub trait CommandHandler: Send + Sync {
    /// Answer one command invocation.
    fn handle(&self, command: &str, param: &str) -> String;
}

impl<F> CommandHandler for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn handle(&self, command: &str, param: &str) -> String {
        self(command, param)
    }
}
