//! Tab selection primitive.
//!
//! Ownership of the active key is decided once at construction: a controlled
//! set mirrors the value supplied by its owner, an uncontrolled set owns the
//! key after initialization. Every selection goes through [`Tabs::select_tab`].

use std::fmt;
use std::sync::Arc;

use aires_logging::aires_debug;

/// Callback invoked with the newly selected key.
#[derive(Clone)]
pub struct ChangeHandler(Arc<dyn Fn(&str) + Send + Sync>);

impl ChangeHandler {
    pub fn new(handler: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self(Arc::new(handler))
    }

    fn call(&self, key: &str) {
        (self.0)(key);
    }
}

impl fmt::Debug for ChangeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChangeHandler(..)")
    }
}

impl PartialEq for ChangeHandler {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabMode {
    /// The owner supplies `value`; changes to it are forced onto the active key.
    Controlled { value: String },
    /// The set owns its active key.
    Uncontrolled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabTrigger {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerView {
    pub key: String,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tabs {
    mode: TabMode,
    active: String,
    triggers: Vec<TabTrigger>,
    on_change: Option<ChangeHandler>,
}

impl Tabs {
    /// Build from optional `value`/`default_value`. Supplying `value` makes the
    /// set controlled. The initial active key is `value` when non-empty, else
    /// the default, else the empty key.
    pub fn new(value: Option<&str>, default_value: Option<&str>) -> Self {
        let default_value = default_value.unwrap_or_default();
        match value {
            Some("") => {
                let mut tabs = Self::controlled("");
                tabs.active = default_value.to_string();
                tabs
            }
            Some(value) => Self::controlled(value),
            None => Self::uncontrolled(default_value),
        }
    }

    pub fn controlled(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            active: value.clone(),
            mode: TabMode::Controlled { value },
            triggers: Vec::new(),
            on_change: None,
        }
    }

    pub fn uncontrolled(default_value: impl Into<String>) -> Self {
        Self {
            active: default_value.into(),
            mode: TabMode::Uncontrolled,
            triggers: Vec::new(),
            on_change: None,
        }
    }

    pub fn with_trigger(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.triggers.push(TabTrigger {
            key: key.into(),
            label: label.into(),
        });
        self
    }

    pub fn on_change(mut self, handler: ChangeHandler) -> Self {
        self.on_change = Some(handler);
        self
    }

    pub fn mode(&self) -> &TabMode {
        &self.mode
    }

    pub fn active_key(&self) -> &str {
        &self.active
    }

    pub fn select_tab(&mut self, key: &str) {
        aires_debug!("tab selected: {key}");
        self.active = key.to_string();
        if let Some(handler) = &self.on_change {
            handler.call(key);
        }
    }

    /// Mirror a new externally supplied value. Only a changed value is applied;
    /// uncontrolled sets ignore the call. Returns whether the active key moved.
    pub fn sync_value(&mut self, value: &str) -> bool {
        match &mut self.mode {
            TabMode::Controlled { value: current } if current.as_str() != value => {
                *current = value.to_string();
                let changed = self.active != value;
                self.active = value.to_string();
                changed
            }
            TabMode::Controlled { .. } => false,
            TabMode::Uncontrolled => {
                aires_debug!("ignoring external tab value {value:?} on uncontrolled tabs");
                false
            }
        }
    }

    pub fn is_content_visible(&self, key: &str) -> bool {
        self.active == key
    }

    pub fn triggers(&self) -> Vec<TriggerView> {
        self.triggers
            .iter()
            .map(|trigger| TriggerView {
                key: trigger.key.clone(),
                label: trigger.label.clone(),
                active: trigger.key == self.active,
            })
            .collect()
    }

    pub fn active_trigger(&self) -> Option<&TabTrigger> {
        self.triggers.iter().find(|trigger| trigger.key == self.active)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::{ChangeHandler, TabMode, Tabs};

    fn abc(tabs: Tabs) -> Tabs {
        tabs.with_trigger("a", "A")
            .with_trigger("b", "B")
            .with_trigger("c", "C")
    }

    #[test]
    fn controlled_value_decides_visibility() {
        let mut tabs = abc(Tabs::new(Some("b"), Some("a")));
        assert!(matches!(tabs.mode(), TabMode::Controlled { .. }));
        let visible: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .filter(|key| tabs.is_content_visible(key))
            .collect();
        assert_eq!(visible, vec!["b"]);

        assert!(tabs.sync_value("c"));
        let visible: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .filter(|key| tabs.is_content_visible(key))
            .collect();
        assert_eq!(visible, vec!["c"]);
    }

    #[test]
    fn uncontrolled_falls_back_to_default_then_empty() {
        assert_eq!(Tabs::new(None, Some("a")).active_key(), "a");
        assert_eq!(Tabs::new(None, None).active_key(), "");
        assert_eq!(Tabs::new(None, None).mode(), &TabMode::Uncontrolled);
    }

    #[test]
    fn empty_value_starts_on_default() {
        let mut tabs = abc(Tabs::new(Some(""), Some("a")));
        assert_eq!(
            tabs.mode(),
            &TabMode::Controlled {
                value: String::new()
            }
        );
        assert_eq!(tabs.active_key(), "a");
        assert!(tabs.is_content_visible("a"));

        // The same empty value again does not clear the selection.
        assert!(!tabs.sync_value(""));
        assert_eq!(tabs.active_key(), "a");

        assert!(tabs.sync_value("b"));
        assert_eq!(tabs.active_key(), "b");

        assert_eq!(Tabs::new(Some(""), None).active_key(), "");
    }

    #[test]
    fn uncontrolled_ignores_external_value() {
        let mut tabs = abc(Tabs::uncontrolled("a"));
        assert!(!tabs.sync_value("c"));
        assert_eq!(tabs.active_key(), "a");
    }

    #[test]
    fn unchanged_external_value_does_not_override_selection() {
        let mut tabs = abc(Tabs::controlled("a"));
        tabs.select_tab("b");
        assert!(!tabs.sync_value("a"));
        assert_eq!(tabs.active_key(), "b");
    }

    #[test]
    fn select_notifies_handler() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut tabs = abc(Tabs::uncontrolled("a"))
            .on_change(ChangeHandler::new(move |key| sink.lock().unwrap().push(key.to_string())));

        tabs.select_tab("c");
        tabs.select_tab("b");

        assert_eq!(*seen.lock().unwrap(), vec!["c".to_string(), "b".to_string()]);
        assert_eq!(tabs.active_key(), "b");
    }

    #[test]
    fn exactly_one_trigger_active_for_declared_key() {
        let tabs = abc(Tabs::controlled("b"));
        let active: Vec<_> = tabs
            .triggers()
            .into_iter()
            .filter(|t| t.active)
            .map(|t| t.key)
            .collect();
        assert_eq!(active, vec!["b".to_string()]);
        assert_eq!(tabs.active_trigger().map(|t| t.label.as_str()), Some("B"));
    }

    #[test]
    fn unknown_key_activates_no_trigger() {
        let tabs = abc(Tabs::controlled("z"));
        assert!(tabs.triggers().iter().all(|t| !t.active));
        assert!(tabs.active_trigger().is_none());
    }
}
