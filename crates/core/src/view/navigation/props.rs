use crate::animation::DriverHandle;
use crate::scene::ConfigPayload;
use crate::value::{ActionRef, Options, Value};
use serde::Deserialize;

/// Option names understood by the navigation bar view.
pub mod keys {
    pub const DRIVER: &str = "driver";
    pub const HIDDEN: &str = "hidden";
    pub const CHILD: &str = "child";
    pub const TITLE: &str = "title";
    pub const LEFT_COMPONENT: &str = "leftComponent";
    pub const CENTER_COMPONENT: &str = "centerComponent";
    pub const RIGHT_COMPONENT: &str = "rightComponent";
    pub const HAS_HISTORY: &str = "hasHistory";
    pub const NAVIGATE_BACK: &str = "navigateBack";
    pub const STYLE_NAME: &str = "styleName";
    pub const STYLE: &str = "style";
}

/// Props of a navigation bar proxy.
///
/// `options` holds whatever the bar view accepts, in declaration order.
/// `hidden` hides the bar for this screen. `child` asks the navigator to
/// hide its own bar and let a nested navigator's bar show this config.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NavigationBarProps {
    #[serde(flatten)]
    pub options: Options,
    pub hidden: Option<bool>,
    pub child: Option<bool>,
}

impl NavigationBarProps {
    pub fn new() -> Self {
        NavigationBarProps::default()
    }

    pub fn option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    pub fn title(self, title: impl Into<String>) -> Self {
        self.option(keys::TITLE, Value::Text(title.into()))
    }

    pub fn left_component(self, label: impl Into<String>) -> Self {
        self.option(keys::LEFT_COMPONENT, Value::Text(label.into()))
    }

    pub fn center_component(self, label: impl Into<String>) -> Self {
        self.option(keys::CENTER_COMPONENT, Value::Text(label.into()))
    }

    pub fn right_component(self, label: impl Into<String>) -> Self {
        self.option(keys::RIGHT_COMPONENT, Value::Text(label.into()))
    }

    pub fn has_history(self, has_history: bool) -> Self {
        self.option(keys::HAS_HISTORY, has_history)
    }

    pub fn navigate_back(self, action: ActionRef) -> Self {
        self.option(keys::NAVIGATE_BACK, action)
    }

    pub fn style_name(self, style_name: impl Into<String>) -> Self {
        self.option(keys::STYLE_NAME, Value::Text(style_name.into()))
    }

    pub fn style(self, style: Options) -> Self {
        self.option(keys::STYLE, style)
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = Some(hidden);
        self
    }

    pub fn child(mut self, child: bool) -> Self {
        self.child = Some(child);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.unwrap_or(false)
    }

    pub fn is_child(&self) -> bool {
        self.child.unwrap_or(false)
    }

    /// Builds the payload published for these props.
    ///
    /// `driver` comes first, then every option in order, then the `hidden`
    /// and `child` flags when set. An option named `driver` replaces the
    /// injected driver but keeps the leading position.
    pub fn to_payload(&self, driver: Option<DriverHandle>) -> ConfigPayload {
        let mut payload = ConfigPayload::with_capacity(self.options.len() + 3);
        payload.insert(
            keys::DRIVER.to_string(),
            driver.map(Value::Driver).unwrap_or_default(),
        );
        payload.extend(
            self.options
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );

        if let Some(hidden) = self.hidden {
            payload.insert(keys::HIDDEN.to_string(), Value::Bool(hidden));
        }

        if let Some(child) = self.child {
            payload.insert(keys::CHILD.to_string(), Value::Bool(child));
        }

        payload
    }
}
