//! Theme lookup shared by the navigation bar proxy and the drawn bar.
//!
//! The proxy and [`NavigationBarView`](crate::view::navigation::NavigationBarView)
//! represent the same logical bar, so both register under
//! [`NAVIGATION_BAR_STYLE_NAME`]. A theme author styles "the navigation bar"
//! once and the entry applies whichever component ends up drawn: the proxy's
//! payload when a screen configures its bar, the bare view otherwise.

use crate::value::{Options, Value};
use crate::view::navigation::props::keys;
use crate::view::navigation::NavigationBarProps;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const NAVIGATION_BAR_STYLE_NAME: &str = "herald.ui.navigation.NavigationBar";

/// Registers a component under a theme style name.
pub trait StyleBinding {
    const STYLE_NAME: &'static str;
}

pub type StyleSheet = Options;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme {
    styles: IndexMap<String, StyleSheet>,
}

impl Theme {
    pub fn new() -> Self {
        Theme::default()
    }

    pub fn with_style(mut self, name: impl Into<String>, sheet: StyleSheet) -> Self {
        self.insert(name, sheet);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, sheet: StyleSheet) -> Option<StyleSheet> {
        self.styles.insert(name.into(), sheet)
    }

    pub fn style(&self, name: &str) -> Option<&StyleSheet> {
        self.styles.get(name)
    }

    pub fn style_for<C: StyleBinding>(&self) -> Option<&StyleSheet> {
        self.style(C::STYLE_NAME)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// Resolves the theme entry of `C` into the `style` option of `props`.
///
/// Keys from the props' own `style` map win over the theme's. Without a
/// theme entry the props are returned untouched.
pub fn connect_style<C: StyleBinding>(theme: &Theme, mut props: NavigationBarProps) -> NavigationBarProps {
    let Some(sheet) = theme.style_for::<C>() else {
        return props;
    };

    let mut style = sheet.clone();
    if let Some(own) = props.get(keys::STYLE).and_then(Value::as_map) {
        style.extend(own.iter().map(|(name, value)| (name.clone(), value.clone())));
    }

    props.options.insert(keys::STYLE.to_string(), Value::Map(style));
    props
}
