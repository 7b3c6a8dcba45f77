use super::props::keys;
use crate::scene::ConfigPayload;
use crate::value::Value;
use crate::view::style::{StyleBinding, StyleSheet, Theme, NAVIGATION_BAR_STYLE_NAME};
use crate::view::{Frame, Render};

const BACK_BUTTON: &str = "[<]";
const SEPARATOR: &str = " | ";

/// What the navigator does with its bar for the active route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarVisibility {
    Shown,
    /// The screen asked for `hidden: true`.
    Hidden,
    /// The screen asked for `child: true`: this navigator draws no bar and
    /// the nested navigator's bar takes the config instead.
    DeferredToChild,
}

impl BarVisibility {
    /// `hidden` takes precedence over `child`. No payload means a default,
    /// visible bar.
    pub fn of(payload: Option<&ConfigPayload>) -> BarVisibility {
        let flag = |name: &str| {
            payload
                .and_then(|payload| payload.get(name))
                .and_then(Value::as_bool)
                .unwrap_or(false)
        };

        if flag(keys::HIDDEN) {
            BarVisibility::Hidden
        } else if flag(keys::CHILD) {
            BarVisibility::DeferredToChild
        } else {
            BarVisibility::Shown
        }
    }
}

/// The navigation bar that actually gets drawn.
///
/// It is built from the payload last published for the active route, or
/// from nothing when no proxy configured the screen. The theme entry shared
/// with the proxy always styles it, and a payload `style` map overrides it
/// per key.
///
/// The text rendering is a single line: `left | center | right`, where left
/// is a back button when the screen has history, and center falls back to
/// the title. The style keys `text-transform = "uppercase"` and
/// `border = "bottom"` are honored.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationBarView {
    visibility: BarVisibility,
    title: Option<String>,
    left: Option<String>,
    center: Option<String>,
    right: Option<String>,
    has_history: bool,
    style: StyleSheet,
}

impl NavigationBarView {
    pub fn from_payload(payload: Option<&ConfigPayload>, theme: &Theme) -> Self {
        let text = |name: &str| payload.and_then(|payload| payload.get(name)).and_then(label);
        let mut style = theme.style_for::<NavigationBarView>().cloned().unwrap_or_default();
        if let Some(own) = payload
            .and_then(|payload| payload.get(keys::STYLE))
            .and_then(Value::as_map)
        {
            style.extend(own.iter().map(|(name, value)| (name.clone(), value.clone())));
        }

        NavigationBarView {
            visibility: BarVisibility::of(payload),
            title: text(keys::TITLE),
            left: text(keys::LEFT_COMPONENT),
            center: text(keys::CENTER_COMPONENT),
            right: text(keys::RIGHT_COMPONENT),
            has_history: payload
                .and_then(|payload| payload.get(keys::HAS_HISTORY))
                .and_then(Value::as_bool)
                .unwrap_or(false),
            style,
        }
    }

    pub fn visibility(&self) -> BarVisibility {
        self.visibility
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn style_is(&self, name: &str, expected: &str) -> bool {
        self.style.get(name).and_then(Value::as_str) == Some(expected)
    }

    fn line(&self) -> String {
        let left = if self.has_history {
            Some(BACK_BUTTON.to_string())
        } else {
            self.left.clone()
        };
        let center = self.center.clone().or_else(|| self.title.clone());

        let line = [left, center, self.right.clone()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(SEPARATOR);

        if self.style_is("text-transform", "uppercase") {
            line.to_uppercase()
        } else {
            line
        }
    }
}

fn label(value: &Value) -> Option<String> {
    match value {
        Value::Text(text) => Some(text.clone()),
        Value::Action(action) => Some(action.name().to_string()),
        _ => None,
    }
}

impl Render for NavigationBarView {
    fn render(&self, frame: &mut Frame) {
        if self.visibility != BarVisibility::Shown {
            return;
        }

        let line = self.line();
        let width = line.chars().count();
        frame.push_line(line);

        if self.style_is("border", "bottom") {
            frame.push_line("─".repeat(width.max(1)));
        }
    }
}

impl StyleBinding for NavigationBarView {
    const STYLE_NAME: &'static str = NAVIGATION_BAR_STYLE_NAME;
}
