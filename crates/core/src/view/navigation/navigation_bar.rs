use super::NavigationBarProps;
use crate::scene::{NavigationContext, Route};
use crate::view::style::{connect_style, StyleBinding, Theme, NAVIGATION_BAR_STYLE_NAME};
use crate::view::{Frame, Id, Lifecycle, Render, ID_FEEDER};

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Idle,
    Active { route: Route },
    Retired,
}

/// Headless navigation bar a screen mounts to configure the global bar.
///
/// The proxy draws nothing. While active it keeps the registry entry of its
/// route equal to `{driver, ...props}` for its latest props, and removes the
/// entry when deactivated.
///
/// # Protocol
///
/// 1. [`activate`](Lifecycle::activate) resolves the scene once, remembers
///    its route and publishes.
/// 2. [`update`](NavigationBar::update) republishes only when the new props
///    differ structurally from the held ones. The animation driver is read
///    at publish time, so a driver swap alone never publishes.
/// 3. [`deactivate`](Lifecycle::deactivate) clears the route captured in
///    step 1. Dropping an active proxy deactivates it.
///
/// # Example
///
/// ```
/// use herald_core::scene::{NavigationContext, Route, Scene, SceneRegistry};
/// use herald_core::view::navigation::{NavigationBar, NavigationBarProps};
/// use herald_core::view::Lifecycle;
/// use std::rc::Rc;
///
/// let registry = Rc::new(SceneRegistry::new());
/// let context = NavigationContext::new(Rc::new(Scene::new("home")), registry.clone());
///
/// let mut bar = NavigationBar::mount(NavigationBarProps::new().title("Home"), context);
/// assert!(registry.contains(&Route::new("home")));
///
/// bar.deactivate();
/// assert!(registry.is_empty());
/// ```
#[derive(Debug)]
pub struct NavigationBar {
    id: Id,
    props: NavigationBarProps,
    context: NavigationContext,
    state: State,
}

impl NavigationBar {
    /// Creates an inactive proxy. Nothing is published until it is activated.
    pub fn new(props: NavigationBarProps, context: NavigationContext) -> Self {
        NavigationBar {
            id: ID_FEEDER.next(),
            props,
            context,
            state: State::Idle,
        }
    }

    /// Creates the proxy and activates it right away.
    pub fn mount(props: NavigationBarProps, context: NavigationContext) -> Self {
        let mut bar = NavigationBar::new(props, context);
        bar.activate();
        bar
    }

    /// Like [`mount`](NavigationBar::mount), with the theme's navigation bar
    /// style resolved into the `style` option first.
    pub fn mount_styled(props: NavigationBarProps, context: NavigationContext, theme: &Theme) -> Self {
        NavigationBar::mount(connect_style::<NavigationBar>(theme, props), context)
    }

    pub fn props(&self) -> &NavigationBarProps {
        &self.props
    }

    /// Route captured at activation, while active.
    pub fn route(&self) -> Option<&Route> {
        match &self.state {
            State::Active { route } => Some(route),
            State::Idle | State::Retired => None,
        }
    }

    /// Replaces the props and republishes when they changed.
    ///
    /// Returns `true` when a publish happened. Structurally equal props are a
    /// no-op. On an inactive proxy the props are only stored.
    pub fn update(&mut self, next: NavigationBarProps) -> bool {
        if next == self.props {
            tracing::trace!(id = self.id, "navigation bar props unchanged, skipping publish");
            return false;
        }

        self.props = next;

        let Some(route) = self.route().cloned() else {
            tracing::debug!(id = self.id, "navigation bar props stored while inactive");
            return false;
        };

        self.publish(&route);
        true
    }

    /// Same as [`update`](NavigationBar::update), resolving the theme style
    /// the same way [`mount_styled`](NavigationBar::mount_styled) does.
    pub fn update_styled(&mut self, next: NavigationBarProps, theme: &Theme) -> bool {
        self.update(connect_style::<NavigationBar>(theme, next))
    }

    fn publish(&self, route: &Route) {
        let payload = self.props.to_payload(self.context.animation_driver());
        tracing::debug!(id = self.id, %route, options = payload.len(), "publishing navigation bar config");
        self.context.set_next_config(route, payload);
    }
}

impl Lifecycle for NavigationBar {
    fn activate(&mut self) {
        match self.state {
            State::Idle => {
                let route = self.context.scene().route;
                self.publish(&route);
                self.state = State::Active { route };
            }
            State::Active { .. } => {
                tracing::debug!(id = self.id, "navigation bar already active");
            }
            State::Retired => {
                tracing::warn!(id = self.id, "retired navigation bar can't be activated again");
            }
        }
    }

    fn deactivate(&mut self) {
        match std::mem::replace(&mut self.state, State::Retired) {
            State::Active { route } => {
                tracing::debug!(id = self.id, %route, "retracting navigation bar config");
                self.context.clear_config(&route);
            }
            State::Idle => {
                self.state = State::Idle;
                tracing::debug!(id = self.id, "navigation bar deactivated before activation");
            }
            State::Retired => {
                tracing::debug!(id = self.id, "navigation bar already deactivated");
            }
        }
    }

    fn is_active(&self) -> bool {
        matches!(self.state, State::Active { .. })
    }

    fn id(&self) -> Id {
        self.id
    }
}

impl Render for NavigationBar {
    fn render(&self, _frame: &mut Frame) {}
}

impl StyleBinding for NavigationBar {
    const STYLE_NAME: &'static str = NAVIGATION_BAR_STYLE_NAME;
}

impl Drop for NavigationBar {
    fn drop(&mut self) {
        if self.is_active() {
            self.deactivate();
        }
    }
}
