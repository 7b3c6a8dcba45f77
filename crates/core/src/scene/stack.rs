use super::{ConfigPayload, NavigationContext, Route, Scene, SceneRegistry};
use crate::animation::{AnimationDriverSlot, DriverHandle};
use crate::error::NavigationError;
use crate::view::navigation::{NavigationBar, NavigationBarProps};
use crate::view::{Id, Lifecycle};
use std::rc::Rc;

struct Screen {
    route: Route,
    participants: Vec<Box<dyn Lifecycle>>,
}

/// Minimal scene manager hosting screens and their lifecycle participants.
///
/// Each screen is keyed by a route. Participants mounted on a screen are
/// activated on mount and deactivated, most recent first, when their screen
/// is popped or the stack is dropped. The stack owns the registry proxies
/// publish into and the ambient animation driver slot.
///
/// # Structure
///
/// ```text
/// SceneStack
///   ├── SceneRegistry          (route → payload, shared with every context)
///   ├── AnimationDriverSlot    (current driver, read at publish time)
///   └── screens (bottom → top)
///       └── Screen { route, participants: [Box<dyn Lifecycle>] }
/// ```
pub struct SceneStack {
    screens: Vec<Screen>,
    registry: Rc<SceneRegistry>,
    driver: Rc<AnimationDriverSlot>,
}

impl SceneStack {
    pub fn new() -> Self {
        SceneStack::with_registry(SceneRegistry::new())
    }

    /// A stack whose registry journals every set and clear.
    pub fn with_journal() -> Self {
        SceneStack::with_registry(SceneRegistry::with_journal())
    }

    fn with_registry(registry: SceneRegistry) -> Self {
        SceneStack {
            screens: Vec::new(),
            registry: Rc::new(registry),
            driver: Rc::new(AnimationDriverSlot::default()),
        }
    }

    pub fn registry(&self) -> &Rc<SceneRegistry> {
        &self.registry
    }

    pub fn driver(&self) -> Option<DriverHandle> {
        self.driver.get()
    }

    /// Swaps the ambient animation driver, returning the previous one.
    pub fn set_driver(&self, driver: Option<DriverHandle>) -> Option<DriverHandle> {
        self.driver.set(driver)
    }

    pub fn push(&mut self, route: Route) {
        tracing::debug!(%route, depth = self.screens.len() + 1, "screen pushed");
        self.screens.push(Screen {
            route,
            participants: Vec::new(),
        });
    }

    /// Removes the top screen, deactivating its participants in reverse
    /// mount order.
    pub fn pop(&mut self) -> Option<Route> {
        let mut screen = self.screens.pop()?;

        for mut participant in screen.participants.drain(..).rev() {
            participant.deactivate();
        }

        tracing::debug!(route = %screen.route, depth = self.screens.len(), "screen popped");
        Some(screen.route)
    }

    pub fn active_route(&self) -> Option<&Route> {
        self.screens.last().map(|screen| &screen.route)
    }

    pub fn depth(&self) -> usize {
        self.screens.len()
    }

    pub fn contains(&self, route: &Route) -> bool {
        self.screens.iter().any(|screen| &screen.route == route)
    }

    /// Payload last published for the active route.
    pub fn active_config(&self) -> Option<ConfigPayload> {
        self.active_route().and_then(|route| self.registry.get(route))
    }

    /// Capabilities for a component rendered inside the screen of `route`.
    pub fn context_for(&self, route: &Route) -> Result<NavigationContext, NavigationError> {
        if !self.contains(route) {
            return Err(NavigationError::RouteNotOnStack(route.clone()));
        }

        let registry = Rc::clone(&self.registry);
        let driver = Rc::clone(&self.driver);

        NavigationContext::builder()
            .scene(Rc::new(Scene::new(route.clone())))
            .registry(registry)
            .driver(driver)
            .build()
    }

    /// Activates `participant` and attaches it to the topmost screen of
    /// `route`.
    pub fn mount(
        &mut self,
        route: &Route,
        mut participant: Box<dyn Lifecycle>,
    ) -> Result<Id, NavigationError> {
        let screen = self
            .screens
            .iter_mut()
            .rev()
            .find(|screen| &screen.route == route)
            .ok_or_else(|| NavigationError::RouteNotOnStack(route.clone()))?;

        participant.activate();
        let id = participant.id();
        screen.participants.push(participant);

        Ok(id)
    }

    pub fn mount_navigation_bar(
        &mut self,
        route: &Route,
        props: NavigationBarProps,
    ) -> Result<Id, NavigationError> {
        let context = self.context_for(route)?;
        self.mount(route, Box::new(NavigationBar::new(props, context)))
    }

    pub fn participant_mut<T: Lifecycle>(&mut self, id: Id) -> Result<&mut T, NavigationError> {
        let participant = self
            .screens
            .iter_mut()
            .flat_map(|screen| screen.participants.iter_mut())
            .find(|participant| participant.id() == id)
            .ok_or(NavigationError::UnknownParticipant(id))?;

        participant
            .downcast_mut::<T>()
            .ok_or(NavigationError::UnexpectedParticipant(id))
    }

    /// Detaches a participant from its screen and deactivates it.
    pub fn unmount(&mut self, id: Id) -> Result<(), NavigationError> {
        for screen in &mut self.screens {
            if let Some(index) = screen
                .participants
                .iter()
                .position(|participant| participant.id() == id)
            {
                let mut participant = screen.participants.remove(index);
                participant.deactivate();
                return Ok(());
            }
        }

        Err(NavigationError::UnknownParticipant(id))
    }
}

impl Default for SceneStack {
    fn default() -> Self {
        SceneStack::new()
    }
}

impl Drop for SceneStack {
    fn drop(&mut self) {
        while self.pop().is_some() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use crate::view::navigation::props::keys;

    struct Probe {
        id: Id,
        active: bool,
        log: Rc<std::cell::RefCell<Vec<String>>>,
        name: &'static str,
    }

    impl Probe {
        fn boxed(name: &'static str, log: &Rc<std::cell::RefCell<Vec<String>>>) -> Box<dyn Lifecycle> {
            Box::new(Probe {
                id: crate::view::ID_FEEDER.next(),
                active: false,
                log: Rc::clone(log),
                name,
            })
        }
    }

    impl Lifecycle for Probe {
        fn activate(&mut self) {
            self.active = true;
            self.log.borrow_mut().push(format!("+{}", self.name));
        }

        fn deactivate(&mut self) {
            self.active = false;
            self.log.borrow_mut().push(format!("-{}", self.name));
        }

        fn is_active(&self) -> bool {
            self.active
        }

        fn id(&self) -> Id {
            self.id
        }
    }

    #[test]
    fn pop_deactivates_in_reverse_order() {
        let log = Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut stack = SceneStack::new();
        let route = Route::new("home");
        stack.push(route.clone());
        stack.mount(&route, Probe::boxed("a", &log)).unwrap();
        stack.mount(&route, Probe::boxed("b", &log)).unwrap();

        assert_eq!(stack.pop(), Some(route));
        assert_eq!(*log.borrow(), ["+a", "+b", "-b", "-a"]);
    }

    #[test]
    fn mount_on_unknown_route_fails() {
        let log = Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut stack = SceneStack::new();

        let err = stack.mount(&Route::new("nowhere"), Probe::boxed("a", &log)).unwrap_err();

        assert_eq!(err, NavigationError::RouteNotOnStack(Route::new("nowhere")));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn navigation_bar_entry_follows_screen_lifetime() {
        let mut stack = SceneStack::new();
        let route = Route::new("home");
        stack.push(route.clone());

        stack
            .mount_navigation_bar(&route, NavigationBarProps::new().title("Home"))
            .unwrap();
        assert_eq!(
            stack.active_config().unwrap()[keys::TITLE],
            Value::from("Home")
        );

        stack.pop();
        assert!(stack.registry().is_empty());
        assert!(stack.active_config().is_none());
    }

    #[test]
    fn plain_stack_keeps_no_write_history() {
        let mut stack = SceneStack::new();
        let route = Route::new("home");
        stack.push(route.clone());
        let id = stack
            .mount_navigation_bar(&route, NavigationBarProps::new().title("Home"))
            .unwrap();

        let bar = stack.participant_mut::<NavigationBar>(id).unwrap();
        for count in 0..50 {
            bar.update(NavigationBarProps::new().title(format!("Inbox ({count})")));
        }

        assert_eq!(stack.registry().write_count(&route), 51);
        assert_eq!(stack.registry().journal_len(), 0);

        let journaled = SceneStack::with_journal();
        assert!(journaled.registry().is_journaling());
    }

    #[test]
    fn typed_access_to_mounted_bar() {
        let mut stack = SceneStack::new();
        let route = Route::new("home");
        stack.push(route.clone());
        let id = stack
            .mount_navigation_bar(&route, NavigationBarProps::new().title("Home"))
            .unwrap();

        let bar = stack.participant_mut::<NavigationBar>(id).unwrap();
        assert!(bar.update(NavigationBarProps::new().title("Inbox")));

        assert_eq!(stack.registry().write_count(&route), 2);
        assert!(matches!(
            stack.participant_mut::<NavigationBar>(id + 1_000_000),
            Err(NavigationError::UnknownParticipant(_))
        ));
    }

    #[test]
    fn downcast_to_wrong_type_is_reported() {
        let log = Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut stack = SceneStack::new();
        let route = Route::new("home");
        stack.push(route.clone());
        let id = stack.mount(&route, Probe::boxed("a", &log)).unwrap();

        assert_eq!(
            stack.participant_mut::<NavigationBar>(id).unwrap_err(),
            NavigationError::UnexpectedParticipant(id)
        );
    }

    #[test]
    fn unmount_clears_entry_and_forgets_participant() {
        let mut stack = SceneStack::new();
        let route = Route::new("home");
        stack.push(route.clone());
        let id = stack
            .mount_navigation_bar(&route, NavigationBarProps::new().title("Home"))
            .unwrap();

        stack.unmount(id).unwrap();

        assert!(!stack.registry().contains(&route));
        assert_eq!(stack.unmount(id), Err(NavigationError::UnknownParticipant(id)));
    }

    #[test]
    fn context_reads_current_driver() {
        let mut stack = SceneStack::new();
        let route = Route::new("home");
        stack.push(route.clone());
        let driver = DriverHandle::new("slide");
        stack.set_driver(Some(driver.clone()));

        let context = stack.context_for(&route).unwrap();

        assert_eq!(context.animation_driver(), Some(driver));
        assert_eq!(stack.driver().map(|d| d.name().to_string()), Some("slide".into()));
        assert!(stack.context_for(&Route::new("gone")).is_err());
    }

    #[test]
    fn dropping_stack_retracts_everything() {
        let registry = {
            let mut stack = SceneStack::new();
            for key in ["home", "inbox"] {
                let route = Route::new(key);
                stack.push(route.clone());
                stack
                    .mount_navigation_bar(&route, NavigationBarProps::new().title(key))
                    .unwrap();
            }
            assert_eq!(stack.registry().len(), 2);
            Rc::clone(stack.registry())
        };

        assert!(registry.is_empty());
    }
}
