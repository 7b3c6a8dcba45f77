use herald_core::animation::{AnimationDriverSlot, DriverHandle};
use herald_core::scene::{
    ConfigPayload, ConfigRegistry, NavigationContext, RegistryOp, Route, Scene, SceneRegistry,
    SceneStack,
};
use herald_core::value::Value;
use herald_core::view::navigation::props::keys;
use herald_core::view::navigation::{BarVisibility, NavigationBar, NavigationBarProps};
use herald_core::view::Lifecycle;
use std::rc::Rc;

fn payload(entries: Vec<(&str, Value)>) -> ConfigPayload {
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

fn context(route: &Route, registry: &Rc<SceneRegistry>, driver: &Rc<AnimationDriverSlot>) -> NavigationContext {
    NavigationContext::builder()
        .scene(Rc::new(Scene::new(route.clone())))
        .registry(registry.clone())
        .driver(driver.clone())
        .build()
        .unwrap()
}

#[test]
fn home_screen_scenario() {
    let registry = Rc::new(SceneRegistry::new());
    let d0 = DriverHandle::new("D0");
    let driver = Rc::new(AnimationDriverSlot::new(Some(d0.clone())));
    let r1 = Route::new("R1");

    let mut bar = NavigationBar::mount(
        NavigationBarProps::new().title("Home"),
        context(&r1, &registry, &driver),
    );
    assert_eq!(
        registry.get(&r1),
        Some(payload(vec![
            ("driver", Value::Driver(d0.clone())),
            ("title", Value::from("Home")),
        ]))
    );

    bar.update(NavigationBarProps::new().title("Home").hidden(true));
    assert_eq!(
        registry.get(&r1),
        Some(payload(vec![
            ("driver", Value::Driver(d0.clone())),
            ("title", Value::from("Home")),
            ("hidden", Value::Bool(true)),
        ]))
    );

    let writes = registry.write_count(&r1);
    bar.update(NavigationBarProps::new().title("Home").hidden(true));
    assert_eq!(registry.write_count(&r1), writes);

    bar.deactivate();
    assert!(registry.get(&r1).is_none());
}

#[test]
fn each_equal_run_publishes_once() {
    let registry = Rc::new(SceneRegistry::new());
    let driver = Rc::new(AnimationDriverSlot::default());
    let route = Route::new("R1");
    let titles = ["a", "a", "a", "b", "b", "a", "c", "c", "c", "c"];

    let mut bar = NavigationBar::mount(
        NavigationBarProps::new().title(titles[0]),
        context(&route, &registry, &driver),
    );
    for title in &titles[1..] {
        bar.update(NavigationBarProps::new().title(*title));
    }

    // runs: a, b, a, c
    assert_eq!(registry.write_count(&route), 4);
}

#[test]
fn no_residual_entry_after_unmount() {
    let registry = Rc::new(SceneRegistry::new());
    let driver = Rc::new(AnimationDriverSlot::default());
    let route = Route::new("R1");

    for updates in [0usize, 1, 7] {
        let mut bar = NavigationBar::mount(
            NavigationBarProps::new().title("start"),
            context(&route, &registry, &driver),
        );
        assert!(registry.contains(&route));

        for n in 0..updates {
            bar.update(NavigationBarProps::new().title(format!("title {n}")));
        }

        bar.deactivate();
        assert!(!registry.contains(&route));
    }
}

#[test]
fn clearing_is_idempotent() {
    let registry = SceneRegistry::new();
    let route = Route::new("R1");

    registry.clear_config(&route);
    registry.set_next_config(&route, payload(vec![("title", Value::from("Home"))]));
    registry.clear_config(&route);
    registry.clear_config(&route);

    assert!(!registry.contains(&route));
}

#[test]
fn driver_is_injected_fresh_on_prop_change() {
    let registry = Rc::new(SceneRegistry::new());
    let d0 = DriverHandle::new("D0");
    let d1 = DriverHandle::new("D1");
    let driver = Rc::new(AnimationDriverSlot::new(Some(d0)));
    let route = Route::new("R1");
    let mut bar = NavigationBar::mount(
        NavigationBarProps::new().title("Home"),
        context(&route, &registry, &driver),
    );

    driver.set(Some(d1.clone()));
    assert_eq!(registry.write_count(&route), 1);

    bar.update(NavigationBarProps::new().title("Inbox"));

    assert_eq!(registry.get(&route).unwrap()[keys::DRIVER], Value::Driver(d1));
}

#[test]
fn inner_child_bar_mounted_last_wins() {
    let mut stack = SceneStack::with_journal();
    let route = Route::new("R1");
    stack.push(route.clone());

    stack
        .mount_navigation_bar(&route, NavigationBarProps::new().title("Outer"))
        .unwrap();
    stack
        .mount_navigation_bar(&route, NavigationBarProps::new().title("Inner").child(true))
        .unwrap();

    let active = stack.active_config().unwrap();
    assert_eq!(active[keys::TITLE], Value::from("Inner"));
    assert_eq!(active[keys::CHILD], Value::Bool(true));
    assert_eq!(BarVisibility::of(Some(&active)), BarVisibility::DeferredToChild);

    let journal: Vec<_> = stack
        .registry()
        .journal()
        .into_iter()
        .map(|op| match op {
            RegistryOp::Set(_, payload) => payload[keys::TITLE].clone(),
            RegistryOp::Clear(_) => Value::Null,
        })
        .collect();
    assert_eq!(journal, [Value::from("Outer"), Value::from("Inner")]);
}

#[test]
fn screens_only_touch_their_own_route() {
    let mut stack = SceneStack::with_journal();
    let home = Route::new("home");
    let detail = Route::new("detail");
    stack.push(home.clone());
    stack
        .mount_navigation_bar(&home, NavigationBarProps::new().title("Home"))
        .unwrap();
    stack.push(detail.clone());
    stack
        .mount_navigation_bar(&detail, NavigationBarProps::new().title("Detail").has_history(true))
        .unwrap();

    stack.pop();

    assert_eq!(stack.active_route(), Some(&home));
    assert_eq!(
        stack.active_config().unwrap()[keys::TITLE],
        Value::from("Home")
    );
    assert!(stack
        .registry()
        .journal()
        .iter()
        .all(|op| op.route() == &home || op.route() == &detail));
    assert!(!stack.registry().contains(&detail));
}
