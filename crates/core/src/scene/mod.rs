//! Scene resolution and the capability object threaded into proxies.
//!
//! A proxy needs three things from the navigation tree hosting it: which
//! scene it sits in, a registry to publish into, and optionally the current
//! animation driver. [`NavigationContext`] bundles them so the requirement is
//! visible at construction instead of being looked up implicitly.

pub mod registry;
pub mod stack;

pub use self::registry::{ConfigPayload, ConfigRegistry, RegistryOp, SceneRegistry};
pub use self::stack::SceneStack;

use crate::animation::{DriverHandle, DriverSource};
use crate::error::NavigationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Opaque key of a navigation stack entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(String);

impl Route {
    pub fn new(key: impl Into<String>) -> Self {
        Route(key.into())
    }

    pub fn key(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Route {
    fn from(key: &str) -> Self {
        Route::new(key)
    }
}

impl From<String> for Route {
    fn from(key: String) -> Self {
        Route(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub route: Route,
}

impl Scene {
    pub fn new(route: impl Into<Route>) -> Self {
        Scene {
            route: route.into(),
        }
    }
}

/// Answers "which scene is this component inside".
///
/// The answer must not change for the lifetime of one proxy.
pub trait SceneResolver {
    fn scene(&self) -> Scene;
}

impl SceneResolver for Scene {
    fn scene(&self) -> Scene {
        self.clone()
    }
}

impl<F> SceneResolver for F
where
    F: Fn() -> Scene,
{
    fn scene(&self) -> Scene {
        self()
    }
}

/// Capabilities a navigation bar proxy requires from its host.
#[derive(Clone)]
pub struct NavigationContext {
    scene: Rc<dyn SceneResolver>,
    registry: Rc<dyn ConfigRegistry>,
    driver: Option<Rc<dyn DriverSource>>,
}

impl NavigationContext {
    pub fn new(scene: Rc<dyn SceneResolver>, registry: Rc<dyn ConfigRegistry>) -> Self {
        NavigationContext {
            scene,
            registry,
            driver: None,
        }
    }

    pub fn with_driver(mut self, driver: Rc<dyn DriverSource>) -> Self {
        self.driver = Some(driver);
        self
    }

    pub fn builder() -> NavigationContextBuilder {
        NavigationContextBuilder::default()
    }

    pub fn scene(&self) -> Scene {
        self.scene.scene()
    }

    pub fn animation_driver(&self) -> Option<DriverHandle> {
        self.driver.as_ref().and_then(|source| source.animation_driver())
    }

    pub fn set_next_config(&self, route: &Route, payload: ConfigPayload) {
        self.registry.set_next_config(route, payload);
    }

    pub fn clear_config(&self, route: &Route) {
        self.registry.clear_config(route);
    }
}

impl fmt::Debug for NavigationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationContext")
            .field("has_driver", &self.driver.is_some())
            .finish_non_exhaustive()
    }
}

/// Assembles a [`NavigationContext`] from separately supplied capabilities.
///
/// [`build`](NavigationContextBuilder::build) fails when the scene resolver
/// or the registry is missing. The driver source is optional: without it the
/// published `driver` field is `Null`.
#[derive(Default)]
pub struct NavigationContextBuilder {
    scene: Option<Rc<dyn SceneResolver>>,
    registry: Option<Rc<dyn ConfigRegistry>>,
    driver: Option<Rc<dyn DriverSource>>,
}

impl NavigationContextBuilder {
    pub fn scene(mut self, scene: Rc<dyn SceneResolver>) -> Self {
        self.scene = Some(scene);
        self
    }

    pub fn registry(mut self, registry: Rc<dyn ConfigRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn driver(mut self, driver: Rc<dyn DriverSource>) -> Self {
        self.driver = Some(driver);
        self
    }

    pub fn build(self) -> Result<NavigationContext, NavigationError> {
        let scene = self
            .scene
            .ok_or(NavigationError::MissingCapability("scene resolver"))?;
        let registry = self
            .registry
            .ok_or(NavigationError::MissingCapability("config registry"))?;

        Ok(NavigationContext {
            scene,
            registry,
            driver: self.driver,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationDriverSlot;

    #[test]
    fn builder_requires_scene_resolver() {
        let registry: Rc<dyn ConfigRegistry> = Rc::new(SceneRegistry::new());
        let err = NavigationContext::builder()
            .registry(registry)
            .build()
            .unwrap_err();

        assert_eq!(err, NavigationError::MissingCapability("scene resolver"));
    }

    #[test]
    fn builder_requires_registry() {
        let err = NavigationContext::builder()
            .scene(Rc::new(Scene::new("home")))
            .build()
            .unwrap_err();

        assert_eq!(err, NavigationError::MissingCapability("config registry"));
    }

    #[test]
    fn driver_is_optional() {
        let context = NavigationContext::builder()
            .scene(Rc::new(Scene::new("home")))
            .registry(Rc::new(SceneRegistry::new()))
            .build()
            .unwrap();

        assert_eq!(context.scene().route, Route::new("home"));
        assert!(context.animation_driver().is_none());
    }

    #[test]
    fn closures_resolve_scenes() {
        let context = NavigationContext::new(
            Rc::new(|| Scene::new("settings")),
            Rc::new(SceneRegistry::new()),
        )
        .with_driver(Rc::new(AnimationDriverSlot::default()));

        assert_eq!(context.scene(), Scene::new("settings"));
    }
}
