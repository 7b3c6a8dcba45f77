//! Scripted replays of screen and navigation bar lifecycles.
//!
//! A scenario is a TOML list of steps run against a [`SceneStack`]. After
//! each step the bar of the active route is rendered, which makes the
//! publish/retract protocol observable from the command line.
//!
//! ```toml
//! [[steps]]
//! op = "push"
//! route = "home"
//!
//! [[steps]]
//! op = "mount"
//! name = "home-bar"
//! props = { title = "Home" }
//!
//! [[steps]]
//! op = "update"
//! name = "home-bar"
//! props = { title = "Home", hidden = true }
//!
//! [[steps]]
//! op = "driver"
//! name = "slide"
//!
//! [[steps]]
//! op = "unmount"
//! name = "home-bar"
//! ```

use crate::animation::DriverHandle;
use crate::error::NavigationError;
use crate::scene::{Route, SceneStack};
use crate::view::navigation::{NavigationBar, NavigationBarProps, NavigationBarView};
use crate::view::style::{connect_style, Theme};
use crate::view::{Frame, Id, Render};
use anyhow::{anyhow, bail, Context, Error};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Step {
    Push {
        route: Route,
    },
    Pop,
    /// Mounts a named proxy on `route`, or on the active route when omitted.
    Mount {
        name: String,
        route: Option<Route>,
        #[serde(default)]
        props: NavigationBarProps,
    },
    Update {
        name: String,
        #[serde(default)]
        props: NavigationBarProps,
    },
    Unmount {
        name: String,
    },
    /// Swaps the ambient animation driver, `name` omitted clears it.
    Driver {
        name: Option<String>,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Push { route } => write!(f, "push {route}"),
            Step::Pop => f.write_str("pop"),
            Step::Mount {
                name,
                route: Some(route),
                ..
            } => write!(f, "mount {name} on {route}"),
            Step::Mount { name, .. } => write!(f, "mount {name}"),
            Step::Update { name, .. } => write!(f, "update {name}"),
            Step::Unmount { name } => write!(f, "unmount {name}"),
            Step::Driver { name: Some(name) } => write!(f, "driver {name}"),
            Step::Driver { name: None } => f.write_str("driver cleared"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_toml_str(s: &str) -> Result<Scenario, Error> {
        toml::from_str(s).context("can't parse scenario")
    }

    pub fn load(path: &Path) -> Result<Scenario, Error> {
        crate::helpers::load_toml(path)
    }
}

/// Outcome of one replayed step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub step: String,
    pub active_route: Option<Route>,
    pub frame: Frame,
    pub writes: usize,
}

/// Runs scenario steps against a scene stack, resolving proxy names.
pub struct Replay {
    stack: SceneStack,
    theme: Theme,
    proxies: IndexMap<String, Id>,
}

impl Replay {
    pub fn new(theme: Theme) -> Self {
        Replay::with_stack(SceneStack::new(), theme)
    }

    /// Replays against a stack that journals every registry operation.
    pub fn with_journal(theme: Theme) -> Self {
        Replay::with_stack(SceneStack::with_journal(), theme)
    }

    fn with_stack(stack: SceneStack, theme: Theme) -> Self {
        Replay {
            stack,
            theme,
            proxies: IndexMap::new(),
        }
    }

    pub fn stack(&self) -> &SceneStack {
        &self.stack
    }

    pub fn run(&mut self, scenario: &Scenario) -> Result<Vec<StepReport>, Error> {
        let mut reports = Vec::with_capacity(scenario.steps.len());

        for (index, step) in scenario.steps.iter().enumerate() {
            let operations_before = self.stack.registry().operation_count();
            self.apply(step)
                .with_context(|| format!("step {} ({step}) failed", index + 1))?;

            reports.push(StepReport {
                step: step.to_string(),
                active_route: self.stack.active_route().cloned(),
                frame: self.render_active(),
                writes: self.stack.registry().operation_count() - operations_before,
            });
        }

        Ok(reports)
    }

    pub fn apply(&mut self, step: &Step) -> Result<(), Error> {
        tracing::info!(%step, "replaying step");

        match step {
            Step::Push { route } => self.stack.push(route.clone()),
            Step::Pop => {
                let route = self.stack.pop().ok_or(NavigationError::NoActiveScene)?;
                self.forget_dead_proxies();
                tracing::debug!(%route, "popped");
            }
            Step::Mount { name, route, props } => {
                if self.proxies.contains_key(name) {
                    bail!("proxy {name} is already mounted");
                }

                let route = match route {
                    Some(route) => route.clone(),
                    None => self
                        .stack
                        .active_route()
                        .cloned()
                        .ok_or(NavigationError::NoActiveScene)?,
                };
                let context = self.stack.context_for(&route)?;
                let props = connect_style::<NavigationBar>(&self.theme, props.clone());
                let id = self
                    .stack
                    .mount(&route, Box::new(NavigationBar::new(props, context)))?;
                self.proxies.insert(name.clone(), id);
            }
            Step::Update { name, props } => {
                let id = self.proxy_id(name)?;
                let bar = self.stack.participant_mut::<NavigationBar>(id)?;
                bar.update_styled(props.clone(), &self.theme);
            }
            Step::Unmount { name } => {
                let id = self.proxy_id(name)?;
                self.stack.unmount(id)?;
                self.proxies.shift_remove(name);
            }
            Step::Driver { name } => {
                self.stack.set_driver(name.as_ref().map(DriverHandle::new));
            }
        }

        Ok(())
    }

    pub fn render_active(&self) -> Frame {
        let mut frame = Frame::new();
        if self.stack.active_route().is_some() {
            let payload = self.stack.active_config();
            NavigationBarView::from_payload(payload.as_ref(), &self.theme).render(&mut frame);
        }
        frame
    }

    fn proxy_id(&self, name: &str) -> Result<Id, Error> {
        self.proxies
            .get(name)
            .copied()
            .ok_or_else(|| anyhow!("no proxy named {name}"))
    }

    // Proxies of a popped screen are gone from the stack, drop their names.
    fn forget_dead_proxies(&mut self) {
        let stack = &mut self.stack;
        self.proxies
            .retain(|_, id| stack.participant_mut::<NavigationBar>(*id).is_ok());
    }
}
