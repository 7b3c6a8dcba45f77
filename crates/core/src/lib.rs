//! Headless navigation bar configuration for screen stacks.
//!
//! Screens describe their navigation bar by mounting a
//! [`NavigationBar`](view::navigation::NavigationBar) proxy. The proxy draws
//! nothing: it publishes `{driver, ...props}` into the scene registry under
//! its route while mounted, and retracts it on teardown. The navigator then
//! feeds the payload of the active route to the
//! [`NavigationBarView`](view::navigation::NavigationBarView) it draws.
//!
//! - [`scene`]: routes, the capability context handed to proxies, the
//!   registry and a minimal scene stack hosting screens
//! - [`view`]: lifecycle participants, the proxy, the drawn bar, styling
//! - [`value`]: option values and their equality rules
//! - [`animation`]: driver handles and the ambient driver slot
//! - [`scenario`]: scripted replays used by the `herald` binary
//! - [`settings`], [`logging`]: configuration and structured logs

pub mod animation;
pub mod error;
pub mod helpers;
pub mod logging;
pub mod scenario;
pub mod scene;
pub mod settings;
pub mod value;
pub mod view;

pub use crate::error::NavigationError;
