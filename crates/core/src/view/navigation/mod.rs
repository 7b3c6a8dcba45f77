//! Navigation bar components.
//!
//! The navigation bar is one logical UI element split over two components:
//! - [`navigation_bar`]: the headless proxy a screen mounts to describe its
//!   bar. It renders nothing and only publishes into the scene registry.
//! - [`navigation_bar_view`]: the bar that is actually drawn, fed with the
//!   payload last published for the active route.
//!
//! Both share one style name, see [`crate::view::style`].

pub mod navigation_bar;
pub mod navigation_bar_view;
pub mod props;

pub use self::navigation_bar::NavigationBar;
pub use self::navigation_bar_view::{BarVisibility, NavigationBarView};
pub use self::props::NavigationBarProps;
