//! Animation driver handles and the ambient slot that exposes the current one.
//!
//! The proxy never owns a driver. It reads whatever driver is current at the
//! moment it publishes, so swapping the driver is picked up by the next
//! prop-driven publish without triggering one on its own.

use crate::view::{Id, ID_FEEDER};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Opaque reference to an animation driver.
///
/// Two handles are equal when they refer to the same driver instance, names
/// are informational only.
#[derive(Debug, Clone)]
pub struct DriverHandle {
    id: Id,
    name: Rc<str>,
}

impl DriverHandle {
    pub fn new(name: impl Into<String>) -> Self {
        DriverHandle {
            id: ID_FEEDER.next(),
            name: Rc::from(name.into()),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for DriverHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for DriverHandle {}

impl fmt::Display for DriverHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "driver:{}#{}", self.name, self.id)
    }
}

/// Source of the animation driver injected into published payloads.
pub trait DriverSource {
    fn animation_driver(&self) -> Option<DriverHandle>;
}

/// Swappable holder for the driver of the screen transition in progress.
#[derive(Debug, Default)]
pub struct AnimationDriverSlot {
    current: RefCell<Option<DriverHandle>>,
}

impl AnimationDriverSlot {
    pub fn new(driver: Option<DriverHandle>) -> Self {
        AnimationDriverSlot {
            current: RefCell::new(driver),
        }
    }

    /// Replaces the current driver and returns the previous one.
    pub fn set(&self, driver: Option<DriverHandle>) -> Option<DriverHandle> {
        tracing::debug!(driver = ?driver, "animation driver swapped");
        self.current.replace(driver)
    }

    pub fn get(&self) -> Option<DriverHandle> {
        self.current.borrow().clone()
    }
}

impl DriverSource for AnimationDriverSlot {
    fn animation_driver(&self) -> Option<DriverHandle> {
        self.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_compare_by_identity() {
        let first = DriverHandle::new("slide");
        let second = DriverHandle::new("slide");

        assert_eq!(first, first.clone());
        assert_ne!(first, second);
    }

    #[test]
    fn slot_returns_previous_driver_on_swap() {
        let d0 = DriverHandle::new("d0");
        let d1 = DriverHandle::new("d1");
        let slot = AnimationDriverSlot::new(Some(d0.clone()));

        let previous = slot.set(Some(d1.clone()));

        assert_eq!(previous, Some(d0));
        assert_eq!(slot.animation_driver(), Some(d1));
        assert_eq!(slot.set(None).map(|d| d.name().to_string()), Some("d1".to_string()));
        assert!(slot.animation_driver().is_none());
    }
}
