use super::Id;
use downcast_rs::{impl_downcast, Downcast};

/// A unit mounted on a screen that exists for its lifecycle side effects.
///
/// The hosting screen calls [`activate`](Lifecycle::activate) once when the
/// participant is mounted and [`deactivate`](Lifecycle::deactivate) once when
/// it is removed. Implementations must tolerate a repeated `deactivate` and a
/// `deactivate` without a prior `activate`: both are no-ops.
///
/// Participants are stored as `Box<dyn Lifecycle>`; typed access goes through
/// `downcast_ref`/`downcast_mut`.
pub trait Lifecycle: Downcast {
    fn activate(&mut self);

    fn deactivate(&mut self);

    fn is_active(&self) -> bool;

    fn id(&self) -> Id;
}

impl_downcast!(Lifecycle);
