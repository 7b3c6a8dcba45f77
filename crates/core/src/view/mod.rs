//! Non-visual lifecycle participants and the small rendering surface used by
//! the navigation bar view.
//!
//! Two traits live here and they are deliberately unrelated:
//! - [`Lifecycle`]: objects mounted on a screen that react to activation and
//!   teardown (the navigation bar proxy is one).
//! - [`Render`]: objects that paint into a [`Frame`].
//!
//! A proxy implements both, but its [`Render`] impl never writes anything.

pub mod lifecycle;
pub mod navigation;
pub mod style;

pub use self::lifecycle::Lifecycle;

use lazy_static::lazy_static;
use std::sync::atomic::{AtomicU64, Ordering};

pub type Id = u64;

lazy_static! {
    pub static ref ID_FEEDER: IdFeeder = IdFeeder::new(1);
}

/// Hands out process-unique identifiers for participants and driver handles.
#[derive(Debug)]
pub struct IdFeeder(AtomicU64);

impl IdFeeder {
    pub fn new(id: Id) -> Self {
        IdFeeder(AtomicU64::new(id))
    }

    pub fn next(&self) -> Id {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

/// Text output of a render pass, one entry per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    lines: Vec<String>,
}

impl Frame {
    pub fn new() -> Self {
        Frame::default()
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

pub trait Render {
    fn render(&self, frame: &mut Frame);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_feeder_is_monotonic() {
        let feeder = IdFeeder::new(7);
        assert_eq!(feeder.next(), 7);
        assert_eq!(feeder.next(), 8);
    }

    #[test]
    fn frame_collects_lines_in_order() {
        let mut frame = Frame::new();
        assert!(frame.is_empty());

        frame.push_line("top");
        frame.push_line(String::from("bottom"));

        assert_eq!(frame.lines(), ["top", "bottom"]);
    }
}
