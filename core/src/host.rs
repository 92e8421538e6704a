//! Capabilities the host hands to the core.
//!
//! Every callback receives the opaque context the owning object was built
//! with. The core stores that context and passes it back untouched.

use alloc::rc::Rc;

use crate::{Coord, PlayerStats};

/// Rendering sink for map cells and entities.
pub trait Drawer<C: ?Sized> {
    fn draw(&self, context: &C, x: Coord, y: Coord, glyph: &str);

    /// Draws `glyph` with an extra label on top, such as a player's team.
    /// Hosts that have nowhere to put the label can ignore it.
    fn draw_overlay(&self, context: &C, x: Coord, y: Coord, glyph: &str, _overlay: &str) {
        self.draw(context, x, y, glyph);
    }
}

/// Receiver for player stat snapshots.
pub trait StatsListener<C: ?Sized> {
    fn stats_updated(&self, context: &C, stats: &PlayerStats);
}

impl<C: ?Sized> Drawer<C> for () {
    fn draw(&self, _context: &C, _x: Coord, _y: Coord, _glyph: &str) {}
}

impl<C: ?Sized> StatsListener<C> for () {
    fn stats_updated(&self, _context: &C, _stats: &PlayerStats) {}
}

impl<C: ?Sized, T: Drawer<C> + ?Sized> Drawer<C> for &T {
    fn draw(&self, context: &C, x: Coord, y: Coord, glyph: &str) {
        (**self).draw(context, x, y, glyph);
    }

    fn draw_overlay(&self, context: &C, x: Coord, y: Coord, glyph: &str, overlay: &str) {
        (**self).draw_overlay(context, x, y, glyph, overlay);
    }
}

impl<C: ?Sized, T: Drawer<C> + ?Sized> Drawer<C> for Rc<T> {
    fn draw(&self, context: &C, x: Coord, y: Coord, glyph: &str) {
        (**self).draw(context, x, y, glyph);
    }

    fn draw_overlay(&self, context: &C, x: Coord, y: Coord, glyph: &str, overlay: &str) {
        (**self).draw_overlay(context, x, y, glyph, overlay);
    }
}

impl<C: ?Sized, T: StatsListener<C> + ?Sized> StatsListener<C> for &T {
    fn stats_updated(&self, context: &C, stats: &PlayerStats) {
        (**self).stats_updated(context, stats);
    }
}

impl<C: ?Sized, T: StatsListener<C> + ?Sized> StatsListener<C> for Rc<T> {
    fn stats_updated(&self, context: &C, stats: &PlayerStats) {
        (**self).stats_updated(context, stats);
    }
}
