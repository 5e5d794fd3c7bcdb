use super::{Plane, Rect};

/// Extends a plane indefinitely by repeating its nearest edge pixel.
///
/// Reports [`Rect::UNBOUNDED`]; sample it point by point, never iterate its bounds.
/// An empty source has no edge to repeat, so reads are forwarded to it unchanged.
#[derive(Debug, Clone)]
pub struct Extender<P> {
    source: P,
    bounds: Option<Rect>,
}

impl<P> Extender<P> {
    pub fn new<T>(source: P) -> Self
    where
        P: Plane<T>,
    {
        let raw = source.bounds();
        let bounds = if raw.width() == 0 || raw.height() == 0 {
            None
        } else {
            Some(raw.canon())
        };
        Self { source, bounds }
    }

    pub fn source(&self) -> &P {
        &self.source
    }

    /// Canonical bounds of the wrapped plane, `None` if it is empty.
    pub fn source_bounds(&self) -> Option<Rect> {
        self.bounds
    }
}

impl<T, P: Plane<T>> Plane<T> for Extender<P> {
    fn at(&self, x: i32, y: i32) -> T {
        match self.bounds {
            Some(b) => self
                .source
                .at(x.clamp(b.min_x, b.max_x), y.clamp(b.min_y, b.max_y)),
            None => self.source.at(x, y),
        }
    }

    fn bounds(&self) -> Rect {
        Rect::UNBOUNDED
    }
}
