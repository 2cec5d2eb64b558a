use nalgebra::Vector2;
use std::cell::Cell;
use std::rc::Rc;

/// Where the pointer is assumed to be before any movement was seen. Far enough
/// away that no node is ever within the influence radius.
pub const NO_POINTER: Vector2<f64> = Vector2::new(-9999., -9999.);

/// Last known pointer position in surface coordinates.
///
/// Built once per page and cloned into every node field. Only the pointer-move
/// listener writes to it; simulations read it through [`PointerState::position`].
#[derive(Clone, Debug)]
pub struct PointerState {
    position: Rc<Cell<Vector2<f64>>>,
}

impl Default for PointerState {
    fn default() -> Self {
        PointerState::starting_at(NO_POINTER)
    }
}

impl PointerState {
    pub fn starting_at(position: Vector2<f64>) -> PointerState {
        PointerState {
            position: Rc::new(Cell::new(position)),
        }
    }

    pub fn position(&self) -> Vector2<f64> {
        self.position.get()
    }

    pub fn move_to(&self, position: Vector2<f64>) {
        if position.x.is_finite() && position.y.is_finite() {
            self.position.set(position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_observe_the_same_pointer() {
        let writer = PointerState::default();
        let reader = writer.clone();
        assert_eq!(reader.position(), NO_POINTER);
        writer.move_to(Vector2::new(3., 4.));
        assert_eq!(reader.position(), Vector2::new(3., 4.));
        writer.move_to(Vector2::new(f64::NAN, 1.));
        assert_eq!(reader.position(), Vector2::new(3., 4.));
    }
}
