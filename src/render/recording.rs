use super::{Canvas, Circle, Line};
use crate::bounds::Dimensions;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    Reallocate(Dimensions),
    Clear,
    Circle(Circle),
    Line(Line),
}

/// Canvas that keeps a log of everything asked of it.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn circles(&self) -> Vec<Circle> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Circle(circle) => Some(*circle),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self) -> Vec<Line> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Line(line) => Some(*line),
                _ => None,
            })
            .collect()
    }

    pub fn clears(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Clear))
            .count()
    }

    /// Circles plus lines. Clears and reallocations are not draw calls.
    pub fn draw_calls(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Circle(_) | DrawCommand::Line(_)))
            .count()
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Canvas for RecordingCanvas {
    fn reallocate(&mut self, dimensions: Dimensions) {
        self.commands.push(DrawCommand::Reallocate(dimensions));
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, circle: &Circle) {
        self.commands.push(DrawCommand::Circle(*circle));
    }

    fn stroke_line(&mut self, line: &Line) {
        self.commands.push(DrawCommand::Line(*line));
    }
}
