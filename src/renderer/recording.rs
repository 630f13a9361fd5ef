//! In-memory surface that records draw commands
//!
//! Used by the headless runner and tests in place of a real canvas.

use super::{Color, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SetFill(Color),
    FillRect { x: f32, y: f32, w: f32, h: f32 },
    DrawImage { image: String, x: f32, y: f32, w: f32, h: f32 },
    FillCircle { cx: f32, cy: f32, r: f32 },
}

/// Surface whose images are asset names
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of items painted (images and discs)
    pub fn items_painted(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::DrawImage { .. } | DrawCommand::FillCircle { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    type Image = String;

    fn set_fill_style(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetFill(color));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.commands.push(DrawCommand::FillRect { x, y, w, h });
    }

    fn draw_image(&mut self, image: &String, x: f32, y: f32, w: f32, h: f32) {
        self.commands.push(DrawCommand::DrawImage {
            image: image.clone(),
            x,
            y,
            w,
            h,
        });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32) {
        self.commands.push(DrawCommand::FillCircle { cx, cy, r });
    }
}
