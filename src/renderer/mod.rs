//! 2D raster rendering
//!
//! The simulation paints through `FramePainter`; `Renderer` implements it on
//! top of any `Surface` (a browser canvas, or an in-memory command log).

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

use std::cell::OnceCell;
use std::rc::Rc;

use crate::consts::TRAIL_ALPHA;
use crate::sim::{Arena, FramePainter, Item, ItemKind};

pub use recording::{DrawCommand, RecordingSurface};

/// RGBA fill color (alpha in 0-1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 1.0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string for canvas fill styles
    pub fn to_css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// Disc color per kind when drawing without sprites
pub fn kind_color(kind: ItemKind) -> Color {
    match kind {
        ItemKind::Rock => Color::rgba(120, 113, 108, 1.0),
        ItemKind::Paper => Color::rgba(59, 130, 246, 1.0),
        ItemKind::Scissors => Color::rgba(239, 68, 68, 1.0),
    }
}

/// The primitives a drawing surface must offer
pub trait Surface {
    type Image;

    fn set_fill_style(&mut self, color: Color);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn draw_image(&mut self, image: &Self::Image, x: f32, y: f32, w: f32, h: f32);
    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32);
}

/// A sprite that becomes available once its image has loaded.
///
/// Clones share the slot, so the loader can fill it while the renderer holds
/// another handle. Filling happens at most once.
#[derive(Debug)]
pub struct SpriteSlot<I> {
    image: Rc<OnceCell<I>>,
}

impl<I> Clone for SpriteSlot<I> {
    fn clone(&self) -> Self {
        Self {
            image: Rc::clone(&self.image),
        }
    }
}

impl<I> Default for SpriteSlot<I> {
    fn default() -> Self {
        Self {
            image: Rc::new(OnceCell::new()),
        }
    }
}

impl<I> SpriteSlot<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that is already loaded
    pub fn ready(image: I) -> Self {
        let slot = Self::new();
        slot.fill(image);
        slot
    }

    /// Mark the sprite loaded. Returns false if it already was.
    pub fn fill(&self, image: I) -> bool {
        self.image.set(image).is_ok()
    }

    pub fn get(&self) -> Option<&I> {
        self.image.get()
    }

    pub fn is_ready(&self) -> bool {
        self.image.get().is_some()
    }
}

/// One sprite slot per kind
#[derive(Debug, Clone)]
pub struct Sprites<I> {
    pub rock: SpriteSlot<I>,
    pub paper: SpriteSlot<I>,
    pub scissors: SpriteSlot<I>,
}

impl<I> Default for Sprites<I> {
    fn default() -> Self {
        Self {
            rock: SpriteSlot::new(),
            paper: SpriteSlot::new(),
            scissors: SpriteSlot::new(),
        }
    }
}

impl<I> Sprites<I> {
    pub fn slot(&self, kind: ItemKind) -> &SpriteSlot<I> {
        match kind {
            ItemKind::Rock => &self.rock,
            ItemKind::Paper => &self.paper,
            ItemKind::Scissors => &self.scissors,
        }
    }
}

/// How items are drawn
#[derive(Debug, Clone)]
pub enum Skin<I> {
    /// Image per kind; kinds whose image has not loaded are skipped
    Sprites(Sprites<I>),
    /// Colored discs, no assets needed
    Shapes,
}

/// Paints frames onto a surface
pub struct Renderer<'a, S: Surface> {
    surface: &'a mut S,
    skin: &'a Skin<S::Image>,
}

impl<'a, S: Surface> Renderer<'a, S> {
    pub fn new(surface: &'a mut S, skin: &'a Skin<S::Image>) -> Self {
        Self { surface, skin }
    }
}

impl<S: Surface> FramePainter for Renderer<'_, S> {
    fn clear(&mut self, arena: &Arena, trail: bool) {
        let alpha = if trail { TRAIL_ALPHA } else { 1.0 };
        self.surface.set_fill_style(Color::WHITE.with_alpha(alpha));
        self.surface.fill_rect(0.0, 0.0, arena.width, arena.height);
    }

    /// Sprites span `size` on both axes from `pos`, so they sit centered on
    /// the item's collision center.
    fn draw(&mut self, item: &Item) {
        match self.skin {
            Skin::Sprites(sprites) => {
                if let Some(image) = sprites.slot(item.kind).get() {
                    self.surface
                        .draw_image(image, item.pos.x, item.pos.y, item.size, item.size);
                }
            }
            Skin::Shapes => {
                self.surface.set_fill_style(kind_color(item.kind));
                self.surface
                    .fill_circle(item.center.x, item.center.y, item.size / 2.0);
            }
        }
    }
}
