//! Browser canvas surface and sprite loading

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Color, Sprites, Surface};
use crate::sim::ItemKind;

/// A 2D canvas context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn set_fill_style(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn draw_image(&mut self, image: &HtmlImageElement, x: f32, y: f32, w: f32, h: f32) {
        if let Err(e) = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(image, x as f64, y as f64, w as f64, h as f64)
        {
            log::warn!("drawImage failed: {:?}", e);
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(cx as f64, cy as f64, r as f64, 0.0, std::f64::consts::TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }
}

/// Asset file for each kind
pub fn sprite_url(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Rock => "rock.png",
        ItemKind::Paper => "paper.jpg",
        ItemKind::Scissors => "scissors.png",
    }
}

/// Start loading every sprite. Slots fill as their images finish decoding;
/// until then the renderer skips that kind.
pub fn load_sprites() -> Sprites<HtmlImageElement> {
    let sprites = Sprites::default();
    for kind in ItemKind::ALL {
        let slot = sprites.slot(kind).clone();
        wasm_bindgen_futures::spawn_local(async move {
            match load_image(sprite_url(kind)).await {
                Ok(image) => {
                    slot.fill(image);
                    log::info!("Loaded sprite {}", sprite_url(kind));
                }
                Err(e) => log::warn!("Sprite {} failed to load: {:?}", sprite_url(kind), e),
            }
        });
    }
    sprites
}

async fn load_image(url: &str) -> Result<HtmlImageElement, JsValue> {
    let image = HtmlImageElement::new()?;
    image.set_src(url);
    JsFuture::from(image.decode()).await?;
    Ok(image)
}
