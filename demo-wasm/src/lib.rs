use lanyard::layout::{Size, Viewport};
use lanyard::random::{self, RngSource};
use lanyard::{BadgeConfig, BadgeScene, FrameScheduler, NoOpFrameObserver, PhysicsConfig, PointerSample};
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;

// ---- Badge Demo ----

#[wasm_bindgen]
pub struct BadgeDemo {
    scene: BadgeScene<f32, RngSource<ChaCha8Rng>>,
    badge: BadgeConfig,
}

#[wasm_bindgen]
impl BadgeDemo {
    /// `seed` comes from the page so the demo needs no OS entropy.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> Self {
        BadgeDemo {
            scene: BadgeScene::new(
                PhysicsConfig::default(),
                random::seeded(u64::from(seed)),
                FrameScheduler::new(),
            ),
            badge: BadgeConfig::default(),
        }
    }

    /// Replace the physics tuning from a RON document. Call before `mount`.
    pub fn with_physics_ron(seed: u32, ron: &str) -> Result<BadgeDemo, JsValue> {
        let config = PhysicsConfig::from_ron_str(ron).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(BadgeDemo {
            scene: BadgeScene::new(config, random::seeded(u64::from(seed)), FrameScheduler::new()),
            badge: BadgeConfig::default(),
        })
    }

    /// Merge a partial badge record (camelCase JSON) over the defaults.
    pub fn set_badge_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.badge = BadgeConfig::from_json_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    /// Pass zero for an unmeasured container.
    pub fn mount(&mut self, now_ms: f64, viewport_width: f64, container_width: f64, container_height: f64) {
        self.scene.mount(now_ms, viewport(viewport_width, container_width, container_height));
    }

    pub fn resize(&mut self, now_ms: f64, viewport_width: f64, container_width: f64, container_height: f64) {
        self.scene.resize(now_ms, viewport(viewport_width, container_width, container_height));
    }

    pub fn unmount(&mut self) {
        self.scene.unmount();
    }

    pub fn frame(&mut self, now_ms: f64) {
        self.scene.frame(now_ms, &mut NoOpFrameObserver);
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, now_ms: f64) -> bool {
        self.scene.pointer_down(PointerSample::new(x, y, now_ms))
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, now_ms: f64) {
        self.scene.pointer_move(PointerSample::new(x, y, now_ms));
    }

    pub fn pointer_up(&mut self, x: f64, y: f64, now_ms: f64) {
        self.scene.pointer_up(PointerSample::new(x, y, now_ms));
    }

    pub fn pointer_leave(&mut self, x: f64, y: f64, now_ms: f64) {
        self.scene.pointer_leave(PointerSample::new(x, y, now_ms));
    }

    pub fn scroll(&mut self, now_ms: f64, scroll_y: f64) {
        self.scene.scroll(now_ms, scroll_y);
    }

    pub fn is_mobile(&self) -> bool {
        self.scene.mode().is_some_and(|m| m.is_mobile())
    }

    /// Returns [x, y, rotation] of the badge, empty until placed
    pub fn badge(&self) -> Vec<f32> {
        match self.scene.motion() {
            Some(m) => vec![m.position.x, m.position.y, m.rotation],
            None => Vec::new(),
        }
    }

    /// Returns [anchor_x, anchor_y, hole_x, hole_y, width] or empty on mobile
    pub fn lanyard(&self) -> Vec<f32> {
        match self.scene.snapshot().lanyard {
            Some(l) => vec![l.anchor.x, l.anchor.y, l.hole.x, l.hole.y, l.width],
            None => Vec::new(),
        }
    }

    pub fn lanyard_color(&self) -> Option<String> {
        self.scene.snapshot().lanyard.map(|l| l.css_color())
    }

    /// Returns flat [x0, y0, r0, sx0, sy0, x1, ...] in badge-local px
    pub fn balls(&self) -> Vec<f32> {
        let balls = self.scene.field().map(|f| f.balls()).unwrap_or_default();
        let mut out = Vec::with_capacity(balls.len() * 5);
        for b in balls {
            let (sx, sy) = b.render_scale();
            out.push(b.pos.x);
            out.push(b.pos.y);
            out.push(b.radius());
            out.push(sx);
            out.push(sy);
        }
        out
    }

    pub fn full_name(&self) -> String {
        self.badge.full_name()
    }

    pub fn badge_color(&self) -> String {
        self.badge.badge_color.clone()
    }

    pub fn badge_bottom_color(&self) -> String {
        self.badge.badge_bottom_color.clone()
    }
}

fn viewport(width: f64, container_width: f64, container_height: f64) -> Viewport {
    Viewport::new(width, Some(Size::new(container_width, container_height)))
}
