use coverdeck_core::{CarouselController, ExtractionRequest, ScrollConfig, Size};

use crate::event::ExtractionResult;
use crate::input::Action;
use crate::scroll::SettleAnimator;
use crate::theme::Theme;

/// Top-level TUI state
///
/// Owns the carousel controller and the settle animator and turns input
/// actions plus timer ticks into scroll motion and extraction requests. The
/// caller (the run loop) is responsible for actually spawning extraction work
/// and feeding results back via [`App::apply_extraction`].
pub struct App {
    pub controller: CarouselController,
    pub theme: Theme,
    animator: SettleAnimator,
    current_index: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(controller: CarouselController, scroll: ScrollConfig, theme: Theme) -> Self {
        Self {
            controller,
            theme,
            animator: SettleAnimator::new(scroll),
            current_index: 0,
            should_quit: false,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Adopt a new terminal size and re-center the current cover
    ///
    /// The status bar takes one row; the rest is the carousel viewport.
    /// Re-settling immediately keeps the backdrop in sync (the generation
    /// bump supersedes any in-flight extraction).
    pub fn on_resize(&mut self, width: u16, height: u16) -> Option<ExtractionRequest> {
        let carousel_height = height.saturating_sub(1);
        self.controller
            .set_viewport_size(Size::new(width as f32, carousel_height as f32));

        let offset = self.controller.offset_for_index(self.current_index);
        let axis = self.controller.engine().config().axis;
        self.animator.set(offset.along(axis));
        self.controller.settle(offset)
    }

    /// Translate an input action into motion
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollLeft => self.step(-1),
            Action::ScrollRight => self.step(1),
            Action::JumpFirst => self.jump(0),
            Action::JumpLast => self.jump(self.controller.len().saturating_sub(1)),
            Action::None => {}
        }
    }

    fn step(&mut self, delta: isize) {
        if self.controller.is_empty() {
            return;
        }
        let max = self.controller.len() - 1;
        let target = self
            .current_index
            .saturating_add_signed(delta)
            .min(max);
        self.jump(target);
    }

    fn jump(&mut self, index: usize) {
        if self.controller.is_empty() {
            return;
        }
        self.current_index = index.min(self.controller.len() - 1);
        let axis = self.controller.engine().config().axis;
        let target = self.controller.offset_for_index(self.current_index);
        self.animator.animate_to(target.along(axis));
    }

    /// Advance the settle animation by one frame
    ///
    /// Returns an extraction request when the carousel just came to rest on a
    /// cover with an image.
    pub fn on_tick(&mut self) -> Option<ExtractionRequest> {
        let axis = self.controller.engine().config().axis;
        let position = self.animator.update();
        let offset = self.controller.viewport().offset.with_along(axis, position);
        self.controller.set_offset(offset);

        let settled = self.animator.take_settled()?;
        let offset = self.controller.viewport().offset.with_along(axis, settled);
        let request = self.controller.settle(offset);
        if let Some(index) = self.controller.centered_index() {
            self.current_index = index;
        }
        request
    }

    /// Feed a completed extraction back into the controller
    pub fn apply_extraction(&mut self, result: ExtractionResult) {
        if self.controller.apply_extraction(result.generation, result.color) {
            tracing::debug!(index = result.index, "Backdrop updated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coverdeck_core::{AppConfig, Color, Cover};
    use image::{DynamicImage, Rgba, RgbaImage};
    use std::sync::Arc;

    fn app_with_covers(count: usize) -> App {
        let covers = (0..count)
            .map(|i| {
                let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
                    8,
                    8,
                    Rgba([(i * 40) as u8, 0, 0, 255]),
                ));
                Cover::new(format!("cover_{i}"), Some(Arc::new(img)))
            })
            .collect();

        let mut config = AppConfig::default();
        // Settle instantly so tests never wait on wall-clock time
        config.ui.scroll.smooth_enabled = false;
        let scroll = config.ui.scroll.clone();
        let controller = CarouselController::new(covers, &config);
        App::new(controller, scroll, Theme::default())
    }

    #[test]
    fn test_resize_requests_initial_extraction() {
        let mut app = app_with_covers(3);
        let request = app.on_resize(120, 40).unwrap();
        assert_eq!(request.index, 0);
    }

    #[test]
    fn test_scroll_right_settles_on_next_cover() {
        let mut app = app_with_covers(3);
        app.on_resize(120, 40);

        app.handle_action(Action::ScrollRight);
        let request = app.on_tick().unwrap();
        assert_eq!(request.index, 1);
        assert_eq!(app.current_index(), 1);
    }

    #[test]
    fn test_scroll_clamps_at_ends() {
        let mut app = app_with_covers(2);
        app.on_resize(120, 40);

        app.handle_action(Action::ScrollLeft);
        app.on_tick();
        assert_eq!(app.current_index(), 0);

        app.handle_action(Action::JumpLast);
        app.on_tick();
        app.handle_action(Action::ScrollRight);
        app.on_tick();
        assert_eq!(app.current_index(), 1);
    }

    #[test]
    fn test_extraction_result_updates_backdrop() {
        let mut app = app_with_covers(1);
        let request = app.on_resize(120, 40).unwrap();

        app.apply_extraction(ExtractionResult {
            generation: request.generation,
            index: request.index,
            color: Some(Color::new(0.0, 0.0, 1.0, 1.0)),
        });
        assert_eq!(app.controller.backdrop().label, "#0000ff");
    }

    #[test]
    fn test_empty_carousel_actions_are_inert() {
        let mut app = app_with_covers(0);
        app.on_resize(120, 40);
        app.handle_action(Action::ScrollRight);
        assert!(app.on_tick().is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_quit_action() {
        let mut app = app_with_covers(1);
        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }
}
