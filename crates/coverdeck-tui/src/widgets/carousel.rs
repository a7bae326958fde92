use image::DynamicImage;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use coverdeck_core::layout::Axis;

use crate::app::App;

pub struct CarouselWidget;

impl CarouselWidget {
    /// Render the carousel row
    ///
    /// Every visible cover becomes a halfblock image cell whose on-screen
    /// size is the base item size multiplied by its visual scale, dimmed
    /// toward the backdrop by its visual alpha. Empty slots get a bordered
    /// placeholder.
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let backdrop_rgb = app.theme.blend_rgb(&app.controller.backdrop().color);
        let [br, bg, bb] = backdrop_rgb;

        // Background wash with the current backdrop color
        let background = Block::default()
            .style(Style::default().bg(Color::Rgb(br, bg, bb)))
            .borders(Borders::NONE);
        frame.render_widget(background, area);

        if app.controller.is_empty() {
            Self::render_empty_message(frame, area, app);
            return;
        }

        let axis = app.controller.engine().config().axis;
        let viewport = *app.controller.viewport();
        let items = app.controller.items();
        let attrs = app.controller.visual_attributes();

        for (item, attrs) in items.iter().zip(attrs.iter()) {
            let scaled_w = (item.size.width * attrs.scale).round() as i32;
            let scaled_h = (item.size.height * attrs.scale).round() as i32;
            if scaled_w < 1 || scaled_h < 1 {
                continue;
            }

            // Position the scaled cell so its center matches the item center
            // in viewport coordinates
            let along = item.center - viewport.offset.along(axis);
            let (cell_x, cell_y) = match axis {
                Axis::Horizontal => (
                    along - scaled_w as f32 / 2.0,
                    (viewport.size.height - scaled_h as f32) / 2.0,
                ),
                Axis::Vertical => (
                    (viewport.size.width - scaled_w as f32) / 2.0,
                    along - scaled_h as f32 / 2.0,
                ),
            };
            let cell_x = cell_x.round() as i32;
            let cell_y = cell_y.round() as i32;

            let Some(cell) = clip_to_area(area, cell_x, cell_y, scaled_w, scaled_h) else {
                continue;
            };

            match app.controller.image_at(item.index) {
                Some(image) => {
                    Self::render_cover(frame, cell, &image, attrs.alpha, backdrop_rgb);
                }
                None => Self::render_placeholder(frame, cell.target, app, item.index),
            }
        }
    }

    /// Draw one cover as halfblock cells (each `▀` shows two vertical pixels)
    fn render_cover(
        frame: &mut Frame,
        cell: ClippedCell,
        image: &DynamicImage,
        alpha: f32,
        backdrop_rgb: [u8; 3],
    ) {
        let full_w = cell.full_width.max(1);
        let full_h = cell.full_height.max(1);

        // Fill the whole (unclipped) cell, cropping overflow, then address
        // only the visible pixel window
        let resized = image
            .resize_to_fill(full_w, full_h * 2, image::imageops::FilterType::Triangle)
            .to_rgba8();

        let dim = |channel: u8, base: u8| {
            (channel as f32 * alpha + base as f32 * (1.0 - alpha)).round() as u8
        };

        let target = cell.target;
        for row in 0..target.height {
            let src_y = (cell.skip_top + row as u32) * 2;
            if src_y + 1 >= resized.height() {
                break;
            }

            let mut spans: Vec<Span> = Vec::with_capacity(target.width as usize);
            for col in 0..target.width {
                let src_x = cell.skip_left + col as u32;
                if src_x >= resized.width() {
                    break;
                }
                let top = resized.get_pixel(src_x, src_y);
                let bottom = resized.get_pixel(src_x, src_y + 1);

                let fg = Color::Rgb(
                    dim(top[0], backdrop_rgb[0]),
                    dim(top[1], backdrop_rgb[1]),
                    dim(top[2], backdrop_rgb[2]),
                );
                let bg = Color::Rgb(
                    dim(bottom[0], backdrop_rgb[0]),
                    dim(bottom[1], backdrop_rgb[1]),
                    dim(bottom[2], backdrop_rgb[2]),
                );
                spans.push(Span::styled("▀", Style::default().fg(fg).bg(bg)));
            }

            let line_area = Rect {
                x: target.x,
                y: target.y + row,
                width: target.width,
                height: 1,
            };
            frame.render_widget(Paragraph::new(Line::from(spans)), line_area);
        }
    }

    /// Bordered placeholder for a cover with no image
    fn render_placeholder(frame: &mut Frame, target: Rect, app: &App, index: usize) {
        let name = app
            .controller
            .cover(index)
            .map(|cover| cover.name.clone())
            .unwrap_or_default();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.grey))
            .title(name);
        frame.render_widget(block, target);
    }

    fn render_empty_message(frame: &mut Frame, area: Rect, app: &App) {
        let message = Line::from(Span::styled(
            "No covers found",
            Style::default().fg(app.theme.grey),
        ));
        let centered = Rect {
            x: area.x,
            y: area.y + area.height / 2,
            width: area.width,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(message).alignment(ratatui::layout::Alignment::Center),
            centered,
        );
    }
}

/// A cell rect clipped to the drawable area, remembering how much of the
/// unclipped cell was cut off on the top/left so the image can be cropped to
/// match
struct ClippedCell {
    target: Rect,
    full_width: u32,
    full_height: u32,
    skip_left: u32,
    skip_top: u32,
}

fn clip_to_area(area: Rect, x: i32, y: i32, width: i32, height: i32) -> Option<ClippedCell> {
    let area_x = area.x as i32;
    let area_y = area.y as i32;
    let area_right = area_x + area.width as i32;
    let area_bottom = area_y + area.height as i32;

    // Cell coordinates are relative to the carousel area origin
    let left = area_x + x;
    let top = area_y + y;
    let right = (left + width).min(area_right);
    let bottom = (top + height).min(area_bottom);

    let clipped_left = left.max(area_x);
    let clipped_top = top.max(area_y);
    if clipped_left >= right || clipped_top >= bottom {
        return None;
    }

    Some(ClippedCell {
        target: Rect {
            x: clipped_left as u16,
            y: clipped_top as u16,
            width: (right - clipped_left) as u16,
            height: (bottom - clipped_top) as u16,
        },
        full_width: width as u32,
        full_height: height as u32,
        skip_left: (clipped_left - left) as u32,
        skip_top: (clipped_top - top) as u32,
    })
}
