use image::{DynamicImage, GenericImageView};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use marquee_core::deck::GalleryImage;
use marquee_core::effects::LazyState;

use crate::app::App;
use crate::layout::IMAGE_ROWS;
use crate::widgets::page::{blank, centered_line};

/// Gallery section: each image decodes lazily when it scrolls into view
/// and renders as half-block art; until then a placeholder line keeps the
/// layout stable.
pub fn build(app: &App, images: &[GalleryImage], width: u16) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let mut lines = Vec::new();

    for image in images {
        let mut block: Vec<Line<'static>> = match app.images.state(&image.src) {
            Some(LazyState::Loaded(img)) => image_lines(img, width),
            Some(LazyState::Failed(err)) => vec![centered_line(
                format!("[image failed: {}]", err),
                width,
                Style::default().fg(theme.error),
            )],
            Some(LazyState::Requested) => vec![centered_line(
                format!("[loading {}]", image.src.display()),
                width,
                Style::default().fg(theme.muted),
            )],
            _ => vec![centered_line(
                format!("[image: {}]", image.src.display()),
                width,
                Style::default().fg(theme.muted),
            )],
        };

        // Keep every image's footprint fixed at IMAGE_ROWS
        block.truncate(usize::from(IMAGE_ROWS));
        while block.len() < usize::from(IMAGE_ROWS) {
            block.push(blank());
        }
        lines.extend(block);

        if let Some(caption) = &image.caption {
            lines.push(centered_line(
                caption.clone(),
                width,
                Style::default().fg(theme.muted),
            ));
        }
        lines.push(blank());
    }

    lines
}

/// Render an image as half-block lines: ▀ with fg = top pixel and
/// bg = bottom pixel, two pixels of image per terminal row
fn image_lines(img: &DynamicImage, width: u16) -> Vec<Line<'static>> {
    let target_width = u32::from(width.saturating_sub(8).max(1));
    let target_height = u32::from(IMAGE_ROWS) * 2;

    let (img_width, img_height) = img.dimensions();
    let scale_w = target_width as f32 / img_width as f32;
    let scale_h = target_height as f32 / img_height as f32;
    let scale = scale_w.min(scale_h);

    let new_width = ((img_width as f32 * scale) as u32).max(1);
    let new_height = ((img_height as f32 * scale) as u32).max(2);

    let resized = img.resize_exact(new_width, new_height, image::imageops::FilterType::Triangle);
    let rgba = resized.to_rgba8();

    let left_pad = usize::from(width).saturating_sub(new_width as usize) / 2;

    let mut lines = Vec::with_capacity((new_height / 2) as usize);
    for row in 0..new_height / 2 {
        let y = row * 2;
        let mut spans: Vec<Span<'static>> = Vec::with_capacity(new_width as usize + 1);
        if left_pad > 0 {
            spans.push(Span::raw(" ".repeat(left_pad)));
        }
        for x in 0..new_width {
            let top_pixel = rgba.get_pixel(x, y);
            let bottom_pixel = if y + 1 < new_height {
                rgba.get_pixel(x, y + 1)
            } else {
                top_pixel
            };
            let top_color = Color::Rgb(top_pixel[0], top_pixel[1], top_pixel[2]);
            let bottom_color = Color::Rgb(bottom_pixel[0], bottom_pixel[1], bottom_pixel[2]);
            spans.push(Span::styled(
                "▀",
                Style::default().fg(top_color).bg(bottom_color),
            ));
        }
        lines.push(Line::from(spans));
    }
    lines
}
