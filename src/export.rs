use std::path::Path;

use eframe::egui;

use crate::error::ExportError;

/// Aspect ratio constraint applied to the snapshot region before capture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AspectRatio {
    Free,
    Square,
    Wide16x9,
    Classic4x3,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 4] = [
        AspectRatio::Free,
        AspectRatio::Square,
        AspectRatio::Wide16x9,
        AspectRatio::Classic4x3,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::Free => "Free",
            AspectRatio::Square => "1:1",
            AspectRatio::Wide16x9 => "16:9",
            AspectRatio::Classic4x3 => "4:3",
        }
    }

    fn ratio(self) -> Option<f32> {
        match self {
            AspectRatio::Free => None,
            AspectRatio::Square => Some(1.0),
            AspectRatio::Wide16x9 => Some(16.0 / 9.0),
            AspectRatio::Classic4x3 => Some(4.0 / 3.0),
        }
    }

    /// Shrink `region` about its center until it matches the ratio.
    pub fn apply(self, region: egui::Rect) -> egui::Rect {
        let Some(ratio) = self.ratio() else {
            return region;
        };
        let current = region.width() / region.height();
        let size = if current > ratio {
            egui::vec2(region.height() * ratio, region.height())
        } else {
            egui::vec2(region.width(), region.width() / ratio)
        };
        egui::Rect::from_center_size(region.center(), size)
    }
}

/// Cut the board region out of a full-window screenshot.
///
/// `region` is in ui points; the screenshot is in physical pixels, so
/// the region is scaled by `pixels_per_point` and clamped to the image.
pub fn crop_screenshot(
    screenshot: &egui::ColorImage,
    pixels_per_point: f32,
    region: egui::Rect,
) -> Result<image::RgbaImage, ExportError> {
    let img_w = screenshot.size[0];
    let img_h = screenshot.size[1];
    let x0 = ((region.min.x * pixels_per_point).round().max(0.0) as usize).min(img_w);
    let y0 = ((region.min.y * pixels_per_point).round().max(0.0) as usize).min(img_h);
    let x1 = ((region.max.x * pixels_per_point).round().max(0.0) as usize).min(img_w);
    let y1 = ((region.max.y * pixels_per_point).round().max(0.0) as usize).min(img_h);
    if x1 <= x0 || y1 <= y0 {
        return Err(ExportError::EmptyRegion);
    }
    let w = x1 - x0;
    let h = y1 - y0;
    let mut out = image::RgbaImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let px = screenshot.pixels[(y0 + row) * img_w + (x0 + col)];
            out.put_pixel(col as u32, row as u32, image::Rgba(px.to_array()));
        }
    }
    Ok(out)
}

pub fn save_png(image: &image::RgbaImage, path: &Path) -> Result<(), ExportError> {
    image.save_with_format(path, image::ImageFormat::Png)?;
    log::info!("saved snapshot to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, ColorImage, Rect, pos2};

    #[test]
    fn aspect_ratio_shrinks_about_center() {
        let region = Rect::from_min_max(pos2(0.0, 0.0), pos2(200.0, 100.0));
        let square = AspectRatio::Square.apply(region);
        assert_eq!(square.width(), square.height());
        assert_eq!(square.center(), region.center());
        assert_eq!(square.height(), 100.0);
    }

    #[test]
    fn free_ratio_leaves_region_untouched() {
        let region = Rect::from_min_max(pos2(10.0, 20.0), pos2(110.0, 50.0));
        assert_eq!(AspectRatio::Free.apply(region), region);
    }

    #[test]
    fn crop_extracts_scaled_region() {
        let mut img = ColorImage::new([8, 8], Color32::BLACK);
        img.pixels[2 * 8 + 2] = Color32::WHITE;
        let region = Rect::from_min_max(pos2(1.0, 1.0), pos2(3.0, 3.0));
        let out = crop_screenshot(&img, 2.0, region).unwrap();
        assert_eq!(out.dimensions(), (4, 4));
        assert_eq!(out.get_pixel(0, 0), &image::Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn empty_region_is_an_error() {
        let img = ColorImage::new([4, 4], Color32::BLACK);
        let region = Rect::from_min_max(pos2(10.0, 10.0), pos2(10.0, 10.0));
        assert!(matches!(
            crop_screenshot(&img, 1.0, region),
            Err(ExportError::EmptyRegion)
        ));
    }
}
