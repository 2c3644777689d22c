/// Mean luminance measurement and threshold mapping

use image::GrayImage;

use crate::state::Classification;

/// Arithmetic mean of all pixel values in an 8-bit grayscale image
///
/// Returns `None` for an image with no pixels.
pub fn mean_luminance(gray: &GrayImage) -> Option<f64> {
    let pixels = gray.as_raw();
    if pixels.is_empty() {
        return None;
    }

    // u64 cannot overflow: 255 * (5000 * 5000) is far below u64::MAX
    let sum: u64 = pixels.iter().map(|&p| p as u64).sum();
    Some(sum as f64 / pixels.len() as f64)
}

/// Map a mean intensity onto BLACK / WHITE / NORMAL
///
/// Black wins when the tolerances overlap; ordering is the caller's job.
pub fn classify_mean(mean: f64, black_tolerance: u8, white_tolerance: u8) -> Classification {
    if mean <= black_tolerance as f64 {
        Classification::Black
    } else if mean >= white_tolerance as f64 {
        Classification::White
    } else {
        Classification::Normal
    }
}
