//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the dimensions of an image scaled to fit a bounding box.
///
/// The aspect ratio of `source` is preserved and both output edges are
/// `<=` the matching edge of `bounds`. Images smaller than the box are
/// enlarged until one edge touches it. Neither edge drops below 1px, so
/// degenerate boxes such as 1x1 still produce a valid image.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `bounds` - Bounding box (width, height), both non-zero
///
/// # Returns
/// * `(width, height)` - Fitted dimensions
///
/// # Examples
/// ```
/// # use mp3_cover_resizer::imaging::calculate_fit_dimensions;
/// // 1000x800 into a 500x500 box → 500x400
/// assert_eq!(calculate_fit_dimensions((1000, 800), (500, 500)), (500, 400));
///
/// // 300x600 portrait into a 500x500 box → 250x500
/// assert_eq!(calculate_fit_dimensions((300, 600), (500, 500)), (250, 500));
/// ```
pub fn calculate_fit_dimensions(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = bounds;

    if src_w == 0 || src_h == 0 {
        return (max_w.max(1), max_h.max(1));
    }

    let scale_w = max_w as f64 / src_w as f64;
    let scale_h = max_h as f64 / src_h as f64;

    if scale_w <= scale_h {
        // Width is the limiting edge
        let h = (src_h as f64 * scale_w).round() as u32;
        (max_w.max(1), h.clamp(1, max_h.max(1)))
    } else {
        // Height is the limiting edge
        let w = (src_w as f64 * scale_h).round() as u32;
        (w.clamp(1, max_w.max(1)), max_h.max(1))
    }
}
