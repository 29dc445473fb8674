/// Write one RGB pixel. Coordinates outside the buffer are ignored.
pub fn set_pixel(buf: &mut [u8], width: usize, height: usize, x: i32, y: i32, color: [u8; 3]) {
    if x < 0 || y < 0 || x as usize >= width || y as usize >= height {
        return;
    }
    let idx = (y as usize * width + x as usize) * 3;
    if let Some(px) = buf.get_mut(idx..idx + 3) {
        px.copy_from_slice(&color);
    }
}

/// Fill the inclusive rectangle `(x1, y1)..=(x2, y2)`, clipped to the buffer.
pub fn fill_rect(
    buf: &mut [u8],
    width: usize,
    height: usize,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    color: [u8; 3],
) {
    if width == 0 || height == 0 {
        return;
    }
    let (left, right) = (x1.min(x2).max(0), x1.max(x2).min(width as i32 - 1));
    let (top, bottom) = (y1.min(y2).max(0), y1.max(y2).min(height as i32 - 1));
    for y in top..=bottom {
        for x in left..=right {
            set_pixel(buf, width, height, x, y, color);
        }
    }
}

/// Draw a rectangle outline `thickness` pixels wide, growing inwards from
/// the given corners.
pub fn draw_rect(
    buf: &mut [u8],
    width: usize,
    height: usize,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    thickness: i32,
    color: [u8; 3],
) {
    let (left, right) = (x1.min(x2), x1.max(x2));
    let (top, bottom) = (y1.min(y2), y1.max(y2));
    for t in 0..thickness.max(1) {
        let (l, r, tp, b) = (left + t, right - t, top + t, bottom - t);
        if l > r || tp > b {
            break;
        }
        fill_rect(buf, width, height, l, tp, r, tp, color);
        fill_rect(buf, width, height, l, b, r, b, color);
        fill_rect(buf, width, height, l, tp, l, b, color);
        fill_rect(buf, width, height, r, tp, r, b, color);
    }
}

/// Convert an HWC RGB buffer into packed `0x00RRGGBB` pixels, reusing `out`.
pub fn rgb_to_argb(rgb: &[u8], out: &mut Vec<u32>) {
    out.clear();
    out.extend(
        rgb.chunks_exact(3)
            .map(|px| ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32),
    );
}
