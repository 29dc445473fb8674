use espcam_view::font::{GLYPH_HEIGHT, GLYPH_WIDTH, draw_text, glyph_bits, text_width};

#[test]
fn test_label_and_fps_characters_have_glyphs() {
    for ch in "0123456789.%: FPS".chars() {
        assert!(glyph_bits(ch).is_some(), "missing glyph for {ch:?}");
    }
    assert!(glyph_bits('~').is_none());
}

#[test]
fn test_text_width() {
    assert_eq!(text_width("", 1), 0);
    assert_eq!(text_width("8", 1), GLYPH_WIDTH);
    assert_eq!(text_width("88", 2), (2 * GLYPH_WIDTH + 1) * 2);
}

#[test]
fn test_draw_text_stays_in_its_box() {
    let (w, h) = (40usize, 20usize);
    let mut buf = vec![0u8; w * h * 3];
    draw_text(&mut buf, w, h, 2, 3, "88.8%", 1, [255, 255, 255]);

    let right = 2 + text_width("88.8%", 1);
    let bottom = 3 + GLYPH_HEIGHT;
    let mut lit = 0;
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            let i = (y as usize * w + x as usize) * 3;
            if buf[i] == 255 {
                lit += 1;
                assert!(x >= 2 && x < right && y >= 3 && y < bottom);
            }
        }
    }
    assert!(lit > 0);
}

#[test]
fn test_draw_text_clipped_at_edges() {
    let mut buf = vec![0u8; 8 * 8 * 3];
    draw_text(&mut buf, 8, 8, -3, -3, "FPS: 30.0", 2, [1, 2, 3]);
    draw_text(&mut buf, 8, 8, 100, 100, "1", 1, [1, 2, 3]);
}
