use crate::foundation::error::{PathviewError, PathviewResult};

/// One premultiplied RGBA8 pixel.
pub(crate) type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - sa;

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(src[3], mul_div255(u16::from(dst[3]), inv));
    for i in 0..3 {
        out[i] = add_sat_u8(src[i], mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Source-over `src` onto `dst` for equal-length premultiplied RGBA8 buffers.
pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8]) -> PathviewResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(PathviewError::validation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Composite `src` over `dst` at pixel offset `(dx, dy)`, clipped to `dst`.
///
/// Row-wise source-over blit; the destination outside the covered rectangle
/// is untouched, so callers own the clearing semantics of their own surface.
pub(crate) fn blit_over(
    dst: &mut vello_cpu::Pixmap,
    src: &vello_cpu::Pixmap,
    dx: u32,
    dy: u32,
) -> PathviewResult<()> {
    let dw = usize::from(dst.width());
    let dh = usize::from(dst.height());
    let sw = usize::from(src.width());
    let sh = usize::from(src.height());
    let dx = dx as usize;
    let dy = dy as usize;

    if dx >= dw || dy >= dh {
        return Ok(());
    }
    let copy_w = sw.min(dw - dx);
    let copy_h = sh.min(dh - dy);
    if copy_w == 0 || copy_h == 0 {
        return Ok(());
    }

    let dst_bytes = dst.data_as_u8_slice_mut();
    let src_bytes = src.data_as_u8_slice();
    for row in 0..copy_h {
        let d0 = ((dy + row) * dw + dx) * 4;
        let s0 = row * sw * 4;
        over_in_place(
            &mut dst_bytes[d0..d0 + copy_w * 4],
            &src_bytes[s0..s0 + copy_w * 4],
        )?;
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}
