use crate::foundation::core::ScreenRect;
use crate::foundation::error::{PathviewError, PathviewResult};

/// Allocate a zeroed pixmap sized exactly to `rect`.
///
/// Pixmap dimensions are u16; regions beyond that are a validation fault
/// rather than a silent clamp.
pub(crate) fn alloc_pixmap(rect: ScreenRect) -> PathviewResult<vello_cpu::Pixmap> {
    let w: u16 = rect
        .width
        .try_into()
        .map_err(|_| PathviewError::validation(format!("surface width exceeds u16: {}", rect.width)))?;
    let h: u16 = rect.height.try_into().map_err(|_| {
        PathviewError::validation(format!("surface height exceeds u16: {}", rect.height))
    })?;
    Ok(vello_cpu::Pixmap::new(w, h))
}

/// Clear a pixmap to fully transparent.
pub(crate) fn clear_to_transparent(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

/// Whether a pixmap's dimensions equal the region's.
pub(crate) fn matches_rect(pixmap: &vello_cpu::Pixmap, rect: ScreenRect) -> bool {
    u32::from(pixmap.width()) == rect.width && u32::from(pixmap.height()) == rect.height
}
