use crate::foundation::{
    error::{MosaicoError, MosaicoResult},
    math::mul_div255_u8,
};

pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over on premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> MosaicoResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(MosaicoError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Scale every premultiplied pixel by the matching coverage byte of `mask`.
pub fn mask_in_place(dst: &mut [u8], mask: &[u8]) -> MosaicoResult<()> {
    if dst.len() != mask.len() * 4 {
        return Err(MosaicoError::render(
            "mask_in_place expects one coverage byte per rgba8 pixel",
        ));
    }
    for (d, &m) in dst.chunks_exact_mut(4).zip(mask) {
        match m {
            255 => {}
            0 => d.fill(0),
            _ => {
                for c in d.iter_mut() {
                    *c = mul_div255_u8(u16::from(*c), u16::from(m));
                }
            }
        }
    }
    Ok(())
}

/// Fill every pixel with one premultiplied colour.
pub fn fill_in_place(dst: &mut [u8], rgba: PremulRgba8) {
    for px in dst.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}
