use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Precomputed source column/row for every destination pixel
pub struct ScaleLut {
    src_x: Vec<usize>,
    src_y: Vec<usize>,
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self {
            src_x: Vec::new(),
            src_y: Vec::new(),
        }
    }

    pub fn dst_size(&self) -> (usize, usize) {
        (self.src_x.len(), self.src_y.len())
    }
}

pub fn build_scale_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleLut {
    let map_axis = |dst: usize, src: usize| -> Vec<usize> {
        (0..dst)
            .map(|d| (d * src / dst.max(1)).min(src.saturating_sub(1)))
            .collect()
    };

    ScaleLut {
        src_x: map_axis(dst_w, src_w),
        src_y: map_axis(dst_h, src_h),
    }
}

/// Parallel nearest-neighbour stretch of the internal framebuffer onto the window.
/// Rows are processed in parallel for cache friendly writes
pub fn blit_nearest_stretch(dst: &mut [u32], dw: usize, src: &[u32], sw: usize, lut: &ScaleLut) {
    if dw == 0 {
        return;
    }
    dst.par_chunks_mut(dw).enumerate().for_each(|(y, dst_row)| {
        let Some(&sy) = lut.src_y.get(y) else {
            return;
        };
        let src_row = &src[sy * sw..(sy + 1) * sw];
        for (out, &sx) in dst_row.iter_mut().zip(&lut.src_x) {
            *out = src_row[sx];
        }
    });
}
