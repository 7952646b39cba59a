use rayon::prelude::*;

/// Element wise copy of `src` into `dst`, `chunk_size` cells per task.
pub fn copy_from(dst: &mut [f64], src: &[f64], chunk_size: usize) {
    debug_assert_eq!(dst.len(), src.len());
    dst.par_chunks_mut(chunk_size)
        .zip(src.par_chunks(chunk_size))
        .for_each(|(d_chunk, s_chunk)| d_chunk.copy_from_slice(s_chunk));
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn copy_from_test() {
        let src: Vec<f64> = (0..103).map(|i| i as f64).collect();
        let mut dst = vec![0.0; 103];
        copy_from(&mut dst, &src, 10);
        assert_eq!(dst, src);

        // one chunk bigger than the slice
        let mut dst = vec![-1.0; 103];
        copy_from(&mut dst, &src, 1000);
        assert_eq!(dst, src);
    }
}
