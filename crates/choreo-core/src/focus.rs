//! Picking the card nearest the viewport centre.

/// Index of the visible entry closest to `center`. Hidden entries (`None`)
/// never win; ties go to the earlier index.
#[inline]
pub fn nearest_visible(centers: &[Option<f32>], center: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, c) in centers.iter().enumerate() {
        let Some(c) = c else { continue };
        let d = (center - *c).abs();
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}
