//! Joint angle geometry
//!
//! Interior angle at a vertex from three 2D points, using the difference
//! of the two ray headings (atan2) rather than a dot product.

/// Interior angle at `vertex` formed by `a` and `c`, in degrees [0, 180]
///
/// ```text
///   a
///    \
///     \  θ
///   vertex ------ c
/// ```
pub fn interior_angle(a: (f32, f32), vertex: (f32, f32), c: (f32, f32)) -> f32 {
    let heading_c = (c.1 - vertex.1).atan2(c.0 - vertex.0);
    let heading_a = (a.1 - vertex.1).atan2(a.0 - vertex.0);

    let angle = (heading_c - heading_a).to_degrees().abs();

    // Reflect the reflex side back into [0, 180]
    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}
