use super::*;

#[test]
fn origin_vectors_cover_corners() {
    assert_eq!(Origin::TopLeft.vector(100.0, 50.0), Vec2::ZERO);
    assert_eq!(Origin::Centre.vector(100.0, 50.0), Vec2::new(50.0, 25.0));
    assert_eq!(Origin::BottomRight.vector(100.0, 50.0), Vec2::new(100.0, 50.0));
}

#[test]
fn lerp_color_keeps_alpha() {
    let c = Rgba::WHITE.with_opacity(0.5).lerp_color(Rgba::BLACK, 0.25);
    assert_eq!(c.r, 0.75);
    assert_eq!(c.a, 0.5);
}
