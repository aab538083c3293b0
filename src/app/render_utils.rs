use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::stemma::RelationKind;

use super::RenderNodeKind;

/// Fixed palette keyed by family id, matching the printed apparatus; the
/// archetype and unrecognized families fall back to neutral grey.
pub(super) fn family_color(family_id: Option<&str>) -> Color32 {
    match family_id {
        Some("A") => Color32::from_rgb(231, 76, 60),
        Some("B") => Color32::from_rgb(52, 152, 219),
        Some("C") => Color32::from_rgb(46, 204, 113),
        Some("D") => Color32::from_rgb(243, 156, 18),
        _ => Color32::from_rgb(149, 165, 166),
    }
}

pub(super) fn node_radius(kind: RenderNodeKind) -> f32 {
    match kind {
        RenderNodeKind::Archetype => 26.0,
        RenderNodeKind::FamilyCollapsed => 22.0,
        RenderNodeKind::FamilyExpanded => 15.0,
        RenderNodeKind::Witness => 11.0,
    }
}

/// Stroke width degrades with the square root of confidence, so weakly
/// attested relations fade gracefully instead of vanishing.
pub(super) fn edge_stroke_width(confidence: f32) -> f32 {
    (confidence.clamp(0.0, 1.0) * 3.0).sqrt()
}

/// (dash, gap) lengths per relation kind; `None` draws solid.
pub(super) fn dash_pattern(kind: RelationKind) -> Option<(f32, f32)> {
    match kind {
        RelationKind::Copy => None,
        RelationKind::Contamination => Some((6.0, 4.0)),
        RelationKind::Inferred => Some((1.5, 3.0)),
    }
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

pub(super) fn color_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

pub(super) const CANVAS_FILL: Color32 = Color32::from_rgb(19, 23, 29);

pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, CANVAS_FILL);

    let step = (56.0 * zoom.clamp(0.6, 1.8)).max(20.0);
    let origin = rect.center() + pan;
    let grid_stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = origin.x.rem_euclid(step);
    while x < rect.right() {
        painter.line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
            grid_stroke,
        );
        x += step;
    }

    let mut y = origin.y.rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            grid_stroke,
        );
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_width_is_monotone_in_confidence() {
        let confidences = [0.0, 0.1, 0.3, 0.5, 0.6, 0.8, 0.9, 1.0];
        for pair in confidences.windows(2) {
            assert!(edge_stroke_width(pair[0]) <= edge_stroke_width(pair[1]));
        }
    }

    #[test]
    fn stroke_width_follows_the_square_root_of_confidence() {
        for confidence in [0.25, 0.5, 0.75, 1.0] {
            let expected = (confidence * 3.0_f32).sqrt();
            assert!((edge_stroke_width(confidence) - expected).abs() < 1e-6);
        }
        // Square root, not linear: halving confidence loses less than half
        // the width.
        assert!(edge_stroke_width(0.4) > edge_stroke_width(0.8) / 2.0);
    }

    #[test]
    fn node_radii_rank_archetype_over_clusters_over_witnesses() {
        assert!(node_radius(RenderNodeKind::Archetype) > node_radius(RenderNodeKind::FamilyCollapsed));
        assert!(
            node_radius(RenderNodeKind::FamilyCollapsed) > node_radius(RenderNodeKind::FamilyExpanded)
        );
        assert!(node_radius(RenderNodeKind::FamilyExpanded) > node_radius(RenderNodeKind::Witness));
    }

    #[test]
    fn unknown_families_and_archetype_share_the_neutral_color() {
        assert_eq!(family_color(None), family_color(Some("Z")));
        assert_ne!(family_color(Some("A")), family_color(Some("B")));
    }

    #[test]
    fn only_copy_edges_draw_solid() {
        assert_eq!(dash_pattern(RelationKind::Copy), None);
        assert!(dash_pattern(RelationKind::Contamination).is_some());
        assert!(dash_pattern(RelationKind::Inferred).is_some());
        assert_ne!(
            dash_pattern(RelationKind::Contamination),
            dash_pattern(RelationKind::Inferred)
        );
    }

    #[test]
    fn screen_transform_round_trips() {
        let rect = Rect::from_min_size(Pos2::ZERO, eframe::egui::vec2(800.0, 600.0));
        let pan = eframe::egui::vec2(14.0, -32.0);
        let zoom = 1.7;
        let world = eframe::egui::vec2(120.0, -45.0);

        let screen = world_to_screen(rect, pan, zoom, world);
        let back = screen_to_world(rect, pan, zoom, screen);
        assert!((back - world).length() < 1e-3);
    }
}
