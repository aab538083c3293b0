use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{self, Align2, Color32, FontId, Sense, Shape, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::render_utils::{
    blend_color, circle_visible, dash_pattern, dim_color, draw_background, edge_stroke_width,
    family_color, world_to_screen,
};
use super::super::{RenderNodeKind, SearchMatchCache, ViewModel};

const SELECTED_OUTLINE: Stroke = Stroke {
    width: 3.0,
    color: Color32::from_rgb(12, 12, 12),
};
const MATCH_TINT: Color32 = Color32::from_rgb(103, 196, 255);
const BADGE_FILL: Color32 = Color32::from_rgb(230, 126, 34);

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

/// Click-to-select toggle: clicking the already-selected node clears the
/// selection. The store itself only replaces; the toggle belongs to the
/// renderer's click handling.
fn selection_after_click(current: Option<&str>, clicked: &str) -> Option<String> {
    if current == Some(clicked) {
        None
    } else {
        Some(clicked.to_owned())
    }
}

impl ViewModel {
    /// Fuzzy search pseudo-highlight, suspended while a selection is
    /// active. Matches are cached per (query, projection revision).
    fn cached_search_matches(&mut self) -> Option<Arc<HashSet<usize>>> {
        if self.view.selected.is_some() {
            return None;
        }

        let query = self.view.search.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.projection_revision == self.projection_revision
            && cached.query == query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let cache = self.graph_cache.as_ref()?;
        let matcher = SkimMatcherV2::default();
        let matches = cache
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                fuzzy_match_score(&matcher, &node.search_text, query).map(|_| index)
            })
            .collect::<HashSet<_>>();
        let matches = Arc::new(matches);

        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            projection_revision: self.projection_revision,
            matches: Arc::clone(&matches),
        });

        Some(matches)
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        self.ensure_projection();

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, self.pan, self.zoom);

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);

        let pseudo_matches = self.cached_search_matches();
        let pan = self.pan;
        let zoom = self.zoom;
        let selected = self.view.selected.clone();
        let show_evidence = self.view.show_evidence;
        let interaction_active = response.dragged();
        let frame_delta_seconds = ui
            .ctx()
            .input(|input| input.stable_dt)
            .clamp(1.0 / 240.0, 1.0 / 20.0);

        let Some(cache) = self.graph_cache.as_mut() else {
            ui.label("No nodes to draw for the current view.");
            return;
        };

        let layout_moving = cache
            .sim
            .step(&mut cache.nodes, &cache.edges, frame_delta_seconds);
        if layout_moving || interaction_active {
            ui.ctx().request_repaint();
        }

        cache.screen_positions.clear();
        cache.screen_radii.clear();
        for node in &cache.nodes {
            cache
                .screen_positions
                .push(world_to_screen(rect, pan, zoom, node.world_pos));
            cache
                .screen_radii
                .push((node.base_radius * zoom.powf(0.40)).clamp(2.5, 60.0));
        }

        let hovered = Self::hovered_index(ui, rect, &cache.screen_positions, &cache.screen_radii);
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }
        let hovered_index = hovered.map(|(index, _)| index);

        let pending_click = if response.clicked_by(egui::PointerButton::Primary) {
            Some(hovered_index.and_then(|index| {
                cache
                    .nodes
                    .get(index)
                    .map(|node| (node.id.clone(), node.kind, node.family_id.clone()))
            }))
        } else {
            None
        };

        let pseudo_active = pseudo_matches
            .as_ref()
            .is_some_and(|matches| !matches.is_empty());
        let zoom_sqrt = zoom.sqrt();

        for edge in &cache.edges {
            let start = cache.screen_positions[edge.source];
            let end = cache.screen_positions[edge.target];

            let width = (edge_stroke_width(edge.confidence) * zoom_sqrt).clamp(0.5, 6.0);
            let stroke = Stroke::new(width, Color32::from_rgba_unmultiplied(150, 150, 150, 175));

            match dash_pattern(edge.kind) {
                None => {
                    painter.line_segment([start, end], stroke);
                }
                Some((dash, gap)) => {
                    painter.extend(Shape::dashed_line(&[start, end], stroke, dash, gap));
                }
            }
        }

        for (index, node) in cache.nodes.iter().enumerate() {
            let position = cache.screen_positions[index];
            let radius = cache.screen_radii[index];
            if !circle_visible(rect, position, radius) {
                continue;
            }

            let is_selected = selected.as_deref() == Some(node.id.as_str());
            let is_hovered = hovered_index == Some(index);
            let is_match = pseudo_matches
                .as_ref()
                .is_some_and(|matches| matches.contains(&index));

            let base_color = family_color(node.family_id.as_deref());
            let mut fill = if is_match {
                blend_color(base_color, MATCH_TINT, 0.55)
            } else if pseudo_active {
                dim_color(base_color, 0.38)
            } else {
                base_color
            };
            if node.kind == RenderNodeKind::FamilyExpanded {
                fill = Color32::from_rgba_unmultiplied(fill.r(), fill.g(), fill.b(), 178);
            }

            painter.circle_filled(position, radius, fill);

            // The hover outline matches the selected one, so a selected node
            // never loses weight when the pointer leaves it.
            let outline = if is_selected || is_hovered {
                SELECTED_OUTLINE
            } else {
                Stroke::new(1.5, Color32::from_rgba_unmultiplied(240, 240, 240, 200))
            };
            painter.circle_stroke(position, radius, outline);

            painter.text(
                position,
                Align2::CENTER_CENTER,
                &node.label,
                FontId::proportional(12.0),
                Color32::from_gray(245),
            );

            if show_evidence && node.citation_count > 0 {
                let badge_offset = radius * 0.85;
                let badge_center = position + vec2(badge_offset, -badge_offset);
                let badge_radius = (8.0 * zoom_sqrt).clamp(5.0, 12.0);
                painter.circle_filled(badge_center, badge_radius, BADGE_FILL);
                painter.circle_stroke(badge_center, badge_radius, Stroke::new(1.0, Color32::WHITE));
                painter.text(
                    badge_center,
                    Align2::CENTER_CENTER,
                    node.citation_count.to_string(),
                    FontId::proportional(10.0),
                    Color32::WHITE,
                );
            }
        }

        if let Some(index) = hovered_index {
            let info = match cache.nodes[index].kind {
                RenderNodeKind::Archetype => "Archetype  |  reconstructed source".to_owned(),
                RenderNodeKind::FamilyCollapsed | RenderNodeKind::FamilyExpanded => {
                    let family_id = cache.nodes[index].family_id.clone().unwrap_or_default();
                    let members = self.data.family_witnesses(&family_id).count();
                    format!("{}  |  {} witnesses", cache.nodes[index].label, members)
                }
                RenderNodeKind::Witness => self
                    .data
                    .witness(&cache.nodes[index].id)
                    .map(|witness| {
                        format!("{}  |  {}  |  {}", witness.siglum, witness.century, witness.repo)
                    })
                    .unwrap_or_else(|| cache.nodes[index].label.clone()),
            };

            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                info,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        match pending_click {
            Some(Some((id, kind, family_id))) => match kind {
                RenderNodeKind::FamilyCollapsed | RenderNodeKind::FamilyExpanded => {
                    if let Some(family_id) = family_id {
                        self.toggle_family(&family_id);
                    }
                }
                RenderNodeKind::Archetype | RenderNodeKind::Witness => {
                    let next = selection_after_click(self.view.selected.as_deref(), &id);
                    self.select(next);
                }
            },
            Some(None) => self.select(None),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clicking_an_unselected_node_selects_it() {
        assert_eq!(selection_after_click(None, "B1"), Some("B1".to_owned()));
        // From an unselected state the same click always selects again.
        assert_eq!(selection_after_click(None, "B1"), Some("B1".to_owned()));
    }

    #[test]
    fn clicking_the_selected_node_clears_the_selection() {
        assert_eq!(selection_after_click(Some("B1"), "B1"), None);
    }

    #[test]
    fn clicking_another_node_moves_the_selection() {
        assert_eq!(selection_after_click(Some("B2"), "B1"), Some("B1".to_owned()));
    }
}
