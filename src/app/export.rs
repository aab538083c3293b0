use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::stemma::StemmaData;

use super::render_utils::{
    CANVAS_FILL, color_hex, dash_pattern, edge_stroke_width, family_color,
};
use super::{RenderGraph, RenderNodeKind, ViewModel};

const SVG_MARGIN: f32 = 48.0;

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Serialize the current layout as a standalone SVG document, mirroring the
/// on-screen encoding: palette fills, confidence-scaled strokes, dash
/// patterns by relation kind, selection outline and evidence badges.
pub(super) fn render_svg(cache: &RenderGraph, selected: Option<&str>, show_evidence: bool) -> String {
    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for node in &cache.nodes {
        min_x = min_x.min(node.world_pos.x - node.base_radius);
        min_y = min_y.min(node.world_pos.y - node.base_radius);
        max_x = max_x.max(node.world_pos.x + node.base_radius);
        max_y = max_y.max(node.world_pos.y + node.base_radius);
    }
    if !min_x.is_finite() {
        min_x = 0.0;
        min_y = 0.0;
        max_x = 1.0;
        max_y = 1.0;
    }

    let width = (max_x - min_x) + SVG_MARGIN * 2.0;
    let height = (max_y - min_y) + SVG_MARGIN * 2.0;
    let origin_x = min_x - SVG_MARGIN;
    let origin_y = min_y - SVG_MARGIN;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{origin_x:.1} {origin_y:.1} {width:.1} {height:.1}\">"
    );
    let _ = writeln!(
        svg,
        "  <rect x=\"{origin_x:.1}\" y=\"{origin_y:.1}\" width=\"{width:.1}\" height=\"{height:.1}\" fill=\"{}\"/>",
        color_hex(CANVAS_FILL)
    );

    for edge in &cache.edges {
        let from = cache.nodes[edge.source].world_pos;
        let to = cache.nodes[edge.target].world_pos;
        let stroke_width = edge_stroke_width(edge.confidence);
        let dash_attr = match dash_pattern(edge.kind) {
            Some((dash, gap)) => format!(" stroke-dasharray=\"{dash} {gap}\""),
            None => String::new(),
        };
        let _ = writeln!(
            svg,
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#969696\" stroke-width=\"{stroke_width:.2}\"{dash_attr}/>",
            from.x, from.y, to.x, to.y
        );
    }

    for node in &cache.nodes {
        let fill = color_hex(family_color(node.family_id.as_deref()));
        let fill_opacity = if node.kind == RenderNodeKind::FamilyExpanded {
            " fill-opacity=\"0.7\""
        } else {
            ""
        };
        let (outline, outline_width) = if selected == Some(node.id.as_str()) {
            ("#0c0c0c", 3.0)
        } else {
            ("#f0f0f0", 1.5)
        };

        let _ = writeln!(
            svg,
            "  <circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"{:.1}\" fill=\"{fill}\"{fill_opacity} stroke=\"{outline}\" stroke-width=\"{outline_width}\"/>",
            node.world_pos.x, node.world_pos.y, node.base_radius
        );
        let _ = writeln!(
            svg,
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"sans-serif\" font-size=\"12\" fill=\"#f5f5f5\">{}</text>",
            node.world_pos.x,
            node.world_pos.y,
            xml_escape(&node.label)
        );

        if show_evidence && node.citation_count > 0 {
            let badge_x = node.world_pos.x + node.base_radius * 0.85;
            let badge_y = node.world_pos.y - node.base_radius * 0.85;
            let _ = writeln!(
                svg,
                "  <circle cx=\"{badge_x:.1}\" cy=\"{badge_y:.1}\" r=\"8\" fill=\"#e67e22\" stroke=\"#ffffff\" stroke-width=\"1\"/>"
            );
            let _ = writeln!(
                svg,
                "  <text x=\"{badge_x:.1}\" y=\"{badge_y:.1}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"sans-serif\" font-size=\"10\" fill=\"#ffffff\">{}</text>",
                node.citation_count
            );
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Pretty-printed JSON of the full dataset, not the view-filtered subset.
pub(super) fn render_dataset_json(data: &StemmaData) -> Result<String> {
    serde_json::to_string_pretty(data).context("failed to serialize stemma dataset")
}

fn write_export(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)
        .with_context(|| format!("failed to write export to {}", path.display()))
}

fn save_with_dialog(
    file_name: &str,
    filter_name: &str,
    extensions: &[&str],
    contents: &str,
) -> Result<Option<PathBuf>> {
    let Some(path) = rfd::FileDialog::new()
        .set_file_name(file_name)
        .add_filter(filter_name, extensions)
        .save_file()
    else {
        return Ok(None);
    };

    write_export(&path, contents)?;
    Ok(Some(path))
}

impl ViewModel {
    pub(in crate::app) fn export_svg_file(&mut self) {
        let Some(cache) = &self.graph_cache else {
            debug!("SVG export requested with no rendered graph");
            return;
        };
        if cache.nodes.is_empty() {
            return;
        }

        let svg = render_svg(cache, self.view.selected.as_deref(), self.view.show_evidence);
        let file_name = format!("{}-stemma.svg", self.data.work_id);
        match save_with_dialog(&file_name, "SVG image", &["svg"], &svg) {
            Ok(Some(path)) => {
                info!("exported stemma SVG to {}", path.display());
                self.export_status = Some(format!("Saved {}", path.display()));
            }
            Ok(None) => {}
            Err(error) => {
                warn!("SVG export failed: {error:#}");
                self.export_status = Some(format!("Export failed: {error:#}"));
            }
        }
    }

    pub(in crate::app) fn export_json_file(&mut self) {
        let json = match render_dataset_json(&self.data) {
            Ok(json) => json,
            Err(error) => {
                warn!("dataset export failed: {error:#}");
                self.export_status = Some(format!("Export failed: {error:#}"));
                return;
            }
        };

        let file_name = format!("{}-stemma-data.json", self.data.work_id);
        match save_with_dialog(&file_name, "JSON data", &["json"], &json) {
            Ok(Some(path)) => {
                info!("exported stemma dataset to {}", path.display());
                self.export_status = Some(format!("Saved {}", path.display()));
            }
            Ok(None) => {}
            Err(error) => {
                warn!("dataset export failed: {error:#}");
                self.export_status = Some(format!("Export failed: {error:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stemma::builtin_corpus;

    fn ready_model() -> ViewModel {
        let mut model = ViewModel::new(builtin_corpus());
        model.ensure_projection();
        model
    }

    #[test]
    fn svg_covers_visible_nodes_and_edge_patterns() {
        let model = ready_model();
        let cache = model.graph_cache.as_ref().unwrap();
        let svg = render_svg(cache, None, false);

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("viewBox"));
        // Expanded B family witnesses are in the drawing, collapsed ones are not.
        assert!(svg.contains(">B3</text>"));
        assert!(!svg.contains(">C1</text>"));
        // The archetype -> D family relation is inferred, so it draws dotted.
        assert!(svg.contains("stroke-dasharray=\"1.5 3\""));
    }

    #[test]
    fn svg_marks_the_selected_node_with_a_heavy_outline() {
        let model = ready_model();
        let cache = model.graph_cache.as_ref().unwrap();

        let unselected = render_svg(cache, None, false);
        assert!(!unselected.contains("stroke=\"#0c0c0c\""));

        let selected = render_svg(cache, Some("B1"), false);
        assert!(selected.contains("stroke=\"#0c0c0c\" stroke-width=\"3\""));
    }

    #[test]
    fn svg_badges_follow_the_evidence_flag() {
        let model = ready_model();
        let cache = model.graph_cache.as_ref().unwrap();

        assert!(!render_svg(cache, None, false).contains("#e67e22"));
        assert!(render_svg(cache, None, true).contains("#e67e22"));
    }

    #[test]
    fn svg_escapes_markup_in_labels() {
        assert_eq!(xml_escape("a < b & c"), "a &lt; b &amp; c");
    }

    #[test]
    fn dataset_json_round_trips() {
        let data = builtin_corpus();
        let json = render_dataset_json(&data).unwrap();
        let parsed: StemmaData = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, data);
        assert!(json.contains("\"workId\": \"greg-tours-hist\""));
    }

    #[test]
    fn write_export_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stemma.svg");
        write_export(&path, "<svg/>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<svg/>");
    }
}
