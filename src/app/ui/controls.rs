use eframe::egui::{self, Color32, RichText, Ui, vec2};

use super::super::ViewModel;
use super::super::render_utils::family_color;
use super::super::view_state::ViewMode;

fn color_swatch(ui: &mut Ui, color: Color32, text: &str) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(vec2(12.0, 12.0), egui::Sense::hover());
        ui.painter().rect_filled(rect.shrink(1.0), 2.0, color);
        ui.label(text);
    });
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Stemma Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search (sigla, repositories, centuries)")
            .on_hover_text("Fuzzy-highlight matching nodes without changing the graph.");
        let mut search = self.view.search.clone();
        if ui.text_edit_singleline(&mut search).changed() {
            self.set_search(search);
        }

        ui.separator();
        ui.label(RichText::new("View").strong());

        let mut mode = self.view.view_mode;
        ui.horizontal(|ui| {
            ui.selectable_value(&mut mode, ViewMode::Family, "Family clusters")
                .on_hover_text("Group witnesses under expandable family nodes.");
            ui.selectable_value(&mut mode, ViewMode::All, "All witnesses")
                .on_hover_text("Show every witness flat, without family clusters.");
        });
        self.set_view_mode(mode);

        let mut show_evidence = self.view.show_evidence;
        if ui
            .checkbox(&mut show_evidence, "Show evidence badges")
            .on_hover_text("Overlay citation counts on nodes that carry evidence.")
            .changed()
        {
            self.toggle_evidence();
        }

        ui.separator();
        ui.label(RichText::new("Families").strong());

        let families: Vec<(String, String, bool)> = self
            .data
            .families
            .iter()
            .map(|family| {
                (
                    family.id.clone(),
                    family.label.clone(),
                    self.view.expanded_families.contains(&family.id),
                )
            })
            .collect();
        for (family_id, label, expanded) in families {
            let marker = if expanded { "▼" } else { "▶" };
            if ui.button(format!("{marker} {label}")).clicked() {
                self.toggle_family(&family_id);
            }
        }

        ui.separator();
        ui.label(RichText::new("Legend").strong());
        color_swatch(ui, family_color(None), "Archetype");
        let legend: Vec<(String, String)> = self
            .data
            .families
            .iter()
            .map(|family| (family.id.clone(), family.label.clone()))
            .collect();
        for (family_id, label) in legend {
            color_swatch(ui, family_color(Some(&family_id)), &label);
        }
        ui.add_space(4.0);
        ui.label("solid - direct copy");
        ui.label("dashed - contamination");
        ui.label("dotted - inferred relation");
        ui.label("line weight - relation confidence");

        ui.separator();
        ui.label(RichText::new("Actions").strong());
        if ui.button("Reset view").clicked() {
            self.reset_view();
        }
        if ui.button("Export SVG").clicked() {
            self.export_svg_file();
        }
        if ui.button("Export data (JSON)").clicked() {
            self.export_json_file();
        }
        if let Some(status) = &self.export_status {
            ui.small(status.clone());
        }

        ui.separator();
        ui.label(RichText::new("Instructions").strong());
        ui.label("Click family nodes to expand or collapse them.");
        ui.label("Click witness nodes to inspect their details.");
        ui.label("Drag to pan, scroll to zoom.");
    }
}
