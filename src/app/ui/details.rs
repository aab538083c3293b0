use eframe::egui::{self, RichText, Ui};

use crate::stemma::{Citation, Edge, Family, Witness};
use crate::util::uncertain;

use super::super::ViewModel;
use super::super::projection::NodePayload;

fn citation_row(ui: &mut Ui, citations: &[Citation]) {
    if citations.is_empty() {
        ui.label("No citations recorded.");
        return;
    }

    ui.horizontal_wrapped(|ui| {
        for citation in citations {
            ui.label(format!("p. {}", citation.mgh_page));
        }
    });
}

fn witness_details(ui: &mut Ui, witness: &Witness) {
    ui.label(RichText::new(witness.siglum.as_str()).strong());
    ui.add_space(6.0);

    ui.label(format!("Shelfmark: {}", witness.shelfmark));
    ui.label(format!("Repository: {}", witness.repo));
    ui.label(format!("Century: {}", witness.century));
    let place_marker = if uncertain(witness.place.confidence) {
        " (?)"
    } else {
        ""
    };
    ui.label(format!("Place: {}{place_marker}", witness.place.name));
    ui.label(format!("Script: {}", witness.script));
    ui.label(format!("Coverage: {}", witness.coverage));
    ui.label(format!("Family: Classis {}", witness.family_id));

    if !witness.notes.is_empty() {
        ui.separator();
        ui.label(RichText::new("Notes").strong());
        for note in &witness.notes {
            ui.label(format!("- {note}"));
        }
    }

    ui.separator();
    ui.label(RichText::new("MGH citations").strong());
    citation_row(ui, &witness.citations);
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        self.ensure_projection();

        ui.heading("Selection Details");
        ui.add_space(6.0);

        let Some(selected_id) = self.view.selected.clone() else {
            ui.label("Select a node from the graph to view details.");
            return;
        };

        // A selection can outlive its node, e.g. after collapsing its family.
        let Some(projected) = self.nodes.iter().find(|node| node.id == selected_id) else {
            ui.label("The selected node is not part of the current view.");
            return;
        };

        match projected.payload {
            NodePayload::Archetype => {
                ui.label(RichText::new("Archetype").strong());
                ui.add_space(6.0);
                ui.label("The hypothesized earliest reconstructable source of the tradition.");
            }
            NodePayload::Witness { witness_index } => {
                if let Some(witness) = self.data.witnesses.get(witness_index) {
                    witness_details(ui, witness);
                }
            }
            NodePayload::Family { family_index, .. } => {
                if let Some(family) = self.data.families.get(family_index) {
                    self.family_details(ui, family);
                }
            }
        }

        self.relation_details(ui, &selected_id);
    }

    fn family_details(&self, ui: &mut Ui, family: &Family) {
        ui.label(RichText::new(family.label.as_str()).strong());
        ui.add_space(6.0);
        ui.label(family.notes.as_str());

        ui.separator();
        ui.label(RichText::new("Witnesses in this family").strong());
        let mut any = false;
        for witness in self.data.family_witnesses(&family.id) {
            any = true;
            ui.label(format!(
                "{} - {} - {}",
                witness.siglum, witness.century, witness.repo
            ));
        }
        if !any {
            ui.label("No witnesses assigned.");
        }

        ui.separator();
        ui.label(RichText::new("MGH evidence").strong());
        citation_row(ui, &family.evidence);
    }

    fn relation_details(&mut self, ui: &mut Ui, selected_id: &str) {
        let related: Vec<(String, String)> = self
            .data
            .edges
            .iter()
            .filter(|edge| edge.from == selected_id || edge.to == selected_id)
            .map(|edge| self.relation_label(edge, selected_id))
            .collect();

        if related.is_empty() {
            return;
        }

        ui.separator();
        ui.label(RichText::new("Textual relations").strong());

        let mut pending_selection = None;
        egui::ScrollArea::vertical()
            .id_salt("relations_scroll")
            .max_height(220.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for (label, other_id) in &related {
                    let in_view = self.nodes.iter().any(|node| &node.id == other_id);
                    if in_view {
                        if ui.link(label.as_str()).clicked() {
                            pending_selection = Some(other_id.clone());
                        }
                    } else {
                        ui.label(label.as_str());
                    }
                }
            });

        if let Some(next) = pending_selection {
            self.select(Some(next));
        }
    }

    /// Human-readable relation line plus the id at the other end.
    fn relation_label(&self, edge: &Edge, selected_id: &str) -> (String, String) {
        let is_source = edge.from == selected_id;
        let other_id = if is_source { &edge.to } else { &edge.from };
        let direction = if is_source {
            "Source for"
        } else {
            "Derived from"
        };
        let confidence_marker = if uncertain(edge.confidence) { " (?)" } else { "" };

        let other_label = self.display_label(other_id);
        (
            format!(
                "{direction} {other_label} ({}){confidence_marker}",
                edge.kind.label()
            ),
            other_id.clone(),
        )
    }

    fn display_label(&self, node_id: &str) -> String {
        if node_id == crate::stemma::ARCHETYPE_ID {
            return "Archetype".to_owned();
        }
        if let Some(witness) = self.data.witness(node_id) {
            return witness.siglum.clone();
        }
        if let Some(family) = self
            .data
            .families
            .iter()
            .find(|family| family.node_id() == node_id)
        {
            return family.label.clone();
        }
        node_id.to_owned()
    }
}
