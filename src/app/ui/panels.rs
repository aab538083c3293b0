use eframe::egui::{self, Align, Context, Layout, Vec2};

use crate::stemma::StemmaData;

use super::super::ViewModel;
use super::super::view_state::ViewState;

impl ViewModel {
    pub(in crate::app) fn new(data: StemmaData) -> Self {
        tracing::info!(
            work = %data.work_id,
            families = data.families.len(),
            witnesses = data.witnesses.len(),
            edges = data.edges.len(),
            "loaded stemma dataset"
        );

        let view = ViewState::new(&data);
        Self {
            data,
            view,
            nodes: Vec::new(),
            projection_dirty: true,
            projection_revision: 0,
            graph_cache: None,
            search_match_cache: None,
            pan: Vec2::ZERO,
            zoom: 1.0,
            visible_node_count: 0,
            visible_edge_count: 0,
            export_status: None,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        // Projection runs before any panel reads the node list.
        self.ensure_projection();

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("stemma-viewer");
                    ui.separator();
                    ui.label(format!("work: {}", self.data.work_id));
                    ui.label(format!("families: {}", self.data.families.len()));
                    ui.label(format!("witnesses: {}", self.data.witnesses.len()));
                    ui.label(format!("relations: {}", self.data.edges.len()));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!(
                            "in view: {} nodes / {} edges",
                            self.visible_node_count, self.visible_edge_count
                        ));
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(330.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(360.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_graph(ui);
        });
    }
}
