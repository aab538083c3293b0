use std::collections::BTreeSet;

use crate::stemma::StemmaData;

use super::ViewModel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ViewMode {
    /// One cluster node per family; witnesses shown only for expanded families.
    Family,
    /// Every witness shown flat, no cluster nodes.
    All,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[allow(dead_code)]
pub(crate) struct StemmaFilters {
    pub families: Vec<String>,
    pub centuries: Vec<String>,
    pub places: Vec<String>,
    pub scripts: Vec<String>,
}

/// Partial filter update; `None` slices keep their current value.
#[derive(Clone, Debug, Default)]
#[allow(dead_code)]
pub(crate) struct FilterPatch {
    pub families: Option<Vec<String>>,
    pub centuries: Option<Vec<String>>,
    pub places: Option<Vec<String>>,
    pub scripts: Option<Vec<String>>,
}

pub(crate) struct ViewState {
    pub selected: Option<String>,
    pub expanded_families: BTreeSet<String>,
    pub search: String,
    /// Structured filters. Carried in the state shape, not yet consulted
    /// by the projection.
    #[allow(dead_code)]
    pub filters: StemmaFilters,
    pub view_mode: ViewMode,
    pub show_evidence: bool,
}

impl ViewState {
    pub(crate) fn new(data: &StemmaData) -> Self {
        Self {
            selected: None,
            expanded_families: default_expansion(data),
            search: String::new(),
            filters: StemmaFilters::default(),
            view_mode: ViewMode::Family,
            show_evidence: false,
        }
    }
}

fn default_expansion(data: &StemmaData) -> BTreeSet<String> {
    data.principal_family()
        .map(|family| family.id.clone())
        .into_iter()
        .collect()
}

/// Store actions. Mutations that feed the node projection (expansion set,
/// view mode) mark the projection dirty themselves, so the node list is
/// re-derived before the next render without the caller having to remember.
impl ViewModel {
    pub(in crate::app) fn select(&mut self, selected: Option<String>) {
        self.view.selected = selected;
    }

    pub(in crate::app) fn toggle_family(&mut self, family_id: &str) {
        if !self.view.expanded_families.remove(family_id) {
            self.view.expanded_families.insert(family_id.to_owned());
        }
        self.projection_dirty = true;
    }

    pub(in crate::app) fn set_search(&mut self, query: String) {
        self.view.search = query;
    }

    // TODO: wire the structured filters into node projection once the
    // filter UI lands.
    #[allow(dead_code)]
    pub(in crate::app) fn set_filters(&mut self, patch: FilterPatch) {
        let filters = &mut self.view.filters;
        if let Some(families) = patch.families {
            filters.families = families;
        }
        if let Some(centuries) = patch.centuries {
            filters.centuries = centuries;
        }
        if let Some(places) = patch.places {
            filters.places = places;
        }
        if let Some(scripts) = patch.scripts {
            filters.scripts = scripts;
        }
    }

    pub(in crate::app) fn set_view_mode(&mut self, mode: ViewMode) {
        if self.view.view_mode != mode {
            self.view.view_mode = mode;
            self.projection_dirty = true;
        }
    }

    pub(in crate::app) fn toggle_evidence(&mut self) {
        self.view.show_evidence = !self.view.show_evidence;
    }

    pub(in crate::app) fn reset_view(&mut self) {
        self.view.search.clear();
        self.view.view_mode = ViewMode::Family;
        self.view.expanded_families = default_expansion(&self.data);
        self.pan = eframe::egui::Vec2::ZERO;
        self.zoom = 1.0;
        self.projection_dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stemma::builtin_corpus;

    fn model() -> ViewModel {
        ViewModel::new(builtin_corpus())
    }

    #[test]
    fn principal_family_starts_expanded() {
        let model = model();
        assert!(model.view.expanded_families.contains("B"));
        assert_eq!(model.view.expanded_families.len(), 1);
    }

    #[test]
    fn toggle_family_flips_membership_and_marks_projection_dirty() {
        let mut model = model();
        model.ensure_projection();
        assert!(!model.projection_dirty);

        model.toggle_family("C");
        assert!(model.view.expanded_families.contains("C"));
        assert!(model.projection_dirty);

        model.toggle_family("C");
        assert!(!model.view.expanded_families.contains("C"));
    }

    #[test]
    fn toggle_family_accepts_unknown_ids() {
        let mut model = model();
        model.toggle_family("Z");
        assert!(model.view.expanded_families.contains("Z"));
    }

    #[test]
    fn select_replaces_the_current_selection() {
        let mut model = model();
        model.select(Some("B1".to_owned()));
        assert_eq!(model.view.selected.as_deref(), Some("B1"));

        model.select(Some("B2".to_owned()));
        assert_eq!(model.view.selected.as_deref(), Some("B2"));

        model.select(None);
        assert_eq!(model.view.selected, None);
    }

    #[test]
    fn view_mode_change_marks_projection_dirty_but_same_mode_does_not() {
        let mut model = model();
        model.ensure_projection();

        model.set_view_mode(ViewMode::Family);
        assert!(!model.projection_dirty);

        model.set_view_mode(ViewMode::All);
        assert!(model.projection_dirty);
    }

    #[test]
    fn filter_patch_merges_over_existing_slices() {
        let mut model = model();
        model.set_filters(FilterPatch {
            centuries: Some(vec!["IX".to_owned()]),
            ..FilterPatch::default()
        });
        model.set_filters(FilterPatch {
            scripts: Some(vec!["uncial".to_owned()]),
            ..FilterPatch::default()
        });

        assert_eq!(model.view.filters.centuries, vec!["IX".to_owned()]);
        assert_eq!(model.view.filters.scripts, vec!["uncial".to_owned()]);
        assert!(model.view.filters.families.is_empty());
    }

    #[test]
    fn evidence_toggle_flips_the_flag() {
        let mut model = model();
        assert!(!model.view.show_evidence);
        model.toggle_evidence();
        assert!(model.view.show_evidence);
        model.toggle_evidence();
        assert!(!model.view.show_evidence);
    }

    #[test]
    fn reset_restores_default_expansion_and_mode() {
        let mut model = model();
        model.set_view_mode(ViewMode::All);
        model.toggle_family("B");
        model.toggle_family("D");
        model.set_search("corbie".to_owned());

        model.reset_view();
        assert_eq!(model.view.view_mode, ViewMode::Family);
        assert!(model.view.expanded_families.contains("B"));
        assert_eq!(model.view.expanded_families.len(), 1);
        assert!(model.view.search.is_empty());
    }
}
