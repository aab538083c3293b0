use serde::{Deserialize, Serialize};

/// Id of the singleton pseudo-node at the head of every stemma.
pub const ARCHETYPE_ID: &str = "archetype";

const FAMILY_NODE_SUFFIX: &str = "_family";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    #[serde(rename = "mghPage")]
    pub mgh_page: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub confidence: f32,
}

/// A surviving manuscript copy of the work.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Witness {
    pub id: String,
    pub siglum: String,
    pub shelfmark: String,
    pub repo: String,
    pub century: String,
    pub place: Place,
    pub coverage: String,
    pub script: String,
    pub family_id: String,
    pub notes: Vec<String>,
    pub citations: Vec<Citation>,
}

/// A class of witnesses believed to share a common intermediate ancestor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Family {
    pub id: String,
    pub label: String,
    pub notes: String,
    pub evidence: Vec<Citation>,
}

impl Family {
    /// Node id of this family's cluster in the rendered graph.
    pub fn node_id(&self) -> String {
        family_node_id(&self.id)
    }
}

pub fn family_node_id(family_id: &str) -> String {
    format!("{family_id}{FAMILY_NODE_SUFFIX}")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Copy,
    Contamination,
    Inferred,
}

impl RelationKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Contamination => "contamination",
            Self::Inferred => "inferred",
        }
    }
}

/// Directed relation between two node ids (witness, family cluster, or archetype).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: RelationKind,
    pub confidence: f32,
    pub evidence: Vec<Citation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StemmaData {
    pub work_id: String,
    pub families: Vec<Family>,
    pub witnesses: Vec<Witness>,
    pub edges: Vec<Edge>,
}

impl StemmaData {
    pub fn family(&self, family_id: &str) -> Option<&Family> {
        self.families.iter().find(|family| family.id == family_id)
    }

    pub fn witness(&self, witness_id: &str) -> Option<&Witness> {
        self.witnesses
            .iter()
            .find(|witness| witness.id == witness_id)
    }

    pub fn family_witnesses<'a>(
        &'a self,
        family_id: &'a str,
    ) -> impl Iterator<Item = &'a Witness> + 'a {
        self.witnesses
            .iter()
            .filter(move |witness| witness.family_id == family_id)
    }

    /// The family pre-expanded on startup: the one with the most witnesses,
    /// ties broken by dataset order.
    pub fn principal_family(&self) -> Option<&Family> {
        let mut best: Option<(&Family, usize)> = None;
        for family in &self.families {
            let count = self.family_witnesses(&family.id).count();
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((family, count)),
            }
        }
        best.map(|(family, _)| family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stemma::builtin_corpus;

    #[test]
    fn family_node_ids_carry_the_cluster_suffix() {
        assert_eq!(family_node_id("B"), "B_family");
    }

    #[test]
    fn corpus_witnesses_reference_existing_families() {
        let data = builtin_corpus();
        for witness in &data.witnesses {
            assert!(
                data.family(&witness.family_id).is_some(),
                "witness {} references unknown family {}",
                witness.id,
                witness.family_id
            );
        }
    }

    #[test]
    fn corpus_confidences_stay_in_unit_range() {
        let data = builtin_corpus();
        for edge in &data.edges {
            assert!((0.0..=1.0).contains(&edge.confidence));
        }
        for witness in &data.witnesses {
            assert!((0.0..=1.0).contains(&witness.place.confidence));
        }
    }

    #[test]
    fn principal_family_is_the_largest() {
        let data = builtin_corpus();
        assert_eq!(data.principal_family().map(|family| family.id.as_str()), Some("B"));
    }

    #[test]
    fn relation_kind_round_trips_through_json() {
        let json = serde_json::to_string(&RelationKind::Contamination).unwrap();
        assert_eq!(json, "\"contamination\"");
        let kind: RelationKind = serde_json::from_str("\"inferred\"").unwrap();
        assert_eq!(kind, RelationKind::Inferred);
    }
}
