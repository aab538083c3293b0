//! Built-in corpus: the manuscript tradition of Gregory of Tours'
//! Histories, extracted from the MGH manuscript descriptions.

use super::model::{Citation, Edge, Family, Place, RelationKind, StemmaData, Witness};

fn cite(mgh_page: &str) -> Citation {
    Citation {
        mgh_page: mgh_page.to_owned(),
    }
}

fn place(name: &str, confidence: f32) -> Place {
    Place {
        name: name.to_owned(),
        confidence,
    }
}

fn notes(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| (*line).to_owned()).collect()
}

fn edge(from: &str, to: &str, kind: RelationKind, confidence: f32, mgh_page: &str) -> Edge {
    Edge {
        from: from.to_owned(),
        to: to.to_owned(),
        kind,
        confidence,
        evidence: vec![cite(mgh_page)],
    }
}

pub fn builtin_corpus() -> StemmaData {
    StemmaData {
        work_id: "greg-tours-hist".to_owned(),
        families: vec![
            Family {
                id: "A".to_owned(),
                label: "Classis A".to_owned(),
                notes: "Textus pleni - most complete manuscripts".to_owned(),
                evidence: vec![cite("XXIII-XXIV")],
            },
            Family {
                id: "B".to_owned(),
                label: "Classis B".to_owned(),
                notes: "Antiquissimi - oldest manuscripts (VII-VIII c.), contains books I-VI only"
                    .to_owned(),
                evidence: vec![cite("XXV-XXVII")],
            },
            Family {
                id: "C".to_owned(),
                label: "Classis C".to_owned(),
                notes: "Derived from B-like exemplar, many lacunae".to_owned(),
                evidence: vec![cite("XXVII-XXVIII")],
            },
            Family {
                id: "D".to_owned(),
                label: "Classis D".to_owned(),
                notes: "Later manuscripts with various corruptions".to_owned(),
                evidence: vec![cite("XXVIII-XXX")],
            },
        ],
        witnesses: vec![
            Witness {
                id: "A1".to_owned(),
                siglum: "A1".to_owned(),
                shelfmark: "Montis Casinensis 275".to_owned(),
                repo: "Monte Cassino".to_owned(),
                century: "XI".to_owned(),
                place: place("Monte Cassino", 0.9),
                coverage: "I-X (nearly complete, some lacunae)".to_owned(),
                script: "Beneventan minuscule".to_owned(),
                family_id: "A".to_owned(),
                notes: notes(&[
                    "Written by multiple scribes",
                    "Some omissions and lacunae",
                    "Commissioned by Abbot Desiderius (1058-1087)",
                ]),
                citations: vec![cite("XXIII-XXIV")],
            },
            Witness {
                id: "B1".to_owned(),
                siglum: "B1".to_owned(),
                shelfmark: "Cameracensis 624".to_owned(),
                repo: "Cambrai".to_owned(),
                century: "VII ex.".to_owned(),
                place: place("Cambrai", 0.7),
                coverage: "I-VI (original), VII-X (8th c. supplement)".to_owned(),
                script: "uncial + semi-uncial".to_owned(),
                family_id: "B".to_owned(),
                notes: notes(&[
                    "Oldest manuscript of Gregory",
                    "Two scribes for original part",
                    "Later supplement ca. 750 AD",
                    "Missing some folios",
                ]),
                citations: vec![cite("XXV-XXVI")],
            },
            Witness {
                id: "B2".to_owned(),
                siglum: "B2".to_owned(),
                shelfmark: "Bruxellensis 9403".to_owned(),
                repo: "Brussels".to_owned(),
                century: "VII ex.".to_owned(),
                place: place("Unknown", 0.3),
                coverage: "II,3-X (beginning lost)".to_owned(),
                script: "minuscule mixed with semi-uncial".to_owned(),
                family_id: "B".to_owned(),
                notes: notes(&[
                    "Similar to B1 but worse scribal practices",
                    "Multiple scribes with varying accuracy",
                    "Some folios transposed",
                ]),
                citations: vec![cite("XXVI")],
            },
            Witness {
                id: "B3".to_owned(),
                siglum: "B3".to_owned(),
                shelfmark: "Leidensis Voss. Lat. 63".to_owned(),
                repo: "Leiden".to_owned(),
                century: "VIII".to_owned(),
                place: place("Unknown", 0.2),
                coverage: "II,9-V,26 (fragmentary)".to_owned(),
                script: "minuscule with Merovingian cursive".to_owned(),
                family_id: "B".to_owned(),
                notes: notes(&[
                    "Badly preserved",
                    "Missing beginning and end",
                    "Affected by decay",
                ]),
                citations: vec![cite("XXVI")],
            },
            Witness {
                id: "B4".to_owned(),
                siglum: "B4".to_owned(),
                shelfmark: "Parisiacus 17654".to_owned(),
                repo: "Paris BnF".to_owned(),
                century: "VII ex.".to_owned(),
                place: place("Beauvais?", 0.6),
                coverage: "II,3-V,22 (fragmentary)".to_owned(),
                script: "uncial".to_owned(),
                family_id: "B".to_owned(),
                notes: notes(&[
                    "Originally from Saint-Pierre de Beauvais",
                    "Badly preserved, affected by decay",
                    "Missing many quaternions",
                ]),
                citations: vec![cite("XXVI-XXVII")],
            },
            Witness {
                id: "B5".to_owned(),
                siglum: "B5".to_owned(),
                shelfmark: "Parisiacus 17655".to_owned(),
                repo: "Paris BnF".to_owned(),
                century: "ca. 700".to_owned(),
                place: place("Luxeuil?", 0.7),
                coverage: "I-VI (complete for B class)".to_owned(),
                script: "uncial (Luxeuil style)".to_owned(),
                family_id: "B".to_owned(),
                notes: notes(&[
                    "Worst manuscript of class B",
                    "From Corbie monastery",
                    "Multiple scribes",
                    "Contains duplicate text",
                ]),
                citations: vec![cite("XXVII")],
            },
            Witness {
                id: "C1".to_owned(),
                siglum: "C1".to_owned(),
                shelfmark: "Heidelbergensis Pal. Lat. 864".to_owned(),
                repo: "Heidelberg".to_owned(),
                century: "IX".to_owned(),
                place: place("Lorsch", 0.9),
                coverage: "I-X (with lacunae and supplements)".to_owned(),
                script: "Carolingian minuscule".to_owned(),
                family_id: "C".to_owned(),
                notes: notes(&[
                    "From Lorsch monastery",
                    "Missing chapters supplied later",
                    "Multiple correcting hands",
                ]),
                citations: vec![cite("XXVII-XXVIII")],
            },
            Witness {
                id: "C2".to_owned(),
                siglum: "C2".to_owned(),
                shelfmark: "Namurcensis 11".to_owned(),
                repo: "Namur".to_owned(),
                century: "X".to_owned(),
                place: place("Saint-Hubert", 0.8),
                coverage: "I-X (includes Fredegar continuation)".to_owned(),
                script: "Carolingian minuscule".to_owned(),
                family_id: "C".to_owned(),
                notes: notes(&[
                    "Often preserves correct readings",
                    "Better than other C manuscripts",
                    "Accurate royal names",
                ]),
                citations: vec![cite("XXVIII")],
            },
            Witness {
                id: "D1".to_owned(),
                siglum: "D1".to_owned(),
                shelfmark: "Unknown (D11 in Arndt)".to_owned(),
                repo: "Unknown".to_owned(),
                century: "IX-X".to_owned(),
                place: place("Unknown", 0.1),
                coverage: "I-X".to_owned(),
                script: "minuscule".to_owned(),
                family_id: "D".to_owned(),
                notes: notes(&["Best manuscript of class D", "Used for C2 corrections"]),
                citations: vec![cite("XXVIII")],
            },
            Witness {
                id: "D4".to_owned(),
                siglum: "D4".to_owned(),
                shelfmark: "Unknown".to_owned(),
                repo: "Unknown".to_owned(),
                century: "IX-X".to_owned(),
                place: place("Unknown", 0.1),
                coverage: "I-X".to_owned(),
                script: "minuscule".to_owned(),
                family_id: "D".to_owned(),
                notes: notes(&[
                    "Contains some authentic forms",
                    "Preserves correct 'Chuldericus' spelling",
                    "Better than D3 gemellus",
                ]),
                citations: vec![cite("XXVIII")],
            },
        ],
        edges: vec![
            edge("archetype", "A_family", RelationKind::Copy, 0.8, "XXIII"),
            edge("archetype", "B_family", RelationKind::Copy, 0.9, "XXV"),
            edge("A_family", "A1", RelationKind::Copy, 0.8, "XXIII"),
            edge("B_family", "B1", RelationKind::Copy, 0.9, "XXV"),
            edge("B_family", "B2", RelationKind::Copy, 0.8, "XXV"),
            edge("B_family", "B3", RelationKind::Copy, 0.6, "XXVI"),
            edge("B_family", "B4", RelationKind::Copy, 0.7, "XXVI"),
            edge("B_family", "B5", RelationKind::Copy, 0.5, "XXVII"),
            edge("B_family", "C_family", RelationKind::Copy, 0.7, "XXVII"),
            edge("C_family", "C1", RelationKind::Copy, 0.8, "XXVII"),
            edge("C_family", "C2", RelationKind::Copy, 0.8, "XXVIII"),
            edge("archetype", "D_family", RelationKind::Inferred, 0.6, "XXVIII"),
            edge("D_family", "D1", RelationKind::Copy, 0.7, "XXVIII"),
            edge("D_family", "D4", RelationKind::Copy, 0.7, "XXVIII"),
            edge("D1", "C2", RelationKind::Contamination, 0.6, "XXVIII"),
        ],
    }
}
