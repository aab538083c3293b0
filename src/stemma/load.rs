use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use super::model::StemmaData;

pub fn load_stemma_file(path: &Path) -> Result<StemmaData> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset file {}", path.display()))?;

    let data: StemmaData = serde_json::from_str(&raw)
        .with_context(|| format!("invalid stemma JSON in {}", path.display()))?;

    validate(&data)?;
    Ok(data)
}

fn validate(data: &StemmaData) -> Result<()> {
    if data.families.is_empty() {
        return Err(anyhow!("dataset {} declares no families", data.work_id));
    }

    for witness in &data.witnesses {
        if data.family(&witness.family_id).is_none() {
            return Err(anyhow!(
                "witness {} references unknown family {}",
                witness.id,
                witness.family_id
            ));
        }

        if !(0.0..=1.0).contains(&witness.place.confidence) {
            return Err(anyhow!(
                "witness {} has place confidence {} outside [0, 1]",
                witness.id,
                witness.place.confidence
            ));
        }
    }

    for edge in &data.edges {
        if !(0.0..=1.0).contains(&edge.confidence) {
            return Err(anyhow!(
                "edge {} -> {} has confidence {} outside [0, 1]",
                edge.from,
                edge.to,
                edge.confidence
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::stemma::builtin_corpus;

    fn write_temp_json(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_a_serialized_corpus_back_unchanged() {
        let data = builtin_corpus();
        let json = serde_json::to_string_pretty(&data).unwrap();
        let file = write_temp_json(&json);

        let loaded = load_stemma_file(file.path()).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn rejects_witnesses_with_dangling_family_references() {
        let mut data = builtin_corpus();
        data.witnesses[0].family_id = "Z".to_owned();
        let json = serde_json::to_string(&data).unwrap();
        let file = write_temp_json(&json);

        let error = load_stemma_file(file.path()).unwrap_err();
        assert!(error.to_string().contains("unknown family"));
    }

    #[test]
    fn rejects_out_of_range_edge_confidence() {
        let mut data = builtin_corpus();
        data.edges[0].confidence = 1.4;
        let json = serde_json::to_string(&data).unwrap();
        let file = write_temp_json(&json);

        assert!(load_stemma_file(file.path()).is_err());
    }

    #[test]
    fn reports_missing_files_with_the_path() {
        let error = load_stemma_file(Path::new("/nonexistent/stemma.json")).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/stemma.json"));
    }
}
