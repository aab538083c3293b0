mod corpus;
mod load;
mod model;

pub use corpus::builtin_corpus;
pub use load::load_stemma_file;
pub use model::{
    ARCHETYPE_ID, Citation, Edge, Family, Place, RelationKind, StemmaData, Witness,
    family_node_id,
};
