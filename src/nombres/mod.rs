//! Common-name base extraction, canonicalization and taxonomic grouping.
pub mod agrupacion;
pub mod base;
pub mod normalizer;
pub mod vocabulario;

use serde::Deserialize;

/// A common name attached to a taxon, as supplied flat by the data layer.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxonNombre {
    pub nombre: String,
    pub taxon_id: u32,
    pub nombre_cientifico: Option<String>,
    pub orden: Option<String>,
    pub familia: Option<String>,
    pub genero: Option<String>,
    pub idioma_id: Option<i64>,
}

/// A `TaxonNombre` annotated with its derived base name. The source record
/// is never mutated; the derived fields live on this copy.
#[derive(Debug, Clone)]
pub struct NombreConBase {
    pub nombre: TaxonNombre,
    pub nombre_base: String,
    pub nombre_base_normalizado: String,
}
