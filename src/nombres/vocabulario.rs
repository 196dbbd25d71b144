//! Word lists driving the base-name rules.
//!
//! The rules themselves are fixed; every word they consume comes from this
//! struct, so a locale can swap lists via a JSON file without code changes.
use crate::error::Result;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Vocabulario {
    /// Body-part / habitat nouns kept after "de" ("de bosque", "de vientre").
    pub sustantivos_comunes: Vec<String>,
    /// Descriptive epithets that close a base name ("arlequín", "cohete").
    pub descriptivos: Vec<String>,
    /// Multi-word compounds that must never collapse to their first word.
    pub compuestos_protegidos: Vec<String>,
    /// Short genus-style head words ("Rana", "Cutín", "Sapo").
    pub palabras_base: Vec<String>,
    /// Trailing compound phrases stripped whole ("cabeza grande").
    pub frases_compuestas: Vec<String>,
    /// Trailing simple adjectives stripped from species names.
    pub adjetivos: Vec<String>,
    /// Trailing proper names (peoples, dedications) stripped whole.
    pub nombres_propios: Vec<String>,
    /// Places that survive a trailing "del ..." ("del Cóndor").
    pub lugares_del: Vec<String>,
    /// Cross-language adjectives for the generic (non-primary) path.
    pub adjetivos_genericos: Vec<String>,
    /// Word-count cap applied after all strip rules.
    pub max_palabras: usize,
}

impl Vocabulario {
    /// Loads a vocabulary from JSON; absent fields keep their defaults.
    pub fn desde_archivo(ruta: &Path) -> Result<Self> {
        let lector = BufReader::new(File::open(ruta)?);
        Ok(serde_json::from_reader(lector)?)
    }
}

impl Default for Vocabulario {
    fn default() -> Self {
        Self {
            sustantivos_comunes: a_vec(&[
                "bosque",
                "pies",
                "vientre",
                "cabeza",
                "dorso",
                "disco",
                "ojos",
                "muslos",
                "patas",
                "dedos",
                "flancos",
                "ingle",
                "ingles",
                "líneas",
                "manchas",
                "puntos",
                "rayas",
                "saco",
                "párpado",
                "color",
                "garganta",
                "hocico",
                "rostro",
                "brazo",
                "membrana",
                "bigote",
                "membranas",
                "cara",
                "gula",
                "trasero",
                "plano",
                "rorso",
                "anteojos",
                "labio",
                "labios",
            ]),
            descriptivos: a_vec(&[
                "hojarasquero",
                "arlequín",
                "espinosa",
                "torrentícola",
                "venenosa",
                "arbórea",
                "cohete",
                "gladiadora",
                "gomosa",
                "verde",
                "ágil",
                "amazónica",
                "nodriza",
                "dedilarga",
                "bullanguero",
                "listada",
                "marsupial",
                "hoja",
                "hocicuda",
                "payaso",
                "de charco",
            ]),
            compuestos_protegidos: a_vec(&[
                "Rana de cristal",
                "Rana de casco",
                "Rana de dedos delgados",
                "Rana de espuma",
            ]),
            palabras_base: a_vec(&[
                "Ilulo",
                "Sapo",
                "Sapito",
                "Cutín",
                "Cutin",
                "Rana",
                "Ranita",
                "Salamandra",
                "Kayla",
                "Pipa",
                "Smilisca",
            ]),
            frases_compuestas: a_vec(&[
                "amazónico variable",
                "cabeza grande",
                "calcar pequeño",
                "diablo andino",
                "gigante andino",
                "línea amarilla",
                "más hermoso",
                "muslo negro",
                "negro y gris",
                "no saltarín",
                "previo a la muerte",
                "rojo sangre",
                "salpicado pálido",
                "tuberculoso pequeño",
                "verde rojizo",
                "gigante moteado",
                "mágica y maravillosa",
                "mapa apendiculado",
                "anteojos bifurcado",
                "de la costa",
                "juiciu jambatu",
                "gran hermano",
                "de cinco líneas",
                "de ojos rojos",
                "punteada naranja",
                "punteada rosada",
            ]),
            adjetivos: a_vec(&[
                "adornado",
                "afortunado",
                "afro",
                "ágata",
                "amazónico",
                "anaranjado",
                "andino",
                "atenuado",
                "alado",
                "amistoso",
                "balador",
                "bello",
                "bonito",
                "bromelícola",
                "café",
                "cañari",
                "ceniciento",
                "ceñudo",
                "charlatán",
                "conífero",
                "coronado",
                "cornudo",
                "desnudo",
                "diferente",
                "diminuto",
                "ecuatoriano",
                "elfo",
                "enano",
                "enguatado",
                "escondedor",
                "espadachín",
                "espejo",
                "espinoso",
                "exiliado",
                "frío",
                "gigante",
                "glandular",
                "grande",
                "grueso",
                "gualita",
                "guardián",
                "labioso",
                "llorón",
                "luchador",
                "magnífico",
                "manchado",
                "marino",
                "mezclado",
                "minúsculo",
                "minuto",
                "modesto",
                "montañero",
                "morlaco",
                "moteado",
                "mutable",
                "narizón",
                "negro",
                "negra",
                "obscuro",
                "ocelado",
                "ocultador",
                "pequeño",
                "peruano",
                "pinchaque",
                "pseudoacuminado",
                "raro",
                "resplandeciente",
                "rugoso",
                "sacharuna",
                "saltarín",
                "salpicado",
                "sanguinolento",
                "sencillo",
                "silencioso",
                "solitario",
                "sonrosado",
                "sordo",
                "sucio",
                "tiktik",
                "tímido",
                "truncado",
                "tubercular",
                "variable",
                "variado",
                "verde",
                "vertebralis",
                "viudo",
                "marrones",
                "anómala",
                "salpicada",
                "ecuatoriana",
                "minúscula",
                "punteada",
                "naranja",
                "rosada",
                "amarilla",
                "azul",
                "blanca",
            ]),
            nombres_propios: a_vec(&[
                "Cuico",
                "Kichwa",
                "Quechua",
                "Waorani",
                "Yumbo",
                "Tesoro",
                "Tsáchila",
                "Siona",
                "Puro Coffee",
                "Príncipe Carlos",
                "Jambato",
                "Zápara",
            ]),
            lugares_del: a_vec(&[
                "bosque",
                "Norte",
                "Chocó",
                "Cóndor",
                "Gualaceño",
                "Padre",
                "Alto Amazonas",
            ]),
            adjetivos_genericos: a_vec(&[
                "común",
                "grande",
                "pequeño",
                "enano",
                "gigante",
                "common",
                "giant",
                "dwarf",
                "little",
                "lesser",
                "greater",
                "spotted",
                "striped",
            ]),
            max_palabras: 5,
        }
    }
}

fn a_vec(palabras: &[&str]) -> Vec<String> {
    palabras.iter().map(|p| p.to_string()).collect()
}

/// Joins a word list into a regex alternation. Multi-word entries accept any
/// whitespace between words; longer entries come first so they win captures.
pub(crate) fn alternacion(palabras: &[String]) -> String {
    if palabras.is_empty() {
        // Never-matching pattern, so a rule built from an empty list is inert.
        return r"[^\s\S]".to_string();
    }
    let mut escapadas: Vec<String> = palabras
        .iter()
        .map(|palabra| regex::escape(palabra).replace(' ', r"\s+"))
        .collect();
    escapadas.sort_by(|a, b| b.len().cmp(&a.len()));
    escapadas.join("|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn alternacion_escapa_y_ordena() {
        let palabras = a_vec(&["de charco", "verde"]);
        assert_eq!(alternacion(&palabras), r"de\s+charco|verde");
    }

    #[test]
    fn alternacion_vacia_no_coincide_nunca() {
        let patron = alternacion(&[]);
        let regex = regex::Regex::new(&format!("^(?:{patron})$")).unwrap();
        assert!(!regex.is_match(""));
        assert!(!regex.is_match("rana"));
    }

    #[test]
    fn carga_parcial_desde_json() {
        let mut archivo = NamedTempFile::new().unwrap();
        writeln!(
            archivo,
            r#"{{"palabras_base": ["Kokoe"], "max_palabras": 3}}"#
        )
        .unwrap();

        let vocabulario = Vocabulario::desde_archivo(archivo.path()).unwrap();
        assert_eq!(vocabulario.palabras_base, vec!["Kokoe".to_string()]);
        assert_eq!(vocabulario.max_palabras, 3);
        // Untouched fields keep their defaults.
        assert!(vocabulario.descriptivos.contains(&"arlequín".to_string()));
    }

    #[test]
    fn json_invalido_es_error() {
        let mut archivo = NamedTempFile::new().unwrap();
        writeln!(archivo, "no es json").unwrap();
        assert!(Vocabulario::desde_archivo(archivo.path()).is_err());
    }
}
