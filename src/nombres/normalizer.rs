//! Three-pass common-name normalization: base extraction per language,
//! singleton folding against the dataset, canonical-spelling election.
use crate::error::Result;
use crate::nombres::base::{ExtractorGenerico, ExtractorNombreBase};
use crate::nombres::vocabulario::Vocabulario;
use crate::nombres::{NombreConBase, TaxonNombre};
use crate::texto::normalizar_tildes;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

// Trailing "de ..." / "del ..." clause of an already-extracted base name.
static DE_CLAUSULA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+del?\s+.+$").expect("valid de-clause regex"));

pub struct NormalizadorNombres {
    idioma_principal: Option<i64>,
    extractor_principal: ExtractorNombreBase,
    extractor_generico: ExtractorGenerico,
    protegidos: Vec<String>,
    palabras_base: HashSet<String>,
    plegables: HashSet<String>,
}

impl NormalizadorNombres {
    /// `idioma_principal` selects which names take the primary-language rule
    /// cascade; names without a language always do.
    pub fn nuevo(vocabulario: &Vocabulario, idioma_principal: Option<i64>) -> Result<Self> {
        let extractor_principal = ExtractorNombreBase::nuevo(vocabulario)?;
        let extractor_generico = ExtractorGenerico::nuevo(vocabulario)?;

        let protegidos = vocabulario
            .compuestos_protegidos
            .iter()
            .map(|compuesto| normalizar_tildes(compuesto))
            .collect();
        let palabras_base = vocabulario
            .palabras_base
            .iter()
            .map(|palabra| normalizar_tildes(palabra))
            .collect();
        let plegables = vocabulario
            .adjetivos
            .iter()
            .chain(vocabulario.descriptivos.iter())
            .map(|palabra| normalizar_tildes(palabra))
            .collect();

        Ok(Self {
            idioma_principal,
            extractor_principal,
            extractor_generico,
            protegidos,
            palabras_base,
            plegables,
        })
    }

    /// Derives a base name for every input name, then folds dataset
    /// singletons onto their head word. Input order is preserved.
    pub fn normalizar(&self, nombres: &[TaxonNombre]) -> Vec<NombreConBase> {
        let mut con_base: Vec<NombreConBase> = nombres
            .iter()
            .map(|nombre| {
                let base = self.extraer_base(nombre);
                NombreConBase {
                    nombre_base_normalizado: normalizar_tildes(&base),
                    nombre_base: base,
                    nombre: nombre.clone(),
                }
            })
            .collect();

        self.plegar_singulares(&mut con_base);
        con_base
    }

    fn extraer_base(&self, nombre: &TaxonNombre) -> String {
        let es_principal = match (self.idioma_principal, nombre.idioma_id) {
            (None, _) | (_, None) => true,
            (Some(principal), Some(idioma)) => principal == idioma,
        };
        if es_principal {
            self.extractor_principal.extraer(&nombre.nombre)
        } else {
            self.extractor_generico.extraer(&nombre.nombre)
        }
    }

    /// A base name that appears exactly once in the dataset, starts with a
    /// known head word and is not a protected compound gets folded onto a
    /// shorter form, so one-off variants join their siblings.
    fn plegar_singulares(&self, nombres: &mut [NombreConBase]) {
        let mut por_base: HashMap<&str, usize> = HashMap::new();
        let mut por_cabeza: HashMap<&str, usize> = HashMap::new();
        for item in nombres.iter() {
            *por_base.entry(&item.nombre_base_normalizado).or_insert(0) += 1;
            if let Some(cabeza) = primera_palabra(&item.nombre_base_normalizado) {
                *por_cabeza.entry(cabeza).or_insert(0) += 1;
            }
        }

        let plegados: Vec<(usize, String)> = nombres
            .iter()
            .enumerate()
            .filter(|(_, item)| por_base.get(item.nombre_base_normalizado.as_str()) == Some(&1))
            .filter(|(_, item)| !self.es_protegido(&item.nombre_base_normalizado))
            .filter(|(_, item)| {
                primera_palabra(&item.nombre_base_normalizado).is_some_and(|cabeza| {
                    self.palabras_base.contains(cabeza)
                        && por_cabeza.get(cabeza).copied().unwrap_or(0) > 1
                })
            })
            .filter_map(|(i, item)| self.plegar(&item.nombre_base).map(|nuevo| (i, nuevo)))
            .collect();

        for (i, nuevo) in plegados {
            debug!("plegado: '{}' -> '{nuevo}'", nombres[i].nombre_base);
            nombres[i].nombre_base_normalizado = normalizar_tildes(&nuevo);
            nombres[i].nombre_base = nuevo;
        }
    }

    fn es_protegido(&self, base_normalizada: &str) -> bool {
        self.protegidos
            .iter()
            .any(|compuesto| base_normalizada.starts_with(compuesto.as_str()))
    }

    /// Fold priority: drop a "de ..." clause, then a trailing foldable
    /// adjective, then collapse three or more words onto the head word.
    fn plegar(&self, base: &str) -> Option<String> {
        if let std::borrow::Cow::Owned(sin_clausula) = DE_CLAUSULA.replace(base, "") {
            if !sin_clausula.is_empty() {
                return Some(sin_clausula);
            }
        }

        let palabras: Vec<&str> = base.split_whitespace().collect();
        if palabras.len() >= 2 {
            let ultima = normalizar_tildes(palabras[palabras.len() - 1]);
            if self.plegables.contains(&ultima) {
                return Some(palabras[..palabras.len() - 1].join(" "));
            }
        }
        if palabras.len() >= 3 {
            return Some(palabras[0].to_string());
        }
        None
    }
}

fn primera_palabra(texto: &str) -> Option<&str> {
    texto.split_whitespace().next()
}

/// Elects one canonical spelling per normalized base name: the most frequent
/// raw spelling wins, ties go to the spelling seen first.
pub fn elegir_canonicos(nombres: &[NombreConBase]) -> HashMap<String, String> {
    let mut conteos: HashMap<&str, Vec<(&str, usize)>> = HashMap::new();
    for item in nombres {
        let variantes = conteos
            .entry(&item.nombre_base_normalizado)
            .or_default();
        match variantes
            .iter_mut()
            .find(|(variante, _)| *variante == item.nombre_base)
        {
            Some((_, conteo)) => *conteo += 1,
            None => variantes.push((&item.nombre_base, 1)),
        }
    }

    conteos
        .into_iter()
        .map(|(clave, variantes)| {
            // Strict comparison keeps the first-seen spelling on a tie.
            let mut ganadora = "";
            let mut mejor = 0;
            for (variante, conteo) in variantes {
                if conteo > mejor {
                    mejor = conteo;
                    ganadora = variante;
                }
            }
            (clave.to_string(), ganadora.to_string())
        })
        .collect()
}

/// The representative common name of a group: the most frequent base name,
/// shorter spelling on a tie.
pub fn nombre_comun_representativo(nombres: &[NombreConBase]) -> Option<String> {
    let canonicos = elegir_canonicos(nombres);
    let mut conteos: HashMap<&str, usize> = HashMap::new();
    for item in nombres {
        *conteos.entry(&item.nombre_base_normalizado).or_insert(0) += 1;
    }

    conteos
        .into_iter()
        .filter_map(|(clave, conteo)| {
            canonicos.get(clave).map(|canonico| (canonico.clone(), conteo))
        })
        .max_by(|(a, conteo_a), (b, conteo_b)| {
            conteo_a
                .cmp(conteo_b)
                .then_with(|| b.len().cmp(&a.len()))
                .then_with(|| b.cmp(a))
        })
        .map(|(canonico, _)| canonico)
}
