//! Fuzzy resolution of a human-typed slug to a publication record.
//!
//! The cascade is biased toward recall: slugs arrive from old links and
//! hand-edited URLs, so after the exact stages fail we accept the best
//! candidate above a low 0.3 similarity threshold. A miss is a normal
//! `None`, never an error.
use crate::publicacion::Publicacion;
use crate::slug::generator::{autor_de_cita, generar_slug_publicacion};
use crate::slug::normalize::{anios_del_slug, es_token_anio, normalizar_slug};
use crate::texto::quitar_diacriticos;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static SLUG_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^publicacion-(\d+)$").expect("valid id-slug regex"));

static PALABRAS_COMUNES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(ano|actual|the|of|a|an)\b").expect("valid stop-word regex"));

static NO_AUTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s-]+").expect("valid author charset regex"));

static ESPACIOS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

static GUIONES: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("valid hyphen-run regex"));

/// Similarity below or at this value is treated as "no match".
const UMBRAL_SIMILITUD: f64 = 0.3;
/// Fixed score of the author+year fallback stage.
const SIMILITUD_AUTOR_ANIO: f64 = 0.7;
/// A publication year may differ by one from the year in the slug.
const TOLERANCIA_ANIO: i32 = 1;

/// Stage of the cascade that produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metodo {
    IdDirecto,
    SlugExacto,
    SlugNormalizado,
    Similitud,
    AutorAnio,
}

impl fmt::Display for Metodo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let texto = match self {
            Metodo::IdDirecto => "id-directo",
            Metodo::SlugExacto => "slug-exacto",
            Metodo::SlugNormalizado => "slug-normalizado",
            Metodo::Similitud => "similitud",
            Metodo::AutorAnio => "autor-anio",
        };
        f.write_str(texto)
    }
}

/// A resolved slug: the record plus how (and how confidently) it matched.
#[derive(Debug)]
pub struct Resolucion<'a> {
    pub publicacion: &'a Publicacion,
    pub metodo: Metodo,
    pub similitud: f64,
}

pub fn slug_de_publicacion(publicacion: &Publicacion) -> String {
    generar_slug_publicacion(
        publicacion.cita_corta.as_deref(),
        publicacion.anio(),
        publicacion.titulo.as_deref(),
        publicacion.id_publicacion,
    )
}

/// Resolves `slug` against the full candidate set.
///
/// Stages, each short-circuiting on success: literal `publicacion-<id>`
/// lookup, exact slug equality, normalized equality, weighted component
/// similarity plus whole-string containment, and an author+year fallback.
pub fn resolver_slug<'a>(
    slug: &str,
    publicaciones: &'a [Publicacion],
) -> Option<Resolucion<'a>> {
    let slug = slug.trim();
    if slug.is_empty() {
        return None;
    }

    // 1. "publicacion-<id>" resolves straight to the numeric id. A
    // well-formed id slug is terminal: on a miss it is not-found, it never
    // falls through to the fuzzy stages (where a candidate without a short
    // citation, whose generated slug is also "publicacion-<id>", could
    // otherwise steal the match).
    if let Some(captura) = SLUG_ID.captures(slug) {
        let publicacion = captura[1]
            .parse::<u32>()
            .ok()
            .and_then(|id| publicaciones.iter().find(|p| p.id_publicacion == id))?;
        debug!("slug {slug} resuelto por id directo");
        return Some(Resolucion {
            publicacion,
            metodo: Metodo::IdDirecto,
            similitud: 1.0,
        });
    }

    let generados: Vec<String> = publicaciones.iter().map(slug_de_publicacion).collect();

    // 2. Exact equality against each generated slug, in candidate order.
    for (publicacion, generado) in publicaciones.iter().zip(&generados) {
        if generado == slug {
            return Some(Resolucion {
                publicacion,
                metodo: Metodo::SlugExacto,
                similitud: 1.0,
            });
        }
    }

    // 3. Equality after normalizing both sides.
    let buscado = normalizar_slug(slug);
    let normalizados: Vec<String> = generados.iter().map(|g| normalizar_slug(g)).collect();
    for (publicacion, normalizado) in publicaciones.iter().zip(&normalizados) {
        if *normalizado == buscado {
            debug!("slug {slug} resuelto por igualdad normalizada");
            return Some(Resolucion {
                publicacion,
                metodo: Metodo::SlugNormalizado,
                similitud: 1.0,
            });
        }
    }

    // 4. Weighted similarity over (author, year, title) components, plus an
    // independent whole-string containment score per candidate.
    let mut mejor: Option<(usize, f64)> = None;
    for (indice, normalizado) in normalizados.iter().enumerate() {
        let similitud = similitud_componentes(&buscado, normalizado);
        if similitud > UMBRAL_SIMILITUD && mejor.is_none_or(|(_, s)| similitud > s) {
            mejor = Some((indice, similitud));
        }

        if buscado == *normalizado {
            mejor = Some((indice, 0.9));
        } else if buscado.contains(normalizado.as_str()) || normalizado.contains(&buscado) {
            let minimo = buscado.len().min(normalizado.len()) as f64;
            let maximo = buscado.len().max(normalizado.len()) as f64;
            let similitud_inclusion = minimo / maximo;
            if similitud_inclusion > 0.7 && mejor.is_none_or(|(_, s)| similitud_inclusion > s) {
                mejor = Some((indice, similitud_inclusion));
            }
        }
    }

    // 5. Author+year fallback, only when the scoring pass found nothing.
    let mut metodo = Metodo::Similitud;
    if mejor.is_none_or(|(_, s)| s <= UMBRAL_SIMILITUD) {
        if let Some(indice) = buscar_por_autor_anio(&buscado, publicaciones) {
            mejor = Some((indice, SIMILITUD_AUTOR_ANIO));
            metodo = Metodo::AutorAnio;
        }
    }

    match mejor {
        Some((indice, similitud)) if similitud > UMBRAL_SIMILITUD => {
            debug!(
                "slug {slug} resuelto por {metodo} con similitud {similitud:.2}"
            );
            Some(Resolucion {
                publicacion: &publicaciones[indice],
                metodo,
                similitud,
            })
        }
        _ => None,
    }
}

/// Component similarity between two normalized slugs: 0.3 for a matching
/// author token, 0.2 for a year within the tolerance window, and up to 0.5
/// for the title portion. Returns 0.0 as soon as a gate fails.
fn similitud_componentes(buscado: &str, candidato: &str) -> f64 {
    let partes_buscado: Vec<&str> = buscado.split('-').collect();
    let partes_candidato: Vec<&str> = candidato.split('-').collect();

    let anios_buscado = anios_del_slug(buscado);
    let anios_candidato = anios_del_slug(candidato);

    let anios_coinciden = anios_buscado.iter().any(|a| {
        anios_candidato
            .iter()
            .any(|b| (a - b).abs() <= TOLERANCIA_ANIO)
    });
    if !(anios_coinciden || (anios_buscado.is_empty() && anios_candidato.is_empty())) {
        return 0.0;
    }

    let autor_buscado = partes_buscado.first().copied().unwrap_or("");
    let autor_candidato = partes_candidato.first().copied().unwrap_or("");
    let autor_coincide = autor_buscado == autor_candidato
        || autor_buscado.starts_with(autor_candidato)
        || autor_candidato.starts_with(autor_buscado);
    if !autor_coincide {
        return 0.0;
    }

    let titulo_buscado = porcion_titulo(&partes_buscado);
    let titulo_candidato = porcion_titulo(&partes_candidato);

    let titulo_buscado = PALABRAS_COMUNES.replace_all(&titulo_buscado, "");
    let titulo_candidato = PALABRAS_COMUNES.replace_all(&titulo_candidato, "");

    let similitud_titulo = if titulo_buscado.contains(titulo_candidato.as_ref())
        || titulo_candidato.contains(titulo_buscado.as_ref())
    {
        0.9
    } else {
        let prefijo = titulo_buscado
            .bytes()
            .zip(titulo_candidato.bytes())
            .take_while(|(a, b)| a == b)
            .count() as f64;
        prefijo / titulo_buscado.len().max(titulo_candidato.len()).max(1) as f64
    };

    0.3 + 0.2 + similitud_titulo * 0.5
}

/// Tokens after the last year token, hyphen-joined; without a year token,
/// everything after the author.
fn porcion_titulo(partes: &[&str]) -> String {
    let ultima_posicion_anio = partes.iter().rposition(|parte| es_token_anio(parte));
    let resto = match ultima_posicion_anio {
        Some(i) => partes.get(i + 1..).unwrap_or(&[]),
        None => partes.get(1..).unwrap_or(&[]),
    };
    resto.join("-")
}

/// Direct scan by author fragment and year: the first candidate whose year
/// is within the tolerance window and whose citation's leading author
/// normalizes to an equal-or-prefix match with the slug's author token.
pub(crate) fn buscar_por_autor_anio(
    buscado_normalizado: &str,
    publicaciones: &[Publicacion],
) -> Option<usize> {
    let partes: Vec<&str> = buscado_normalizado.split('-').collect();
    let autor_buscado = partes.first().copied().unwrap_or("");
    let anio_buscado = *anios_del_slug(buscado_normalizado).first()?;
    if autor_buscado.is_empty() {
        return None;
    }

    for (indice, publicacion) in publicaciones.iter().enumerate() {
        let Some(anio) = publicacion.anio() else {
            continue;
        };
        if (anio - anio_buscado).abs() > TOLERANCIA_ANIO {
            continue;
        }
        let Some(cita) = publicacion.cita_corta.as_deref() else {
            continue;
        };

        let autor = normalizar_autor(&autor_de_cita(cita));
        if autor.is_empty() {
            continue;
        }
        if autor == autor_buscado
            || autor.starts_with(autor_buscado)
            || autor_buscado.starts_with(&autor)
        {
            return Some(indice);
        }
    }

    None
}

fn normalizar_autor(autor: &str) -> String {
    let minusculas = quitar_diacriticos(&autor.to_lowercase());
    let sin_especiales = NO_AUTOR.replace_all(&minusculas, "");
    let con_guiones = ESPACIOS.replace_all(&sin_especiales, "-");
    let colapsado = GUIONES.replace_all(&con_guiones, "-");
    colapsado.trim_matches('-').to_string()
}
