//! Deterministic slug builder, format `coloma-1986-el-napipiripri`.
use crate::texto::quitar_diacriticos;
use once_cell::sync::Lazy;
use regex::Regex;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid html-tag regex"));

static NO_ALFANUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s-]+").expect("valid charset regex"));

static ESPACIOS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

static GUIONES: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("valid hyphen-run regex"));

// Leading year fragment of a title: "(2002)", "2002.", "(2002–03)", "2002:".
static ANIO_INICIO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(?(\d{4})[–-]?\S*\)?\s*[.:]?\s*").expect("valid title-year regex"));

const MAX_PALABRAS_TITULO: usize = 5;

/// Leading author fragment of a short citation: the text before the first
/// `(` and the first `,`, with a `" y "`-joined co-author stripped.
pub fn autor_de_cita(cita_corta: &str) -> String {
    let autor = cita_corta
        .split('(')
        .next()
        .unwrap_or(cita_corta)
        .split(',')
        .next()
        .unwrap_or(cita_corta)
        .trim();
    match autor.split_once(" y ") {
        Some((primero, _)) => primero.trim().to_string(),
        None => autor.to_string(),
    }
}

fn limpiar_fragmento(fragmento: &str) -> String {
    let sin_tildes = quitar_diacriticos(fragmento);
    let sin_especiales = NO_ALFANUM.replace_all(&sin_tildes, "");
    let con_guiones = ESPACIOS.replace_all(&sin_especiales, "-");
    let colapsado = GUIONES.replace_all(&con_guiones, "-");
    colapsado.trim_matches('-').to_lowercase()
}

fn fragmento_titulo(titulo: &str, anio: Option<i32>) -> String {
    let sin_html = HTML_TAG.replace_all(titulo, "");

    // Drop a leading year that duplicates the publication year, so
    // "2002. The title" does not put 2002 into the slug twice.
    let mut restante = sin_html.as_ref();
    if let Some(anio) = anio {
        if let Some(captura) = ANIO_INICIO.captures(restante) {
            if captura[1] == anio.to_string() {
                restante = &restante[captura.get(0).map_or(0, |m| m.end())..];
            }
        }
    }

    let palabras: Vec<&str> = restante
        .split_whitespace()
        .take(MAX_PALABRAS_TITULO)
        .collect();
    limpiar_fragmento(&palabras.join("-"))
}

/// Builds the canonical slug of a publication from its short citation,
/// year, title and id. Without a short citation the slug falls back to
/// `publicacion-<id>`.
pub fn generar_slug_publicacion(
    cita_corta: Option<&str>,
    anio: Option<i32>,
    titulo: Option<&str>,
    id_publicacion: u32,
) -> String {
    let cita = match cita_corta {
        Some(cita) if !cita.is_empty() => cita,
        _ => return format!("publicacion-{id_publicacion}"),
    };

    let autor = limpiar_fragmento(&autor_de_cita(cita));

    let mut partes = vec![autor];
    if let Some(anio) = anio {
        partes.push(anio.to_string());
    }
    if let Some(titulo) = titulo {
        let fragmento = fragmento_titulo(titulo, anio);
        if !fragmento.is_empty() {
            partes.push(fragmento);
        }
    }

    partes.join("-")
}

/// Components of a slug, for search and display purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugPartes {
    pub autor: Option<String>,
    pub anio: Option<String>,
    pub titulo: Option<String>,
}

/// Splits a slug back into author / year / title fragments.
pub fn parsear_slug(slug: &str) -> SlugPartes {
    let partes: Vec<&str> = slug.split('-').collect();
    let posicion_anio = partes
        .iter()
        .position(|parte| super::normalize::es_token_anio(parte));

    let autor = partes
        .first()
        .filter(|parte| !parte.is_empty())
        .map(|parte| parte.to_string());
    let anio = posicion_anio.map(|i| partes[i].to_string());
    let resto = match posicion_anio {
        Some(i) => &partes[i + 1..],
        None => partes.get(1..).unwrap_or(&[]),
    };
    let titulo = if resto.is_empty() {
        None
    } else {
        Some(resto.join("-"))
    };

    SlugPartes { autor, anio, titulo }
}
