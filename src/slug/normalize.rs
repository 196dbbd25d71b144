//! Slug comparison form: never displayed, only compared.
use crate::texto::quitar_diacriticos;
use once_cell::sync::Lazy;
use regex::Regex;

static ANIO_LETRA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})([a-z])").expect("valid year-letter regex"));

static NO_SLUG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9-]+").expect("valid slug charset regex"));

static GUIONES: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("valid hyphen-run regex"));

/// Normalizes a slug for comparison: lowercase, diacritics stripped, a
/// separator forced between a 4-digit year and a following letter
/// ("2002ano" -> "2002-ano"), everything outside `[a-z0-9-]` mapped to a
/// single hyphen, runs collapsed, ends trimmed. Idempotent.
///
/// Diacritics are stripped before the year-letter split so an accented
/// letter right after a year still gets its separator on the first pass.
pub fn normalizar_slug(slug: &str) -> String {
    let minusculas = slug.to_lowercase();
    let sin_tildes = quitar_diacriticos(&minusculas);
    let con_guion_anio = ANIO_LETRA.replace_all(&sin_tildes, "$1-$2");
    let limpio = NO_SLUG.replace_all(&con_guion_anio, "-");
    let colapsado = GUIONES.replace_all(&limpio, "-");
    colapsado.trim_matches('-').to_string()
}

/// Tokens of a normalized slug that look like a year. Any 4-digit run
/// qualifies; there is deliberately no calendar plausibility check.
pub fn anios_del_slug(slug_normalizado: &str) -> Vec<i32> {
    slug_normalizado
        .split('-')
        .filter(|parte| es_token_anio(parte))
        .filter_map(|parte| parte.parse().ok())
        .collect()
}

pub fn es_token_anio(token: &str) -> bool {
    token.len() == 4 && token.chars().all(|c| c.is_ascii_digit())
}
