//! Shared text helpers for diacritic-insensitive comparison.
use unicode_normalization::UnicodeNormalization;

/// Decomposes the string (NFD) and drops the combining marks U+0300..U+036F,
/// so "arlequín" becomes "arlequin" while ñ maps to n.
pub fn quitar_diacriticos(texto: &str) -> String {
    texto.nfd().filter(|c| !es_marca_diacritica(*c)).collect()
}

/// Comparison form used throughout: diacritics stripped, lowercased.
pub fn normalizar_tildes(texto: &str) -> String {
    quitar_diacriticos(texto).to_lowercase()
}

fn es_marca_diacritica(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}
