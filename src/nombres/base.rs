//! Base-name extraction rule cascades.
//!
//! Each extractor is an ordered list of pure strip rules. A rule either
//! rewrites the name and lets the cascade continue, or terminates it; a rule
//! whose output would be empty is skipped, so the pre-strip value is always
//! the floor. Every word the rules consume comes from the [`Vocabulario`].
use crate::error::Result;
use crate::nombres::vocabulario::{Vocabulario, alternacion};
use log::trace;
use regex::Regex;
use std::borrow::Cow;

type AplicarRegla = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

struct Regla {
    nombre: &'static str,
    termina: bool,
    aplicar: AplicarRegla,
}

impl Regla {
    fn reemplazo(
        nombre: &'static str,
        termina: bool,
        patron: &str,
        plantilla: &'static str,
    ) -> Result<Self> {
        let regex = Regex::new(patron)?;
        Ok(Self {
            nombre,
            termina,
            aplicar: Box::new(move |texto| match regex.replace(texto, plantilla) {
                Cow::Borrowed(_) => None,
                Cow::Owned(nuevo) => Some(nuevo),
            }),
        })
    }
}

fn aplicar_cascada(reglas: &[Regla], max_palabras: usize, nombre_completo: &str) -> String {
    let original = nombre_completo.trim();
    if original.is_empty() {
        return String::new();
    }

    let mut nombre = original.to_string();
    for regla in reglas {
        if let Some(resultado) = (regla.aplicar)(&nombre) {
            let resultado = resultado.trim().to_string();
            if resultado.is_empty() {
                continue;
            }
            trace!("regla {}: '{nombre}' -> '{resultado}'", regla.nombre);
            nombre = resultado;
            if regla.termina {
                break;
            }
        }
    }

    let palabras: Vec<&str> = nombre.split_whitespace().collect();
    if palabras.len() > max_palabras {
        nombre = palabras[..max_palabras].join(" ");
    }

    if nombre.is_empty() {
        original.to_string()
    } else {
        nombre
    }
}

/// Primary-language (Spanish) extractor.
pub struct ExtractorNombreBase {
    reglas: Vec<Regla>,
    max_palabras: usize,
}

impl ExtractorNombreBase {
    pub fn nuevo(vocabulario: &Vocabulario) -> Result<Self> {
        let sustantivos = alternacion(&vocabulario.sustantivos_comunes);
        let descriptivos = alternacion(&vocabulario.descriptivos);
        let protegidos = alternacion(&vocabulario.compuestos_protegidos);
        let bases = alternacion(&vocabulario.palabras_base);
        let frases = alternacion(&vocabulario.frases_compuestas);
        let adjetivos = alternacion(&vocabulario.adjetivos);
        let propios = alternacion(&vocabulario.nombres_propios);
        let lugares = alternacion(&vocabulario.lugares_del);

        // "de [sustantivo] [adjetivo] con/sin [algo]" -> keep "de [sustantivo]".
        let de_sustantivo_con_sin = Regla::reemplazo(
            "de-sustantivo-con-sin",
            true,
            &format!(
                r"(?i)(de\s+(?:{sustantivos}))\s+[\wáéíóúñü]+\s+(?:con|sin)\s+[\wáéíóúñü\s]+$"
            ),
            "$1",
        )?;

        // "de [sustantivo] [adjetivo]" -> keep "de [sustantivo]".
        let de_sustantivo = Regla::reemplazo(
            "de-sustantivo",
            true,
            &format!(r"(?i)(de\s+(?:{sustantivos}))\s+[\wáéíóúñü]+$"),
            "$1",
        )?;

        // "[compuesto protegido] de [algo]" -> keep the compound.
        let compuesto_protegido = Regla::reemplazo(
            "compuesto-protegido",
            false,
            &format!(r"((?i:{protegidos}))\s+de\s+.+$"),
            "$1",
        )?;

        // "[descriptivo] de [Nombre Propio]" -> keep the epithet. The
        // proper-noun class is case-sensitive on purpose: lowercase "de
        // cristal"-style tails belong to the name, not to a dedication.
        let descriptivo_de_propio = Regla::reemplazo(
            "descriptivo-de-propio",
            false,
            &format!(r"((?i:{descriptivos}))\s+de\s+[A-ZÁÉÍÓÚÑÜ].+$"),
            "$1",
        )?;

        // Dangling "[descriptivo] de" left by an earlier rule.
        let descriptivo_de_colgante = Regla::reemplazo(
            "descriptivo-de-colgante",
            false,
            &format!(r"((?i:{descriptivos}))\s+de$"),
            "$1",
        )?;

        // "[... descriptivo/base] [palabra]" -> drop the final word.
        let descriptivo_con_sufijo = {
            let regex = Regex::new(&format!(
                r"^(.*\s+)((?i:{descriptivos}|{bases}))\s+[\wáéíóúñü]+$"
            ))?;
            Regla {
                nombre: "descriptivo-con-sufijo",
                termina: false,
                aplicar: Box::new(move |texto| {
                    let captura = regex.captures(texto)?;
                    Some(format!("{} {}", captura[1].trim(), &captura[2]))
                }),
            }
        };

        // Trailing "con [algo]".
        let con_algo = Regla::reemplazo(
            "con-algo",
            false,
            r"(?i)\s+con\s+[\wáéíóúñü\s]+$",
            "",
        )?;

        // Trailing "de [Nombre Propio]" dedication.
        let de_propio = Regla::reemplazo(
            "de-propio",
            false,
            r"\s+de\s+[A-ZÁÉÍÓÚÑÜ].+$",
            "",
        )?;

        // "del [lugar] [adjetivo]" -> keep "del [lugar]".
        let del_lugar_con_adjetivo = Regla::reemplazo(
            "del-lugar-con-adjetivo",
            true,
            &format!(r"(?i)(del\s+(?:{lugares}))\s+[\wáéíóúñü]+$"),
            "$1",
        )?;

        // Trailing "del [Lugar]" unless the place is a known exception.
        let del_propio = {
            let excepciones = Regex::new(&format!(r"(?i)\s+del\s+(?:{lugares})"))?;
            let regex = Regex::new(r"\s+del\s+[A-ZÁÉÍÓÚÑÜ].+$")?;
            Regla {
                nombre: "del-propio",
                termina: false,
                aplicar: Box::new(move |texto| {
                    if excepciones.is_match(texto) {
                        return None;
                    }
                    match regex.replace(texto, "") {
                        Cow::Borrowed(_) => None,
                        Cow::Owned(nuevo) => Some(nuevo),
                    }
                }),
            }
        };

        // "amante de [algo]" and "en forma de [algo]".
        let amante_de = Regla::reemplazo(
            "amante-de",
            false,
            r"(?i)(\s+amante)\s+de\s+.+$",
            "$1",
        )?;
        let en_forma_de = Regla::reemplazo(
            "en-forma-de",
            false,
            r"(?i)(\s+en\s+forma)\s+de\s+.+$",
            "$1",
        )?;

        // Trailing compound phrases, simple adjectives, proper names.
        let frase_compuesta = Regla::reemplazo(
            "frase-compuesta",
            false,
            &format!(r"(?i)\s+(?:{frases})$"),
            "",
        )?;
        let adjetivo_simple = Regla::reemplazo(
            "adjetivo-simple",
            false,
            &format!(r"(?i)\s+(?:{adjetivos})$"),
            "",
        )?;
        let nombre_propio = Regla::reemplazo(
            "nombre-propio",
            false,
            &format!(r"(?i)\s+(?:{propios})$"),
            "",
        )?;

        Ok(Self {
            reglas: vec![
                de_sustantivo_con_sin,
                de_sustantivo,
                compuesto_protegido,
                descriptivo_de_propio,
                descriptivo_de_colgante,
                descriptivo_con_sufijo,
                con_algo,
                de_propio,
                del_lugar_con_adjetivo,
                del_propio,
                amante_de,
                en_forma_de,
                frase_compuesta,
                adjetivo_simple,
                nombre_propio,
            ],
            max_palabras: vocabulario.max_palabras,
        })
    }

    pub fn extraer(&self, nombre_completo: &str) -> String {
        aplicar_cascada(&self.reglas, self.max_palabras, nombre_completo)
    }
}

/// Generic extractor for every non-primary language.
pub struct ExtractorGenerico {
    reglas: Vec<Regla>,
    max_palabras: usize,
}

impl ExtractorGenerico {
    pub fn nuevo(vocabulario: &Vocabulario) -> Result<Self> {
        let adjetivos = alternacion(&vocabulario.adjetivos_genericos);

        // Trailing "of/von/di/..." + proper-noun phrase.
        let preposicion_propio = Regla::reemplazo(
            "preposicion-propio",
            false,
            r"\s+(?i:of|de|del|da|di|du|von|van|der)\s+[A-ZÁÉÍÓÚÑÜ].+$",
            "",
        )?;

        // Possessive suffix on the final token.
        let posesivo = Regla::reemplazo("posesivo", false, r"['’]s?$", "")?;

        // Trailing capitalized proper-noun tokens, only in mixed-case names;
        // in all-capitalized names the trailing word is part of the name.
        let propios_finales = Regla {
            nombre: "propios-finales",
            termina: false,
            aplicar: Box::new(quitar_propios_finales),
        };

        let adjetivo_generico = Regla::reemplazo(
            "adjetivo-generico",
            false,
            &format!(r"(?i)\s+(?:{adjetivos})$"),
            "",
        )?;

        Ok(Self {
            reglas: vec![
                preposicion_propio,
                posesivo,
                propios_finales,
                adjetivo_generico,
            ],
            max_palabras: vocabulario.max_palabras,
        })
    }

    pub fn extraer(&self, nombre_completo: &str) -> String {
        aplicar_cascada(&self.reglas, self.max_palabras, nombre_completo)
    }
}

fn quitar_propios_finales(texto: &str) -> Option<String> {
    let mut palabras: Vec<&str> = texto.split_whitespace().collect();
    let mut cambiado = false;

    loop {
        if palabras.len() < 2 {
            break;
        }
        let ultima_es_propia = empieza_mayuscula(palabras[palabras.len() - 1]);
        let hay_minuscula_antes = palabras[..palabras.len() - 1]
            .iter()
            .any(|palabra| !empieza_mayuscula(palabra));
        if ultima_es_propia && hay_minuscula_antes {
            palabras.pop();
            cambiado = true;
        } else {
            break;
        }
    }

    if cambiado {
        Some(palabras.join(" "))
    } else {
        None
    }
}

fn empieza_mayuscula(palabra: &str) -> bool {
    palabra.chars().next().is_some_and(|c| c.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ExtractorNombreBase {
        ExtractorNombreBase::nuevo(&Vocabulario::default()).unwrap()
    }

    fn generico() -> ExtractorGenerico {
        ExtractorGenerico::nuevo(&Vocabulario::default()).unwrap()
    }

    #[test]
    fn quita_dedicatorias_tras_descriptivo() {
        let extractor = extractor();
        assert_eq!(extractor.extraer("Rana arlequín de Quito"), "Rana arlequín");
        assert_eq!(extractor.extraer("Rana cohete de Santa Cecilia"), "Rana cohete");
    }

    #[test]
    fn quita_dedicatoria_simple() {
        let extractor = extractor();
        assert_eq!(extractor.extraer("Cutín de Quito"), "Cutín");
        assert_eq!(extractor.extraer("Sapito de Azuay"), "Sapito");
    }

    #[test]
    fn conserva_compuestos_en_minuscula() {
        let extractor = extractor();
        // Lowercase "de cristal" is part of the name, not a dedication.
        assert_eq!(extractor.extraer("Rana de cristal"), "Rana de cristal");
        assert_eq!(extractor.extraer("Rana de cristal de Lynch"), "Rana de cristal");
    }

    #[test]
    fn conserva_de_sustantivo() {
        let extractor = extractor();
        assert_eq!(
            extractor.extraer("Rana verde de pies negros"),
            "Rana verde de pies"
        );
        assert_eq!(
            extractor.extraer("Cutín de vientre manchado con rayas"),
            "Cutín de vientre"
        );
    }

    #[test]
    fn quita_adjetivos_y_frases() {
        let extractor = extractor();
        assert_eq!(extractor.extraer("Sapo gigante"), "Sapo");
        assert_eq!(extractor.extraer("Jambato negro con rayas"), "Jambato");
        assert_eq!(extractor.extraer("Cutín cabeza grande"), "Cutín");
        assert_eq!(extractor.extraer("Cutín Kichwa"), "Cutín");
    }

    #[test]
    fn maneja_del_con_excepciones() {
        let extractor = extractor();
        assert_eq!(extractor.extraer("Rana del Azuay"), "Rana");
        assert_eq!(extractor.extraer("Jambato del Cóndor"), "Jambato del Cóndor");
        assert_eq!(
            extractor.extraer("Jambato del bosque seco"),
            "Jambato del bosque"
        );
    }

    #[test]
    fn nunca_devuelve_vacio() {
        let extractor = extractor();
        assert_eq!(extractor.extraer(""), "");
        assert_eq!(extractor.extraer("   "), "");
        // A name made only of a strippable adjective keeps its value.
        assert_eq!(extractor.extraer("verde"), "verde");
    }

    #[test]
    fn extraccion_es_idempotente() {
        let extractor = extractor();
        for caso in [
            "Rana arlequín de Quito",
            "Cutín de vientre manchado",
            "Sapo gigante",
            "Rana de cristal",
            "Jambato del Cóndor",
        ] {
            let base = extractor.extraer(caso);
            assert_eq!(extractor.extraer(&base), base, "caso: {caso}");
        }
    }

    #[test]
    fn corta_nombres_muy_largos() {
        let extractor = extractor();
        assert_eq!(
            extractor.extraer("Uno dos tres cuatro cinco seis siete"),
            "Uno dos tres cuatro cinco"
        );
    }

    #[test]
    fn generico_quita_preposicion_y_propios() {
        let generico = generico();
        assert_eq!(generico.extraer("Kayla von Humboldt"), "Kayla");
        assert_eq!(generico.extraer("rana torrentera Papallacta"), "rana torrentera");
        assert_eq!(generico.extraer("sacha jambato Oriente"), "sacha jambato");
    }

    #[test]
    fn generico_quita_posesivos_y_adjetivos() {
        let generico = generico();
        assert_eq!(generico.extraer("Jambatu rumi común"), "Jambatu rumi");
        assert_eq!(generico.extraer("Boulenger's"), "Boulenger");
    }

    #[test]
    fn generico_respeta_nombres_todo_en_mayusculas() {
        let generico = generico();
        // Title-case names keep their trailing word.
        assert_eq!(generico.extraer("Quito Rocket Frog"), "Quito Rocket Frog");
        assert_eq!(generico.extraer("Quito"), "Quito");
    }
}
