use crate::error::{CrateError, Result};
use crate::nombres::TaxonNombre;
use crate::publicacion::Publicacion;
use std::path::Path;

const CABECERAS_PUBLICACION: [&str; 6] = [
    "id_publicacion",
    "titulo",
    "titulo_secundario",
    "cita_corta",
    "numero_publicacion_ano",
    "fecha",
];

const CABECERAS_NOMBRE: [&str; 7] = [
    "nombre",
    "taxon_id",
    "nombre_cientifico",
    "orden",
    "familia",
    "genero",
    "idioma_id",
];

fn validar_cabeceras(cabeceras: &csv::StringRecord, requeridas: &[&str]) -> Result<()> {
    for requerida in requeridas {
        if !cabeceras.iter().any(|c| c == *requerida) {
            return Err(CrateError::MissingHeader(requerida.to_string()));
        }
    }
    Ok(())
}

/// Loads the publication export. Every column except the id may be empty;
/// empty cells come through as `None`.
pub fn cargar_publicaciones(ruta: &Path) -> Result<Vec<Publicacion>> {
    let mut lector = csv::Reader::from_path(ruta)?;
    validar_cabeceras(&lector.headers()?.clone(), &CABECERAS_PUBLICACION)?;

    let mut publicaciones = Vec::new();
    for resultado in lector.deserialize() {
        let publicacion: Publicacion = resultado?;
        publicaciones.push(publicacion);
    }
    Ok(publicaciones)
}

/// Loads the common-name export. The name itself is mandatory; taxonomy
/// and language columns may be empty.
pub fn cargar_nombres(ruta: &Path) -> Result<Vec<TaxonNombre>> {
    let mut lector = csv::Reader::from_path(ruta)?;
    validar_cabeceras(&lector.headers()?.clone(), &CABECERAS_NOMBRE)?;

    let mut nombres = Vec::new();
    for (i, resultado) in lector.deserialize().enumerate() {
        let nombre: TaxonNombre = resultado?;
        let fila = i + 2; // +1 for header, +1 for 0-based index

        if nombre.nombre.trim().is_empty() {
            return Err(CrateError::MissingValue {
                column: "nombre".to_string(),
                row: fila,
            });
        }

        nombres.push(nombre);
    }
    Ok(nombres)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn archivo_csv(contenido: &str) -> NamedTempFile {
        let mut archivo = NamedTempFile::new().unwrap();
        writeln!(archivo, "{}", contenido).unwrap();
        archivo
    }

    #[test]
    fn carga_publicaciones_validas() {
        let contenido = "id_publicacion,titulo,titulo_secundario,cita_corta,numero_publicacion_ano,fecha\n\
            12,El napipiripri,,Coloma (1986),1986,\n\
            13,,,,,2001-05-03";
        let archivo = archivo_csv(contenido);
        let publicaciones = cargar_publicaciones(archivo.path()).unwrap();
        assert_eq!(publicaciones.len(), 2);
        assert_eq!(publicaciones[0].id_publicacion, 12);
        assert_eq!(publicaciones[0].cita_corta.as_deref(), Some("Coloma (1986)"));
        // Empty cells are absent values, not empty strings.
        assert_eq!(publicaciones[1].titulo, None);
        assert_eq!(publicaciones[1].anio(), Some(2001));
    }

    #[test]
    fn publicaciones_sin_cabecera_fallan() {
        let contenido = "id_publicacion,titulo,titulo_secundario,cita_corta,numero_publicacion_ano\n\
            12,El napipiripri,,Coloma (1986),1986";
        let archivo = archivo_csv(contenido);
        let resultado = cargar_publicaciones(archivo.path());
        assert!(matches!(resultado, Err(CrateError::MissingHeader(c)) if c == "fecha"));
    }

    #[test]
    fn publicaciones_con_id_invalido_fallan() {
        let contenido = "id_publicacion,titulo,titulo_secundario,cita_corta,numero_publicacion_ano,fecha\n\
            doce,El napipiripri,,Coloma (1986),1986,";
        let archivo = archivo_csv(contenido);
        assert!(matches!(
            cargar_publicaciones(archivo.path()),
            Err(CrateError::CsvError(_))
        ));
    }

    #[test]
    fn carga_nombres_validos() {
        let contenido = "nombre,taxon_id,nombre_cientifico,orden,familia,genero,idioma_id\n\
            Rana arlequín,7,Atelopus ignescens,Anura,Bufonidae,Atelopus,1\n\
            Jambato,8,,,,,";
        let archivo = archivo_csv(contenido);
        let nombres = cargar_nombres(archivo.path()).unwrap();
        assert_eq!(nombres.len(), 2);
        assert_eq!(nombres[0].nombre, "Rana arlequín");
        assert_eq!(nombres[0].idioma_id, Some(1));
        assert_eq!(nombres[1].orden, None);
        assert_eq!(nombres[1].idioma_id, None);
    }

    #[test]
    fn nombre_vacio_falla() {
        let contenido = "nombre,taxon_id,nombre_cientifico,orden,familia,genero,idioma_id\n\
            Rana arlequín,7,,,,,\n\
            ,8,,,,,";
        let archivo = archivo_csv(contenido);
        let resultado = cargar_nombres(archivo.path());
        assert!(matches!(
            resultado,
            Err(CrateError::MissingValue { column, row }) if column == "nombre" && row == 3
        ));
    }

    #[test]
    fn csv_vacio_es_lista_vacia() {
        let contenido = "nombre,taxon_id,nombre_cientifico,orden,familia,genero,idioma_id";
        let archivo = archivo_csv(contenido);
        assert_eq!(cargar_nombres(archivo.path()).unwrap().len(), 0);
    }
}
