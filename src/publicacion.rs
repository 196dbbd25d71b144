//! Bibliographic record model, mirroring the nullable columns of the
//! `publicacion` table export.
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Publicacion {
    pub id_publicacion: u32,
    pub titulo: Option<String>,
    pub titulo_secundario: Option<String>,
    pub cita_corta: Option<String>,
    // Optional column, not every export carries it.
    #[serde(default)]
    pub cita_larga: Option<String>,
    pub numero_publicacion_ano: Option<i32>,
    pub fecha: Option<String>,
}

impl Publicacion {
    /// Publication year: the explicit `numero_publicacion_ano` wins,
    /// otherwise the year of `fecha`.
    pub fn anio(&self) -> Option<i32> {
        if let Some(anio) = self.numero_publicacion_ano {
            return Some(anio);
        }
        self.fecha.as_deref().and_then(anio_de_fecha)
    }
}

fn anio_de_fecha(fecha: &str) -> Option<i32> {
    // Accepts plain dates and timestamp exports ("2001-05-03T00:00:00").
    let solo_fecha = fecha.trim().split(['T', ' ']).next()?;
    NaiveDate::parse_from_str(solo_fecha, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publicacion_base() -> Publicacion {
        Publicacion {
            id_publicacion: 1,
            titulo: Some("Anfibios del Ecuador".to_string()),
            titulo_secundario: None,
            cita_corta: Some("Coloma (1986)".to_string()),
            cita_larga: None,
            numero_publicacion_ano: None,
            fecha: None,
        }
    }

    #[test]
    fn anio_explicito_gana() {
        let mut publicacion = publicacion_base();
        publicacion.numero_publicacion_ano = Some(1986);
        publicacion.fecha = Some("2001-05-03".to_string());
        assert_eq!(publicacion.anio(), Some(1986));
    }

    #[test]
    fn anio_derivado_de_fecha() {
        let mut publicacion = publicacion_base();
        publicacion.fecha = Some("2001-05-03".to_string());
        assert_eq!(publicacion.anio(), Some(2001));

        publicacion.fecha = Some("2001-05-03T00:00:00".to_string());
        assert_eq!(publicacion.anio(), Some(2001));
    }

    #[test]
    fn anio_ausente() {
        let mut publicacion = publicacion_base();
        assert_eq!(publicacion.anio(), None);

        publicacion.fecha = Some("no-es-fecha".to_string());
        assert_eq!(publicacion.anio(), None);
    }
}
