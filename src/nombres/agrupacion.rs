//! Order / family / genus tree over normalized names.
use crate::nombres::NombreConBase;
use crate::nombres::normalizer::nombre_comun_representativo;
use crate::texto::normalizar_tildes;
use std::collections::BTreeMap;

/// A node of the taxonomic tree. Leaf-most groups (genera) carry names;
/// orders and families carry children.
#[derive(Debug, Clone)]
pub struct GrupoNombres {
    pub id: String,
    pub nombre: String,
    pub nombre_comun: Option<String>,
    pub nombres: Vec<NombreConBase>,
    pub hijos: Vec<GrupoNombres>,
}

const SIN_CLASIFICAR: &str = "Sin clasificar";

fn id_de_grupo(nivel: &str, nombre: &str) -> String {
    let normalizado = normalizar_tildes(nombre).replace(char::is_whitespace, "-");
    format!("{nivel}-{normalizado}")
}

fn etiqueta(valor: Option<&String>) -> String {
    match valor {
        Some(texto) if !texto.trim().is_empty() => texto.trim().to_string(),
        _ => SIN_CLASIFICAR.to_string(),
    }
}

/// Groups names into an order -> family -> genus tree. Groups come out in
/// alphabetical order at every level; names within a genus sort by base
/// name, then by raw name so ties are stable.
pub fn agrupar_por_taxonomia(nombres: &[NombreConBase]) -> Vec<GrupoNombres> {
    let mut arbol: BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<NombreConBase>>>> =
        BTreeMap::new();

    for item in nombres {
        arbol
            .entry(etiqueta(item.nombre.orden.as_ref()))
            .or_default()
            .entry(etiqueta(item.nombre.familia.as_ref()))
            .or_default()
            .entry(etiqueta(item.nombre.genero.as_ref()))
            .or_default()
            .push(item.clone());
    }

    arbol
        .into_iter()
        .map(|(orden, familias)| {
            let hijos: Vec<GrupoNombres> = familias
                .into_iter()
                .map(|(familia, generos)| {
                    let hijos: Vec<GrupoNombres> = generos
                        .into_iter()
                        .map(|(genero, mut del_genero)| {
                            del_genero.sort_by(|a, b| {
                                a.nombre_base_normalizado
                                    .cmp(&b.nombre_base_normalizado)
                                    .then_with(|| a.nombre.nombre.cmp(&b.nombre.nombre))
                            });
                            GrupoNombres {
                                id: id_de_grupo("genero", &genero),
                                nombre_comun: nombre_comun_representativo(&del_genero),
                                nombre: genero,
                                nombres: del_genero,
                                hijos: Vec::new(),
                            }
                        })
                        .collect();
                    nodo_interno("familia", familia, hijos)
                })
                .collect();
            nodo_interno("orden", orden, hijos)
        })
        .collect()
}

fn nodo_interno(nivel: &str, nombre: String, hijos: Vec<GrupoNombres>) -> GrupoNombres {
    let descendientes: Vec<NombreConBase> = hijos
        .iter()
        .flat_map(|hijo| hijo.nombres.iter().cloned())
        .collect();
    GrupoNombres {
        id: id_de_grupo(nivel, &nombre),
        nombre_comun: nombre_comun_representativo(&descendientes),
        nombre,
        nombres: descendientes,
        hijos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nombres::TaxonNombre;

    fn con_base(
        nombre: &str,
        orden: Option<&str>,
        familia: Option<&str>,
        genero: Option<&str>,
    ) -> NombreConBase {
        NombreConBase {
            nombre: TaxonNombre {
                nombre: nombre.to_string(),
                taxon_id: 1,
                nombre_cientifico: None,
                orden: orden.map(str::to_string),
                familia: familia.map(str::to_string),
                genero: genero.map(str::to_string),
                idioma_id: None,
            },
            nombre_base: nombre.to_string(),
            nombre_base_normalizado: normalizar_tildes(nombre),
        }
    }

    #[test]
    fn agrupa_en_tres_niveles() {
        let datos = vec![
            con_base("Rana arlequín", Some("Anura"), Some("Bufonidae"), Some("Atelopus")),
            con_base("Jambato", Some("Anura"), Some("Bufonidae"), Some("Atelopus")),
            con_base("Cutín", Some("Anura"), Some("Strabomantidae"), Some("Pristimantis")),
        ];
        let grupos = agrupar_por_taxonomia(&datos);

        assert_eq!(grupos.len(), 1);
        let anura = &grupos[0];
        assert_eq!(anura.id, "orden-anura");
        assert_eq!(anura.nombre, "Anura");
        assert_eq!(anura.nombres.len(), 3);
        assert_eq!(anura.hijos.len(), 2);

        let bufonidae = &anura.hijos[0];
        assert_eq!(bufonidae.id, "familia-bufonidae");
        assert_eq!(bufonidae.hijos.len(), 1);
        assert_eq!(bufonidae.hijos[0].id, "genero-atelopus");
        assert_eq!(bufonidae.hijos[0].nombres.len(), 2);
    }

    #[test]
    fn ordena_grupos_y_nombres() {
        let datos = vec![
            con_base("Rana verde", Some("Anura"), Some("Hylidae"), Some("Boana")),
            con_base("Rana arlequín", Some("Anura"), Some("Bufonidae"), Some("Atelopus")),
        ];
        let grupos = agrupar_por_taxonomia(&datos);
        let familias: Vec<&str> = grupos[0].hijos.iter().map(|f| f.nombre.as_str()).collect();
        assert_eq!(familias, vec!["Bufonidae", "Hylidae"]);

        let datos = vec![
            con_base("Rana verde", Some("Anura"), Some("Hylidae"), Some("Boana")),
            con_base("Rana arlequín", Some("Anura"), Some("Hylidae"), Some("Boana")),
        ];
        let grupos = agrupar_por_taxonomia(&datos);
        let nombres: Vec<&str> = grupos[0].hijos[0].hijos[0]
            .nombres
            .iter()
            .map(|n| n.nombre_base.as_str())
            .collect();
        assert_eq!(nombres, vec!["Rana arlequín", "Rana verde"]);
    }

    #[test]
    fn sin_taxonomia_cae_en_sin_clasificar() {
        let datos = vec![con_base("Rana misteriosa", None, None, None)];
        let grupos = agrupar_por_taxonomia(&datos);
        assert_eq!(grupos[0].nombre, "Sin clasificar");
        assert_eq!(grupos[0].id, "orden-sin-clasificar");
        assert_eq!(grupos[0].hijos[0].hijos[0].id, "genero-sin-clasificar");
    }

    #[test]
    fn el_comun_del_genero_es_el_mas_frecuente() {
        let datos = vec![
            con_base("Rana arlequín", Some("Anura"), Some("Bufonidae"), Some("Atelopus")),
            con_base("Rana arlequín", Some("Anura"), Some("Bufonidae"), Some("Atelopus")),
            con_base("Jambato", Some("Anura"), Some("Bufonidae"), Some("Atelopus")),
        ];
        let grupos = agrupar_por_taxonomia(&datos);
        let atelopus = &grupos[0].hijos[0].hijos[0];
        assert_eq!(atelopus.nombre_comun.as_deref(), Some("Rana arlequín"));
        // The family inherits its children's names.
        assert_eq!(grupos[0].hijos[0].nombre_comun.as_deref(), Some("Rana arlequín"));
    }
}
