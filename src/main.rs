pub mod cli;
pub mod csv_handler;
pub mod error;
pub mod nombres;
pub mod publicacion;
pub mod slug;
pub mod texto;

use clap::Parser;
use cli::{Cli, Mode};
use csv::WriterBuilder;
use csv_handler::{cargar_nombres, cargar_publicaciones};
use error::{CrateError, Result};
use log::{error, info};
use nombres::NombreConBase;
use nombres::agrupacion::{GrupoNombres, agrupar_por_taxonomia};
use nombres::normalizer::{NormalizadorNombres, elegir_canonicos};
use nombres::vocabulario::Vocabulario;
use publicacion::Publicacion;
use slug::resolver::{Resolucion, resolver_slug, slug_de_publicacion};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .format_target(false) // Option: to hide the module path prefix for cleaner logs
        .format_timestamp_secs() // Option: to have simpler timestamps
        .filter_level(log::LevelFilter::Info) // Set a default filter level (e.g., Info)
        .try_init() // Use try_init() to handle potential errors if logger is already set
        .expect("Failed to initialize logger"); // Or handle the error more gracefully

    // Parse CLI arguments
    let cli = Cli::parse();
    info!("Starting Sapopedia toolbox...");
    info!("Input file: {:?}", cli.input_file);
    info!("Mode: {:?}", cli.mode);
    if let Some(output_file) = &cli.output_file {
        info!("Output file: {:?}", output_file);
    }

    let start_time = Instant::now();

    match cli.mode {
        Mode::Resolve => {
            let slug = cli.slug.expect("Slug is required for resolve mode");
            ejecutar_resolucion(&cli.input_file, &slug, cli.output_file.as_deref())?;
        }
        Mode::Normalize => {
            let output_file = cli
                .output_file
                .expect("Output file path is required for normalize mode");
            let vocabulario = match &cli.vocabulario {
                Some(ruta) => {
                    info!("Loading vocabulary from {:?}", ruta);
                    Vocabulario::desde_archivo(ruta)?
                }
                None => Vocabulario::default(),
            };
            ejecutar_normalizacion(
                &cli.input_file,
                &output_file,
                &vocabulario,
                cli.idioma_principal,
            )?;
        }
    }

    let duration = start_time.elapsed();
    info!("Total execution time: {:.2?}", duration);

    Ok(())
}

fn ejecutar_resolucion(input: &Path, slug: &str, output: Option<&Path>) -> Result<()> {
    info!("Loading and validating publications CSV...");
    let publicaciones = match cargar_publicaciones(input) {
        Ok(publicaciones) => {
            info!(
                "Successfully loaded and validated {} publications.",
                publicaciones.len()
            );
            publicaciones
        }
        Err(e) => {
            error!("Failed to load or validate CSV: {}", e);
            return Err(e);
        }
    };

    let resolucion = resolver_slug(slug, &publicaciones);

    if let Some(output) = output {
        escribir_reporte_slugs(&publicaciones, resolucion.as_ref(), output)?;
        println!("Per-publication slug report saved to {}", output.display());
    }

    // Basic Summary Report
    println!("\n--- Resolution Report ---");
    println!("Slug searched: {}", slug);
    println!("Candidate publications: {}", publicaciones.len());
    match &resolucion {
        Some(resolucion) => {
            println!("Resolved to publication: {}", resolucion.publicacion.id_publicacion);
            if let Some(cita) = &resolucion.publicacion.cita_corta {
                println!("Short citation: {}", cita);
            }
            if let Some(titulo) = &resolucion.publicacion.titulo {
                println!("Title: {}", titulo);
            }
            println!(
                "Canonical slug: {}",
                slug_de_publicacion(resolucion.publicacion)
            );
            println!("Matched by: {}", resolucion.metodo);
            println!("Similarity: {:.2}", resolucion.similitud);
        }
        None => {
            println!("No publication matched the slug.");
        }
    }

    Ok(())
}

fn escribir_reporte_slugs(
    publicaciones: &[Publicacion],
    resolucion: Option<&Resolucion<'_>>,
    ruta: &Path,
) -> Result<()> {
    let mut writer = WriterBuilder::new().delimiter(b'\t').from_path(ruta)?;
    writer.write_record([
        "id_publicacion",
        "titulo",
        "cita_corta",
        "anio",
        "slug_generado",
        "metodo",
        "similitud",
    ])?;

    for publicacion in publicaciones {
        let (metodo, similitud) = match resolucion {
            Some(resolucion)
                if resolucion.publicacion.id_publicacion == publicacion.id_publicacion =>
            {
                (resolucion.metodo.to_string(), format!("{:.2}", resolucion.similitud))
            }
            _ => (String::new(), String::new()),
        };
        writer.write_record([
            publicacion.id_publicacion.to_string().as_str(),
            publicacion.titulo.as_deref().unwrap_or(""),
            publicacion.cita_corta.as_deref().unwrap_or(""),
            publicacion
                .anio()
                .map(|a| a.to_string())
                .unwrap_or_default()
                .as_str(),
            slug_de_publicacion(publicacion).as_str(),
            metodo.as_str(),
            similitud.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn ejecutar_normalizacion(
    input: &Path,
    output: &Path,
    vocabulario: &Vocabulario,
    idioma_principal: Option<i64>,
) -> Result<()> {
    info!("Loading and validating common-names CSV...");
    let nombres = match cargar_nombres(input) {
        Ok(nombres) => {
            info!(
                "Successfully loaded and validated {} names.",
                nombres.len()
            );
            nombres
        }
        Err(e) => {
            error!("Failed to load or validate CSV: {}", e);
            return Err(e);
        }
    };

    if nombres.is_empty() {
        info!("Input CSV is empty or contains no valid records. Exiting.");
        return Ok(());
    }

    let normalizador = NormalizadorNombres::nuevo(vocabulario, idioma_principal)?;
    let con_base = normalizador.normalizar(&nombres);
    let canonicos = elegir_canonicos(&con_base);
    let grupos = agrupar_por_taxonomia(&con_base);

    escribir_reporte_nombres(&con_base, &canonicos, output)?;

    let bases_distintas = canonicos.len();
    let plegados = con_base
        .iter()
        .filter(|item| item.nombre_base != item.nombre.nombre)
        .count();
    let (familias, generos) = contar_subgrupos(&grupos);

    // Basic Summary Report
    println!("\n--- Summary Report ---");
    println!("Total names read: {}", con_base.len());
    println!("Distinct base names: {}", bases_distintas);
    println!("Names rewritten during normalization: {}", plegados);
    println!("Taxonomic groups: {} orders, {} families, {} genera", grupos.len(), familias, generos);
    for grupo in &grupos {
        let comun = grupo.nombre_comun.as_deref().unwrap_or("-");
        println!("  {} ({} names, common name: {})", grupo.nombre, grupo.nombres.len(), comun);
    }
    println!("Per-name report saved to: {}", output.display());

    Ok(())
}

fn contar_subgrupos(grupos: &[GrupoNombres]) -> (usize, usize) {
    let familias = grupos.iter().map(|g| g.hijos.len()).sum();
    let generos = grupos
        .iter()
        .flat_map(|g| g.hijos.iter())
        .map(|f| f.hijos.len())
        .sum();
    (familias, generos)
}

fn escribir_reporte_nombres(
    nombres: &[NombreConBase],
    canonicos: &HashMap<String, String>,
    ruta: &Path,
) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(ruta)
        .map_err(CrateError::CsvError)?;
    writer.write_record([
        "nombre",
        "idioma_id",
        "taxon_id",
        "nombre_cientifico",
        "orden",
        "familia",
        "genero",
        "nombre_base",
        "nombre_base_normalizado",
        "nombre_canonico",
    ])?;

    for item in nombres {
        let canonico = canonicos
            .get(&item.nombre_base_normalizado)
            .map(String::as_str)
            .unwrap_or("");
        writer.write_record([
            item.nombre.nombre.as_str(),
            item.nombre
                .idioma_id
                .map(|id| id.to_string())
                .unwrap_or_default()
                .as_str(),
            item.nombre.taxon_id.to_string().as_str(),
            item.nombre.nombre_cientifico.as_deref().unwrap_or(""),
            item.nombre.orden.as_deref().unwrap_or(""),
            item.nombre.familia.as_deref().unwrap_or(""),
            item.nombre.genero.as_deref().unwrap_or(""),
            item.nombre_base.as_str(),
            item.nombre_base_normalizado.as_str(),
            canonico,
        ])?;
    }

    writer.flush()?;
    Ok(())
}
