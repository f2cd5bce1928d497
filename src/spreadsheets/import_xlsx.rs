use calamine::{Data, DataType, Reader, Xlsx};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Cursor;

use crate::db::{clientes, obras, Database};
use crate::domain::{fechas, Documento};
use crate::errors::ServerError;

/// Import scouted projects from an uploaded workbook and return how many
/// were created.
///
/// The sheet is the one the scouting prompt asks for: a header row with
/// `Proyecto`, `Ciudad`, `Provincia`, `Tipo_Proyecto`, `Segmento`,
/// `Estado`, `Promotora_Fondo`, `Arquitectura`, `Ingenieria`,
/// `Fecha_Inicio_Estimada`, `Fecha_Entrega_Estimada`, `Notas` and
/// `Fuente_URL`, in any column order. Rows without a project name are
/// skipped, and a bad row never aborts the rest of the import.
pub fn importar_proyectos_xlsx(db: &Database, datos: &[u8]) -> Result<usize, ServerError> {
    let mut libro: Xlsx<_> = Xlsx::new(Cursor::new(datos))
        .map_err(|e| ServerError::XlsxError(format!("Error leyendo el Excel: {e}")))?;

    let nombre_hoja = libro
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ServerError::XlsxError("El Excel no tiene hojas.".to_string()))?;
    let rango = libro
        .worksheet_range(&nombre_hoja)
        .map_err(|e| ServerError::XlsxError(format!("Error leyendo el Excel: {e}")))?;

    let mut filas = rango.rows();
    let cabeceras = match filas.next() {
        Some(fila) => indice_cabeceras(fila),
        None => return Ok(0),
    };

    let mut creados = 0;
    for fila in filas {
        match importar_fila(db, &cabeceras, fila) {
            Ok(true) => creados += 1,
            Ok(false) => {} // row without a project name
            Err(e) => eprintln!("No se pudo importar una fila: {e}"),
        }
    }

    Ok(creados)
}

fn importar_fila(
    db: &Database,
    cabeceras: &HashMap<String, usize>,
    fila: &[Data],
) -> Result<bool, ServerError> {
    let celda = |nombre: &str| -> &Data {
        cabeceras
            .get(nombre)
            .and_then(|&i| fila.get(i))
            .unwrap_or(&Data::Empty)
    };

    let nombre_obra = celda_texto(celda("Proyecto"));
    if nombre_obra.is_empty() {
        return Ok(false);
    }

    let ciudad = opcional(celda_texto(celda("Ciudad")));
    let provincia = opcional(celda_texto(celda("Provincia")));
    let tipo_proyecto = opcional(celda_texto(celda("Tipo_Proyecto")));
    let estado = opcional(celda_texto(celda("Estado"))).unwrap_or_else(|| "Detectado".into());
    let segmento = celda_texto(celda("Segmento")).to_lowercase();

    // The promoter doubles as the principal client of the project.
    let promotor = opcional(celda_texto(celda("Promotora_Fondo")));
    let arquitectura = opcional(celda_texto(celda("Arquitectura")));
    let ingenieria = opcional(celda_texto(celda("Ingenieria")));

    clientes::ensure_cliente_basico(db, promotor.as_deref(), "Promotora")?;
    clientes::ensure_cliente_basico(db, arquitectura.as_deref(), "Arquitectura")?;
    clientes::ensure_cliente_basico(db, ingenieria.as_deref(), "Ingeniería")?;

    // Luxury segments jump the queue; everything else starts as normal.
    let prioridad = if segmento.contains("ultra") || segmento.contains("lujo") {
        "Alta"
    } else {
        "Media"
    };

    let fecha_inicio = convertir_fecha_excel(celda("Fecha_Inicio_Estimada"));
    let fecha_entrega = convertir_fecha_excel(celda("Fecha_Entrega_Estimada"));

    let notas = celda_texto(celda("Notas"));
    let url = celda_texto(celda("Fuente_URL"));
    let notas_completas = match (notas.is_empty(), url.is_empty()) {
        (false, false) => format!("{notas}\nFuente: {url}"),
        (true, false) => format!("Fuente: {url}"),
        _ => notas,
    };

    let mut obra = Documento::new();
    obra.fijar("nombre_obra", json!(nombre_obra));
    obra.fijar("cliente_principal", a_valor(promotor.clone()));
    obra.fijar("promotora", a_valor(promotor));
    obra.fijar("arquitectura", a_valor(arquitectura));
    obra.fijar("ingenieria", a_valor(ingenieria));
    obra.fijar("tipo_proyecto", a_valor(tipo_proyecto));
    obra.fijar("ciudad", a_valor(ciudad));
    obra.fijar("provincia", a_valor(provincia));
    obra.fijar("prioridad", json!(prioridad));
    obra.fijar("potencial_eur", json!(0.0));
    obra.fijar("estado", json!(estado));
    obra.fijar("fecha_inicio", a_valor(fecha_inicio));
    obra.fijar("fecha_entrega", a_valor(fecha_entrega));
    obra.fijar("notas_seguimiento", json!(notas_completas));
    obra.fijar("notas_historial", json!([]));
    obra.fijar("tareas", json!([]));
    obra.fijar("pasos_seguimiento", json!([]));

    obras::add_proyecto(db, obra)?;
    Ok(true)
}

fn indice_cabeceras(fila: &[Data]) -> HashMap<String, usize> {
    fila.iter()
        .enumerate()
        .filter_map(|(i, celda)| {
            let nombre = celda_texto(celda);
            if nombre.is_empty() {
                None
            } else {
                Some((nombre, i))
            }
        })
        .collect()
}

fn celda_texto(celda: &Data) -> String {
    match celda {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        otro => otro.to_string().trim().to_string(),
    }
}

/// A date cell as an ISO `YYYY-MM-DD` string. Excel dates convert
/// directly; strings go through the usual formats; unparseable text is
/// kept as-is rather than dropped.
fn convertir_fecha_excel(celda: &Data) -> Option<String> {
    if let Some(instante) = celda.as_datetime() {
        return Some(instante.date().to_string());
    }

    match celda {
        Data::Empty => None,
        Data::String(texto) => {
            let texto = texto.trim();
            if texto.is_empty() {
                None
            } else {
                match fechas::parsear_texto_fecha(texto) {
                    Some(fecha) => Some(fecha.to_string()),
                    None => Some(texto.to_string()),
                }
            }
        }
        otro => Some(celda_texto(otro)),
    }
}

fn opcional(texto: String) -> Option<String> {
    if texto.is_empty() {
        None
    } else {
        Some(texto)
    }
}

fn a_valor(texto: Option<String>) -> Value {
    match texto {
        Some(t) => Value::String(t),
        None => Value::Null,
    }
}

/// Pull the uploaded file out of a `multipart/form-data` body. Returns
/// the body untouched when it is not multipart, so raw uploads keep
/// working from scripts.
pub fn extraer_archivo_subido(content_type: &str, cuerpo: &[u8]) -> Option<Vec<u8>> {
    if !content_type.starts_with("multipart/form-data") {
        return Some(cuerpo.to_vec());
    }

    let frontera = content_type
        .split("boundary=")
        .nth(1)?
        .split(';')
        .next()?
        .trim()
        .trim_matches('"');
    let delimitador = format!("--{frontera}");

    let mut desde = 0;
    loop {
        let inicio = buscar(cuerpo, delimitador.as_bytes(), desde)?;
        let tras_delim = inicio + delimitador.len();
        if cuerpo[tras_delim..].starts_with(b"--") {
            return None; // closing delimiter, no file part found
        }

        let inicio_datos = buscar(cuerpo, b"\r\n\r\n", tras_delim)? + 4;
        let fin = buscar(cuerpo, delimitador.as_bytes(), inicio_datos)?;

        let cabeceras = String::from_utf8_lossy(&cuerpo[tras_delim..inicio_datos]);
        if cabeceras.to_ascii_lowercase().contains("filename=") {
            let mut datos = &cuerpo[inicio_datos..fin];
            if datos.ends_with(b"\r\n") {
                datos = &datos[..datos.len() - 2];
            }
            return Some(datos.to_vec());
        }

        desde = fin;
    }
}

fn buscar(pajar: &[u8], aguja: &[u8], desde: usize) -> Option<usize> {
    if aguja.is_empty() || desde >= pajar.len() {
        return None;
    }
    pajar[desde..]
        .windows(aguja.len())
        .position(|ventana| ventana == aguja)
        .map(|i| i + desde)
}
