use rust_xlsxwriter::Workbook;
use serde_json::Value;

use crate::domain::importantes::filtrar_obras_importantes;
use crate::domain::Documento;
use crate::errors::{ResultResp, ServerError};
use crate::responses::xlsx_response;

// Bookkeeping fields that make no sense on a spreadsheet.
const COLUMNAS_TECNICAS: [&str; 4] = ["id", "notas_historial", "tareas", "pasos_seguimiento"];

// Header set for the empty workbook, so a download with no important
// works still opens as a well-formed sheet.
const COLUMNAS_ESTANDAR: [&str; 8] = [
    "nombre_obra",
    "cliente_principal",
    "ciudad",
    "provincia",
    "estado",
    "prioridad",
    "potencial_eur",
    "fecha_seguimiento",
];

/// Build the "Obras_importantes" workbook from the raw project frame and
/// hand it back as a download.
pub fn exportar_obras_importantes(marco: &[Documento]) -> ResultResp {
    let importantes = filtrar_obras_importantes(marco);
    let columnas = columnas_export(&importantes);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Obras_importantes")
        .map_err(|e| ServerError::XlsxError(format!("Failed to name sheet: {e}")))?;

    for (col, cabecera) in columnas.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, cabecera)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{cabecera}': {e}"))
            })?;
    }

    for (i, obra) in importantes.iter().enumerate() {
        let fila = (i + 1) as u32;
        for (col, columna) in columnas.iter().enumerate() {
            escribir_celda(worksheet, fila, col as u16, obra.valor(columna))
                .map_err(|e| ServerError::XlsxError(format!("Failed to write '{columna}': {e}")))?;
        }
    }

    let buffer = workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {e}")))?;

    xlsx_response(buffer, "obras_importantes.xlsx")
}

/// Exported column set: every field seen across the filtered rows, in
/// first-appearance order, minus the technical ones. An empty selection
/// falls back to the standard headers.
fn columnas_export(importantes: &[Documento]) -> Vec<String> {
    if importantes.is_empty() {
        return COLUMNAS_ESTANDAR.iter().map(|c| c.to_string()).collect();
    }

    let mut columnas: Vec<String> = Vec::new();
    for obra in importantes {
        for campo in obra.campos().keys() {
            if !COLUMNAS_TECNICAS.contains(&campo.as_str())
                && !columnas.iter().any(|c| c == campo)
            {
                columnas.push(campo.clone());
            }
        }
    }
    columnas
}

fn escribir_celda(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    fila: u32,
    col: u16,
    valor: Option<&Value>,
) -> Result<(), rust_xlsxwriter::XlsxError> {
    match valor {
        None | Some(Value::Null) => {}
        Some(Value::Number(n)) => {
            worksheet.write_number(fila, col, n.as_f64().unwrap_or(0.0))?;
        }
        Some(Value::Bool(b)) => {
            worksheet.write_boolean(fila, col, *b)?;
        }
        Some(Value::String(s)) => {
            worksheet.write_string(fila, col, s)?;
        }
        // Nested values should have been filtered out as technical
        // columns; serialize whatever slips through.
        Some(otro) => {
            worksheet.write_string(fila, col, &otro.to_string())?;
        }
    }
    Ok(())
}
