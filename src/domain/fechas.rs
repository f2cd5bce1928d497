use chrono::{Local, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Turns whatever a document stores under a date field into a plain date.
///
/// The collections accumulated dates in several shapes over time: ISO dates,
/// ISO timestamps, and the `dd/mm/yy` / `dd/mm/yyyy` strings typed by hand
/// or pasted from spreadsheets. Everything else reads as `None`.
pub fn normalizar_fecha(valor: &Value) -> Option<NaiveDate> {
    match valor {
        Value::String(texto) => parsear_texto_fecha(texto),
        _ => None,
    }
}

pub fn parsear_texto_fecha(texto: &str) -> Option<NaiveDate> {
    let texto = texto.trim();
    if texto.is_empty() {
        return None;
    }

    if let Ok(fecha) = NaiveDate::parse_from_str(texto, "%Y-%m-%d") {
        return Some(fecha);
    }

    // ISO timestamps, with either separator and optional fraction.
    for formato in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(instante) = NaiveDateTime::parse_from_str(texto, formato) {
            return Some(instante.date());
        }
    }

    for formato in ["%d/%m/%y", "%d/%m/%Y"] {
        if let Ok(fecha) = NaiveDate::parse_from_str(texto, formato) {
            return Some(fecha);
        }
    }

    None
}

/// `YYYY-MM` bucket used by the monthly series.
pub fn anio_mes(fecha: NaiveDate) -> String {
    fecha.format("%Y-%m").to_string()
}

/// Strict parse of a `YYYY-MM` bucket key back into (year, month).
pub fn parsear_anio_mes(texto: &str) -> Option<(i32, u32)> {
    let (anio, mes) = texto.split_once('-')?;
    let anio: i32 = anio.parse().ok()?;
    let mes: u32 = mes.parse().ok()?;
    if (1..=12).contains(&mes) {
        Some((anio, mes))
    } else {
        None
    }
}

pub fn hoy() -> NaiveDate {
    Local::now().date_naive()
}
