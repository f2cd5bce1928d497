use serde_json::{json, Value};

use crate::domain::fechas;
use crate::domain::{Documento, ESTADO_INICIAL, PRIORIDAD_NORMAL};

/// Normalizes the raw project collection into the frame every aggregator
/// and the Kanban board consume.
///
/// The record source may hand us nothing at all (`None`, source
/// unavailable), an empty batch, or a batch of schemaless documents.
/// After this pass every row is guaranteed to carry `potencial_eur`
/// (numeric, never null), `estado`, `prioridad`, `provincia`,
/// `promotora_display`, plus `fecha_creacion`/`anio_mes` (null when the
/// date could not be read). Unrecognized fields pass through untouched.
///
/// This function never fails: malformed fields degrade to their defaults.
pub fn normalizar_proyectos(origen: Option<Vec<Documento>>) -> Vec<Documento> {
    origen
        .unwrap_or_default()
        .into_iter()
        .map(normalizar_proyecto)
        .collect()
}

fn normalizar_proyecto(mut obra: Documento) -> Documento {
    // Economic potential: coerce to a number, anything unreadable -> 0.0.
    // Negative amounts are kept as they came; downstream aggregation
    // must cope with them.
    let potencial = obra.numero("potencial_eur").unwrap_or(0.0);
    obra.fijar("potencial_eur", json!(potencial));

    if es_nulo(&obra, "estado") {
        obra.fijar("estado", json!(ESTADO_INICIAL));
    }
    if es_nulo(&obra, "prioridad") {
        obra.fijar("prioridad", json!(PRIORIDAD_NORMAL));
    }

    match obra.valor("fecha_creacion").and_then(fechas::normalizar_fecha) {
        Some(fecha) => {
            obra.fijar("fecha_creacion", json!(fecha.to_string()));
            obra.fijar("anio_mes", json!(fechas::anio_mes(fecha)));
        }
        None => {
            obra.fijar("fecha_creacion", Value::Null);
            obra.fijar("anio_mes", Value::Null);
        }
    }

    if es_nulo(&obra, "provincia") {
        obra.fijar("provincia", json!(""));
    }

    // Promoter / principal client unified into one display column.
    let promotora = match obra.valor("cliente_principal") {
        None | Some(Value::Null) => String::new(),
        Some(_) => obra.mostrar("cliente_principal", ""),
    };
    obra.fijar("promotora_display", json!(promotora));

    obra
}

fn es_nulo(obra: &Documento, campo: &str) -> bool {
    matches!(obra.valor(campo), None | Some(Value::Null))
}
