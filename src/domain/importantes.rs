use crate::domain::{Documento, ESTADO_INICIAL, PRIORIDAD_NORMAL};

/// A work whose potential reaches this figure counts as important on its
/// own, whatever its priority.
pub const POTENCIAL_MINIMO_IMPORTANTE: f64 = 50_000.0;

// Stages that still count as "being tracked". The legacy
// "En comercialización" label survives in older documents, so it stays
// on the list even though the pipeline no longer produces it.
const ESTADOS_EN_SEGUIMIENTO: [&str; 6] = [
    "Detectado",
    "Seguimiento",
    "En Prescripción",
    "Oferta Enviada",
    "Negociación",
    "En comercialización",
];

/// Selects the works worth exporting: still being tracked, and either
/// high priority or above the potential threshold.
///
/// The filter runs on whatever frame the caller has at hand, normalized
/// or not, so a column missing from the whole frame falls back to its
/// default for every row — while a row-level gap in a column that other
/// rows do carry simply fails the check.
pub fn filtrar_obras_importantes(marco: &[Documento]) -> Vec<Documento> {
    let hay_estado = marco.iter().any(|obra| obra.contiene("estado"));
    let hay_prioridad = marco.iter().any(|obra| obra.contiene("prioridad"));

    marco
        .iter()
        .filter(|obra| {
            let estado = if hay_estado {
                obra.texto("estado").unwrap_or("")
            } else {
                ESTADO_INICIAL
            };
            let prioridad = if hay_prioridad {
                obra.texto("prioridad").unwrap_or("")
            } else {
                PRIORIDAD_NORMAL
            };
            let potencial = obra.numero("potencial_eur").unwrap_or(0.0);

            ESTADOS_EN_SEGUIMIENTO.contains(&estado)
                && (prioridad == "Alta" || potencial >= POTENCIAL_MINIMO_IMPORTANTE)
        })
        .cloned()
        .collect()
}
