pub mod analitica;
pub mod documento;
pub mod fechas;
pub mod importantes;
pub mod kanban;
pub mod normalizar;
pub mod prompts;

pub use documento::Documento;

use serde_json::{json, Value};

/// Pipeline stages in canonical order, Salesforce style. The funnel and
/// the Kanban board both iterate this list, so their columns always line
/// up.
pub const ESTADOS_PIPELINE: [&str; 8] = [
    "Detectado",
    "Seguimiento",
    "En Prescripción",
    "Oferta Enviada",
    "Negociación",
    "Ganado",
    "Perdido",
    "Paralizado",
];

/// Recognized priority labels. Free-form values are tolerated everywhere;
/// this list only drives the form dropdowns.
pub const PRIORIDADES: [&str; 3] = ["Alta", "Media", "Baja"];

pub const ESTADO_INICIAL: &str = "Detectado";
pub const PRIORIDAD_NORMAL: &str = "Media";

/// Follow-up checklist seeded into every project created by hand.
pub fn pasos_seguimiento_por_defecto() -> Value {
    let nombres = [
        "Identificar agentes clave (promotora / ingeniería / arquitectura / integrador)",
        "Primer contacto (llamada / email)",
        "Enviar dossier y referencias",
        "Programar reunión / demo con el cliente",
        "Preparar y enviar memoria técnica / oferta económica",
        "Seguimiento, ajustes y cierre (prescripción / adjudicación)",
    ];
    Value::Array(
        nombres
            .iter()
            .map(|nombre| json!({"nombre": nombre, "completado": false}))
            .collect(),
    )
}
