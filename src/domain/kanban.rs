use crate::domain::{Documento, ESTADOS_PIPELINE};

/// What the board needs to paint one project card.
#[derive(Debug, Clone, PartialEq)]
pub struct TarjetaObra {
    pub nombre_obra: String,
    pub cliente_principal: String,
    pub ciudad: String,
    pub potencial_eur: f64,
    pub prioridad: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnaKanban {
    pub estado: &'static str,
    pub tarjetas: Vec<TarjetaObra>,
}

/// Groups the project frame into the eight pipeline columns, in pipeline
/// order. Columns without matches stay present with an empty card list,
/// and cards keep the source order of their rows.
///
/// An empty frame yields eight empty columns. A non-empty frame where no
/// row carries an `estado` field at all means the normalizer never ran;
/// that is a caller mistake and comes back as `Err` with a message fit
/// for the screen.
pub fn tablero_kanban(marco: &[Documento]) -> Result<Vec<ColumnaKanban>, String> {
    if !marco.is_empty() && !marco.iter().any(|obra| obra.contiene("estado")) {
        return Err("Los proyectos no tienen campo 'estado'.".to_string());
    }

    Ok(ESTADOS_PIPELINE
        .iter()
        .map(|&estado| ColumnaKanban {
            estado,
            tarjetas: marco
                .iter()
                .filter(|obra| obra.texto("estado") == Some(estado))
                .map(tarjeta)
                .collect(),
        })
        .collect())
}

fn tarjeta(obra: &Documento) -> TarjetaObra {
    TarjetaObra {
        nombre_obra: obra.mostrar("nombre_obra", "Sin nombre"),
        cliente_principal: obra.mostrar("cliente_principal", "—"),
        ciudad: obra.mostrar("ciudad", "—"),
        potencial_eur: obra.numero("potencial_eur").unwrap_or(0.0),
        prioridad: obra.mostrar("prioridad", "Media"),
    }
}
