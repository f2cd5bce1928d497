use chrono::{Duration, Utc};
use rusqlite::params;
use serde_json::{json, Value};

use crate::db::{nuevo_documento_id, Database};
use crate::domain::{fechas, pasos_seguimiento_por_defecto, Documento};
use crate::errors::ServerError;

/// Load the whole `obras` collection in insertion order, with the row
/// key injected back into each document as `id`.
pub fn get_proyectos(db: &Database) -> Result<Vec<Documento>, ServerError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare("SELECT id, data FROM obras ORDER BY rowid")
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let filas = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let mut obras = Vec::new();
        for fila in filas {
            let (id, data) = fila.map_err(|e| ServerError::DbError(e.to_string()))?;
            let mut obra: Documento = serde_json::from_str(&data)
                .map_err(|e| ServerError::DbError(format!("Corrupt document {id}: {e}")))?;
            obra.fijar("id", json!(id));
            obras.push(obra);
        }
        Ok(obras)
    })
}

/// Insert a new project document and return its generated id.
///
/// Write-path rules carried over from the old CRM: `fecha_creacion` is
/// always stamped server-side, a missing `fecha_seguimiento` lands one
/// week out, and hand-created projects start with the standard follow-up
/// checklist.
pub fn add_proyecto(db: &Database, mut obra: Documento) -> Result<String, ServerError> {
    obra.quitar("id");
    obra.fijar(
        "fecha_creacion",
        json!(Utc::now().naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string()),
    );

    if matches!(obra.valor("fecha_seguimiento"), None | Some(Value::Null)) {
        let en_una_semana = fechas::hoy() + Duration::days(7);
        obra.fijar("fecha_seguimiento", json!(en_una_semana.to_string()));
    }
    if !obra.contiene("pasos_seguimiento") {
        obra.fijar("pasos_seguimiento", pasos_seguimiento_por_defecto());
    }

    let id = nuevo_documento_id();
    let data = serde_json::to_string(&obra).map_err(|e| ServerError::DbError(e.to_string()))?;

    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO obras (id, data) VALUES (?1, ?2)",
            params![id, data],
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(())
    })?;

    Ok(id)
}

/// Merge-update a project document: fields present in `cambios` replace
/// the stored ones, everything else stays.
pub fn actualizar_proyecto(
    db: &Database,
    proyecto_id: &str,
    cambios: Documento,
) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        let data: String = conn
            .query_row(
                "SELECT data FROM obras WHERE id = ?1",
                params![proyecto_id],
                |row| row.get(0),
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => ServerError::NotFound,
                otro => ServerError::DbError(otro.to_string()),
            })?;

        let mut obra: Documento = serde_json::from_str(&data)
            .map_err(|e| ServerError::DbError(format!("Corrupt document {proyecto_id}: {e}")))?;
        for (campo, valor) in cambios.into_campos() {
            if campo != "id" {
                obra.fijar(&campo, valor);
            }
        }

        let data =
            serde_json::to_string(&obra).map_err(|e| ServerError::DbError(e.to_string()))?;
        conn.execute(
            "UPDATE obras SET data = ?1 WHERE id = ?2",
            params![data, proyecto_id],
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(())
    })
}

pub fn delete_proyecto(db: &Database, proyecto_id: &str) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute("DELETE FROM obras WHERE id = ?1", params![proyecto_id])
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(())
    })
}
