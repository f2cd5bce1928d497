use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use serde_json::{json, Value};

use crate::db::{nuevo_documento_id, Database};
use crate::domain::Documento;
use crate::errors::ServerError;

/// Load the whole `clientes` collection in insertion order.
pub fn get_clientes(db: &Database) -> Result<Vec<Documento>, ServerError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare("SELECT id, data FROM clientes ORDER BY rowid")
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let filas = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let mut clientes = Vec::new();
        for fila in filas {
            let (id, data) = fila.map_err(|e| ServerError::DbError(e.to_string()))?;
            let mut cliente: Documento = serde_json::from_str(&data)
                .map_err(|e| ServerError::DbError(format!("Corrupt document {id}: {e}")))?;
            cliente.fijar("id", json!(id));
            clientes.push(cliente);
        }
        Ok(clientes)
    })
}

/// Insert a client document, stamping `fecha_alta` when absent.
pub fn add_cliente(db: &Database, mut cliente: Documento) -> Result<String, ServerError> {
    cliente.quitar("id");
    if matches!(cliente.valor("fecha_alta"), None | Some(Value::Null)) {
        cliente.fijar(
            "fecha_alta",
            json!(Utc::now().naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string()),
        );
    }

    let id = nuevo_documento_id();
    let data =
        serde_json::to_string(&cliente).map_err(|e| ServerError::DbError(e.to_string()))?;

    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO clientes (id, data) VALUES (?1, ?2)",
            params![id, data],
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(())
    })?;

    Ok(id)
}

pub fn delete_cliente(db: &Database, cliente_id: &str) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute("DELETE FROM clientes WHERE id = ?1", params![cliente_id])
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        Ok(())
    })
}

/// Create a minimal client for a company name unless one already exists.
/// The spreadsheet import calls this for every promoter, architecture
/// and engineering firm it encounters.
pub fn ensure_cliente_basico(
    db: &Database,
    empresa: Option<&str>,
    tipo_cliente: &str,
) -> Result<(), ServerError> {
    let Some(empresa) = empresa.map(str::trim).filter(|e| !e.is_empty()) else {
        return Ok(());
    };

    let existente: Option<String> = db.with_conn(|conn| {
        conn.query_row(
            "SELECT id FROM clientes WHERE json_extract(data, '$.empresa') = ?1 LIMIT 1",
            params![empresa],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| ServerError::DbError(e.to_string()))
    })?;
    if existente.is_some() {
        return Ok(());
    }

    let mut minimo = Documento::new();
    minimo.fijar("nombre", json!(""));
    minimo.fijar("empresa", json!(empresa));
    minimo.fijar("tipo_cliente", json!(tipo_cliente));
    minimo.fijar("email", json!(""));
    minimo.fijar("telefono", json!(""));
    minimo.fijar("ciudad", json!(""));
    minimo.fijar("provincia", json!(""));
    minimo.fijar(
        "notas",
        json!("Creado automáticamente desde importación/proyecto."),
    );
    add_cliente(db, minimo)?;
    Ok(())
}
