//! Process-wide memoization of the collection reads.
//!
//! Every page render starts by loading `obras` and/or `clientes`; without
//! this layer each render would hit SQLite several times for the same
//! unchanged data. Entries are keyed by database path and thrown away
//! after every write, so readers always see their own writes.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::db::{clientes, obras, Database};
use crate::domain::Documento;
use crate::errors::ServerError;

type Memo = Lazy<RwLock<HashMap<String, Vec<Documento>>>>;

static PROYECTOS: Memo = Lazy::new(|| RwLock::new(HashMap::new()));
static CLIENTES: Memo = Lazy::new(|| RwLock::new(HashMap::new()));

/// Cached load of the `obras` collection.
pub fn proyectos(db: &Database) -> Result<Vec<Documento>, ServerError> {
    leer(&PROYECTOS, db, obras::get_proyectos)
}

/// Drop the cached `obras` after any write to them.
pub fn invalidar_proyectos(db: &Database) {
    invalidar(&PROYECTOS, db);
}

/// Cached load of the `clientes` collection.
pub fn clientes(db: &Database) -> Result<Vec<Documento>, ServerError> {
    leer(&CLIENTES, db, clientes::get_clientes)
}

/// Drop the cached `clientes` after any write to them.
pub fn invalidar_clientes(db: &Database) {
    invalidar(&CLIENTES, db);
}

fn leer(
    memo: &Memo,
    db: &Database,
    cargar: fn(&Database) -> Result<Vec<Documento>, ServerError>,
) -> Result<Vec<Documento>, ServerError> {
    if let Some(docs) = memo
        .read()
        .map_err(|_| ServerError::InternalError)?
        .get(db.path())
    {
        return Ok(docs.clone());
    }

    let docs = cargar(db)?;
    memo.write()
        .map_err(|_| ServerError::InternalError)?
        .insert(db.path().to_string(), docs.clone());
    Ok(docs)
}

fn invalidar(memo: &Memo, db: &Database) {
    if let Ok(mut mapa) = memo.write() {
        mapa.remove(db.path());
    }
}
