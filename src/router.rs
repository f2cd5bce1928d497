use astra::Request;
use serde_json::json;

use crate::cache;
use crate::db::{clientes, obras, Database};
use crate::domain::analitica::{
    compute_kpis, conteo_prioridades, funnel_estado, potencial_por_provincia,
    proyectos_por_mes, ranking_promotoras, serie_potencial, TOP_PROMOTORAS,
};
use crate::domain::{fechas, kanban, normalizar, prompts, Documento};
use crate::errors::{ResultResp, ServerError};
use crate::responses::{html_response, redirect_response};
use crate::spreadsheets::export_xlsx::exportar_obras_importantes;
use crate::spreadsheets::import_xlsx::{extraer_archivo_subido, importar_proyectos_xlsx};
use crate::templates::pages::buscar::{buscar_page, BuscarVm};
use crate::templates::pages::clientes::{clientes_page, ClienteFilaVm, ClientesVm};
use crate::templates::pages::dashboard::{dashboard_page, DashboardVm, GanadoVm};
use crate::templates::pages::kanban::kanban_page;
use crate::templates::pages::panel::{panel_page, PanelVm, SeguimientoVm};
use crate::templates::pages::proyectos::{
    proyectos_page, EdicionVm, FiltrosProyectos, ObraFilaVm, ProyectosVm,
};

pub fn handle(mut req: Request, db: &Database) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => pagina_panel(db),
        ("GET", "/dashboard") => pagina_dashboard(db),
        ("GET", "/kanban") => pagina_kanban(db),
        ("GET", "/proyectos") => pagina_proyectos(&req, db),
        ("POST", "/proyectos/nuevo") => crear_proyecto(&mut req, db),
        ("POST", "/proyectos/editar") => editar_proyecto(&mut req, db),
        ("POST", "/proyectos/borrar") => borrar_proyecto(&mut req, db),
        ("GET", "/proyectos/exportar") => exportar_proyectos(db),
        ("POST", "/proyectos/importar") => importar_proyectos(&mut req, db),
        ("GET", "/clientes") => pagina_clientes(db),
        ("POST", "/clientes/nuevo") => crear_cliente(&mut req, db),
        ("POST", "/clientes/borrar") => borrar_cliente(&mut req, db),
        ("GET", "/buscar") => pagina_buscar(&req),
        _ => Err(ServerError::NotFound),
    }
}

// ---------------------------------------------------------------------
// Panel de control
// ---------------------------------------------------------------------

fn pagina_panel(db: &Database) -> ResultResp {
    let df_clientes = cache::clientes(db)?;
    let df_proyectos = cache::proyectos(db)?;

    let hay_estado = df_proyectos.iter().any(|obra| obra.contiene("estado"));
    let proyectos_activos = if hay_estado {
        df_proyectos.iter().filter(|obra| en_curso(obra)).count()
    } else {
        0
    };

    // Overdue follow-ups: due today or earlier and still in play.
    let hoy = fechas::hoy();
    let mut pendientes: Vec<(chrono::NaiveDate, SeguimientoVm)> = df_proyectos
        .iter()
        .filter(|obra| en_curso(obra))
        .filter_map(|obra| {
            let fecha = obra
                .valor("fecha_seguimiento")
                .and_then(fechas::normalizar_fecha)?;
            if fecha > hoy {
                return None;
            }
            Some((
                fecha,
                SeguimientoVm {
                    nombre_obra: obra.mostrar("nombre_obra", "Sin nombre"),
                    fecha_seguimiento: fecha.to_string(),
                    cliente_principal: obra.mostrar("cliente_principal", "—"),
                    estado: obra.mostrar("estado", "—"),
                    notas: obra.mostrar("notas_seguimiento", ""),
                },
            ))
        })
        .collect();
    pendientes.sort_by_key(|(fecha, _)| *fecha);

    html_response(panel_page(&PanelVm {
        total_clientes: df_clientes.len(),
        total_proyectos: df_proyectos.len(),
        proyectos_activos,
        pendientes: pendientes.into_iter().map(|(_, vm)| vm).collect(),
    }))
}

/// Neither won nor lost yet.
fn en_curso(obra: &Documento) -> bool {
    let estado = obra.texto("estado").unwrap_or("");
    estado != "Ganado" && estado != "Perdido"
}

// ---------------------------------------------------------------------
// Dashboard y Kanban
// ---------------------------------------------------------------------

fn pagina_dashboard(db: &Database) -> ResultResp {
    let marco = normalizar::normalizar_proyectos(Some(cache::proyectos(db)?));

    let mut provincias = potencial_por_provincia(&marco);
    provincias.truncate(8);

    let ganados = marco
        .iter()
        .filter(|obra| obra.texto("estado") == Some("Ganado"))
        .map(|obra| GanadoVm {
            nombre_obra: obra.mostrar("nombre_obra", "Sin nombre"),
            promotora: obra.mostrar("promotora_display", ""),
            ciudad: obra.mostrar("ciudad", ""),
            provincia: obra.mostrar("provincia", ""),
            potencial_eur: obra.numero("potencial_eur").unwrap_or(0.0),
            fecha_creacion: obra.mostrar("fecha_creacion", ""),
        })
        .collect();

    html_response(dashboard_page(&DashboardVm {
        kpis: compute_kpis(&marco),
        funnel: funnel_estado(&marco),
        mensual: proyectos_por_mes(&marco),
        potenciales: serie_potencial(&marco),
        prioridades: conteo_prioridades(&marco),
        provincias,
        ranking: ranking_promotoras(&marco, TOP_PROMOTORAS),
        ganados,
    }))
}

fn pagina_kanban(db: &Database) -> ResultResp {
    let marco = normalizar::normalizar_proyectos(Some(cache::proyectos(db)?));
    let columnas = kanban::tablero_kanban(&marco).map_err(ServerError::BadRequest)?;
    html_response(kanban_page(&columnas))
}

// ---------------------------------------------------------------------
// Proyectos
// ---------------------------------------------------------------------

fn pagina_proyectos(req: &Request, db: &Database) -> ResultResp {
    let params = parse_query(req);
    let filtros = FiltrosProyectos {
        estado: parametro(&params, "estado").unwrap_or("").to_string(),
        prioridad: parametro(&params, "prioridad").unwrap_or("").to_string(),
        provincia: parametro(&params, "provincia").unwrap_or("").to_string(),
        q: parametro(&params, "q").unwrap_or("").trim().to_string(),
    };

    let todas = cache::proyectos(db)?;

    let filtradas: Vec<Documento> = todas
        .iter()
        .filter(|obra| cumple_filtros(obra, &filtros))
        .cloned()
        .collect();

    // Distinct provinces for the dropdown, in order of appearance.
    let mut provincias: Vec<String> = Vec::new();
    for obra in &todas {
        let provincia = obra.mostrar("provincia", "");
        if !provincia.trim().is_empty() && !provincias.contains(&provincia) {
            provincias.push(provincia);
        }
    }

    let edicion = parametro(&params, "editar").and_then(|id| {
        todas
            .iter()
            .find(|obra| obra.texto("id") == Some(id))
            .map(|obra| EdicionVm {
                id: id.to_string(),
                nombre_obra: obra.mostrar("nombre_obra", ""),
                cliente_principal: obra.mostrar("cliente_principal", ""),
                ciudad: obra.mostrar("ciudad", ""),
                provincia: obra.mostrar("provincia", ""),
                estado: obra.mostrar("estado", "Detectado"),
                prioridad: obra.mostrar("prioridad", "Media"),
                potencial_eur: obra.numero("potencial_eur").unwrap_or(0.0),
                fecha_seguimiento: obra.mostrar("fecha_seguimiento", ""),
                notas_seguimiento: obra.mostrar("notas_seguimiento", ""),
            })
    });

    let obras_vm = filtradas
        .iter()
        .map(|obra| ObraFilaVm {
            id: obra.mostrar("id", ""),
            nombre_obra: obra.mostrar("nombre_obra", "Sin nombre"),
            cliente_principal: obra.mostrar("cliente_principal", "—"),
            ciudad: obra.mostrar("ciudad", "—"),
            provincia: obra.mostrar("provincia", "—"),
            estado: obra.mostrar("estado", "Detectado"),
            prioridad: obra.mostrar("prioridad", "Media"),
            potencial_eur: obra.numero("potencial_eur").unwrap_or(0.0),
            fecha_seguimiento: obra.mostrar("fecha_seguimiento", "—"),
        })
        .collect();

    html_response(proyectos_page(&ProyectosVm {
        pipeline: funnel_estado(&filtradas),
        obras: obras_vm,
        filtros,
        provincias,
        edicion,
        importados: parametro(&params, "importados").and_then(|n| n.parse().ok()),
    }))
}

fn cumple_filtros(obra: &Documento, filtros: &FiltrosProyectos) -> bool {
    if !filtros.estado.is_empty() && obra.texto("estado") != Some(filtros.estado.as_str()) {
        return false;
    }
    if !filtros.prioridad.is_empty() && obra.texto("prioridad") != Some(filtros.prioridad.as_str())
    {
        return false;
    }
    if !filtros.provincia.is_empty() && obra.mostrar("provincia", "") != filtros.provincia {
        return false;
    }
    if !filtros.q.is_empty() {
        let aguja = filtros.q.to_lowercase();
        let coincide = ["nombre_obra", "cliente_principal", "ciudad"]
            .iter()
            .any(|campo| obra.mostrar(campo, "").to_lowercase().contains(&aguja));
        if !coincide {
            return false;
        }
    }
    true
}

const CAMPOS_FORMULARIO_OBRA: [&str; 7] = [
    "cliente_principal",
    "ciudad",
    "provincia",
    "estado",
    "prioridad",
    "fecha_seguimiento",
    "notas_seguimiento",
];

fn crear_proyecto(req: &mut Request, db: &Database) -> ResultResp {
    let form = parse_form(req)?;

    let nombre = parametro(&form, "nombre_obra").unwrap_or("").trim().to_string();
    if nombre.is_empty() {
        return Err(ServerError::BadRequest("La obra necesita un nombre.".into()));
    }

    let mut obra = Documento::new();
    obra.fijar("nombre_obra", json!(nombre));
    for campo in CAMPOS_FORMULARIO_OBRA {
        if let Some(valor) = parametro(&form, campo) {
            let valor = valor.trim();
            if !valor.is_empty() {
                obra.fijar(campo, json!(valor));
            }
        }
    }
    obra.fijar("potencial_eur", json!(potencial_del_form(&form)));

    obras::add_proyecto(db, obra)?;
    cache::invalidar_proyectos(db);
    redirect_response("/proyectos")
}

fn editar_proyecto(req: &mut Request, db: &Database) -> ResultResp {
    let form = parse_form(req)?;
    let id = parametro(&form, "id")
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ServerError::BadRequest("Falta el id del proyecto.".into()))?
        .to_string();

    let mut cambios = Documento::new();
    if let Some(nombre) = parametro(&form, "nombre_obra") {
        cambios.fijar("nombre_obra", json!(nombre.trim()));
    }
    for campo in CAMPOS_FORMULARIO_OBRA {
        if let Some(valor) = parametro(&form, campo) {
            cambios.fijar(campo, json!(valor.trim()));
        }
    }
    cambios.fijar("potencial_eur", json!(potencial_del_form(&form)));

    obras::actualizar_proyecto(db, &id, cambios)?;
    cache::invalidar_proyectos(db);
    redirect_response("/proyectos")
}

fn potencial_del_form(form: &[(String, String)]) -> f64 {
    parametro(form, "potencial_eur")
        .and_then(|valor| valor.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

fn borrar_proyecto(req: &mut Request, db: &Database) -> ResultResp {
    let form = parse_form(req)?;
    let id = parametro(&form, "id")
        .ok_or_else(|| ServerError::BadRequest("Falta el id del proyecto.".into()))?;

    obras::delete_proyecto(db, id)?;
    cache::invalidar_proyectos(db);
    redirect_response("/proyectos")
}

fn exportar_proyectos(db: &Database) -> ResultResp {
    let todas = cache::proyectos(db)?;
    exportar_obras_importantes(&todas)
}

fn importar_proyectos(req: &mut Request, db: &Database) -> ResultResp {
    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|valor| valor.to_str().ok())
        .unwrap_or("")
        .to_string();
    let cuerpo = leer_cuerpo(req)?;

    let archivo = extraer_archivo_subido(&content_type, &cuerpo)
        .filter(|datos| !datos.is_empty())
        .ok_or_else(|| ServerError::BadRequest("No se ha recibido ningún archivo.".into()))?;

    let creados = importar_proyectos_xlsx(db, &archivo)?;
    // The import writes both collections (projects plus auto-created
    // clients).
    cache::invalidar_proyectos(db);
    cache::invalidar_clientes(db);

    redirect_response(&format!("/proyectos?importados={creados}"))
}

// ---------------------------------------------------------------------
// Clientes
// ---------------------------------------------------------------------

fn pagina_clientes(db: &Database) -> ResultResp {
    let df_clientes = cache::clientes(db)?;

    let filas = df_clientes
        .iter()
        .map(|cliente| ClienteFilaVm {
            id: cliente.mostrar("id", ""),
            nombre: cliente.mostrar("nombre", ""),
            empresa: cliente.mostrar("empresa", ""),
            tipo_cliente: cliente.mostrar("tipo_cliente", ""),
            email: cliente.mostrar("email", ""),
            telefono: cliente.mostrar("telefono", ""),
            ciudad: cliente.mostrar("ciudad", ""),
            provincia: cliente.mostrar("provincia", ""),
            notas: cliente.mostrar("notas", ""),
        })
        .collect();

    html_response(clientes_page(&ClientesVm { clientes: filas }))
}

fn crear_cliente(req: &mut Request, db: &Database) -> ResultResp {
    let form = parse_form(req)?;

    let nombre = parametro(&form, "nombre").unwrap_or("").trim().to_string();
    let empresa = parametro(&form, "empresa").unwrap_or("").trim().to_string();
    if nombre.is_empty() && empresa.is_empty() {
        return Err(ServerError::BadRequest(
            "Pon al menos un nombre o una empresa.".into(),
        ));
    }

    let mut cliente = Documento::new();
    cliente.fijar("nombre", json!(nombre));
    cliente.fijar("empresa", json!(empresa));
    for campo in ["tipo_cliente", "email", "telefono", "ciudad", "provincia", "notas"] {
        cliente.fijar(campo, json!(parametro(&form, campo).unwrap_or("").trim()));
    }

    clientes::add_cliente(db, cliente)?;
    cache::invalidar_clientes(db);
    redirect_response("/clientes")
}

fn borrar_cliente(req: &mut Request, db: &Database) -> ResultResp {
    let form = parse_form(req)?;
    let id = parametro(&form, "id")
        .ok_or_else(|| ServerError::BadRequest("Falta el id del cliente.".into()))?;

    clientes::delete_cliente(db, id)?;
    cache::invalidar_clientes(db);
    redirect_response("/clientes")
}

// ---------------------------------------------------------------------
// Buscar (generador de prompts)
// ---------------------------------------------------------------------

fn pagina_buscar(req: &Request) -> ResultResp {
    let params = parse_query(req);
    let tipo = parametro(&params, "tipo").unwrap_or("proyectos").to_string();

    // A first visit carries no parameters; give the form the usual
    // starting selection. A submitted form stands on its own (an
    // unchecked checkbox simply sends nothing).
    let vm = if params.is_empty() {
        BuscarVm {
            tipo,
            zonas: vec![
                "Comunidad de Madrid".into(),
                "Málaga".into(),
                "Barcelona".into(),
            ],
            verticales: vec!["Residencial lujo".into(), "BTR".into(), "Oficinas".into()],
            meses: "12".into(),
            min_viviendas: 0,
            hoteles_btr: true,
            tipos_cliente: vec![
                "Arquitectura".into(),
                "Ingeniería".into(),
                "Integrator Partner".into(),
            ],
            top10: true,
            prompt: String::new(),
        }
    } else {
        BuscarVm {
            tipo,
            zonas: parametros(&params, "zonas"),
            verticales: parametros(&params, "verticales"),
            meses: parametro(&params, "meses").unwrap_or("12").to_string(),
            min_viviendas: parametro(&params, "min_viviendas")
                .and_then(|n| n.trim().parse().ok())
                .unwrap_or(0),
            hoteles_btr: parametro(&params, "hoteles_btr").is_some(),
            tipos_cliente: parametros(&params, "tipos_cliente"),
            top10: parametro(&params, "top10").is_some(),
            prompt: String::new(),
        }
    };

    let prompt = if vm.tipo == "clientes" {
        prompts::prompt_clientes(&vm.zonas, &vm.tipos_cliente, &vm.verticales, vm.top10)
    } else {
        prompts::prompt_proyectos(
            &vm.zonas,
            &vm.verticales,
            &vm.meses,
            vm.min_viviendas,
            vm.hoteles_btr,
        )
    };

    html_response(buscar_page(&BuscarVm { prompt, ..vm }))
}

// ---------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------

fn parse_query(req: &Request) -> Vec<(String, String)> {
    match req.uri().query() {
        Some(query) => url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect(),
        None => Vec::new(),
    }
}

fn parse_form(req: &mut Request) -> Result<Vec<(String, String)>, ServerError> {
    let cuerpo = leer_cuerpo(req)?;
    Ok(url::form_urlencoded::parse(&cuerpo).into_owned().collect())
}

fn leer_cuerpo(req: &mut Request) -> Result<Vec<u8>, ServerError> {
    use std::io::Read;

    let mut cuerpo = Vec::new();
    req.body_mut()
        .reader()
        .read_to_end(&mut cuerpo)
        .map_err(|_| ServerError::BadRequest("No se pudo leer el cuerpo de la petición.".into()))?;
    Ok(cuerpo)
}

fn parametro<'a>(params: &'a [(String, String)], clave: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(nombre, _)| nombre == clave)
        .map(|(_, valor)| valor.as_str())
}

fn parametros(params: &[(String, String)], clave: &str) -> Vec<String> {
    params
        .iter()
        .filter(|(nombre, _)| nombre == clave)
        .map(|(_, valor)| valor.clone())
        .collect()
}
