use rust_xlsxwriter::Workbook;

use crate::db::{clientes, obras};
use crate::router::handle;
use crate::tests::utils::{cabecera, cuerpo_bytes, cuerpo_texto, get, make_db, post_bytes, post_form};

#[test]
fn exportar_devuelve_un_xlsx_descargable() {
    let db = make_db("export_xlsx");

    // One important work (tracked + high priority), one that is not.
    handle(
        post_form(
            "/proyectos/nuevo",
            "nombre_obra=Torre+Clave&estado=Seguimiento&prioridad=Alta&potencial_eur=10000",
        ),
        &db,
    )
    .unwrap();
    handle(
        post_form(
            "/proyectos/nuevo",
            "nombre_obra=Obra+Menor&estado=Detectado&prioridad=Baja&potencial_eur=100",
        ),
        &db,
    )
    .unwrap();

    let mut resp = handle(get("/proyectos/exportar"), &db).unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    assert!(cabecera(&resp, "content-type").contains("spreadsheetml"));
    assert!(cabecera(&resp, "content-disposition").contains("obras_importantes.xlsx"));

    // A zip container, i.e. a real workbook.
    let bytes = cuerpo_bytes(&mut resp);
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn exportar_sin_obras_sigue_siendo_un_libro_valido() {
    let db = make_db("export_vacio");

    let mut resp = handle(get("/proyectos/exportar"), &db).unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    assert!(cuerpo_bytes(&mut resp).starts_with(b"PK"));
}

/// Workbook shaped like the one the scouting prompt produces.
fn libro_de_scouting() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let hoja = workbook.add_worksheet();

    let cabeceras = [
        "Proyecto",
        "Ciudad",
        "Provincia",
        "Segmento",
        "Estado",
        "Promotora_Fondo",
        "Ingenieria",
        "Fecha_Inicio_Estimada",
        "Notas",
        "Fuente_URL",
    ];
    for (col, cabecera) in cabeceras.iter().enumerate() {
        hoja.write_string(0, col as u16, *cabecera).unwrap();
    }

    let filas = [
        [
            "Torre Albatros",
            "Estepona",
            "Málaga",
            "Residencial lujo",
            "Detectado",
            "Stoneweg",
            "Ingenia Sur",
            "15/03/2026",
            "Fase de ventas",
            "https://ejemplo.es/albatros",
        ],
        [
            "Oficinas Delta",
            "Madrid",
            "Madrid",
            "Oficinas",
            "Seguimiento",
            "",
            "",
            "",
            "",
            "",
        ],
        // No project name: the importer must skip this one.
        ["", "Valencia", "Valencia", "", "", "", "", "", "", ""],
    ];
    for (i, fila) in filas.iter().enumerate() {
        for (col, valor) in fila.iter().enumerate() {
            hoja.write_string((i + 1) as u32, col as u16, *valor).unwrap();
        }
    }

    workbook.save_to_buffer().unwrap()
}

fn envolver_multipart(archivo: &[u8]) -> (String, Vec<u8>) {
    let frontera = "----prueba-importacion";
    let mut cuerpo = Vec::new();
    cuerpo.extend_from_slice(format!("--{frontera}\r\n").as_bytes());
    cuerpo.extend_from_slice(
        b"Content-Disposition: form-data; name=\"archivo\"; filename=\"obras.xlsx\"\r\n",
    );
    cuerpo.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    cuerpo.extend_from_slice(archivo);
    cuerpo.extend_from_slice(format!("\r\n--{frontera}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={frontera}"), cuerpo)
}

#[test]
fn importar_crea_proyectos_y_clientes_minimos() {
    let db = make_db("import_xlsx");

    let (content_type, cuerpo) = envolver_multipart(&libro_de_scouting());
    let resp = handle(post_bytes("/proyectos/importar", &content_type, cuerpo), &db).unwrap();

    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(cabecera(&resp, "location"), "/proyectos?importados=2");

    let guardadas = obras::get_proyectos(&db).unwrap();
    assert_eq!(guardadas.len(), 2);

    let torre = guardadas
        .iter()
        .find(|o| o.texto("nombre_obra") == Some("Torre Albatros"))
        .unwrap();
    // Luxury segment bumps the priority.
    assert_eq!(torre.texto("prioridad"), Some("Alta"));
    assert_eq!(torre.texto("cliente_principal"), Some("Stoneweg"));
    assert_eq!(torre.texto("fecha_inicio"), Some("2026-03-15"));
    assert_eq!(torre.numero("potencial_eur"), Some(0.0));
    let notas = torre.texto("notas_seguimiento").unwrap();
    assert!(notas.contains("Fase de ventas"));
    assert!(notas.contains("Fuente: https://ejemplo.es/albatros"));

    let delta = guardadas
        .iter()
        .find(|o| o.texto("nombre_obra") == Some("Oficinas Delta"))
        .unwrap();
    assert_eq!(delta.texto("prioridad"), Some("Media"));
    assert_eq!(delta.texto("estado"), Some("Seguimiento"));

    // The promoter and the engineering firm got minimal client records.
    let empresas: Vec<String> = clientes::get_clientes(&db)
        .unwrap()
        .iter()
        .map(|c| c.mostrar("empresa", ""))
        .collect();
    assert!(empresas.contains(&"Stoneweg".to_string()));
    assert!(empresas.contains(&"Ingenia Sur".to_string()));
    assert_eq!(empresas.len(), 2);

    // And the list page reflects the import, cache included.
    let mut lista = handle(get("/proyectos?importados=2"), &db).unwrap();
    let body = cuerpo_texto(&mut lista);
    assert!(body.contains("Proyectos importados desde Excel: 2"));
    assert!(body.contains("Torre Albatros"));
}

#[test]
fn importar_sin_archivo_es_peticion_invalida() {
    let db = make_db("import_vacio");

    let err = handle(
        post_bytes("/proyectos/importar", "application/octet-stream", Vec::new()),
        &db,
    )
    .unwrap_err();
    assert!(matches!(err, crate::errors::ServerError::BadRequest(_)));
}

#[test]
fn importar_basura_es_error_de_hoja_de_calculo() {
    let db = make_db("import_basura");

    let err = handle(
        post_bytes(
            "/proyectos/importar",
            "application/octet-stream",
            b"esto no es un xlsx".to_vec(),
        ),
        &db,
    )
    .unwrap_err();
    assert!(matches!(err, crate::errors::ServerError::XlsxError(_)));
}
