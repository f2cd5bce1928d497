use crate::db::obras;
use crate::router::handle;
use crate::tests::utils::{cabecera, cuerpo_texto, get, make_db, post_form};

#[test]
fn alta_de_obra_redirige_y_aparece_en_la_lista() {
    let db = make_db("obras_alta");

    let resp = handle(
        post_form(
            "/proyectos/nuevo",
            "nombre_obra=Torre+Albatros&cliente_principal=Stoneweg&ciudad=Estepona&provincia=M%C3%A1laga&estado=Detectado&prioridad=Alta&potencial_eur=120000",
        ),
        &db,
    )
    .unwrap();

    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(cabecera(&resp, "location"), "/proyectos");

    let mut lista = handle(get("/proyectos"), &db).unwrap();
    let body = cuerpo_texto(&mut lista);
    assert!(body.contains("Torre Albatros"));
    assert!(body.contains("Stoneweg"));
    assert!(body.contains("120,000"));

    // The write path stamps the server-side fields.
    let guardadas = obras::get_proyectos(&db).unwrap();
    assert_eq!(guardadas.len(), 1);
    assert!(guardadas[0].contiene("fecha_creacion"));
    assert!(guardadas[0].contiene("fecha_seguimiento"));
    assert!(guardadas[0].contiene("pasos_seguimiento"));
}

#[test]
fn alta_sin_nombre_es_peticion_invalida() {
    let db = make_db("obras_sin_nombre");

    let err = handle(post_form("/proyectos/nuevo", "nombre_obra=++&estado=Detectado"), &db)
        .unwrap_err();

    assert!(matches!(err, crate::errors::ServerError::BadRequest(_)));
}

#[test]
fn filtros_por_estado_y_texto() {
    let db = make_db("obras_filtros");

    handle(
        post_form("/proyectos/nuevo", "nombre_obra=Torre+Norte&estado=Ganado"),
        &db,
    )
    .unwrap();
    handle(
        post_form("/proyectos/nuevo", "nombre_obra=Residencial+Lago&estado=Detectado"),
        &db,
    )
    .unwrap();

    let mut filtrado = handle(get("/proyectos?estado=Ganado"), &db).unwrap();
    let body = cuerpo_texto(&mut filtrado);
    assert!(body.contains("Torre Norte"));
    assert!(!body.contains("Residencial Lago"));

    let mut buscado = handle(get("/proyectos?q=lago"), &db).unwrap();
    let body = cuerpo_texto(&mut buscado);
    assert!(body.contains("Residencial Lago"));
    assert!(!body.contains("Torre Norte"));
}

#[test]
fn edicion_actualiza_los_campos_enviados() {
    let db = make_db("obras_edicion");

    handle(
        post_form(
            "/proyectos/nuevo",
            "nombre_obra=Obra+Original&estado=Detectado&potencial_eur=1000",
        ),
        &db,
    )
    .unwrap();
    let id = obras::get_proyectos(&db).unwrap()[0]
        .texto("id")
        .unwrap()
        .to_string();

    // The edit form is prefilled from the stored document.
    let mut formulario = handle(get(&format!("/proyectos?editar={id}")), &db).unwrap();
    let body = cuerpo_texto(&mut formulario);
    assert!(body.contains("Editar obra"));
    assert!(body.contains("Obra Original"));

    let resp = handle(
        post_form(
            "/proyectos/editar",
            &format!("id={id}&nombre_obra=Obra+Renovada&estado=Negociaci%C3%B3n&potencial_eur=9000"),
        ),
        &db,
    )
    .unwrap();
    assert_eq!(resp.status().as_u16(), 303);

    let guardada = &obras::get_proyectos(&db).unwrap()[0];
    assert_eq!(guardada.texto("nombre_obra"), Some("Obra Renovada"));
    assert_eq!(guardada.texto("estado"), Some("Negociación"));
    assert_eq!(guardada.numero("potencial_eur"), Some(9000.0));
    // Untouched fields survive the merge.
    assert!(guardada.contiene("fecha_creacion"));
}

#[test]
fn editar_obra_inexistente_es_not_found() {
    let db = make_db("obras_editar_fantasma");

    let err = handle(
        post_form("/proyectos/editar", "id=no-existe&nombre_obra=X"),
        &db,
    )
    .unwrap_err();

    assert!(matches!(err, crate::errors::ServerError::NotFound));
}

#[test]
fn borrado_elimina_la_obra() {
    let db = make_db("obras_borrado");

    handle(
        post_form("/proyectos/nuevo", "nombre_obra=Obra+Efimera&estado=Detectado"),
        &db,
    )
    .unwrap();
    let id = obras::get_proyectos(&db).unwrap()[0]
        .texto("id")
        .unwrap()
        .to_string();

    let resp = handle(post_form("/proyectos/borrar", &format!("id={id}")), &db).unwrap();
    assert_eq!(resp.status().as_u16(), 303);

    assert!(obras::get_proyectos(&db).unwrap().is_empty());
    let mut lista = handle(get("/proyectos"), &db).unwrap();
    assert!(!cuerpo_texto(&mut lista).contains("Obra Efimera"));
}

#[test]
fn ruta_desconocida_es_not_found() {
    let db = make_db("ruta_desconocida");

    let err = handle(get("/no-existe"), &db).unwrap_err();
    assert!(matches!(err, crate::errors::ServerError::NotFound));
}
