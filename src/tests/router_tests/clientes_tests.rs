use crate::db::clientes;
use crate::router::handle;
use crate::tests::utils::{cuerpo_texto, get, make_db, post_form};

#[test]
fn alta_de_cliente_y_listado() {
    let db = make_db("clientes_alta");

    let resp = handle(
        post_form(
            "/clientes/nuevo",
            "nombre=Laura&empresa=Ingenia+Sur&tipo_cliente=Ingenier%C3%ADa&email=laura%40ingenia.es&ciudad=Sevilla",
        ),
        &db,
    )
    .unwrap();
    assert_eq!(resp.status().as_u16(), 303);

    let mut lista = handle(get("/clientes"), &db).unwrap();
    let body = cuerpo_texto(&mut lista);
    assert!(body.contains("Laura"));
    assert!(body.contains("Ingenia Sur"));
    assert!(body.contains("laura@ingenia.es"));

    // fecha_alta gets stamped on insert.
    let guardados = clientes::get_clientes(&db).unwrap();
    assert_eq!(guardados.len(), 1);
    assert!(guardados[0].contiene("fecha_alta"));
}

#[test]
fn alta_sin_nombre_ni_empresa_es_invalida() {
    let db = make_db("clientes_invalido");

    let err = handle(post_form("/clientes/nuevo", "nombre=&empresa=++"), &db).unwrap_err();
    assert!(matches!(err, crate::errors::ServerError::BadRequest(_)));
}

#[test]
fn borrado_de_cliente() {
    let db = make_db("clientes_borrado");

    handle(post_form("/clientes/nuevo", "empresa=Promotora+Breve"), &db).unwrap();
    let id = clientes::get_clientes(&db).unwrap()[0]
        .texto("id")
        .unwrap()
        .to_string();

    let resp = handle(post_form("/clientes/borrar", &format!("id={id}")), &db).unwrap();
    assert_eq!(resp.status().as_u16(), 303);
    assert!(clientes::get_clientes(&db).unwrap().is_empty());
}

#[test]
fn ensure_cliente_basico_no_duplica_empresas() {
    let db = make_db("clientes_ensure");

    clientes::ensure_cliente_basico(&db, Some("Stoneweg"), "Promotora").unwrap();
    clientes::ensure_cliente_basico(&db, Some("Stoneweg"), "Promotora").unwrap();
    clientes::ensure_cliente_basico(&db, Some("  "), "Promotora").unwrap();
    clientes::ensure_cliente_basico(&db, None, "Promotora").unwrap();

    let guardados = clientes::get_clientes(&db).unwrap();
    assert_eq!(guardados.len(), 1);
    assert_eq!(guardados[0].texto("empresa"), Some("Stoneweg"));
    assert_eq!(guardados[0].texto("tipo_cliente"), Some("Promotora"));
}
