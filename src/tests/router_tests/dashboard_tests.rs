use crate::router::handle;
use crate::tests::utils::{cuerpo_texto, get, make_db, post_form};

#[test]
fn panel_vacio_carga_con_ceros() {
    let db = make_db("panel_vacio");

    let mut resp = handle(get("/"), &db).unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let body = cuerpo_texto(&mut resp);
    assert!(body.contains("Panel de Control"));
    assert!(body.contains("No tienes seguimientos atrasados"));
}

#[test]
fn panel_avisa_de_seguimientos_atrasados() {
    let db = make_db("panel_pendientes");

    // A follow-up date in the past puts the project on the overdue list.
    handle(
        post_form(
            "/proyectos/nuevo",
            "nombre_obra=Torre+Atrasada&estado=Seguimiento&fecha_seguimiento=2020-01-01",
        ),
        &db,
    )
    .unwrap();

    let mut resp = handle(get("/"), &db).unwrap();
    let body = cuerpo_texto(&mut resp);

    assert!(body.contains("Torre Atrasada"));
    assert!(body.contains("seguimiento pendiente"));
}

#[test]
fn dashboard_vacio_muestra_el_aviso() {
    let db = make_db("dashboard_vacio");

    let mut resp = handle(get("/dashboard"), &db).unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let body = cuerpo_texto(&mut resp);
    assert!(body.contains("Todavía no hay proyectos"));
}

#[test]
fn dashboard_muestra_kpis_y_ganados() {
    let db = make_db("dashboard_kpis");

    handle(
        post_form(
            "/proyectos/nuevo",
            "nombre_obra=Torre+Mar&estado=Ganado&potencial_eur=250000&provincia=M%C3%A1laga&cliente_principal=Aedas",
        ),
        &db,
    )
    .unwrap();
    handle(
        post_form(
            "/proyectos/nuevo",
            "nombre_obra=Residencial+Sur&estado=Detectado&potencial_eur=100000&provincia=Madrid",
        ),
        &db,
    )
    .unwrap();

    let mut resp = handle(get("/dashboard"), &db).unwrap();
    let body = cuerpo_texto(&mut resp);

    assert!(body.contains("Proyectos totales"));
    // total potential, formatted with thousands separators
    assert!(body.contains("350,000"));
    // both projects were created this month, so the series has a bucket
    assert!(body.contains("Proyectos por mes"));
    // the won project shows up in the winners table with its promoter
    assert!(body.contains("Torre Mar"));
    assert!(body.contains("Aedas"));
    // win ratio: 1 of 2
    assert!(body.contains("50.0%"));
}

#[test]
fn kanban_pinta_las_ocho_columnas() {
    let db = make_db("kanban_columnas");

    handle(
        post_form(
            "/proyectos/nuevo",
            "nombre_obra=Obra+Kanban&estado=Negociaci%C3%B3n&potencial_eur=5000",
        ),
        &db,
    )
    .unwrap();

    let mut resp = handle(get("/kanban"), &db).unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let body = cuerpo_texto(&mut resp);
    for estado in crate::domain::ESTADOS_PIPELINE {
        assert!(body.contains(estado), "missing column {estado}");
    }
    assert!(body.contains("Obra Kanban"));
}
