use crate::domain::analitica::FilaFunnel;
use crate::domain::{ESTADOS_PIPELINE, PRIORIDADES};
use crate::templates::{card, card_light, desktop_layout, formato_eur};
use maud::{html, Markup};

/// Active list filters, straight from the query string. Empty string
/// means "no filter".
#[derive(Default, Clone)]
pub struct FiltrosProyectos {
    pub estado: String,
    pub prioridad: String,
    pub provincia: String,
    pub q: String,
}

pub struct ObraFilaVm {
    pub id: String,
    pub nombre_obra: String,
    pub cliente_principal: String,
    pub ciudad: String,
    pub provincia: String,
    pub estado: String,
    pub prioridad: String,
    pub potencial_eur: f64,
    pub fecha_seguimiento: String,
}

/// Prefilled values for the edit form.
pub struct EdicionVm {
    pub id: String,
    pub nombre_obra: String,
    pub cliente_principal: String,
    pub ciudad: String,
    pub provincia: String,
    pub estado: String,
    pub prioridad: String,
    pub potencial_eur: f64,
    pub fecha_seguimiento: String,
    pub notas_seguimiento: String,
}

pub struct ProyectosVm {
    pub pipeline: Vec<FilaFunnel>,
    pub obras: Vec<ObraFilaVm>,
    pub filtros: FiltrosProyectos,
    /// Distinct provinces present in the data, for the filter dropdown.
    pub provincias: Vec<String>,
    pub edicion: Option<EdicionVm>,
    /// Set after a spreadsheet import redirect.
    pub importados: Option<usize>,
}

pub fn proyectos_page(vm: &ProyectosVm) -> Markup {
    desktop_layout(
        "Proyectos",
        "/proyectos",
        html! {
            (card(
                "Obras",
                "Proyectos",
                "Listado de obras en prescripción: filtra, edita y gestiona el pipeline.",
            ))

            @if let Some(n) = vm.importados {
                p class="exito" { "Proyectos importados desde Excel: " (n) "." }
            }

            // Pipeline counters over the filtered set.
            div class="metricas" style="margin-bottom: 20px;" {
                @for fila in &vm.pipeline {
                    div class="metrica" {
                        div class="etiqueta" { (fila.estado) }
                        div class="valor" { (fila.proyectos) }
                    }
                }
            }

            @if let Some(edicion) = &vm.edicion {
                (formulario_edicion(edicion))
            }

            (card_light("🔎 Filtros", formulario_filtros(vm)))

            (card_light("📂 Lista de proyectos", html! {
                @if vm.obras.is_empty() {
                    p class="aviso" { "No hay proyectos que cumplan los filtros seleccionados." }
                } @else {
                    table class="tabla" {
                        thead {
                            tr {
                                th { "Obra" }
                                th { "Cliente principal" }
                                th { "Ciudad" }
                                th { "Provincia" }
                                th { "Estado" }
                                th { "Prioridad" }
                                th { "Potencial (€)" }
                                th { "Seguimiento" }
                                th { "Acciones" }
                            }
                        }
                        tbody {
                            @for obra in &vm.obras {
                                tr {
                                    td { (obra.nombre_obra) }
                                    td { (obra.cliente_principal) }
                                    td { (obra.ciudad) }
                                    td { (obra.provincia) }
                                    td { (obra.estado) }
                                    td { (obra.prioridad) }
                                    td { (formato_eur(obra.potencial_eur)) }
                                    td { (obra.fecha_seguimiento) }
                                    td {
                                        a class="boton enlace" style="margin-top: 0; padding: 3px 8px;"
                                            href=(format!("/proyectos?editar={}", obra.id)) { "✏️" }
                                        form action="/proyectos/borrar" method="post" style="display: inline; margin: 0;" {
                                            input type="hidden" name="id" value=(obra.id);
                                            button type="submit" class="peligro"
                                                onclick="return confirm('¿Borrar esta obra?');" { "🗑️" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }))

            (card_light("➕ Añadir nueva obra", formulario_alta()))

            (card_light("📄 Excel", html! {
                p {
                    a class="boton" href="/proyectos/exportar" { "Descargar obras importantes (.xlsx)" }
                }
                form action="/proyectos/importar" method="post" enctype="multipart/form-data" style="margin-top: 8px;" {
                    label for="archivo" { "Importar proyectos desde Excel de scouting:" }
                    input type="file" id="archivo" name="archivo" accept=".xlsx" required;
                    button type="submit" { "Importar" }
                }
            }))
        },
    )
}

fn formulario_filtros(vm: &ProyectosVm) -> Markup {
    let filtros = &vm.filtros;
    html! {
        form class="formulario" action="/proyectos" method="get" {
            div class="form-columnas" {
                div {
                    label for="estado" { "Estado" }
                    select id="estado" name="estado" {
                        option value="" selected[filtros.estado.is_empty()] { "Todos" }
                        @for estado in ESTADOS_PIPELINE {
                            option value=(estado) selected[filtros.estado == estado] { (estado) }
                        }
                    }
                    label for="prioridad" { "Prioridad" }
                    select id="prioridad" name="prioridad" {
                        option value="" selected[filtros.prioridad.is_empty()] { "Todas" }
                        @for prioridad in PRIORIDADES {
                            option value=(prioridad) selected[filtros.prioridad == prioridad] { (prioridad) }
                        }
                    }
                }
                div {
                    label for="provincia" { "Provincia" }
                    select id="provincia" name="provincia" {
                        option value="" selected[filtros.provincia.is_empty()] { "Todas" }
                        @for provincia in &vm.provincias {
                            option value=(provincia) selected[&filtros.provincia == provincia] { (provincia) }
                        }
                    }
                    label for="q" { "Buscar (obra, cliente o ciudad)" }
                    input type="text" id="q" name="q" value=(filtros.q);
                }
            }
            button type="submit" { "Aplicar filtros" }
            " "
            a class="boton enlace" href="/proyectos" { "Limpiar" }
        }
    }
}

fn formulario_alta() -> Markup {
    html! {
        form class="formulario" action="/proyectos/nuevo" method="post" {
            div class="form-columnas" {
                div {
                    label for="nombre_obra" { "Nombre de la obra" }
                    input type="text" id="nombre_obra" name="nombre_obra" required;
                    label for="cliente_principal" { "Cliente principal (promotora)" }
                    input type="text" id="cliente_principal" name="cliente_principal";
                    label for="ciudad" { "Ciudad" }
                    input type="text" id="ciudad" name="ciudad";
                    label for="provincia" { "Provincia" }
                    input type="text" id="provincia" name="provincia";
                }
                div {
                    label for="estado_alta" { "Estado" }
                    select id="estado_alta" name="estado" {
                        @for estado in ESTADOS_PIPELINE {
                            option value=(estado) { (estado) }
                        }
                    }
                    label for="prioridad_alta" { "Prioridad" }
                    select id="prioridad_alta" name="prioridad" {
                        @for prioridad in PRIORIDADES {
                            option value=(prioridad) selected[prioridad == "Media"] { (prioridad) }
                        }
                    }
                    label for="potencial_eur" { "Potencial (€)" }
                    input type="number" id="potencial_eur" name="potencial_eur" min="0" step="1000" value="0";
                    label for="fecha_seguimiento" { "Próximo seguimiento" }
                    input type="date" id="fecha_seguimiento" name="fecha_seguimiento";
                }
            }
            label for="notas_seguimiento" { "Notas" }
            textarea id="notas_seguimiento" name="notas_seguimiento" rows="3" {}
            button type="submit" { "Guardar obra" }
        }
    }
}

fn formulario_edicion(edicion: &EdicionVm) -> Markup {
    card_light(
        "✏️ Editar obra",
        html! {
            form class="formulario" action="/proyectos/editar" method="post" {
                input type="hidden" name="id" value=(edicion.id);
                div class="form-columnas" {
                    div {
                        label for="e_nombre_obra" { "Nombre de la obra" }
                        input type="text" id="e_nombre_obra" name="nombre_obra" value=(edicion.nombre_obra) required;
                        label for="e_cliente" { "Cliente principal (promotora)" }
                        input type="text" id="e_cliente" name="cliente_principal" value=(edicion.cliente_principal);
                        label for="e_ciudad" { "Ciudad" }
                        input type="text" id="e_ciudad" name="ciudad" value=(edicion.ciudad);
                        label for="e_provincia" { "Provincia" }
                        input type="text" id="e_provincia" name="provincia" value=(edicion.provincia);
                    }
                    div {
                        label for="e_estado" { "Estado" }
                        select id="e_estado" name="estado" {
                            @for estado in ESTADOS_PIPELINE {
                                option value=(estado) selected[edicion.estado == estado] { (estado) }
                            }
                        }
                        label for="e_prioridad" { "Prioridad" }
                        select id="e_prioridad" name="prioridad" {
                            @for prioridad in PRIORIDADES {
                                option value=(prioridad) selected[edicion.prioridad == prioridad] { (prioridad) }
                            }
                        }
                        label for="e_potencial" { "Potencial (€)" }
                        input type="number" id="e_potencial" name="potencial_eur" min="0" step="1000"
                            value=(format!("{:.0}", edicion.potencial_eur));
                        label for="e_seguimiento" { "Próximo seguimiento" }
                        input type="date" id="e_seguimiento" name="fecha_seguimiento" value=(edicion.fecha_seguimiento);
                    }
                }
                label for="e_notas" { "Notas" }
                textarea id="e_notas" name="notas_seguimiento" rows="3" { (edicion.notas_seguimiento) }
                button type="submit" { "Guardar cambios" }
                " "
                a class="boton enlace" href="/proyectos" { "Cancelar" }
            }
        },
    )
}
