use crate::templates::estilos::HOJA_ESTILOS;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const SECCIONES: [(&str, &str); 6] = [
    ("/", "Panel"),
    ("/dashboard", "Dashboard"),
    ("/kanban", "Kanban"),
    ("/proyectos", "Proyectos"),
    ("/clientes", "Clientes"),
    ("/buscar", "Buscar"),
];

/// Shared chrome of every page: head with the embedded stylesheet, top
/// bar with the section nav, and the page content inside a container.
pub fn desktop_layout(title: &str, activo: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · CRM Prescripción" }
                style { (PreEscaped(HOJA_ESTILOS)) }
            }
            body {
                header class="topbar" {
                    span class="topbar-title" { "🏗️ CRM Prescripción" }
                    nav {
                        @for (ruta, nombre) in SECCIONES {
                            @if ruta == activo {
                                a href=(ruta) class="activo" { (nombre) }
                            } @else {
                                a href=(ruta) { (nombre) }
                            }
                        }
                    }
                }
                main class="contenedor" {
                    (content)
                }
            }
        }
    }
}
