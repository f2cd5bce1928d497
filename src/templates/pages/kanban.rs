use crate::domain::kanban::ColumnaKanban;
use crate::templates::{card, desktop_layout, formato_eur};
use maud::{html, Markup};

pub fn kanban_page(columnas: &[ColumnaKanban]) -> Markup {
    desktop_layout(
        "Kanban",
        "/kanban",
        html! {
            (card(
                "Kanban",
                "Pipeline Kanban",
                "Visualiza tus proyectos en columnas por estado, estilo Salesforce.",
            ))

            div class="kanban" {
                @for columna in columnas {
                    div class="kanban-col" {
                        h4 { (columna.estado) }
                        @if columna.tarjetas.is_empty() {
                            div class="card-light kanban-vacia" { "Sin proyectos" }
                        }
                        @for tarjeta in &columna.tarjetas {
                            div class="kanban-tarjeta" {
                                div class="titulo" { (tarjeta.nombre_obra) }
                                div class="detalle" { (tarjeta.cliente_principal) " — " (tarjeta.ciudad) }
                                div style="margin-top: 4px;" {
                                    strong { "Potencial: " } (formato_eur(tarjeta.potencial_eur)) " €"
                                }
                                div {
                                    strong { "Prioridad: " } (tarjeta.prioridad)
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
