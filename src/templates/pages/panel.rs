use crate::templates::{card, card_light, desktop_layout, metric};
use maud::{html, Markup};

pub struct SeguimientoVm {
    pub nombre_obra: String,
    pub fecha_seguimiento: String,
    pub cliente_principal: String,
    pub estado: String,
    pub notas: String,
}

pub struct PanelVm {
    pub total_clientes: usize,
    pub total_proyectos: usize,
    pub proyectos_activos: usize,
    pub pendientes: Vec<SeguimientoVm>,
}

pub fn panel_page(vm: &PanelVm) -> Markup {
    desktop_layout(
        "Panel de Control",
        "/",
        html! {
            (card("Inicio", "⚡ Panel de Control", "Resumen rápido del CRM y seguimientos pendientes."))

            div class="metricas" style="margin-bottom: 20px;" {
                (metric("Clientes en CRM", &vm.total_clientes.to_string()))
                (metric("Proyectos totales", &vm.total_proyectos.to_string()))
                (metric("Proyectos activos", &vm.proyectos_activos.to_string()))
            }

            (card_light("🚨 Seguimientos pendientes (hoy o pasados)", html! {
                @if vm.pendientes.is_empty() {
                    p class="exito" { "No tienes seguimientos atrasados. ✅" }
                } @else {
                    p class="alerta" {
                        "Tienes " (vm.pendientes.len()) " proyectos con seguimiento pendiente."
                    }
                    table class="tabla" {
                        thead {
                            tr {
                                th { "Obra" }
                                th { "Seguimiento" }
                                th { "Cliente principal" }
                                th { "Estado" }
                                th { "Notas" }
                            }
                        }
                        tbody {
                            @for p in &vm.pendientes {
                                tr {
                                    td { "⏰ " (p.nombre_obra) }
                                    td { (p.fecha_seguimiento) }
                                    td { (p.cliente_principal) }
                                    td { (p.estado) }
                                    td { (p.notas) }
                                }
                            }
                        }
                    }
                }
            }))
        },
    )
}
