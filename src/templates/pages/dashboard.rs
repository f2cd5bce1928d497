use crate::domain::analitica::{
    FilaFunnel, FilaMes, FilaPrioridad, FilaPromotora, FilaProvincia, Kpis,
};
use crate::templates::{card, card_light, desktop_layout, formato_eur, metric};
use maud::{html, Markup};

pub struct GanadoVm {
    pub nombre_obra: String,
    pub promotora: String,
    pub ciudad: String,
    pub provincia: String,
    pub potencial_eur: f64,
    pub fecha_creacion: String,
}

pub struct DashboardVm {
    pub kpis: Kpis,
    pub funnel: Vec<FilaFunnel>,
    pub mensual: Vec<FilaMes>,
    /// Raw `potencial_eur` series, binned here for the distribution card.
    pub potenciales: Vec<f64>,
    pub prioridades: Vec<FilaPrioridad>,
    /// Already cut to the eight biggest provinces.
    pub provincias: Vec<FilaProvincia>,
    pub ranking: Vec<FilaPromotora>,
    pub ganados: Vec<GanadoVm>,
}

pub fn dashboard_page(vm: &DashboardVm) -> Markup {
    desktop_layout(
        "Dashboard",
        "/dashboard",
        html! {
            (card(
                "Dashboard",
                "📊 Analítica del CRM",
                "Vista global de tu pipeline de prescripción: estados, prioridades, potencial económico y distribución geográfica.",
            ))

            @if vm.kpis.total_proyectos == 0 {
                p class="aviso" { "Todavía no hay proyectos en el CRM para mostrar en el dashboard." }
            } @else {
                div class="metricas" style="margin-bottom: 20px;" {
                    (metric("Proyectos totales", &vm.kpis.total_proyectos.to_string()))
                    (metric("Proyectos activos", &vm.kpis.proyectos_activos.to_string()))
                    (metric("Potencial total (€)", &formato_eur(vm.kpis.total_potencial)))
                    (metric("Ticket medio (€)", &formato_eur(vm.kpis.ticket_medio)))
                    (metric("Ratio ganados", &format!("{:.1}%", vm.kpis.ratio_ganados)))
                }

                (card_light("Pipeline por estado", barras_funnel(&vm.funnel)))

                (card_light("📈 Proyectos por mes", html! {
                    @if vm.mensual.is_empty() {
                        p class="aviso" { "Sin fechas de creación registradas." }
                    } @else {
                        (barras_mensuales(&vm.mensual))
                    }
                }))

                (card_light("Distribución del potencial", histograma_potencial(&vm.potenciales)))

                (card_light("Prioridades", html! {
                    table class="tabla" {
                        thead { tr { th { "Prioridad" } th { "Proyectos" } } }
                        tbody {
                            @for fila in &vm.prioridades {
                                tr { td { (fila.prioridad) } td { (fila.proyectos) } }
                            }
                        }
                    }
                }))

                (card_light("Potencial por provincia", html! {
                    @if vm.provincias.is_empty() {
                        p class="aviso" { "Sin datos de provincia." }
                    } @else {
                        table class="tabla" {
                            thead { tr { th { "Provincia" } th { "Proyectos" } th { "Potencial (€)" } } }
                            tbody {
                                @for fila in &vm.provincias {
                                    tr {
                                        td { (fila.provincia) }
                                        td { (fila.proyectos) }
                                        td { (formato_eur(fila.potencial)) }
                                    }
                                }
                            }
                        }
                    }
                }))

                (card_light("Ranking de promotoras", html! {
                    @if vm.ranking.is_empty() {
                        p class="aviso" { "Sin datos de promotoras." }
                    } @else {
                        table class="tabla" {
                            thead { tr { th { "Promotora / Cliente principal" } th { "Proyectos" } th { "Potencial (€)" } } }
                            tbody {
                                @for fila in &vm.ranking {
                                    tr {
                                        td { (fila.promotora) }
                                        td { (fila.proyectos) }
                                        td { (formato_eur(fila.potencial)) }
                                    }
                                }
                            }
                        }
                    }
                }))

                (card_light("🏆 Proyectos ganados", html! {
                    @if vm.ganados.is_empty() {
                        p class="aviso" { "No hay proyectos ganados todavía." }
                    } @else {
                        table class="tabla" {
                            thead {
                                tr {
                                    th { "Obra" }
                                    th { "Promotora" }
                                    th { "Ciudad" }
                                    th { "Provincia" }
                                    th { "Potencial (€)" }
                                    th { "Creado" }
                                }
                            }
                            tbody {
                                @for g in &vm.ganados {
                                    tr {
                                        td { (g.nombre_obra) }
                                        td { (g.promotora) }
                                        td { (g.ciudad) }
                                        td { (g.provincia) }
                                        td { (formato_eur(g.potencial_eur)) }
                                        td { (g.fecha_creacion) }
                                    }
                                }
                            }
                        }
                    }
                }))
            }
        },
    )
}

const TRAMOS_POTENCIAL: [(&str, f64, f64); 5] = [
    ("< 50k €", f64::NEG_INFINITY, 50_000.0),
    ("50k – 100k €", 50_000.0, 100_000.0),
    ("100k – 250k €", 100_000.0, 250_000.0),
    ("250k – 500k €", 250_000.0, 500_000.0),
    ("≥ 500k €", 500_000.0, f64::INFINITY),
];

/// Fixed-range histogram over the raw potential series.
fn histograma_potencial(potenciales: &[f64]) -> Markup {
    let conteos: Vec<(&str, usize)> = TRAMOS_POTENCIAL
        .iter()
        .map(|(etiqueta, desde, hasta)| {
            let n = potenciales
                .iter()
                .filter(|v| **v >= *desde && **v < *hasta)
                .count();
            (*etiqueta, n)
        })
        .collect();
    let maximo = conteos.iter().map(|(_, n)| *n).max().unwrap_or(0).max(1);

    html! {
        table class="tabla" {
            tbody {
                @for (etiqueta, n) in &conteos {
                    tr {
                        td style="width: 130px;" { (etiqueta) }
                        td {
                            div class="barra-fondo" {
                                div class="barra" style=(format!("width: {}%;", n * 100 / maximo)) {}
                            }
                        }
                        td style="width: 60px; text-align: right;" { (n) }
                    }
                }
            }
        }
    }
}

/// Horizontal bar per month, scaled against the busiest one.
fn barras_mensuales(mensual: &[FilaMes]) -> Markup {
    let maximo = mensual.iter().map(|f| f.proyectos).max().unwrap_or(0).max(1);
    html! {
        table class="tabla" {
            tbody {
                @for fila in mensual {
                    tr {
                        td style="width: 100px;" { (fila.anio_mes) }
                        td {
                            div class="barra-fondo" {
                                div class="barra" style=(format!("width: {}%;", fila.proyectos * 100 / maximo)) {}
                            }
                        }
                        td style="width: 60px; text-align: right;" { (fila.proyectos) }
                    }
                }
            }
        }
    }
}

/// Horizontal bar per stage, scaled against the busiest one.
fn barras_funnel(funnel: &[FilaFunnel]) -> Markup {
    let maximo = funnel.iter().map(|f| f.proyectos).max().unwrap_or(0).max(1);
    html! {
        table class="tabla" {
            tbody {
                @for fila in funnel {
                    tr {
                        td style="width: 160px;" { (fila.estado) }
                        td {
                            div class="barra-fondo" {
                                div class="barra" style=(format!("width: {}%;", fila.proyectos * 100 / maximo)) {}
                            }
                        }
                        td style="width: 60px; text-align: right;" { (fila.proyectos) }
                    }
                }
            }
        }
    }
}
